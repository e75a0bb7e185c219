//! Application services - Command registry and built-in commands

pub mod builtins;
pub mod registry;

pub use builtins::register_defaults;
pub use registry::{CommandRegistry, DEFAULT_PREFIX};
