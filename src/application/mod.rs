//! Application layer - Routing logic
//! 
//! This layer contains:
//! - Handlers: The composable handler chain
//! - Messaging: Tokenizing, alias expansion, dispatching
//! - Services: Command registry and built-in commands
//! - Errors: Domain-specific errors

pub mod errors;
pub mod handlers;
pub mod messaging;
pub mod services;
