//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Logging: Subscriber setup and the default event sink
//! - Adapters: Platform integrations (console)

pub mod adapters;
pub mod config;
pub mod logging;
