//! Domain layer - Core routing types
//! 
//! This layer contains:
//! - Entities: Messages, commands, arguments and the users they reference
//! - Parser: Splitting a command line into quoted tokens
//! - Traits: Abstractions for infrastructure (Bot, Guild, EventSink)

pub mod entities;
pub mod parser;
pub mod traits;
