//! Domain entities - Core business objects

pub mod argument;
pub mod command;
pub mod message;
pub mod user;

pub use argument::Argument;
pub use command::{Command, CommandKind, CommandSource, Subcommands};
pub use message::{Message, Scope};
pub use user::{Channel, Member, User};
