//! lazybot - text command routing for chat bots
//!
//! Lines are tokenized, resolved against a [`CommandRegistry`] of commands,
//! aliases and synonyms, and dispatched through a chain of [`Handler`]s.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::errors::{BotError, CommandError, ConfigError};
pub use application::handlers::{CallbackHandler, DataBag, Handler, HandlerResult, Params, PropertyHandler, SubcommandHandler};
pub use application::messaging::{Dispatch, Router};
pub use application::services::{register_defaults, CommandRegistry};
pub use domain::entities::{Argument, Command, CommandKind, Message, Scope, User};
pub use domain::traits::{Bot, BotInfo, EventSink, Guild, RouterEvent};
