//! Message handling - alias expansion and dispatch

pub mod alias;
pub mod dispatcher;

pub use dispatcher::{Dispatch, Router};
pub use crate::domain::parser::{tokenize, unquote};
