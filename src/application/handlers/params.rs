//! Parameters handed to every handler in a chain

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::application::errors::{CommandError, CommandResult};
use crate::domain::entities::{Argument, Message};
use crate::domain::traits::Bot;

/// Side-channel data shared by every handler invocation of a registry
#[derive(Debug, Clone, Default)]
pub struct DataBag {
    inner: Arc<RwLock<HashMap<String, Value>>>,
}

impl DataBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().get(key).cloned()
    }

    /// Store a value, returning the previous one
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.inner.write().insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.inner.write().remove(key)
    }

    /// Keys in sorted order
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// True when both bags share the same storage
    pub fn ptr_eq(&self, other: &DataBag) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Everything a handler knows about the invocation
#[derive(Clone)]
pub struct Params {
    pub message: Arc<Message>,
    pub display_name: String,
    /// Remaining arguments; subcommand dispatch consumes from the front
    pub args: VecDeque<Argument>,
    pub data: DataBag,
    pub bot: Arc<dyn Bot>,
}

impl Params {
    pub fn new(message: Arc<Message>, data: DataBag, bot: Arc<dyn Bot>) -> Self {
        Self {
            display_name: message.display_name(),
            message,
            args: VecDeque::new(),
            data,
            bot,
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = Argument>) -> Self {
        self.args = args.into_iter().collect();
        self
    }

    pub fn arg(&self, index: usize) -> Option<&Argument> {
        self.args.get(index)
    }

    /// Values of all remaining arguments joined by spaces
    pub fn rest(&self) -> String {
        self.args
            .iter()
            .map(Argument::value)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Reply in the chat the message came from
    pub async fn reply(&self, text: impl AsRef<str>) -> CommandResult<()> {
        self.bot
            .send_message(&self.message.chat_id, text.as_ref())
            .await
            .map(|_| ())
            .map_err(|e| CommandError::Reply(e.to_string()))
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Params")
            .field("message", &self.message.id)
            .field("display_name", &self.display_name)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}
