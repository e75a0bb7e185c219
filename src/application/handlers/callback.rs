//! Leaf handler running a single callback

use std::future::Future;

use async_trait::async_trait;

use super::{boxed_action, boxed_fallback, guarded, Action, ErrorFallback, Handler, HandlerResult, Params};
use crate::application::errors::CommandError;
use crate::domain::entities::Command;

/// Handle a command through a callback function
pub struct CallbackHandler {
    action: Action,
    on_error: Option<ErrorFallback>,
}

impl CallbackHandler {
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self {
            action: boxed_action(action),
            on_error: None,
        }
    }

    /// Recover from errors raised by the callback
    pub fn on_error<F, Fut>(mut self, fallback: F) -> Self
    where
        F: Fn(CommandError, Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.on_error = Some(boxed_fallback(fallback));
        self
    }
}

#[async_trait]
impl Handler for CallbackHandler {
    async fn run(&self, params: Params, _command: &Command) -> HandlerResult {
        guarded(self.on_error.as_ref(), params, |params| (self.action)(params)).await
    }
}
