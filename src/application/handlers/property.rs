//! Getter/setter handler for a single named property

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use super::{boxed_fallback, guarded, ErrorFallback, Handler, HandlerResult, Params};
use crate::application::errors::CommandError;
use crate::domain::entities::Command;

/// Getter or setter, called with the property key
pub type Accessor = Arc<dyn Fn(String, Params) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Calls the getter when no arguments remain, the setter otherwise
pub struct PropertyHandler {
    key: String,
    getter: Accessor,
    setter: Accessor,
    on_error: Option<ErrorFallback>,
}

impl PropertyHandler {
    pub fn new<G, GFut, S, SFut>(key: impl Into<String>, getter: G, setter: S) -> Self
    where
        G: Fn(String, Params) -> GFut + Send + Sync + 'static,
        GFut: Future<Output = HandlerResult> + Send + 'static,
        S: Fn(String, Params) -> SFut + Send + Sync + 'static,
        SFut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self {
            key: key.into(),
            getter: Arc::new(move |key, params| Box::pin(getter(key, params))),
            setter: Arc::new(move |key, params| Box::pin(setter(key, params))),
            on_error: None,
        }
    }

    /// Property stored in the registry's data bag under `key`
    pub fn data(key: impl Into<String>) -> Self {
        Self::new(
            key,
            |key, params: Params| async move {
                let value = params
                    .data
                    .get(&key)
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .unwrap_or_else(|| "(unset)".to_string());
                params.reply(format!("{} = {}", key, value)).await
            },
            |key, params: Params| async move {
                let value = params.rest();
                params.data.set(key.as_str(), value.as_str());
                params.reply(format!("{} set to {}", key, value)).await
            },
        )
    }

    pub fn key(&self) -> &str {
        &self.key
    }

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
impl Handler for PropertyHandler {
    async fn run(&self, params: Params, _command: &Command) -> HandlerResult {
        guarded(self.on_error.as_ref(), params, |params| {
            let accessor = if params.args.is_empty() {
                &self.getter
            } else {
                &self.setter
            };
            accessor(self.key.clone(), params)
        })
        .await
    }
}
