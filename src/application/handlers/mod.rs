//! Handler chain - composable command handlers
//!
//! Every handler implements [`Handler::run`]. A handler may carry an error
//! fallback: when set, errors raised below it are handed to the fallback and
//! its result becomes the outcome; when unset, errors propagate unchanged to
//! the enclosing handler and finally to the dispatcher.

pub mod callback;
pub mod params;
pub mod property;
pub mod subcommand;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::application::errors::{CommandError, CommandResult};
use crate::domain::entities::Command;

pub use callback::CallbackHandler;
pub use params::{DataBag, Params};
pub use property::PropertyHandler;
pub use subcommand::SubcommandHandler;

/// Handler result
pub type HandlerResult = CommandResult<()>;

/// Callback run with the invocation's params
pub type Action = Arc<dyn Fn(Params) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Receives an error raised below a handler, together with the params
pub type ErrorFallback =
    Arc<dyn Fn(CommandError, Params) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// A node of the handler chain
#[async_trait]
pub trait Handler: Send + Sync {
    async fn run(&self, params: Params, command: &Command) -> HandlerResult;
}

pub(crate) fn boxed_action<F, Fut>(action: F) -> Action
where
    F: Fn(Params) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(move |params| Box::pin(action(params)))
}

pub(crate) fn boxed_fallback<F, Fut>(fallback: F) -> ErrorFallback
where
    F: Fn(CommandError, Params) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(move |err, params| Box::pin(fallback(err, params)))
}

/// Run `body`, routing any error to `on_error` when one is configured.
///
/// The fallback sees the params as they were when this handler was entered.
pub(crate) async fn guarded<F, Fut>(
    on_error: Option<&ErrorFallback>,
    params: Params,
    body: F,
) -> HandlerResult
where
    F: FnOnce(Params) -> Fut,
    Fut: Future<Output = HandlerResult>,
{
    let snapshot = on_error.map(|_| params.clone());

    match body(params).await {
        Ok(()) => Ok(()),
        Err(err) => match (on_error, snapshot) {
            (Some(fallback), Some(params)) => {
                tracing::debug!("Recovering from handler error: {}", err);
                fallback(err, params).await
            }
            _ => Err(err),
        },
    }
}
