//! Dispatcher that routes to a nested handler named by the next argument

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use super::{boxed_fallback, guarded, ErrorFallback, Handler, HandlerResult, Params};
use crate::application::errors::{CommandError, CommandResult};
use crate::domain::entities::{Command, Subcommands};

/// Gate run before dispatch; `Some(false)` stops it, `None` continues
pub type PreCheck = Arc<dyn Fn(Params) -> BoxFuture<'static, CommandResult<Option<bool>>> + Send + Sync>;

/// Handle parsing a subcommand and running its handler.
///
/// Without subcommands of its own, the ones carried by the command are used.
#[derive(Default)]
pub struct SubcommandHandler {
    subcommands: Option<Subcommands>,
    pre_check: Option<PreCheck>,
    on_error: Option<ErrorFallback>,
}

impl SubcommandHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subcommands(subcommands: Subcommands) -> Self {
        Self {
            subcommands: Some(subcommands),
            ..Self::default()
        }
    }

    pub fn subcommand<H: Handler + 'static>(mut self, name: &str, handler: H) -> Self {
        self.subcommands
            .get_or_insert_with(HashMap::new)
            .insert(name.to_lowercase(), Arc::new(handler));
        self
    }

    /// Gate run before the subcommand lookup; `Some(false)` skips it. An error
    /// from the check goes to this handler's `on_error` fallback like a
    /// subcommand failure would.
    pub fn pre_check<F, Fut>(mut self, check: F) -> Self
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CommandResult<Option<bool>>> + Send + 'static,
    {
        self.pre_check = Some(Arc::new(move |params| Box::pin(check(params))));
        self
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
impl Handler for SubcommandHandler {
    async fn run(&self, params: Params, command: &Command) -> HandlerResult {
        let subcommands = self
            .subcommands
            .as_ref()
            .or(command.subcommands.as_ref())
            .ok_or_else(|| CommandError::MissingSubcommands(command.name.clone()))?;

        guarded(self.on_error.as_ref(), params, |mut params| async move {
            if let Some(check) = &self.pre_check {
                if check(params.clone()).await? == Some(false) {
                    tracing::debug!("Pre-check stopped '{}'", command.name);
                    return Ok(());
                }
            }

            let Some(arg) = params.args.pop_front() else {
                return Ok(());
            };

            let name = arg.value().to_lowercase();
            let Some(handler) = subcommands.get(&name) else {
                tracing::debug!("Unknown subcommand '{} {}'", command.name, name);
                return Ok(());
            };

            handler.run(params, command).await
        })
        .await
    }
}
