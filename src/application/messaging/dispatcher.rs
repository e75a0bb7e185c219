//! Message dispatcher - Routes messages to command handlers

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::alias::expand;
use crate::application::handlers::Params;
use crate::application::services::CommandRegistry;
use crate::domain::entities::{Argument, CommandKind, Message};
use crate::domain::parser::{tokenize, unquote};
use crate::domain::traits::{Bot, RouterEvent};

static LEADING_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<@!?(\d+)>").expect("mention pattern is valid")
});

/// What happened to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Not addressed to the bot, or no such command
    Ignored,
    /// A handler chain ran to completion
    Handled { command: String },
    /// A handler chain failed and nothing recovered the error
    Failed { command: String, error: String },
}

/// Routes incoming messages to the commands of a registry
pub struct Router {
    registry: Arc<CommandRegistry>,
    bot: Arc<dyn Bot>,
    max_alias_depth: Option<usize>,
}

impl Router {
    pub fn new(registry: Arc<CommandRegistry>, bot: Arc<dyn Bot>) -> Self {
        Self {
            registry,
            bot,
            max_alias_depth: None,
        }
    }

    /// Limit how many aliases a single message may expand through.
    ///
    /// Unlimited by default; a self-referencing alias then never terminates.
    pub fn with_max_alias_depth(mut self, depth: Option<usize>) -> Self {
        self.max_alias_depth = depth;
        self
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Parse a message and run the command it invokes, if any
    pub async fn parse(&self, message: Message) -> Dispatch {
        self.parse_line(Arc::new(message), None).await
    }

    /// Parse `line` in the context of `message`; without a line the message
    /// content is used once the prefix or mention is stripped
    pub async fn parse_line(&self, message: Arc<Message>, line: Option<String>) -> Dispatch {
        if message.sender.is_bot {
            return Dispatch::Ignored;
        }

        let line = match line {
            Some(line) => line,
            None => match self.extract_line(&message) {
                Some(line) => line,
                None => return Dispatch::Ignored,
            },
        };

        self.dispatch(message, line).await
    }

    /// Strip the prefix or a mention of the bot, or take a direct message verbatim
    fn extract_line(&self, message: &Message) -> Option<String> {
        let content = message.content.as_str();
        let prefix = self.registry.prefix_for(message.scope.id());

        if let Some(rest) = content.strip_prefix(prefix.as_str()) {
            if !prefix.is_empty() && !rest.is_empty() {
                return Some(rest.to_string());
            }
        }

        if let Some(caps) = LEADING_MENTION.captures(content) {
            if caps[1] == self.bot.bot_info().id {
                return Some(content[caps[0].len()..].trim_start().to_string());
            }
        }

        message.scope.is_direct().then(|| content.to_string())
    }

    async fn dispatch(&self, message: Arc<Message>, mut line: String) -> Dispatch {
        let mut depth = 0;

        loop {
            let mut tokens = tokenize(&line).into_iter();
            let Some(name) = tokens.next() else {
                return Dispatch::Ignored;
            };

            let name = unquote(&name).to_lowercase();
            let Some(command) = self.registry.resolve(&name) else {
                tracing::debug!("Ignoring unknown command '{}'", name);
                return Dispatch::Ignored;
            };

            let args: Vec<Argument> = tokens.map(|t| Argument::resolve(t, &message)).collect();

            match &command.kind {
                CommandKind::Alias(template) => {
                    depth += 1;
                    if self.max_alias_depth.is_some_and(|max| depth > max) {
                        let event = RouterEvent::AliasDepthExceeded {
                            command: name.clone(),
                            depth: depth - 1,
                        };
                        let error = event.to_string();
                        self.registry.report(event);
                        return Dispatch::Failed { command: name, error };
                    }

                    line = expand(template, &args);
                    tracing::debug!("Alias '{}' expanded to '{}'", name, line);
                    // A self-referencing alias must only hold up its own task
                    tokio::task::yield_now().await;
                }
                CommandKind::Handler(handler) => {
                    tracing::debug!("Running '{}' with {} argument(s)", name, args.len());

                    let params = Params::new(message.clone(), self.registry.data().clone(), self.bot.clone())
                        .with_args(args);

                    return match handler.run(params, &command).await {
                        Ok(()) => Dispatch::Handled { command: name },
                        Err(err) => {
                            if err.is_configuration() {
                                tracing::error!("Misconfigured command '{}': {}", name, err);
                            }
                            let error = err.to_string();
                            self.registry.report(RouterEvent::HandlerFailed {
                                command: name.clone(),
                                error: error.clone(),
                            });
                            Dispatch::Failed { command: name, error }
                        }
                    };
                }
            }
        }
    }
}
