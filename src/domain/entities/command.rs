use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::application::handlers::Handler;

/// Nested handlers keyed by lowercase subcommand name
pub type Subcommands = HashMap<String, Arc<dyn Handler>>;

/// What a command does when invoked
#[derive(Clone)]
pub enum CommandKind {
    /// Template line re-parsed with the invocation's arguments
    Alias(String),
    /// Handler chain run with the invocation's arguments
    Handler(Arc<dyn Handler>),
}

impl fmt::Debug for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Alias(template) => f.debug_tuple("Alias").field(template).finish(),
            CommandKind::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// Represents a bot command
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub kind: CommandKind,
    pub synonyms: Vec<String>,
    pub description: Option<String>,
    pub usage: Option<String>,
    pub subcommands: Option<Subcommands>,
}

impl Command {
    pub fn alias(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self::with_kind(name, CommandKind::Alias(template.into()))
    }

    pub fn handler<H: Handler + 'static>(name: impl Into<String>, handler: H) -> Self {
        Self::with_kind(name, CommandKind::Handler(Arc::new(handler)))
    }

    pub fn with_kind(name: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            name: name.into(),
            kind,
            synonyms: Vec::new(),
            description: None,
            usage: None,
            subcommands: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Add a subcommand borrowed by a `SubcommandHandler` that has none of its own
    pub fn with_subcommand<H: Handler + 'static>(mut self, name: &str, handler: H) -> Self {
        self.subcommands
            .get_or_insert_with(HashMap::new)
            .insert(name.to_lowercase(), Arc::new(handler));
        self
    }

    pub fn alias_template(&self) -> Option<&str> {
        match &self.kind {
            CommandKind::Alias(template) => Some(template),
            CommandKind::Handler(_) => None,
        }
    }

    pub fn handler_chain(&self) -> Option<&Arc<dyn Handler>> {
        match &self.kind {
            CommandKind::Handler(handler) => Some(handler),
            CommandKind::Alias(_) => None,
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("synonyms", &self.synonyms)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Payload accepted by `hook`: an alias template, a handler, or a full command
pub enum CommandSource {
    Alias(String),
    Handler(Arc<dyn Handler>),
    Command(Arc<Command>),
}

impl CommandSource {
    /// Normalise into a command registered under `name`
    pub fn into_command(self, name: &str) -> Arc<Command> {
        match self {
            CommandSource::Alias(template) => Arc::new(Command::alias(name, template)),
            CommandSource::Handler(handler) => {
                Arc::new(Command::with_kind(name, CommandKind::Handler(handler)))
            }
            CommandSource::Command(command) => command,
        }
    }
}

impl From<&str> for CommandSource {
    fn from(template: &str) -> Self {
        CommandSource::Alias(template.to_string())
    }
}

impl From<String> for CommandSource {
    fn from(template: String) -> Self {
        CommandSource::Alias(template)
    }
}

impl<H: Handler + 'static> From<H> for CommandSource {
    fn from(handler: H) -> Self {
        CommandSource::Handler(Arc::new(handler))
    }
}

impl From<Arc<dyn Handler>> for CommandSource {
    fn from(handler: Arc<dyn Handler>) -> Self {
        CommandSource::Handler(handler)
    }
}

impl From<Command> for CommandSource {
    fn from(command: Command) -> Self {
        CommandSource::Command(Arc::new(command))
    }
}

impl From<Arc<Command>> for CommandSource {
    fn from(command: Arc<Command>) -> Self {
        CommandSource::Command(command)
    }
}
