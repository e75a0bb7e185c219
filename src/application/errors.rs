//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Errors raised while running a handler chain
#[derive(Error, Debug)]
pub enum CommandError {
    /// A subcommand dispatcher has no mapping of its own and its command carries none
    #[error("Subcommands not defined for command '{0}'")]
    MissingSubcommands(String),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Reply failed: {0}")]
    Reply(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CommandError {
    /// Configuration mistakes surface loudly instead of being recovered by fallbacks
    pub fn is_configuration(&self) -> bool {
        matches!(self, CommandError::MissingSubcommands(_))
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type CommandResult<T> = Result<T, CommandError>;
