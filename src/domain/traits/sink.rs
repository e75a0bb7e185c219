use std::fmt;

/// Notable things the router does, reported to an [`EventSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    Hooked { name: String },
    Unhooked { name: String },
    HandlerFailed { command: String, error: String },
    AliasDepthExceeded { command: String, depth: usize },
}

impl fmt::Display for RouterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterEvent::Hooked { name } => write!(f, "Hook command '{}'.", name),
            RouterEvent::Unhooked { name } => write!(f, "Unhook command '{}'.", name),
            RouterEvent::HandlerFailed { command, error } => {
                write!(f, "Command '{}' failed: {}", command, error)
            }
            RouterEvent::AliasDepthExceeded { command, depth } => {
                write!(f, "Alias '{}' exceeded expansion depth {}", command, depth)
            }
        }
    }
}

/// Destination for router diagnostics
pub trait EventSink: Send + Sync {
    fn record(&self, event: &RouterEvent);
}
