use std::fmt;
use std::sync::Arc;

use super::User;
use crate::domain::traits::Guild;

/// Where a message was sent
#[derive(Clone)]
pub enum Scope {
    /// One-to-one conversation with the bot
    Direct,
    /// Channel inside a guild, with access to its members and channels
    Group { guild: Arc<dyn Guild> },
}

impl Scope {
    pub fn group(guild: Arc<dyn Guild>) -> Self {
        Scope::Group { guild }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, Scope::Direct)
    }

    pub fn guild(&self) -> Option<&Arc<dyn Guild>> {
        match self {
            Scope::Group { guild } => Some(guild),
            Scope::Direct => None,
        }
    }

    /// Key used for per-scope prefix overrides
    pub fn id(&self) -> Option<&str> {
        self.guild().map(|g| g.id())
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Direct => write!(f, "Direct"),
            Scope::Group { guild } => f.debug_struct("Group").field("guild", &guild.id()).finish(),
        }
    }
}

/// Represents an incoming message
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender: User,
    pub scope: Scope,
    pub content: String,
    /// Display name of the sender inside the guild, when known
    pub member_name: Option<String>,
}

impl Message {
    pub fn new(chat_id: impl Into<String>, sender: User, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: chat_id.into(),
            sender,
            scope: Scope::Direct,
            content: content.into(),
            member_name: None,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_member_name(mut self, name: impl Into<String>) -> Self {
        self.member_name = Some(name.into());
        self
    }

    /// Name to address the sender by
    pub fn display_name(&self) -> String {
        self.member_name
            .clone()
            .unwrap_or_else(|| self.sender.display_name())
    }
}
