use std::fmt;

/// Represents a user in the system
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub is_bot: bool,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
            is_bot: false,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Mark the user as an automated account
    pub fn bot(mut self) -> Self {
        self.is_bot = true;
        self
    }

    pub fn display_name(&self) -> String {
        self.username.clone().unwrap_or_else(|| self.id.clone())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A user as seen from inside a guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user: User,
    pub nickname: Option<String>,
}

impl Member {
    pub fn new(user: User) -> Self {
        Self { user, nickname: None }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn display_name(&self) -> String {
        self.nickname.clone().unwrap_or_else(|| self.user.display_name())
    }
}

/// A text channel inside a guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(User::new("42").display_name(), "42");
        assert_eq!(User::new("42").with_username("ada").display_name(), "ada");
    }

    #[test]
    fn test_member_prefers_nickname() {
        let member = Member::new(User::new("1").with_username("ada"));
        assert_eq!(member.display_name(), "ada");
        assert_eq!(member.with_nickname("countess").display_name(), "countess");
    }
}
