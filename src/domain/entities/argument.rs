use std::fmt;

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::{Channel, Member, Message};
use crate::domain::parser::unquote;

static MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<([@#])!?(\d+)>$").expect("mention pattern is valid")
});

/// One parsed token following the command name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    value: String,
    token: String,
    member: Option<Member>,
    channel: Option<Channel>,
}

impl Argument {
    /// Wrap a raw token without resolving any mention
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            value: unquote(&token).to_string(),
            token,
            member: None,
            channel: None,
        }
    }

    /// Wrap a raw token, resolving `<@id>` / `<#id>` against the message's guild
    pub fn resolve(token: impl Into<String>, message: &Message) -> Self {
        let mut arg = Self::new(token);

        let Some(guild) = message.scope.guild() else {
            return arg;
        };

        if let Some(caps) = MENTION.captures(&arg.value) {
            let id = &caps[2];
            match &caps[1] {
                "@" => arg.member = guild.member(id),
                _ => arg.channel = guild.channel(id),
            }
        }

        arg
    }

    /// Unquoted value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Token exactly as it appeared in the line
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Form suitable for re-emitting into a new line: quoted when the value
    /// is empty or contains whitespace
    pub fn raw_value(&self) -> String {
        let needs_quotes = self.value.is_empty() || self.value.chars().any(char::is_whitespace);
        if !needs_quotes {
            self.value.clone()
        } else if self.token != self.value {
            self.token.clone()
        } else {
            format!("\"{}\"", self.value)
        }
    }

    pub fn member(&self) -> Option<&Member> {
        self.member.as_ref()
    }

    pub fn channel(&self) -> Option<&Channel> {
        self.channel.as_ref()
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for Argument {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Scope, User};
    use crate::domain::traits::Guild;
    use std::sync::Arc;

    struct TestGuild;

    impl Guild for TestGuild {
        fn id(&self) -> &str {
            "g1"
        }

        fn member(&self, id: &str) -> Option<Member> {
            (id == "7").then(|| Member::new(User::new("7").with_username("ada")))
        }

        fn channel(&self, id: &str) -> Option<Channel> {
            (id == "9").then(|| Channel::new("9", "general"))
        }
    }

    fn guild_message() -> Message {
        Message::new("c1", User::new("1"), "").with_scope(Scope::group(Arc::new(TestGuild)))
    }

    #[test]
    fn test_quoted_token_value_and_raw() {
        let arg = Argument::new("\"b c\"");
        assert_eq!(arg.value(), "b c");
        assert_eq!(arg.token(), "\"b c\"");
        assert_eq!(arg.raw_value(), "\"b c\"");
    }

    #[test]
    fn test_raw_value_keeps_empty_quotes() {
        let arg = Argument::new("\"\"");
        assert_eq!(arg.value(), "");
        assert_eq!(arg.raw_value(), "\"\"");
    }

    #[test]
    fn test_raw_value_quotes_bare_whitespace() {
        let arg = Argument::new("plain");
        assert_eq!(arg.raw_value(), "plain");

        // Values built outside the tokenizer still get quoted
        let arg = Argument {
            value: "a b".to_string(),
            token: "a b".to_string(),
            member: None,
            channel: None,
        };
        assert_eq!(arg.raw_value(), "\"a b\"");
    }

    #[test]
    fn test_resolves_member_and_channel_in_guild() {
        let msg = guild_message();

        let member = Argument::resolve("<@!7>", &msg);
        assert_eq!(member.member().map(|m| m.display_name()), Some("ada".to_string()));
        assert!(member.channel().is_none());

        let channel = Argument::resolve("<#9>", &msg);
        assert_eq!(channel.channel().map(|c| c.name.as_str()), Some("general"));
        assert!(channel.member().is_none());
    }

    #[test]
    fn test_unknown_mention_resolves_to_nothing() {
        let arg = Argument::resolve("<@123>", &guild_message());
        assert!(arg.member().is_none());
        assert_eq!(arg.value(), "<@123>");
    }

    #[test]
    fn test_direct_scope_never_resolves() {
        let msg = Message::new("c1", User::new("1"), "");
        let arg = Argument::resolve("<@7>", &msg);
        assert!(arg.member().is_none());
        assert!(arg.channel().is_none());
    }
}
