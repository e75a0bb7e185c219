use crate::domain::entities::{Channel, Member};

/// Lookup of entities inside a group conversation.
///
/// Implemented by the transport layer; `None` is a valid answer and simply
/// leaves the argument unresolved.
pub trait Guild: Send + Sync {
    fn id(&self) -> &str;

    fn member(&self, id: &str) -> Option<Member>;

    fn channel(&self, id: &str) -> Option<Channel>;
}
