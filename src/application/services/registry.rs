//! Command registry - names, prefixes and shared data for one routing scope

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::application::handlers::DataBag;
use crate::domain::entities::{Command, CommandSource};
use crate::domain::traits::{EventSink, RouterEvent};

/// Prefix used when neither configuration nor a scope override sets one
pub const DEFAULT_PREFIX: &str = "!";

/// Registry for the commands of one routing scope
pub struct CommandRegistry {
    commands: RwLock<HashMap<String, Arc<Command>>>,
    prefix: RwLock<String>,
    scope_prefixes: RwLock<HashMap<String, String>>,
    data: DataBag,
    sink: Arc<dyn EventSink>,
}

impl CommandRegistry {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            commands: RwLock::new(HashMap::new()),
            prefix: RwLock::new(DEFAULT_PREFIX.to_string()),
            scope_prefixes: RwLock::new(HashMap::new()),
            data: DataBag::new(),
            sink,
        }
    }

    /// Hook a command under `name`, replacing whatever was there
    pub fn hook(&self, name: &str, data: impl Into<CommandSource>) {
        let command = data.into().into_command(name);
        self.commands.write().insert(name.to_lowercase(), command);
        self.report(RouterEvent::Hooked {
            name: name.to_string(),
        });
    }

    /// Hook a command under its name and each synonym, sharing one instance
    pub fn register(&self, command: impl Into<Arc<Command>>) {
        let command: Arc<Command> = command.into();
        self.hook(&command.name, command.clone());
        for synonym in &command.synonyms {
            self.hook(synonym, command.clone());
        }
    }

    /// Remove a command; returns whether anything was hooked under `name`
    pub fn unhook(&self, name: &str) -> bool {
        let removed = self.commands.write().remove(&name.to_lowercase()).is_some();
        if removed {
            self.report(RouterEvent::Unhooked {
                name: name.to_string(),
            });
        }
        removed
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<Command>> {
        self.commands.read().get(&name.to_lowercase()).cloned()
    }

    /// Hooked names in sorted order, synonyms included
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Distinct commands sorted by name; a command hooked under several names appears once
    pub fn commands(&self) -> Vec<Arc<Command>> {
        let mut commands: Vec<Arc<Command>> = Vec::new();
        for command in self.commands.read().values() {
            if !commands.iter().any(|c| Arc::ptr_eq(c, command)) {
                commands.push(command.clone());
            }
        }
        commands.sort_by(|a, b| a.name.cmp(&b.name));
        commands
    }

    pub fn len(&self) -> usize {
        self.commands.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.read().is_empty()
    }

    pub fn prefix(&self) -> String {
        self.prefix.read().clone()
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        *self.prefix.write() = prefix.into();
    }

    pub fn scope_prefix(&self, scope: &str) -> Option<String> {
        self.scope_prefixes.read().get(scope).cloned()
    }

    pub fn set_scope_prefix(&self, scope: impl Into<String>, prefix: impl Into<String>) {
        self.scope_prefixes.write().insert(scope.into(), prefix.into());
    }

    pub fn clear_scope_prefix(&self, scope: &str) -> Option<String> {
        self.scope_prefixes.write().remove(scope)
    }

    /// Prefix in effect for a scope: its override, else the default
    pub fn prefix_for(&self, scope: Option<&str>) -> String {
        scope
            .and_then(|s| self.scope_prefix(s))
            .unwrap_or_else(|| self.prefix())
    }

    pub fn data(&self) -> &DataBag {
        &self.data
    }

    pub fn report(&self, event: RouterEvent) {
        self.sink.record(&event);
    }
}
