//! Built-in commands hooked at startup

use std::sync::{Arc, Weak};

use super::CommandRegistry;
use crate::application::errors::CommandError;
use crate::application::handlers::{CallbackHandler, HandlerResult, Params, PropertyHandler, SubcommandHandler};
use crate::domain::entities::{Argument, Command, CommandKind};

/// Users allowed to change settings; `None` allows everyone
type Owners = Option<Arc<Vec<String>>>;

/// Register help, version, echo, alias, unalias, prefix and var
pub fn register_defaults(registry: &Arc<CommandRegistry>, owners: Option<Vec<String>>) {
    let owners: Owners = owners.map(Arc::new);

    registry.register(help_command(Arc::downgrade(registry)));

    registry.register(
        Command::handler(
            "version",
            CallbackHandler::new(|params: Params| async move {
                params.reply(format!("lazybot v{}", env!("CARGO_PKG_VERSION"))).await
            }),
        )
        .with_description("Show bot version"),
    );

    registry.register(
        Command::handler(
            "echo",
            CallbackHandler::new(|params: Params| async move {
                if params.args.is_empty() {
                    return Ok(());
                }
                params.reply(params.rest()).await
            }),
        )
        .with_description("Repeat the arguments")
        .with_usage("echo <text>")
        .with_synonyms(["say"]),
    );

    registry.register(alias_command(Arc::downgrade(registry)));
    registry.register(unalias_command(Arc::downgrade(registry)));
    registry.register(prefix_command(Arc::downgrade(registry), owners.clone()));
    registry.register(var_command(owners));
}

async fn reply_error(err: CommandError, params: Params) -> HandlerResult {
    params.reply(err.to_string()).await
}

fn is_owner(owners: &Owners, params: &Params) -> bool {
    owners
        .as_ref()
        .map_or(true, |owners| owners.contains(&params.message.sender.id))
}

fn describe(command: &Command) -> String {
    match &command.kind {
        CommandKind::Alias(template) => format!("{} -> {}", command.name, template),
        CommandKind::Handler(_) => match &command.description {
            Some(desc) => format!("{} - {}", command.name, desc),
            None => command.name.clone(),
        },
    }
}

fn help_command(registry: Weak<CommandRegistry>) -> Command {
    let handler = CallbackHandler::new(move |params: Params| {
        let registry = registry.upgrade();
        async move {
            let Some(registry) = registry else {
                return Ok(());
            };

            let text = match params.arg(0) {
                Some(name) => match registry.resolve(name.value()) {
                    Some(command) => {
                        let mut help = describe(&command);
                        if let Some(usage) = &command.usage {
                            help.push_str(&format!("\nUsage: {}", usage));
                        }
                        if !command.synonyms.is_empty() {
                            help.push_str(&format!("\nAlso: {}", command.synonyms.join(", ")));
                        }
                        help
                    }
                    None => format!("Command '{}' not found", name.value()),
                },
                None => {
                    let prefix = registry.prefix_for(params.message.scope.id());
                    let mut help = format!("Available commands (prefix '{}'):", prefix);
                    for command in registry.commands() {
                        help.push_str(&format!("\n  {}", describe(&command)));
                    }
                    help
                }
            };

            params.reply(text).await
        }
    });

    Command::handler("help", handler)
        .with_description("Show help message")
        .with_usage("help [command]")
        .with_synonyms(["commands"])
}

fn alias_command(registry: Weak<CommandRegistry>) -> Command {
    let handler = CallbackHandler::new(move |params: Params| {
        let registry = registry.upgrade();
        async move {
            let Some(registry) = registry else {
                return Ok(());
            };

            let mut args = params.args.iter();
            let name = args
                .next()
                .map(|a| a.value().to_lowercase())
                .ok_or_else(|| CommandError::InvalidArgs("usage: alias <name> <template>".to_string()))?;
            let template = args.map(Argument::raw_value).collect::<Vec<_>>().join(" ");
            if template.is_empty() {
                return Err(CommandError::InvalidArgs("usage: alias <name> <template>".to_string()));
            }

            registry.hook(&name, template.as_str());
            params.reply(format!("{} -> {}", name, template)).await
        }
    })
    .on_error(reply_error);

    Command::handler("alias", handler)
        .with_description("Define a command that expands to another line")
        .with_usage("alias <name> <template with $1.. or $*>")
}

fn unalias_command(registry: Weak<CommandRegistry>) -> Command {
    let handler = CallbackHandler::new(move |params: Params| {
        let registry = registry.upgrade();
        async move {
            let Some(registry) = registry else {
                return Ok(());
            };

            let name = params
                .arg(0)
                .map(|a| a.value().to_lowercase())
                .ok_or_else(|| CommandError::InvalidArgs("usage: unalias <name>".to_string()))?;

            match registry.resolve(&name) {
                Some(command) if command.alias_template().is_some() => {
                    registry.unhook(&name);
                    params.reply(format!("Removed alias {}", name)).await
                }
                Some(_) => Err(CommandError::InvalidArgs(format!("{} is not an alias", name))),
                None => Err(CommandError::InvalidArgs(format!("No alias named {}", name))),
            }
        }
    })
    .on_error(reply_error);

    Command::handler("unalias", handler)
        .with_description("Remove an alias")
        .with_usage("unalias <name>")
}

fn prefix_command(registry: Weak<CommandRegistry>, owners: Owners) -> Command {
    let getter_registry = registry.clone();
    let handler = PropertyHandler::new(
        "prefix",
        move |key, params: Params| {
            let registry = getter_registry.upgrade();
            async move {
                let Some(registry) = registry else {
                    return Ok(());
                };
                let prefix = registry.prefix_for(params.message.scope.id());
                params.reply(format!("{} is '{}'", key, prefix)).await
            }
        },
        move |key, params: Params| {
            let registry = registry.upgrade();
            let allowed = is_owner(&owners, &params);
            async move {
                let Some(registry) = registry else {
                    return Ok(());
                };
                if !allowed {
                    return Err(CommandError::PermissionDenied);
                }

                let prefix = params.arg(0).map(|a| a.value().to_string()).unwrap_or_default();
                if prefix.is_empty() {
                    return Err(CommandError::InvalidArgs(format!("{} cannot be empty", key)));
                }

                match params.message.scope.id() {
                    Some(scope) => registry.set_scope_prefix(scope, prefix.as_str()),
                    None => registry.set_prefix(prefix.as_str()),
                }
                params.reply(format!("{} set to '{}'", key, prefix)).await
            }
        },
    )
    .on_error(reply_error);

    Command::handler("prefix", handler)
        .with_description("Show or change the command prefix")
        .with_usage("prefix [new prefix]")
}

fn var_command(owners: Owners) -> Command {
    let handler = SubcommandHandler::new()
        .pre_check(move |params: Params| {
            let allowed = is_owner(&owners, &params);
            async move {
                if !allowed {
                    params.reply("Permission denied").await?;
                }
                Ok(Some(allowed))
            }
        })
        .on_error(reply_error);

    Command::handler("var", handler)
        .with_description("Manage shared variables")
        .with_usage("var <get|set|unset|list> [key] [value]")
        .with_subcommand(
            "get",
            CallbackHandler::new(|params: Params| async move {
                let key = required_key(&params)?;
                let text = match params.data.get(&key) {
                    Some(value) => format!("{} = {}", key, value),
                    None => format!("{} is not set", key),
                };
                params.reply(text).await
            }),
        )
        .with_subcommand(
            "set",
            CallbackHandler::new(|mut params: Params| async move {
                let key = required_key(&params)?;
                params.args.pop_front();
                let value = params.rest();
                params.data.set(key.as_str(), value.as_str());
                params.reply(format!("{} = \"{}\"", key, value)).await
            }),
        )
        .with_subcommand(
            "unset",
            CallbackHandler::new(|params: Params| async move {
                let key = required_key(&params)?;
                match params.data.remove(&key) {
                    Some(_) => params.reply(format!("{} removed", key)).await,
                    None => params.reply(format!("{} is not set", key)).await,
                }
            }),
        )
        .with_subcommand(
            "list",
            CallbackHandler::new(|params: Params| async move {
                let keys = params.data.keys();
                if keys.is_empty() {
                    params.reply("No variables set").await
                } else {
                    params.reply(keys.join(", ")).await
                }
            }),
        )
}

fn required_key(params: &Params) -> Result<String, CommandError> {
    params
        .arg(0)
        .map(|a| a.value().to_string())
        .ok_or_else(|| CommandError::InvalidArgs("missing key".to_string()))
}
