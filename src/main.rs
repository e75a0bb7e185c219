use std::sync::Arc;

use clap::{Parser, Subcommand};

use lazybot::infrastructure::adapters::ConsoleAdapter;
use lazybot::infrastructure::config::Config;
use lazybot::infrastructure::logging::{self, TracingSink};
use lazybot::{register_defaults, Bot, CommandRegistry, Dispatch, Router};

#[derive(Parser)]
#[command(name = "lazybot")]
#[command(about = "Text command routing for chat bots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Command prefix (overrides config)
    #[arg(short, long)]
    prefix: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot on the console
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

#[tokio::main]
async fn main() {
    logging::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(cli.config, cli.prefix).await;
        }
        Commands::Version => {
            println!("lazybot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn load_config(config_path: &str) -> Config {
    if std::path::Path::new(config_path).exists() {
        match Config::load(config_path) {
            Ok(config) => config.with_env(),
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            }
        }
    } else {
        Config::load_env()
    }
}

async fn run_bot(config_path: String, prefix_override: Option<String>) {
    let mut config = load_config(&config_path);
    if let Some(prefix) = prefix_override.filter(|p| !p.is_empty()) {
        config.bot.prefix = prefix;
    }

    tracing::info!("Starting {}", config.bot.name);

    let registry = Arc::new(CommandRegistry::new(Arc::new(TracingSink)));
    register_defaults(&registry, config.owners());
    config.apply(&registry);
    tracing::info!("{} command names hooked", registry.len());

    let console = config.adapters.console.clone().unwrap_or_default();
    if !console.enabled {
        tracing::warn!("No adapter enabled, nothing to do");
        return;
    }

    let bot = Arc::new(ConsoleAdapter::new(&config.bot.name, console.user_id));
    if let Err(e) = bot.start().await {
        tracing::error!("Failed to start bot: {}", e);
        return;
    }

    let router = Router::new(registry, bot.clone()).with_max_alias_depth(config.router.max_alias_depth);

    loop {
        let input = match bot.read_line("> ").await {
            Ok(Some(input)) => input,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Console input failed: {}", e);
                break;
            }
        };
        if input.is_empty() {
            continue;
        }

        match router.parse(bot.message(input)).await {
            Dispatch::Ignored => tracing::debug!("Message ignored"),
            Dispatch::Handled { command } => tracing::debug!("Handled '{}'", command),
            Dispatch::Failed { command, .. } => tracing::debug!("'{}' failed", command),
        }
    }

    tracing::info!("Console closed, shutting down");
}

fn init_config() {
    match Config::default().to_yaml() {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => tracing::error!("{}", e),
    }
}
