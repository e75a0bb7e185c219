//! Logging setup and the tracing-backed event sink

use crate::domain::traits::{EventSink, RouterEvent};

/// Initialize the global tracing subscriber; `RUST_LOG` refines the default `info` level
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// Reports router events as log lines
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &RouterEvent) {
        match event {
            RouterEvent::Hooked { .. } | RouterEvent::Unhooked { .. } => {
                tracing::info!("{}", event);
            }
            RouterEvent::HandlerFailed { .. } | RouterEvent::AliasDepthExceeded { .. } => {
                tracing::error!("{}", event);
            }
        }
    }
}
