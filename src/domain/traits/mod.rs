//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod guild;
pub mod sink;

pub use bot::{Bot, BotInfo};
pub use guild::Guild;
pub use sink::{EventSink, RouterEvent};
