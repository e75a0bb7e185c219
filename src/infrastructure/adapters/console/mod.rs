//! Console adapter for development/testing

use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use crate::application::errors::BotError;
use crate::domain::entities::{Message, User};
use crate::domain::traits::{Bot, BotInfo};

/// Console bot adapter for local development.
///
/// Every line typed on stdin is a direct message from one local user.
pub struct ConsoleAdapter {
    info: BotInfo,
    user_id: String,
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleAdapter {
    pub fn new(name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            info: BotInfo {
                id: "0".to_string(),
                name: name.into(),
                username: "console".to_string(),
            },
            user_id: user_id.into(),
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// Next line from stdin, `None` at end of input
    pub async fn read_line(&self, prompt: &str) -> Result<Option<String>, BotError> {
        print!("{}", prompt);
        std::io::stdout().flush()?;

        let line = self.lines.lock().await.next_line().await?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    /// Wrap a typed line as a message from the console user
    pub fn message(&self, text: impl Into<String>) -> Message {
        Message::new("console", User::new(self.user_id.as_str()).with_username(self.user_id.as_str()), text)
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok("console_msg".to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
