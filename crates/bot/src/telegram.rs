//! Telegram transport.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::{debug, warn};

use offlinebot_core::{messages, ChatRef, Notifier, NotifyError, Pipeline};

/// Sends pipeline status lines as Telegram messages.
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_text(&self, chat: ChatRef, text: &str) -> Result<(), NotifyError> {
        self.bot
            .send_message(ChatId(chat.0), text)
            .await
            .map(|_| ())
            .map_err(|e| NotifyError::SendFailed(e.to_string()))
    }
}

/// Bot commands understood by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Other(String),
}

/// Parse a `/command` (optionally `/command@botname`). Returns `None` for plain text.
pub fn parse_command(text: &str) -> Option<Command> {
    let text = text.trim();
    let rest = text.strip_prefix('/')?;
    let name = rest
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .split('@')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    Some(match name.as_str() {
        "start" => Command::Start,
        "help" => Command::Help,
        _ => Command::Other(name),
    })
}

/// Dispatcher endpoint for every inbound message.
pub async fn handle_message(msg: Message, pipeline: Arc<Pipeline>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        debug!(chat = msg.chat.id.0, "Ignoring non-text message");
        return Ok(());
    };
    let chat = ChatRef(msg.chat.id.0);

    match parse_command(text) {
        Some(Command::Start) => pipeline.notify(chat, messages::WELCOME).await,
        Some(Command::Help) => pipeline.notify(chat, messages::HELP).await,
        Some(Command::Other(name)) => {
            warn!(chat = chat.0, command = %name, "Ignoring unknown command");
        }
        None => {
            pipeline.handle_message(chat, text).await;
        }
    }

    Ok(())
}
