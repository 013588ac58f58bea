//! # Start Command
//!
//! Handles `/start` (and its `/help` alias).
//! Greets the user and lists the available commands.

use crate::domain::traits::ChatProvider;
use anyhow::Result;

pub async fn handle_start(chat: &impl ChatProvider) -> Result<()> {
    chat.send_message(crate::strings::help::WELCOME)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}
