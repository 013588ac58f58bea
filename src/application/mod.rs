//! # Application Layer
//!
//! Contains the core logic and orchestration of the bot.
//! This includes command routing, message parsing, reply formatting, and logging setup.

pub mod formatter;
pub mod logging;
pub mod parsing;
pub mod router;
