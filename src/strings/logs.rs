//! # Log Lines
//!
//! Operator-facing log messages emitted during startup and the update loop.

pub const STARTING: &str = "Starting coinrelay...";

pub fn config_loaded(path: &str) -> String {
    format!("Loaded configuration from {path}")
}

pub const CONFIG_DEFAULTS: &str = "No config file found, using built-in defaults";

pub fn missing_token(err: &str) -> String {
    format!("Error: {err}. Set the bot token in the environment and restart.")
}

pub const NEWS_KEY_MISSING: &str = "No news API key set; /news and the digest headline will be unavailable";

pub fn logged_in(handle: &str) -> String {
    format!("Logged in as {handle}")
}

pub const POLL_LOOP_START: &str = "Bot started, polling for updates...";

pub fn route_failed(err: &str) -> String {
    format!("Failed to route message: {err}")
}

pub const SHUTDOWN: &str = "Shutting down...";
