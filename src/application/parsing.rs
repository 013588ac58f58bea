//! # Parsing Utils
//!
//! Splits incoming chat text into a command and its arguments, and validates coin symbols.

use regex::Regex;
use std::sync::OnceLock;

/// A slash command pulled out of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Lower-cased command name without the leading slash or `@bot` suffix
    pub name: String,
    /// Everything after the first run of whitespace, trimmed
    pub args: &'a str,
}

/// Parses `/cmd[@bot] args`. Returns `None` for plain text and for commands addressed to
/// another bot. `own_username` is compared case-insensitively and without the `@`.
pub fn parse_command<'a>(message: &'a str, own_username: Option<&str>) -> Option<ParsedCommand<'a>> {
    let msg = message.trim();
    let body = msg.strip_prefix('/')?;

    let (head, args) = match body.find(char::is_whitespace) {
        Some(idx) => (&body[..idx], body[idx..].trim()),
        None => (body, ""),
    };

    let name = match head.split_once('@') {
        Some((name, target)) => {
            let addressed_to_us = own_username
                .map(|own| own.trim_start_matches('@').eq_ignore_ascii_case(target))
                .unwrap_or(false);
            if !addressed_to_us {
                return None;
            }
            name
        }
        None => head,
    };

    if name.is_empty() {
        return None;
    }

    Some(ParsedCommand {
        name: name.to_lowercase(),
        args,
    })
}

fn symbol_regex() -> &'static Regex {
    static SYMBOL: OnceLock<Regex> = OnceLock::new();
    SYMBOL.get_or_init(|| Regex::new(r"^[A-Z0-9]{1,15}$").expect("symbol regex is valid"))
}

/// Upper-cases the first argument and checks it looks like an exchange symbol.
/// `Err` carries the upper-cased input for the error reply.
pub fn normalize_symbol(raw: &str) -> Result<String, String> {
    let symbol = raw.trim().trim_start_matches('$').to_uppercase();
    if symbol_regex().is_match(&symbol) {
        Ok(symbol)
    } else {
        Err(symbol)
    }
}
