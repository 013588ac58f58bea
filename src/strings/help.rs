//! # Help Text
//!
//! Welcome message and command list.
//! Displayed to the user via the `/start` and `/help` commands.

pub const WELCOME: &str = concat!(
    "👋 Hi! I'm your crypto market assistant. ",
    "I keep you up to date with prices, headlines and market mood.\n",
    "\n",
    "*Available commands:*\n",
    "/news - Latest crypto headlines\n",
    "/price <SYMBOL> - Spot price and 24h change (e.g. /price BTC)\n",
    "/digest - Short market digest: price, sentiment and top headline\n"
);
