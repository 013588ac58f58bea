//! # Command Handlers
//!
//! Contains specific handler functions for each supported command (e.g., /price, /digest).
//! These handlers are invoked by the Router.

pub mod digest;
pub mod news;
pub mod price;
pub mod start;
