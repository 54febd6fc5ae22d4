//! Core domain + application logic for the Marquee subscription bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind the
//! messaging port (trait) implemented in the adapter crate; the store and the
//! command router never see platform-specific types.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messages;
pub mod messaging;
pub mod router;
pub mod store;

pub use errors::{Error, Result};
