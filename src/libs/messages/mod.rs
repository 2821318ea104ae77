//! Centralized user-facing text.
//!
//! [`Message`] enumerates everything cmetrack says to a person, and the
//! `msg_*` macros decide where it is printed.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
