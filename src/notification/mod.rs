//! Handles delivery of composed messages to the chat provider.
//!
//! The transport boundary lives here: the Telegram client performs the one
//! outbound API call per notification, and the notifier wires composition and
//! dispatch together while keeping failures out of the host's workflow.
pub mod notifier;
pub mod telegram;
