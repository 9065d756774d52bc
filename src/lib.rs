//! Buildgram - CI/CD build and deployment notifications for Telegram
//!
//! This library turns build and deployment lifecycle events into
//! human-readable chat messages and delivers them through the Telegram
//! Bot API. Composition is pure; delivery is a single best-effort call
//! with a tagged outcome.

pub mod cli;
pub mod compose;
pub mod config;
pub mod core;
pub mod notification;

// Re-export core types for convenience
pub use crate::core::*;
