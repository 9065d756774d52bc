//! Core domain types and service traits for Buildgram
//!
//! This module defines the fundamental data structures and trait contracts
//! that govern component interactions throughout the notification pipeline.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// A notification trigger supplied by the host CI/CD system.
///
/// The build and deployment sections are independently optional: either, both,
/// or neither may be present, and each contributes its own block to the
/// composed message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NotificationEvent {
    /// The host-supplied message content. An empty string gates the whole
    /// pipeline: nothing is composed and nothing is sent.
    pub base_message: String,
    /// Structured result data for a finished build, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildOutcome>,
    /// Structured result data for a deployment, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment: Option<DeploymentOutcome>,
}

/// The result summary of a build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BuildOutcome {
    /// Whether the build succeeded. Drives the status glyph pair.
    pub successful: bool,
    /// Human-readable reason text, appended to the base message.
    pub reason_summary: String,
    /// Full names of the users responsible for the triggering changes.
    pub author_names: Vec<String>,
    /// Manually overridden build variables, in definition order.
    pub variables: Vec<Variable>,
    /// Label names attached to the build result.
    pub labels: Vec<String>,
    /// Issues linked to the build result. Iteration order is not guaranteed.
    pub issues: HashSet<Issue>,
}

/// A key/value pair for a build variable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

/// An issue linked to a build result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Issue {
    /// The issue key (e.g., "PROJ-123"). Always rendered.
    pub key: String,
    /// Tracker details for the issue. When absent, only the key is rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<IssueDetail>,
}

/// Display details for a linked issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct IssueDetail {
    /// URL of the issue in its tracker.
    pub url: String,
    /// One-line summary text.
    pub summary: String,
}

/// The result summary of a deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeploymentOutcome {
    /// Human-readable reason text, appended to the base message.
    pub reason_summary: String,
    /// Name of the deployed version.
    pub version_name: String,
    /// Name of the environment deployed to.
    pub environment_name: String,
    /// When the deployment started.
    pub started_at: DateTime<Utc>,
    /// When the deployment finished. Absent while still running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Display name of the user who created the deployed version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_creator_name: Option<String>,
}

/// Delivery credentials for one dispatch: bot token plus destination chat.
///
/// Supplied per invocation by the host and discarded afterwards. `Debug`
/// deliberately omits the token so credentials never leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct DeliveryTarget {
    /// The Telegram bot token (secret).
    pub bot_token: String,
    /// The numeric identifier of the destination chat.
    pub chat_id: i64,
}

impl fmt::Debug for DeliveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryTarget")
            .field("bot_token", &"******")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Provider metadata returned with a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeliveryReceipt {
    /// Diagnostic text supplied by the provider, when present.
    pub description: Option<String>,
}

/// A terminal dispatch failure. Neither variant is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The provider answered the call but rejected the message.
    #[error("provider rejected the message (code {code}): {description}")]
    ProviderRejected { code: i64, description: String },

    /// The call itself could not complete (connectivity, malformed response).
    #[error("transport failure: {detail}")]
    TransportFailure { detail: String },
}

// =============================================================================
// Service Traits
// =============================================================================

/// Sends a composed message to a chat provider.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs exactly one send call for `text` against `target`.
    ///
    /// # Returns
    /// * `Ok(DeliveryReceipt)` when the provider acknowledged the message
    /// * `Err(DispatchError)` for a provider rejection or transport failure
    async fn dispatch(
        &self,
        target: &DeliveryTarget,
        text: &str,
    ) -> Result<DeliveryReceipt, DispatchError>;
}
