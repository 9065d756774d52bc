//! Message composition: turns a [`NotificationEvent`] into Telegram HTML text.
//!
//! Composition is pure — no I/O, no side effects, no failure modes. Absent
//! fields only mean less content; the sole gate is an empty base message,
//! which yields no message at all.

use crate::core::{BuildOutcome, DeploymentOutcome, NotificationEvent};

/// Placeholder rendered in place of a redacted variable value.
pub const REDACTED_PLACEHOLDER: &str = "******";

const SUCCESS_GLYPHS: &str = "\u{1F600} \u{1F44C} ";
const FAILURE_GLYPHS: &str = "\u{1F631} \u{1F645}\u{200D}\u{2642}\u{FE0F} ";

/// Decides whether a variable's value must be hidden from the rendered message.
pub trait RedactionPolicy: Send + Sync {
    fn should_redact(&self, key: &str) -> bool;
}

/// Redacts any variable whose key contains one of the configured substrings.
///
/// Matching is case-sensitive.
pub struct KeySubstringRedaction {
    patterns: Vec<String>,
}

impl KeySubstringRedaction {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }
}

impl Default for KeySubstringRedaction {
    fn default() -> Self {
        Self::new(vec!["password".to_string()])
    }
}

impl RedactionPolicy for KeySubstringRedaction {
    fn should_redact(&self, key: &str) -> bool {
        self.patterns.iter().any(|p| key.contains(p))
    }
}

/// Composes a chat message from a notification event.
pub struct MessageComposer {
    redaction: Box<dyn RedactionPolicy>,
}

impl Default for MessageComposer {
    fn default() -> Self {
        Self::new(Box::new(KeySubstringRedaction::default()))
    }
}

impl MessageComposer {
    /// Creates a composer with a custom redaction policy.
    pub fn new(redaction: Box<dyn RedactionPolicy>) -> Self {
        Self { redaction }
    }

    /// Composes the message text for `event`.
    ///
    /// Returns `None` when the base message is empty — nothing should be sent
    /// in that case, regardless of which outcome sections are present. Both
    /// the build and the deployment section may render into the same buffer.
    pub fn compose(&self, event: &NotificationEvent) -> Option<String> {
        if event.base_message.is_empty() {
            return None;
        }

        let mut message = String::new();

        if let Some(build) = &event.build {
            self.append_build_section(&mut message, &event.base_message, build);
        }

        if let Some(deployment) = &event.deployment {
            append_deployment_section(&mut message, &event.base_message, deployment);
        }

        Some(message)
    }

    fn append_build_section(&self, message: &mut String, base: &str, build: &BuildOutcome) {
        if build.successful {
            message.push_str(SUCCESS_GLYPHS);
        } else {
            message.push_str(FAILURE_GLYPHS);
        }
        message.push_str(base);
        message.push_str(&build.reason_summary);
        message.push('\n');

        if !build.author_names.is_empty() {
            message.push_str("Responsible Users: ");
            message.push_str(&build.author_names.join(", "));
            message.push('\n');
        }

        if !build.variables.is_empty() {
            message.push_str("Variables:\n");
            for variable in &build.variables {
                let value = if self.redaction.should_redact(&variable.key) {
                    REDACTED_PLACEHOLDER
                } else {
                    &variable.value
                };
                message.push_str(&variable.key);
                message.push_str(": ");
                message.push_str(value);
                message.push('\n');
            }
        }

        if !build.labels.is_empty() {
            message.push_str("Labels: ");
            message.push_str(&build.labels.join(", "));
            message.push('\n');
        }

        if !build.issues.is_empty() {
            message.push_str("Issues:\n");
            // HashSet iteration order is unspecified; consumers must not rely
            // on issue line ordering.
            for issue in &build.issues {
                match &issue.detail {
                    None => message.push_str(&issue.key),
                    Some(detail) => {
                        message.push_str("<a href=\"");
                        message.push_str(&detail.url);
                        message.push_str("\">");
                        message.push_str(&issue.key);
                        message.push_str("</a> - ");
                        message.push_str(&detail.summary);
                    }
                }
                message.push('\n');
            }
        }
    }
}

fn append_deployment_section(message: &mut String, base: &str, deployment: &DeploymentOutcome) {
    message.push_str("Deployment notification.\n");
    message.push_str("Reason: ");
    message.push_str(base);
    message.push_str(&deployment.reason_summary);
    message.push('\n');

    message.push_str("Deployed version name: ");
    message.push_str(&deployment.version_name);
    message.push('\n');

    message.push_str("Environment deployed to: ");
    message.push_str(&deployment.environment_name);
    message.push('\n');

    message.push_str("Started at: ");
    message.push_str(&deployment.started_at.to_rfc3339());
    message.push('\n');

    if let Some(finished_at) = &deployment.finished_at {
        message.push_str("Finished at: ");
        message.push_str(&finished_at.to_rfc3339());
        message.push('\n');
    }

    if let Some(creator) = &deployment.version_creator_name {
        message.push_str("Version created by: ");
        message.push_str(creator);
        message.push('\n');
    }
}
