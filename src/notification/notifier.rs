//! The compose→dispatch pipeline.
//!
//! A [`Notifier`] runs one notification end to end: compose the message,
//! short-circuit when composition is gated, otherwise hand the text to the
//! transport. Delivery is best-effort; failures are reported as values and
//! never escalate into the host's build or deployment workflow.

use crate::compose::MessageComposer;
use crate::core::{DeliveryReceipt, DeliveryTarget, DispatchError, NotificationEvent, Transport};
use std::sync::Arc;
use tracing::debug;

/// Drives a single notification through composition and dispatch.
pub struct Notifier<T: Transport> {
    composer: MessageComposer,
    transport: Arc<T>,
}

impl<T: Transport> Notifier<T> {
    /// Creates a new `Notifier`.
    pub fn new(composer: MessageComposer, transport: Arc<T>) -> Self {
        Self {
            composer,
            transport,
        }
    }

    /// Composes and dispatches one notification.
    ///
    /// Returns `None` when the event's base message is empty — a deliberate
    /// no-op, nothing is sent. Otherwise performs exactly one dispatch and
    /// returns its outcome; the transport has already logged it.
    pub async fn notify(
        &self,
        target: &DeliveryTarget,
        event: &NotificationEvent,
    ) -> Option<Result<DeliveryReceipt, DispatchError>> {
        let text = match self.composer.compose(event) {
            Some(text) => text,
            None => {
                debug!("Empty base message, skipping notification");
                return None;
            }
        };

        Some(self.transport.dispatch(target, &text).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BuildOutcome;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // A fake transport for testing the pipeline's gating logic.
    struct FakeTransport {
        sent: Mutex<Vec<String>>,
        outcome: Result<DeliveryReceipt, DispatchError>,
    }

    impl FakeTransport {
        fn delivering() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                outcome: Ok(DeliveryReceipt::default()),
            }
        }

        fn rejecting(code: i64) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                outcome: Err(DispatchError::ProviderRejected {
                    code,
                    description: "rejected".to_string(),
                }),
            }
        }

        fn sent_texts(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn dispatch(
            &self,
            _target: &DeliveryTarget,
            text: &str,
        ) -> Result<DeliveryReceipt, DispatchError> {
            self.sent.lock().unwrap().push(text.to_string());
            self.outcome.clone()
        }
    }

    fn test_target() -> DeliveryTarget {
        DeliveryTarget {
            bot_token: "token".to_string(),
            chat_id: 7,
        }
    }

    #[tokio::test]
    async fn test_empty_message_is_a_no_op() {
        let transport = Arc::new(FakeTransport::delivering());
        let notifier = Notifier::new(MessageComposer::default(), transport.clone());

        let event = NotificationEvent {
            base_message: "".to_string(),
            build: Some(BuildOutcome::default()),
            deployment: None,
        };

        let outcome = notifier.notify(&test_target(), &event).await;

        assert!(outcome.is_none());
        assert!(transport.sent_texts().is_empty());
    }

    #[tokio::test]
    async fn test_composed_message_dispatched_once() {
        let transport = Arc::new(FakeTransport::delivering());
        let notifier = Notifier::new(MessageComposer::default(), transport.clone());

        let event = NotificationEvent {
            base_message: "Build ".to_string(),
            build: Some(BuildOutcome {
                successful: true,
                reason_summary: "passed".to_string(),
                ..Default::default()
            }),
            deployment: None,
        };

        let outcome = notifier.notify(&test_target(), &event).await;

        assert!(matches!(outcome, Some(Ok(_))));
        let sent = transport.sent_texts();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Build passed"));
    }

    #[tokio::test]
    async fn test_rejection_surfaces_as_value_not_panic() {
        let transport = Arc::new(FakeTransport::rejecting(401));
        let notifier = Notifier::new(MessageComposer::default(), transport.clone());

        let event = NotificationEvent {
            base_message: "Build ".to_string(),
            build: Some(BuildOutcome::default()),
            deployment: None,
        };

        let outcome = notifier.notify(&test_target(), &event).await;

        assert_eq!(
            outcome,
            Some(Err(DispatchError::ProviderRejected {
                code: 401,
                description: "rejected".to_string(),
            }))
        );
    }
}
