//! Exactly-once report dispatch with a single mail-compose fallback.
//!
//! The primary collaborator is invoked at most once per completed session.
//! Any failure (network, timeout, non-success response) falls back to a
//! `mailto:` compose link; the original call is never retried.

use std::sync::Arc;

use proctor_core::session::DeliveryStatus;
use proctor_core::traits::{DeliveryRequest, ReportDelivery};

use crate::mailto::compose_mailto;

/// The result of dispatching a report.
#[derive(Debug, Clone)]
pub enum DeliveryOutcome {
    /// The primary collaborator accepted the report.
    Sent { message_id: Option<String> },
    /// The primary send failed (or none was configured); a compose link was
    /// produced instead.
    FallbackUsed { mailto: String },
}

impl DeliveryOutcome {
    /// The session-facing status for this outcome.
    pub fn status(&self) -> DeliveryStatus {
        match self {
            DeliveryOutcome::Sent { .. } => DeliveryStatus::Sent,
            DeliveryOutcome::FallbackUsed { .. } => DeliveryStatus::FallbackUsed,
        }
    }
}

/// Applies the delivery policy for completed sessions.
pub struct Dispatcher {
    primary: Option<Arc<dyn ReportDelivery>>,
    recipient: String,
}

impl Dispatcher {
    pub fn new(primary: Option<Arc<dyn ReportDelivery>>, recipient: &str) -> Self {
        Self {
            primary,
            recipient: recipient.to_string(),
        }
    }

    /// Dispatch the report: one primary attempt, then the fallback.
    pub async fn dispatch(&self, request: &DeliveryRequest) -> DeliveryOutcome {
        if let Some(primary) = &self.primary {
            match primary.deliver(request).await {
                Ok(receipt) => {
                    tracing::info!(
                        collaborator = primary.name(),
                        latency_ms = receipt.latency_ms,
                        "report delivered"
                    );
                    return DeliveryOutcome::Sent {
                        message_id: receipt.message_id,
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        collaborator = primary.name(),
                        "report delivery failed, using mail fallback: {e:#}"
                    );
                }
            }
        }

        DeliveryOutcome::FallbackUsed {
            mailto: compose_mailto(&self.recipient, request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDelivery;
    use proctor_core::session::Score;

    fn request() -> DeliveryRequest {
        DeliveryRequest {
            first_name: "Alice".into(),
            last_name: "Martin".into(),
            score: Score {
                correct: 14,
                total: 20,
                percentage: 70,
            },
            breakdown_html: "<div/>".into(),
        }
    }

    #[tokio::test]
    async fn successful_primary_is_sent_once() {
        let mock = Arc::new(MockDelivery::succeeding());
        let dispatcher = Dispatcher::new(Some(mock.clone() as Arc<dyn ReportDelivery>), "recruiting@example.com");

        let outcome = dispatcher.dispatch(&request()).await;
        assert!(matches!(outcome, DeliveryOutcome::Sent { .. }));
        assert_eq!(outcome.status(), DeliveryStatus::Sent);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn failure_uses_fallback_without_retry() {
        let mock = Arc::new(MockDelivery::failing());
        let dispatcher = Dispatcher::new(Some(mock.clone() as Arc<dyn ReportDelivery>), "recruiting@example.com");

        let outcome = dispatcher.dispatch(&request()).await;
        match &outcome {
            DeliveryOutcome::FallbackUsed { mailto } => {
                assert!(mailto.starts_with("mailto:recruiting@example.com"));
            }
            other => panic!("expected fallback, got {other:?}"),
        }
        assert_eq!(outcome.status(), DeliveryStatus::FallbackUsed);
        // Exactly one primary attempt.
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn no_primary_goes_straight_to_fallback() {
        let dispatcher = Dispatcher::new(None, "recruiting@example.com");
        let outcome = dispatcher.dispatch(&request()).await;
        assert_eq!(outcome.status(), DeliveryStatus::FallbackUsed);
    }
}
