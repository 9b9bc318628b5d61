//! The report-delivery collaborator trait.
//!
//! Implemented by the `proctor-delivery` crate. The session state machine
//! never blocks on delivery: the completed transition happens first, and the
//! delivery outcome only updates the session's delivery status.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::session::Score;

/// Trait for backends that deliver a completed assessment report.
#[async_trait]
pub trait ReportDelivery: Send + Sync {
    /// Human-readable collaborator name (e.g. "resend").
    fn name(&self) -> &str;

    /// Deliver the report. One call per completed session; callers apply
    /// their own fallback policy on failure, never a retry of this call.
    async fn deliver(&self, request: &DeliveryRequest) -> anyhow::Result<DeliveryReceipt>;
}

/// What the delivery collaborator receives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub first_name: String,
    pub last_name: String,
    pub score: Score,
    /// The per-question breakdown, already rendered as markup.
    pub breakdown_html: String,
}

impl DeliveryRequest {
    /// Subject line used by mail-based collaborators.
    pub fn subject(&self) -> String {
        format!(
            "Assessment results - {} {}",
            self.first_name, self.last_name
        )
    }
}

/// Acknowledgement from a successful delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Provider-assigned message identifier, when one is returned.
    pub message_id: Option<String>,
    /// Round-trip latency in milliseconds.
    pub latency_ms: u64,
}
