//! Mock delivery collaborator for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use proctor_core::error::DeliveryError;
use proctor_core::traits::{DeliveryReceipt, DeliveryRequest, ReportDelivery};

/// A mock delivery collaborator for exercising the dispatcher and the
/// completion flow without real network calls.
pub struct MockDelivery {
    /// Whether deliveries should fail.
    fail: bool,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<DeliveryRequest>>,
}

impl MockDelivery {
    /// A mock whose deliveries always succeed.
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A mock whose deliveries always fail with a network error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of delivery calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this collaborator.
    pub fn last_request(&self) -> Option<DeliveryRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportDelivery for MockDelivery {
    fn name(&self) -> &str {
        "mock"
    }

    async fn deliver(&self, request: &DeliveryRequest) -> anyhow::Result<DeliveryReceipt> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        if self.fail {
            return Err(DeliveryError::Network("mock delivery failure".into()).into());
        }

        Ok(DeliveryReceipt {
            message_id: Some("mock-message".into()),
            latency_ms: 1,
        })
    }
}
