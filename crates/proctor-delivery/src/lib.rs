//! proctor-delivery — Report delivery collaborators.
//!
//! Implements the `ReportDelivery` trait for a Resend-compatible email API,
//! provides the `mailto:` compose-link fallback, and the dispatcher that
//! applies the exactly-once fallback policy.

pub mod config;
pub mod dispatch;
pub mod mailto;
pub mod mock;
pub mod resend;

pub use config::{create_delivery, load_config, DeliveryConfig, ProctorConfig};
pub use dispatch::{DeliveryOutcome, Dispatcher};
