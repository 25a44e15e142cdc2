//! Driven port for outbound admin notifications.
//!
//! Delivery failures are returned as values; the fan-out logs them and moves
//! on, so implementations must never panic on transport errors.

use async_trait::async_trait;

use crate::domain::NotificationMessage;

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification delivery adapters.
    pub enum NotificationDeliveryError {
        /// The message could not reach the delivery service.
        Transport { message: String } => "notification transport failed: {message}",
        /// The delivery service refused the message.
        Rejected { status: u16, message: String } =>
            "notification rejected with status {status}: {message}",
    }
}

/// Accepts one constructed message and delivers it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a single message to its recipient.
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), NotificationDeliveryError>;
}
