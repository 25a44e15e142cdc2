//! Log-only notification sink used when no delivery endpoint is configured.

use async_trait::async_trait;
use tracing::info;

use crate::domain::NotificationMessage;
use crate::domain::ports::{NotificationDeliveryError, NotificationSink};

/// Writes each message to the log at `info` and reports success.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), NotificationDeliveryError> {
        info!(
            recipient = %message.recipient,
            subject = %message.subject,
            "notification logged instead of delivered"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmailAddress;

    #[tokio::test]
    async fn always_accepts() {
        let message = NotificationMessage {
            recipient: EmailAddress::new("bob@x.com").expect("valid email"),
            subject: "Deleted user carol".to_owned(),
            body: "Deleted user with username - carol".to_owned(),
        };
        assert!(TracingNotificationSink.deliver(&message).await.is_ok());
    }
}
