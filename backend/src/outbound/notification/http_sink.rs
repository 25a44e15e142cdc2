//! Reqwest-backed notification sink.
//!
//! POSTs each message as `{"to", "subject", "text"}` JSON to the notification
//! service endpoint and maps transport failures and non-2xx responses onto
//! [`NotificationDeliveryError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;

use crate::domain::NotificationMessage;
use crate::domain::ports::{NotificationDeliveryError, NotificationSink};

const BODY_PREVIEW_LIMIT: usize = 160;

/// Wire payload accepted by the notification service.
#[derive(Debug, Serialize)]
struct NotificationPayload<'a> {
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl<'a> From<&'a NotificationMessage> for NotificationPayload<'a> {
    fn from(message: &'a NotificationMessage) -> Self {
        Self {
            to: message.recipient.as_ref(),
            subject: &message.subject,
            text: &message.body,
        }
    }
}

/// Sink delivering messages to one HTTP endpoint.
pub struct HttpNotificationSink {
    client: Client,
    endpoint: Url,
}

impl HttpNotificationSink {
    /// Build a sink whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl NotificationSink for HttpNotificationSink {
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), NotificationDeliveryError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&NotificationPayload::from(message))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(map_status_error(status, body.as_ref()))
    }
}

fn map_transport_error(error: reqwest::Error) -> NotificationDeliveryError {
    if error.is_timeout() {
        NotificationDeliveryError::transport(format!("timed out: {error}"))
    } else {
        NotificationDeliveryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> NotificationDeliveryError {
    NotificationDeliveryError::rejected(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();
    if compact.chars().count() > BODY_PREVIEW_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Non-network coverage for payload shaping and status mapping.

    use super::*;
    use crate::domain::EmailAddress;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn payload_uses_the_notification_service_field_names() {
        let message = NotificationMessage {
            recipient: EmailAddress::new("bob@x.com").expect("valid email"),
            subject: "Created user carol".to_owned(),
            body: "Created user with username - carol".to_owned(),
        };

        let value = serde_json::to_value(NotificationPayload::from(&message)).expect("serialise");

        assert_eq!(
            value,
            json!({
                "to": "bob@x.com",
                "subject": "Created user carol",
                "text": "Created user with username - carol",
            })
        );
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST, 400)]
    #[case(StatusCode::SERVICE_UNAVAILABLE, 503)]
    fn non_success_statuses_are_rejections(#[case] status: StatusCode, #[case] code: u16) {
        let error = map_status_error(status, b"  mail   relay\nunavailable ");
        assert_eq!(
            error,
            NotificationDeliveryError::rejected(code, "mail relay unavailable")
        );
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.len(), BODY_PREVIEW_LIMIT + 3);
        assert!(preview.ends_with("..."));
    }
}
