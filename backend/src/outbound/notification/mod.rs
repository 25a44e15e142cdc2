//! Notification sink adapters.

mod http_sink;
mod tracing_sink;

pub use http_sink::HttpNotificationSink;
pub use tracing_sink::TracingNotificationSink;
