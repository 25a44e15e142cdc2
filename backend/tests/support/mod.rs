//! Shared harness for HTTP integration tests.
//!
//! Builds the real application over the in-memory store, a cheap Argon2
//! hasher, and a sink that records every delivered notification.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use account_service::domain::ports::{NotificationDeliveryError, NotificationSink};
use account_service::domain::{
    AdminSeed, EmailAddress, NotificationMessage, Password, Username, ensure_admin,
};
use account_service::inbound::http::health::HealthState;
use account_service::outbound::hashing::Argon2PasswordHasher;
use account_service::outbound::persistence::InMemoryAccountRepository;
use account_service::server::{AppDependencies, SESSION_COOKIE_NAME, ServerConfig};
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use actix_web::web;
use async_trait::async_trait;
use serde_json::Value;

/// Sink that keeps every message for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<NotificationMessage>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<NotificationMessage> {
        self.delivered.lock().expect("sink lock").clone()
    }

    pub fn subjects(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .map(|message| message.subject)
            .collect()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), NotificationDeliveryError> {
        self.delivered
            .lock()
            .expect("sink lock")
            .push(message.clone());
        Ok(())
    }
}

/// Application wiring plus handles on the adapters behind it.
pub struct TestWorld {
    pub deps: AppDependencies,
    pub sink: Arc<RecordingSink>,
}

/// Build a world with `bob` already provisioned as an admin.
pub async fn world_with_admin(expose_password_hash: bool) -> TestWorld {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let hasher = Arc::new(Argon2PasswordHasher::with_costs(1024, 1, 1).expect("cheap params"));
    let sink = Arc::new(RecordingSink::default());

    ensure_admin(
        accounts.as_ref(),
        hasher.as_ref(),
        AdminSeed {
            username: Username::new("bob").expect("valid username"),
            email: EmailAddress::new("bob@x.com").expect("valid email"),
            password: Password::new("bob-secret"),
        },
    )
    .await
    .expect("seed admin");

    let bind_addr: SocketAddr = "127.0.0.1:0".parse().expect("valid addr");
    let config = ServerConfig::new(Key::generate(), false, SameSite::Lax, bind_addr)
        .with_accounts(accounts)
        .with_hasher(hasher)
        .with_notifications(sink.clone())
        .with_expose_password_hash(expose_password_hash);
    let deps = AppDependencies::from_config(&config, web::Data::new(HealthState::new()));

    TestWorld { deps, sink }
}

/// Send `request` and return the status plus the JSON body, if any.
pub async fn send<S>(app: &S, request: actix_http::Request) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request).await;
    let status = response.status().as_u16();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

/// Register `username` with password `secret`.
pub async fn register<S>(app: &S, username: &str) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(serde_json::json!({
            "username": username,
            "password": "secret",
            "email": format!("{username}@x.com"),
        }))
        .to_request();
    send(app, request).await
}

/// Log in and return the session cookie.
pub async fn login<S>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({"username": username, "password": password}))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status().as_u16(), 200, "login as {username}");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .expect("session cookie")
        .into_owned()
}
