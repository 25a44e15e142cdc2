//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every account, auth, and health endpoint plus the
//! session cookie security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` exports it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Role};
use crate::inbound::http::users_dto::{
    AccountResponse, LoginRequest, RegisterRequest, UpdateAccountRequest,
};
use crate::server::SESSION_COOKIE_NAME;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Encrypted session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Account service API",
        description = "Account registration, session login, and role-checked account management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::users::current_account,
        crate::inbound::http::users::list_accounts,
        crate::inbound::http::users::get_account,
        crate::inbound::http::users::update_account,
        crate::inbound::http::users::delete_account,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AccountResponse,
        RegisterRequest,
        LoginRequest,
        UpdateAccountRequest,
        Role,
        Error,
        ErrorCode
    )),
    tags(
        (name = "auth", description = "Registration and sessions"),
        (name = "users", description = "Account reads, updates, and deletion"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
