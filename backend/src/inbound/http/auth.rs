//! Registration and session handlers.
//!
//! ```text
//! POST /api/auth/register {"username":"carol","password":"secret","email":"carol@example.com"}
//! POST /api/auth/login {"username":"carol","password":"secret"}
//! POST /api/auth/logout
//! ```

use actix_web::{HttpResponse, post, web};
use tracing::debug;

use crate::domain::ports::RegistrationRequest;
use crate::domain::{CallerContext, Error, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users_dto::{AccountResponse, LoginRequest, RegisterRequest};

/// Resolve the caller behind the current session.
///
/// The account is re-read by id on every request. A session whose account has
/// since been deleted is purged and treated as anonymous.
pub(crate) async fn require_caller(
    session: &SessionContext,
    state: &HttpState,
) -> ApiResult<CallerContext> {
    let account_id = session.require_account_id()?;
    match state.login.resolve_caller(&account_id).await? {
        Some(caller) => Ok(caller),
        None => {
            debug!(%account_id, "session refers to a deleted account");
            session.purge();
            Err(Error::unauthorized("login required"))
        }
    }
}

/// Create a `USER` account and notify every admin.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username or email already registered", body = Error),
        (status = 503, description = "Account store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let request = RegistrationRequest::try_from(payload.into_inner())?;
    let account = state.accounts.register(request).await?;
    Ok(HttpResponse::Created().json(AccountResponse::project(&account, state.responses)))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Account store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let caller = state.login.authenticate(&credentials).await?;
    session.persist_account_id(&caller.account_id())?;
    Ok(HttpResponse::Ok().finish())
}

/// End the current session. Succeeds even without one.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}
