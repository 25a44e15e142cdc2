//! Account handlers.
//!
//! ```text
//! GET    /api/users/me
//! GET    /api/users
//! GET    /api/users/{id}
//! PUT    /api/users/{id} {"email":"carol@example.com","firstName":"Carol"}
//! DELETE /api/users/{id}
//! ```
//!
//! Every handler resolves the caller from the session first; access rules
//! live in the lifecycle engine.

use actix_web::{HttpResponse, delete, get, put, web};

use crate::domain::Error;
use crate::domain::ports::AccountPatch;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_caller;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users_dto::{AccountResponse, UpdateAccountRequest};
use crate::inbound::http::validation::parse_account_id;

/// Fetch the account behind the current session.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current account", body = AccountResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Account store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentAccount"
)]
#[get("/me")]
pub async fn current_account(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AccountResponse>> {
    let caller = require_caller(&session, &state).await?;
    let account = state
        .accounts
        .get_by_username(caller.username(), &caller)
        .await?;
    Ok(web::Json(AccountResponse::project(&account, state.responses)))
}

/// List every account. Admin only.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All accounts", body = [AccountResponse]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 503, description = "Account store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listAccounts"
)]
#[get("")]
pub async fn list_accounts(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AccountResponse>>> {
    let caller = require_caller(&session, &state).await?;
    let accounts = state.accounts.list_all(&caller).await?;
    Ok(web::Json(
        accounts
            .iter()
            .map(|account| AccountResponse::project(account, state.responses))
            .collect(),
    ))
}

/// Fetch one account. Callers may read themselves; admins may read anyone.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account", body = AccountResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Access denied", body = Error),
        (status = 404, description = "Account not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getAccount"
)]
#[get("/{id}")]
pub async fn get_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<AccountResponse>> {
    let caller = require_caller(&session, &state).await?;
    let id = parse_account_id(&path.into_inner())?;
    let account = state.accounts.get(&id, &caller).await?;
    Ok(web::Json(AccountResponse::project(&account, state.responses)))
}

/// Replace the mutable fields of an account and notify every admin.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "Account id")),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Updated account", body = AccountResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Access denied", body = Error),
        (status = 404, description = "Account not found", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateAccount"
)]
#[put("/{id}")]
pub async fn update_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateAccountRequest>,
) -> ApiResult<web::Json<AccountResponse>> {
    let caller = require_caller(&session, &state).await?;
    let id = parse_account_id(&path.into_inner())?;
    let patch = AccountPatch::try_from(payload.into_inner())?;
    let account = state.accounts.update(&id, patch, &caller).await?;
    Ok(web::Json(AccountResponse::project(&account, state.responses)))
}

/// Hard-delete an account and notify every admin.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Access denied", body = Error),
        (status = 404, description = "Account not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteAccount"
)]
#[delete("/{id}")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = require_caller(&session, &state).await?;
    let id = parse_account_id(&path.into_inner())?;
    state.accounts.delete(&id, &caller).await?;
    Ok(HttpResponse::NoContent().finish())
}
