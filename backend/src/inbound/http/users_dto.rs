//! Account request and response payloads.
//!
//! Payloads use camelCase field names to match the legacy user API clients
//! already speak.

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::{AccountPatch, RegistrationRequest};
use crate::domain::{Account, EmailAddress, Error, LoginCredentials, Password, Role, Username};
use crate::inbound::http::state::ResponsePolicy;
use crate::inbound::http::validation::{account_field_error, login_field_error};

/// Account projection returned by every account endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "carol")]
    pub username: String,
    #[schema(example = "carol@example.com")]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    /// Stored password hash; only present when the deployment opts in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

impl AccountResponse {
    /// Project an account for clients under the given policy.
    pub fn project(account: &Account, policy: ResponsePolicy) -> Self {
        Self {
            id: account.id().to_string(),
            username: account.username().to_string(),
            email: account.email().to_string(),
            first_name: account.first_name().map(str::to_owned),
            last_name: account.last_name().map(str::to_owned),
            role: account.role(),
            password_hash: policy
                .expose_password_hash
                .then(|| account.password_hash().as_str().to_owned()),
        }
    }
}

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Accepted for compatibility; registration always creates `USER`
    /// accounts.
    pub role: Option<String>,
}

impl TryFrom<RegisterRequest> for RegistrationRequest {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let username = Username::new(&value.username).map_err(account_field_error)?;
        let email = EmailAddress::new(&value.email).map_err(account_field_error)?;
        let requested_role = value.role.as_deref().and_then(|raw| {
            let parsed = Role::parse(raw);
            if parsed.is_none() {
                debug!(role = raw, "unrecognised role in registration payload");
            }
            parsed
        });
        Ok(Self {
            username,
            password: Password::new(value.password),
            email,
            first_name: value.first_name,
            last_name: value.last_name,
            requested_role,
        })
    }
}

/// Request body for `PUT /api/users/{id}`.
///
/// Email and names replace the stored values, so omitting a name clears it.
/// An absent or empty password keeps the current one.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<UpdateAccountRequest> for AccountPatch {
    type Error = Error;

    fn try_from(value: UpdateAccountRequest) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(&value.email).map_err(account_field_error)?;
        Ok(Self {
            email,
            first_name: value.first_name,
            last_name: value.last_name,
            password: value.password.map(Password::new),
        })
    }
}

/// Request body for `POST /api/auth/login`.
///
/// Example JSON:
/// `{"username":"carol","password":"secret"}`
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password).map_err(login_field_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountId, NewAccount, PasswordHash};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn carol() -> Account {
        NewAccount {
            username: Username::new("carol").expect("valid username"),
            password_hash: PasswordHash::new("$argon2id$stored"),
            email: EmailAddress::new("c@x.com").expect("valid email"),
            first_name: Some("Carol".to_owned()),
            last_name: None,
            role: Role::User,
        }
        .with_id(AccountId::random())
    }

    #[rstest]
    fn projection_omits_the_hash_by_default(carol: Account) {
        let value = serde_json::to_value(AccountResponse::project(&carol, ResponsePolicy::default()))
            .expect("serialise");

        assert_eq!(value["username"], "carol");
        assert_eq!(value["firstName"], "Carol");
        assert_eq!(value["lastName"], Value::Null);
        assert_eq!(value["role"], "USER");
        assert!(value.get("passwordHash").is_none());
    }

    #[rstest]
    fn projection_includes_the_hash_when_opted_in(carol: Account) {
        let policy = ResponsePolicy {
            expose_password_hash: true,
        };
        let response = AccountResponse::project(&carol, policy);
        assert_eq!(response.password_hash.as_deref(), Some("$argon2id$stored"));
    }

    #[rstest]
    fn registration_keeps_a_parsed_role_request() {
        let body: RegisterRequest = serde_json::from_value(json!({
            "username": " mallory ",
            "password": "p",
            "email": "m@x.com",
            "role": "ADMIN",
        }))
        .expect("deserialise");

        let request = RegistrationRequest::try_from(body).expect("valid registration");

        assert_eq!(request.username.as_ref(), "mallory");
        assert_eq!(request.requested_role, Some(Role::Admin));
        assert_eq!(request.first_name, None);
    }

    #[rstest]
    fn registration_rejects_a_bad_email() {
        let body = RegisterRequest {
            username: "carol".into(),
            password: "p".into(),
            email: "not-an-address".into(),
            first_name: None,
            last_name: None,
            role: None,
        };

        let error = RegistrationRequest::try_from(body).expect_err("invalid email");

        assert_eq!(error.details(), Some(&json!({"field": "email", "code": "invalid_email"})));
    }

    #[rstest]
    fn update_payload_maps_an_empty_password_through() {
        let body = UpdateAccountRequest {
            email: "c2@x.com".into(),
            first_name: None,
            last_name: Some("Jones".into()),
            password: Some(String::new()),
        };

        let patch = AccountPatch::try_from(body).expect("valid patch");

        assert_eq!(patch.email.as_ref(), "c2@x.com");
        assert!(patch.password.as_ref().is_some_and(Password::is_empty));
    }
}
