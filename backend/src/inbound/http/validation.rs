//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected field becomes `400 invalid_request` with
//! `{"field": ..., "code": ...}` details so clients can point at the input.

use serde_json::json;

use crate::domain::{AccountId, AccountValidationError, Error, LoginValidationError};

fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Map an account value validation failure onto a field-level error.
pub(crate) fn account_field_error(err: AccountValidationError) -> Error {
    let (field, code) = match &err {
        AccountValidationError::EmptyId => ("id", "empty_id"),
        AccountValidationError::InvalidId => ("id", "invalid_uuid"),
        AccountValidationError::EmptyUsername => ("username", "empty_username"),
        AccountValidationError::UsernameTooLong { .. } => ("username", "username_too_long"),
        AccountValidationError::UsernameContainsWhitespace => ("username", "username_whitespace"),
        AccountValidationError::EmptyEmail => ("email", "empty_email"),
        AccountValidationError::InvalidEmail => ("email", "invalid_email"),
        AccountValidationError::EmailTooLong { .. } => ("email", "email_too_long"),
    };
    field_error(field, code, err.to_string())
}

/// Map a login payload validation failure onto a field-level error.
pub(crate) fn login_field_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::Username(inner) => account_field_error(inner),
        LoginValidationError::EmptyPassword => {
            field_error("password", "empty_password", "password must not be empty")
        }
    }
}

/// Parse the `{id}` path segment of account routes.
pub(crate) fn parse_account_id(raw: &str) -> Result<AccountId, Error> {
    AccountId::new(raw).map_err(account_field_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, Username};
    use rstest::rstest;

    fn details(error: &Error) -> (String, String) {
        let details = error.details().expect("details present");
        (
            details["field"].as_str().expect("field").to_owned(),
            details["code"].as_str().expect("code").to_owned(),
        )
    }

    #[rstest]
    #[case("", "username", "empty_username")]
    #[case("two words", "username", "username_whitespace")]
    fn username_errors_name_the_field(
        #[case] raw: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let error = Username::new(raw)
            .map_err(account_field_error)
            .expect_err("invalid username");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(details(&error), (field.to_owned(), code.to_owned()));
    }

    #[rstest]
    fn empty_login_password_is_reported_on_the_password_field() {
        let error = login_field_error(LoginValidationError::EmptyPassword);
        assert_eq!(error.message(), "password must not be empty");
        assert_eq!(
            details(&error),
            ("password".to_owned(), "empty_password".to_owned())
        );
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("   ")]
    fn malformed_ids_are_rejected(#[case] raw: &str) {
        let error = parse_account_id(raw).expect_err("invalid id");
        assert_eq!(details(&error).0, "id");
    }

    #[rstest]
    fn well_formed_ids_parse() {
        let id = parse_account_id("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }
}
