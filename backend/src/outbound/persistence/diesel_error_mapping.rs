//! Diesel and pool failures mapped onto [`AccountRepositoryError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::AccountRepositoryError;

use super::pool::PoolError;

pub(super) const USERNAME_CONSTRAINT: &str = "accounts_username_key";
pub(super) const EMAIL_CONSTRAINT: &str = "accounts_email_key";

pub(super) fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    AccountRepositoryError::connection(error.message())
}

/// Values written by the failing statement, used to name the duplicate.
pub(super) struct Attempted<'a> {
    pub username: &'a str,
    pub email: &'a str,
}

pub(super) fn map_diesel_error(
    error: DieselError,
    attempted: Option<Attempted<'_>>,
) -> AccountRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let constraint = info.constraint_name().unwrap_or_default();
            match (constraint, attempted) {
                (USERNAME_CONSTRAINT, Some(values)) => {
                    AccountRepositoryError::username_taken(values.username)
                }
                (EMAIL_CONSTRAINT, Some(values)) => AccountRepositoryError::email_taken(values.email),
                _ => AccountRepositoryError::query("unique constraint violated"),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AccountRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => AccountRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => AccountRepositoryError::query("database query error"),
        _ => AccountRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    struct FakeInfo {
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for FakeInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("accounts")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(FakeInfo { constraint }),
        )
    }

    fn attempted() -> Option<Attempted<'static>> {
        Some(Attempted {
            username: "carol",
            email: "c@x.com",
        })
    }

    #[rstest]
    #[case(Some(USERNAME_CONSTRAINT), AccountRepositoryError::username_taken("carol"))]
    #[case(Some(EMAIL_CONSTRAINT), AccountRepositoryError::email_taken("c@x.com"))]
    #[case(None, AccountRepositoryError::query("unique constraint violated"))]
    fn unique_violations_map_by_constraint(
        #[case] constraint: Option<&'static str>,
        #[case] expected: AccountRepositoryError,
    ) {
        assert_eq!(map_diesel_error(unique_violation(constraint), attempted()), expected);
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(FakeInfo { constraint: None }),
        );
        assert!(matches!(
            map_diesel_error(error, None),
            AccountRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            AccountRepositoryError::connection("timed out")
        );
    }
}
