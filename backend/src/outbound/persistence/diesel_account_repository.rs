//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.
//!
//! Uniqueness is left to the `accounts_username_key` and `accounts_email_key`
//! constraints; violations are reported as `UsernameTaken`/`EmailTaken`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{
    Account, AccountId, EmailAddress, NewAccount, PasswordHash, Role, Username,
};

use super::diesel_error_mapping::{Attempted, map_diesel_error, map_pool_error};
use super::models::{AccountRow, AccountUpdate, NewAccountRow};
use super::pool::DbPool;
use super::schema::accounts;

/// Diesel-backed implementation of the [`AccountRepository`] port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn corrupt_row(id: uuid::Uuid, reason: impl std::fmt::Display) -> AccountRepositoryError {
    AccountRepositoryError::query(format!("stored account {id} is invalid: {reason}"))
}

/// Convert a database row into a domain account, rejecting invalid data.
fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    let id = row.id;
    let username = Username::new(&row.username).map_err(|err| corrupt_row(id, err))?;
    let email = EmailAddress::new(&row.email).map_err(|err| corrupt_row(id, err))?;
    let role = Role::parse(&row.role)
        .ok_or_else(|| corrupt_row(id, format!("unknown role {}", row.role)))?;
    Ok(NewAccount {
        username,
        password_hash: PasswordHash::new(row.password_hash),
        email,
        first_name: row.first_name,
        last_name: row.last_name,
        role,
    }
    .with_id(AccountId::from_uuid(id)))
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AccountRow> = accounts::table
            .find(*id.as_uuid())
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_account).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AccountRow> = accounts::table
            .filter(accounts::username.eq(username.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(row_to_account).transpose()
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            accounts::table.filter(accounts::username.eq(username.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, None))
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            accounts::table.filter(accounts::email.eq(email.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, None))
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewAccountRow {
            id: *AccountId::random().as_uuid(),
            username: account.username.as_ref(),
            password_hash: account.password_hash.as_str(),
            email: account.email.as_ref(),
            first_name: account.first_name.as_deref(),
            last_name: account.last_name.as_deref(),
            role: account.role.as_str(),
        };
        let row = diesel::insert_into(accounts::table)
            .values(&new_row)
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    Some(Attempted {
                        username: new_row.username,
                        email: new_row.email,
                    }),
                )
            })?;
        row_to_account(row)
    }

    async fn update(&self, account: &Account) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = AccountUpdate {
            password_hash: account.password_hash().as_str(),
            email: account.email().as_ref(),
            first_name: account.first_name(),
            last_name: account.last_name(),
        };
        let row: Option<AccountRow> = diesel::update(accounts::table.find(*account.id().as_uuid()))
            .set((&changes, accounts::updated_at.eq(diesel::dsl::now)))
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| {
                map_diesel_error(
                    err,
                    Some(Attempted {
                        username: account.username().as_ref(),
                        email: changes.email,
                    }),
                )
            })?;
        match row {
            Some(row) => row_to_account(row),
            None => Err(AccountRepositoryError::missing(account.id().to_string())),
        }
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(accounts::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        if removed == 0 {
            return Err(AccountRepositoryError::missing(id.to_string()));
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AccountRow> = accounts::table
            .order((accounts::created_at.asc(), accounts::id.asc()))
            .select(AccountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_account).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(role: &str, email: &str) -> AccountRow {
        AccountRow {
            id: Uuid::new_v4(),
            username: "carol".to_owned(),
            password_hash: "$argon2id$v=19$stub".to_owned(),
            email: email.to_owned(),
            first_name: Some("Carol".to_owned()),
            last_name: None,
            role: role.to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("USER", Role::User)]
    #[case("ADMIN", Role::Admin)]
    fn rows_convert_to_accounts(#[case] stored: &str, #[case] expected: Role) {
        let source = row(stored, "c@x.com");
        let id = source.id;
        let account = row_to_account(source).expect("valid row");

        assert_eq!(account.id().as_uuid(), &id);
        assert_eq!(account.role(), expected);
        assert_eq!(account.first_name(), Some("Carol"));
        assert_eq!(account.password_hash().as_str(), "$argon2id$v=19$stub");
    }

    #[rstest]
    #[case("ROLE_ADMIN", "c@x.com")]
    #[case("USER", "not-an-email")]
    fn invalid_rows_are_query_errors(#[case] role: &str, #[case] email: &str) {
        let err = row_to_account(row(role, email)).expect_err("corrupt row");
        assert!(matches!(err, AccountRepositoryError::Query { .. }));
    }
}
