//! Credential verification against the account store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{AccountRepository, AccountRepositoryError, LoginService, PasswordHasher};
use crate::domain::{AccountId, CallerContext, Error, LoginCredentials};

/// [`LoginService`] backed by an [`AccountRepository`] and a [`PasswordHasher`].
pub struct AccountLoginService<R: ?Sized, H: ?Sized> {
    accounts: Arc<R>,
    hasher: Arc<H>,
}

impl<R: ?Sized, H: ?Sized> AccountLoginService<R, H> {
    /// Create a login service over the given adapters.
    pub fn new(accounts: Arc<R>, hasher: Arc<H>) -> Self {
        Self { accounts, hasher }
    }
}

fn map_repository_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("account repository unavailable: {message}"))
        }
        other => Error::internal(format!("account repository error: {other}")),
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

#[async_trait]
impl<R, H> LoginService for AccountLoginService<R, H>
where
    R: AccountRepository + ?Sized,
    H: PasswordHasher + ?Sized + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<CallerContext, Error> {
        let Some(account) = self
            .accounts
            .find_by_username(credentials.username())
            .await
            .map_err(map_repository_error)?
        else {
            debug!(username = %credentials.username(), "login for unknown account");
            return Err(invalid_credentials());
        };

        let hasher = Arc::clone(&self.hasher);
        let password = credentials.password().clone();
        let stored = account.password_hash().clone();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
            .map_err(|err| Error::internal(format!("password verification failed: {err}")))?;
        if !verified {
            debug!(username = %credentials.username(), "login with wrong password");
            return Err(invalid_credentials());
        }
        Ok(CallerContext::for_account(&account))
    }

    async fn resolve_caller(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<CallerContext>, Error> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await
            .map_err(map_repository_error)?;
        Ok(account.as_ref().map(CallerContext::for_account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixturePasswordHasher, MockAccountRepository};
    use crate::domain::{EmailAddress, ErrorCode, NewAccount, Password, Role, Username};
    use rstest::rstest;

    fn stored(username: &str, password: &str, role: Role) -> crate::domain::Account {
        NewAccount {
            username: Username::new(username).expect("valid username"),
            password_hash: FixturePasswordHasher
                .hash(&Password::new(password))
                .expect("fixture hash"),
            email: EmailAddress::new(format!("{username}@x.com")).expect("valid email"),
            first_name: None,
            last_name: None,
            role,
        }
        .with_id(AccountId::random())
    }

    fn service_with(repo: MockAccountRepository) -> AccountLoginService<MockAccountRepository, FixturePasswordHasher> {
        AccountLoginService::new(Arc::new(repo), Arc::new(FixturePasswordHasher))
    }

    #[rstest]
    #[case("bob", "s3cret", true)]
    #[case("bob", "wrong", false)]
    #[case("nobody", "s3cret", false)]
    #[tokio::test]
    async fn authenticate_checks_username_and_password(
        #[case] username: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_username().times(1).returning(|name| {
            Ok((name.as_ref() == "bob").then(|| stored("bob", "s3cret", Role::Admin)))
        });
        let creds = LoginCredentials::try_from_parts(username, password).expect("credentials shape");

        let result = service_with(repo).authenticate(&creds).await;

        match (should_succeed, result) {
            (true, Ok(caller)) => {
                assert_eq!(caller.username().as_ref(), "bob");
                assert_eq!(caller.role(), Role::Admin);
            }
            (false, Err(err)) => {
                assert_eq!(err.code(), ErrorCode::Unauthorized);
                assert_eq!(err.message(), "invalid credentials");
            }
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(caller)) => panic!("expected failure, got success: {caller:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn resolve_caller_rereads_the_account_by_id() {
        let carol = stored("carol", "p", Role::User);
        let carol_id = carol.id();
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_id()
            .withf(move |id| *id == carol_id)
            .times(1)
            .return_once(move |_| Ok(Some(carol)));
        repo.expect_find_by_username().never();

        let caller = service_with(repo)
            .resolve_caller(&carol_id)
            .await
            .expect("lookup succeeds")
            .expect("account exists");

        assert_eq!(caller.account_id(), carol_id);
        assert_eq!(caller.username().as_ref(), "carol");
        assert_eq!(caller.role(), Role::User);
    }

    #[rstest]
    #[tokio::test]
    async fn resolve_caller_for_deleted_account_is_none() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let caller = service_with(repo)
            .resolve_caller(&AccountId::random())
            .await
            .expect("lookup succeeds");

        assert!(caller.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn store_outage_is_service_unavailable() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_username()
            .times(1)
            .return_once(|_| Err(AccountRepositoryError::connection("refused")));
        let creds = LoginCredentials::try_from_parts("bob", "s3cret").expect("credentials shape");

        let err = service_with(repo)
            .authenticate(&creds)
            .await
            .expect_err("store offline");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
