//! Startup provisioning of an initial administrator.
//!
//! Registration only ever creates `USER` accounts, so a fresh deployment has
//! no way to obtain an admin through the API. This writes one straight to
//! the store. It is silent: no admin fan-out runs for the seeded account.

use tracing::info;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, PasswordHasher, PasswordHasherError,
};
use crate::domain::{Account, EmailAddress, NewAccount, Password, Role, Username};

/// Credentials for the administrator seeded at startup.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

/// What [`ensure_admin`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The admin account was created.
    Created(Account),
    /// An account with the seed username already exists; left untouched.
    AlreadyPresent,
}

/// Failures while seeding the administrator.
#[derive(Debug, thiserror::Error)]
pub enum AdminBootstrapError {
    #[error("bootstrap admin password must not be empty")]
    EmptyPassword,
    #[error(transparent)]
    Store(#[from] AccountRepositoryError),
    #[error(transparent)]
    Hashing(#[from] PasswordHasherError),
}

/// Create the seed admin unless its username is already taken.
///
/// An existing account is never modified, whatever its role.
pub async fn ensure_admin<R, H>(
    accounts: &R,
    hasher: &H,
    seed: AdminSeed,
) -> Result<BootstrapOutcome, AdminBootstrapError>
where
    R: AccountRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    if seed.password.is_empty() {
        return Err(AdminBootstrapError::EmptyPassword);
    }
    if accounts.exists_by_username(&seed.username).await? {
        info!(username = %seed.username, "bootstrap admin already present");
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    let password_hash = hasher.hash(&seed.password)?;
    let new_account = NewAccount {
        username: seed.username,
        password_hash,
        email: seed.email,
        first_name: None,
        last_name: None,
        role: Role::Admin,
    };
    match accounts.insert(new_account).await {
        Ok(account) => {
            info!(username = %account.username(), "bootstrap admin created");
            Ok(BootstrapOutcome::Created(account))
        }
        Err(AccountRepositoryError::UsernameTaken { .. }) => Ok(BootstrapOutcome::AlreadyPresent),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccountId;
    use crate::domain::ports::{FixturePasswordHasher, MockAccountRepository};
    use rstest::{fixture, rstest};

    #[fixture]
    fn seed() -> AdminSeed {
        AdminSeed {
            username: Username::new("root").expect("valid username"),
            email: EmailAddress::new("root@x.com").expect("valid email"),
            password: Password::new("changeme"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn creates_an_admin_with_a_hashed_password(seed: AdminSeed) {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_exists_by_username().returning(|_| Ok(false));
        accounts
            .expect_insert()
            .withf(|account| {
                account.role == Role::Admin && account.password_hash.as_str() != "changeme"
            })
            .times(1)
            .returning(|account| Ok(account.with_id(AccountId::random())));

        let outcome = ensure_admin(&accounts, &FixturePasswordHasher, seed)
            .await
            .expect("bootstrap");

        let BootstrapOutcome::Created(account) = outcome else {
            panic!("expected a created admin");
        };
        assert!(account.role().is_admin());
        assert_eq!(account.username().as_ref(), "root");
    }

    #[rstest]
    #[tokio::test]
    async fn leaves_an_existing_account_alone(seed: AdminSeed) {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_exists_by_username().returning(|_| Ok(true));
        accounts.expect_insert().never();

        let outcome = ensure_admin(&accounts, &FixturePasswordHasher, seed)
            .await
            .expect("bootstrap");

        assert_eq!(outcome, BootstrapOutcome::AlreadyPresent);
    }

    #[rstest]
    #[tokio::test]
    async fn losing_an_insert_race_counts_as_present(seed: AdminSeed) {
        let mut accounts = MockAccountRepository::new();
        accounts.expect_exists_by_username().returning(|_| Ok(false));
        accounts
            .expect_insert()
            .returning(|account| Err(AccountRepositoryError::username_taken(account.username)));

        let outcome = ensure_admin(&accounts, &FixturePasswordHasher, seed)
            .await
            .expect("bootstrap");

        assert_eq!(outcome, BootstrapOutcome::AlreadyPresent);
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_an_empty_password(mut seed: AdminSeed) {
        seed.password = Password::new("");
        let accounts = MockAccountRepository::new();

        let err = ensure_admin(&accounts, &FixturePasswordHasher, seed)
            .await
            .expect_err("empty password");

        assert!(matches!(err, AdminBootstrapError::EmptyPassword));
    }
}
