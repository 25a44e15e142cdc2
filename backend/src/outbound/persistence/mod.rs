//! Account persistence adapters.
//!
//! `DieselAccountRepository` stores accounts in PostgreSQL through
//! `diesel-async` and a `bb8` pool. `InMemoryAccountRepository` keeps them in
//! process for local runs and tests. Diesel row structs and the schema stay
//! private to this module.
//!
//! # Example
//!
//! ```ignore
//! use account_service::outbound::persistence::{DbPool, DieselAccountRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/accounts")).await?;
//! let repo = DieselAccountRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_error_mapping;
mod in_memory_account_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use in_memory_account_repository::InMemoryAccountRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
