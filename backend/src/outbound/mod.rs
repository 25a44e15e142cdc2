//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL (Diesel) and in-memory account stores
//! - **hashing**: Argon2id password hashing
//! - **notification**: HTTP and log-only notification sinks
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod hashing;
pub mod notification;
pub mod persistence;
