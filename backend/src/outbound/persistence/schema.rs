//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` and `email` carry unique constraints named
    /// `accounts_username_key` and `accounts_email_key`.
    accounts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name (max 64 characters).
        username -> Varchar,
        /// Encoded password hash (PHC string).
        password_hash -> Text,
        /// Unique contact address (max 254 characters).
        email -> Varchar,
        first_name -> Nullable<Text>,
        last_name -> Nullable<Text>,
        /// `USER` or `ADMIN`.
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
