//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the database repositories and password hashing.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM; without it
//!   only the in-memory repositories are available

pub mod auth;
pub mod database;

pub use auth::Argon2PasswordService;
pub use database::{InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};
