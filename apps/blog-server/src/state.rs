//! Application state - shared across all handlers.
//!
//! All dependencies are constructed here at startup and injected via
//! `web::Data`; nothing lives in module-level globals.

use std::sync::Arc;

use quill_core::ports::{CommentRepository, PasswordService, PostRepository, UserRepository};
use quill_infra::{
    Argon2PasswordService, DatabaseConfig, InMemoryCommentRepository, InMemoryPostRepository,
    InMemoryUserRepository, PostgresCommentRepository, PostgresPostRepository,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        match db_config {
            Some(config) => match config.connect().await {
                Ok(conn) => {
                    let state = Self {
                        users: Arc::new(PostgresUserRepository::new(conn.clone())),
                        posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                        comments: Arc::new(PostgresCommentRepository::new(conn)),
                        passwords: Arc::new(Argon2PasswordService::new()),
                    };
                    tracing::info!("Application state initialized (postgres)");
                    state
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        }
    }

    /// State backed entirely by in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }
}
