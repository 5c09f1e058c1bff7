use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - attached to exactly one post and one author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment.
    pub fn new(author_id: Uuid, post_id: Uuid, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            post_id,
            body,
            created_at: Utc::now(),
        }
    }
}
