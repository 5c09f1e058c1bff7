use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - one blog entry, owned by its author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn new(
        author_id: Uuid,
        title: String,
        subtitle: String,
        body: String,
        img_url: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            subtitle,
            body,
            img_url,
            created_at: Utc::now(),
        }
    }

    /// Creation date formatted for display, e.g. "August 30, 2026".
    pub fn display_date(&self) -> String {
        self.created_at.format("%B %d, %Y").to_string()
    }
}
