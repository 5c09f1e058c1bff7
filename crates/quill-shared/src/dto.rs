//! Data Transfer Objects - the JSON page payloads the server renders.
//!
//! Template rendering lives outside this system; these payloads are the
//! "view" side of each handler's contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One post row on the index page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
}

/// A rendered comment under a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: Uuid,
    pub author: String,
    pub body: String,
    pub date: String,
}

/// The full post page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPage {
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
    pub author: String,
    pub date: String,
    pub comments: Vec<CommentView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<String>,
}

/// The index page: all posts, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexPage {
    pub posts: Vec<PostSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<String>,
}

/// Descriptor for a form page; clients render the fields themselves.
#[derive(Debug, Clone, Serialize)]
pub struct FormPage {
    pub form: &'static str,
    pub fields: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<String>,
}

impl FormPage {
    pub fn new(form: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            form,
            fields,
            flash: None,
        }
    }

    pub fn with_flash(mut self, flash: Option<String>) -> Self {
        self.flash = flash;
        self
    }
}

/// A static page (about, contact).
#[derive(Debug, Clone, Serialize)]
pub struct StaticPage {
    pub page: &'static str,
}
