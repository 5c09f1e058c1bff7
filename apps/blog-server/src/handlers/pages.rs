//! Public pages: the post index and the static pages.

use actix_web::{HttpResponse, web};

use quill_shared::dto::{IndexPage, PostSummary, StaticPage};

use crate::middleware::error::AppResult;
use crate::session::SessionContext;
use crate::state::AppState;

/// GET /
pub async fn index(state: web::Data<AppState>, session: SessionContext) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;

    let mut summaries = Vec::with_capacity(posts.len());
    for post in posts {
        let author = author_name(&state, post.author_id).await;
        summaries.push(PostSummary {
            id: post.id,
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            author,
            date: post.display_date(),
        });
    }

    Ok(HttpResponse::Ok().json(IndexPage {
        posts: summaries,
        flash: session.take_flash(),
    }))
}

/// GET /about
pub async fn about() -> HttpResponse {
    HttpResponse::Ok().json(StaticPage { page: "about" })
}

/// GET /contact
pub async fn contact() -> HttpResponse {
    HttpResponse::Ok().json(StaticPage { page: "contact" })
}

/// Resolve an author id to a display name. Referential integrity makes a
/// miss unexpected; log it and degrade instead of failing the whole page.
pub(crate) async fn author_name(state: &AppState, author_id: uuid::Uuid) -> String {
    match state.users.find_by_id(author_id).await {
        Ok(Some(user)) => user.name,
        Ok(None) => {
            tracing::error!(%author_id, "author referenced by content does not exist");
            "unknown".to_string()
        }
        Err(e) => {
            tracing::error!(%author_id, "failed to load author: {e}");
            "unknown".to_string()
        }
    }
}
