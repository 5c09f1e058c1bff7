//! Post pages and admin-only post management, plus comment submission.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Comment, Post};
use quill_shared::dto::{CommentView, FormPage, PostPage};
use quill_shared::forms::{CommentForm, FieldErrors, PostForm};

use crate::handlers::{current_user, pages::author_name, require_admin, see_other};
use crate::middleware::error::{AppError, AppResult};
use crate::session::SessionContext;
use crate::state::AppState;

const POST_FIELDS: &[&str] = &["title", "subtitle", "img_url", "body"];

async fn load_post(state: &AppState, id: Uuid) -> AppResult<Post> {
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))
}

/// GET /post/{id}
pub async fn show_post(
    state: web::Data<AppState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = load_post(&state, path.into_inner()).await?;
    let comments = state.comments.find_by_post_id(post.id).await?;

    let mut views = Vec::with_capacity(comments.len());
    for comment in comments {
        let author = author_name(&state, comment.author_id).await;
        views.push(CommentView {
            id: comment.id,
            author,
            body: comment.body,
            date: comment.created_at.format("%B %d, %Y").to_string(),
        });
    }

    let author = author_name(&state, post.author_id).await;
    let date = post.display_date();
    Ok(HttpResponse::Ok().json(PostPage {
        id: post.id,
        title: post.title,
        subtitle: post.subtitle,
        body: post.body,
        img_url: post.img_url,
        author,
        date,
        comments: views,
        flash: session.take_flash(),
    }))
}

/// POST /post/{id} - comment submission.
///
/// Anonymous callers are sent to the login page with a flash and nothing is
/// created.
pub async fn add_comment(
    state: web::Data<AppState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    body: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let Some(user) = current_user(&state, &session).await? else {
        session.set_flash("Please log in to comment.")?;
        return Ok(see_other("/login"));
    };

    let form = body.into_inner();
    form.validate().map_err(AppError::Validation)?;

    // The comment must reference an existing post.
    let post = load_post(&state, path.into_inner()).await?;

    let comment = state
        .comments
        .save(Comment::new(user.id, post.id, form.body))
        .await?;
    tracing::debug!(comment_id = %comment.id, post_id = %post.id, "comment created");

    Ok(see_other(&format!("/post/{}", post.id)))
}

/// GET /new-post (admin only)
pub async fn new_post_form(
    state: web::Data<AppState>,
    session: SessionContext,
) -> AppResult<HttpResponse> {
    require_admin(&state, &session).await?;
    Ok(HttpResponse::Ok().json(FormPage::new("post", POST_FIELDS)))
}

/// POST /new-post (admin only)
pub async fn create_post(
    state: web::Data<AppState>,
    session: SessionContext,
    body: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let admin = require_admin(&state, &session).await?;

    let form = body.into_inner();
    form.validate().map_err(AppError::Validation)?;

    if state.posts.find_by_title(&form.title).await?.is_some() {
        return Err(AppError::Validation(duplicate_title()));
    }

    let post = state
        .posts
        .save(Post::new(
            admin.id,
            form.title,
            form.subtitle,
            form.body,
            form.img_url,
        ))
        .await?;
    tracing::info!(post_id = %post.id, "post created");

    Ok(see_other("/"))
}

/// GET /edit-post/{id} (admin only) - current values for prefilling.
pub async fn edit_post_form(
    state: web::Data<AppState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    require_admin(&state, &session).await?;

    let post = load_post(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostForm {
        title: post.title,
        subtitle: post.subtitle,
        img_url: post.img_url,
        body: post.body,
    }))
}

/// POST /edit-post/{id} (admin only)
///
/// Author and creation date are preserved; only the form fields change.
pub async fn edit_post(
    state: web::Data<AppState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    body: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    require_admin(&state, &session).await?;

    let mut post = load_post(&state, path.into_inner()).await?;

    let form = body.into_inner();
    form.validate().map_err(AppError::Validation)?;

    if form.title != post.title && state.posts.find_by_title(&form.title).await?.is_some() {
        return Err(AppError::Validation(duplicate_title()));
    }

    post.title = form.title;
    post.subtitle = form.subtitle;
    post.img_url = form.img_url;
    post.body = form.body;

    let post = state.posts.save(post).await?;
    tracing::info!(post_id = %post.id, "post updated");

    Ok(see_other(&format!("/post/{}", post.id)))
}

/// GET /delete/{id} (admin only)
pub async fn delete_post(
    state: web::Data<AppState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    require_admin(&state, &session).await?;

    let post = load_post(&state, path.into_inner()).await?;

    // Comments hang off the post; remove them first so no orphans remain.
    let removed = state.comments.delete_by_post_id(post.id).await?;
    state.posts.delete(post.id).await?;
    tracing::info!(post_id = %post.id, comments_removed = removed, "post deleted");

    Ok(see_other("/"))
}

fn duplicate_title() -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert("title", "A post with this title already exists.".to_string());
    errors
}
