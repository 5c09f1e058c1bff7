//! HTTP handlers and route configuration.

mod auth;
mod pages;
mod posts;

use actix_web::{HttpResponse, http::header, web};

use quill_core::domain::User;

use crate::middleware::error::{AppError, AppResult};
use crate::session::SessionContext;
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::index))
        .route("/about", web::get().to(pages::about))
        .route("/contact", web::get().to(pages::contact))
        .service(
            web::resource("/register")
                .route(web::get().to(auth::register_form))
                .route(web::post().to(auth::register)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(auth::login_form))
                .route(web::post().to(auth::login)),
        )
        .route("/logout", web::get().to(auth::logout))
        .service(
            web::resource("/post/{id}")
                .route(web::get().to(posts::show_post))
                .route(web::post().to(posts::add_comment)),
        )
        .service(
            web::resource("/new-post")
                .route(web::get().to(posts::new_post_form))
                .route(web::post().to(posts::create_post)),
        )
        .service(
            web::resource("/edit-post/{id}")
                .route(web::get().to(posts::edit_post_form))
                .route(web::post().to(posts::edit_post)),
        )
        .route("/delete/{id}", web::get().to(posts::delete_post));
}

/// 303 redirect to `location`; the standard outcome of a successful POST.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Load the user behind the current session, if any.
///
/// A session pointing at a deleted or unknown user id is treated as
/// anonymous rather than an error.
pub(crate) async fn current_user(
    state: &AppState,
    session: &SessionContext,
) -> AppResult<Option<User>> {
    let Some(user_id) = session.user_id()? else {
        return Ok(None);
    };
    Ok(state.users.find_by_id(user_id).await?)
}

/// Guard for the post-management routes: the caller must be logged in as an
/// admin, otherwise the request is rejected with 403 regardless of its body.
pub(crate) async fn require_admin(state: &AppState, session: &SessionContext) -> AppResult<User> {
    match current_user(state, session).await? {
        Some(user) if user.is_admin() => Ok(user),
        _ => Err(AppError::Forbidden),
    }
}
