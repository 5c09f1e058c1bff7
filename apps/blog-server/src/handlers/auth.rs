//! Registration, login, and logout.

use actix_web::{HttpResponse, web};

use quill_core::domain::{Role, User};
use quill_shared::dto::FormPage;
use quill_shared::forms::{LoginForm, RegisterForm};

use crate::handlers::see_other;
use crate::middleware::error::{AppError, AppResult};
use crate::session::SessionContext;
use crate::state::AppState;

const REGISTER_FIELDS: &[&str] = &["email", "password", "name"];
const LOGIN_FIELDS: &[&str] = &["email", "password"];

/// GET /register
pub async fn register_form(session: SessionContext) -> HttpResponse {
    HttpResponse::Ok().json(FormPage::new("register", REGISTER_FIELDS).with_flash(session.take_flash()))
}

/// POST /register
///
/// First account ever created becomes the admin; everyone after is a member.
/// Registering an email that already exists redirects to the login page with
/// a flash instead of creating a second account.
pub async fn register(
    state: web::Data<AppState>,
    session: SessionContext,
    body: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    form.validate().map_err(AppError::Validation)?;

    if state.users.find_by_email(&form.email).await?.is_some() {
        session.set_flash("You've signed up with this email, log in instead.")?;
        return Ok(see_other("/login"));
    }

    let role = if state.users.count().await? == 0 {
        Role::Admin
    } else {
        Role::Member
    };

    let password_hash = state.passwords.hash(&form.password)?;
    let user = User::new(form.email, password_hash, form.name, role);

    let saved = match state.users.save(user).await {
        Ok(saved) => saved,
        // Lost a race on the unique email; same outcome as the lookup above.
        Err(quill_core::error::RepoError::Constraint(_)) => {
            session.set_flash("You've signed up with this email, log in instead.")?;
            return Ok(see_other("/login"));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %saved.id, role = ?saved.role, "user registered");
    session.persist_user(saved.id)?;

    Ok(see_other("/"))
}

/// GET /login
pub async fn login_form(session: SessionContext) -> HttpResponse {
    HttpResponse::Ok().json(FormPage::new("login", LOGIN_FIELDS).with_flash(session.take_flash()))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    session: SessionContext,
    body: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    form.validate().map_err(AppError::Validation)?;

    let Some(user) = state.users.find_by_email(&form.email).await? else {
        session.set_flash("Email not exist, try again.")?;
        return Err(AppError::Unauthorized("Email not exist, try again.".to_string()));
    };

    if !state.passwords.verify(&form.password, &user.password_hash)? {
        session.set_flash("Password error, try again.")?;
        return Err(AppError::Unauthorized("Password error, try again.".to_string()));
    }

    tracing::debug!(user_id = %user.id, "user logged in");
    session.persist_user(user.id)?;

    Ok(see_other("/"))
}

/// GET /logout
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other("/")
}
