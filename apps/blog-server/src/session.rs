//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers only deal with the two things stored
//! in the cookie: the logged-in user's id and the one-shot flash message.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::middleware::error::AppError;

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASH_KEY: &str = "flash";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: Uuid) -> Result<(), AppError> {
        self.0
            .insert(USER_ID_KEY, user_id)
            .map_err(|e| AppError::Internal(format!("failed to persist session: {e}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<Uuid>, AppError> {
        self.0
            .get::<Uuid>(USER_ID_KEY)
            .map_err(|e| AppError::Internal(format!("failed to read session: {e}")))
    }

    /// Drop everything stored in the session (logout).
    pub fn purge(&self) {
        self.0.purge();
    }

    /// Store a one-shot notice for the next rendered page.
    pub fn set_flash(&self, message: &str) -> Result<(), AppError> {
        self.0
            .insert(FLASH_KEY, message)
            .map_err(|e| AppError::Internal(format!("failed to store flash: {e}")))
    }

    /// Take the pending flash message, clearing it from the session.
    pub fn take_flash(&self) -> Option<String> {
        self.0.remove_as::<String>(FLASH_KEY).and_then(Result::ok)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
