//! Form shapes and their validation rules.
//!
//! Each form is the typed representation of one urlencoded submission. The
//! `validate` methods are pure: they inspect the submitted fields and report
//! every failing rule at once, keyed by field name. Re-validating the same
//! form always yields the same result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// Field-keyed validation messages, sorted by field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

const REQUIRED: &str = "This field is required.";
const BAD_EMAIL: &str = "Invalid email address.";
const BAD_URL: &str = "Invalid URL.";

fn require(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field, REQUIRED.to_string());
    }
}

fn require_email(errors: &mut FieldErrors, field: &'static str, value: &str) {
    let well_formed = match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    };
    if !well_formed {
        errors.insert(field, BAD_EMAIL.to_string());
    }
}

fn require_url(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field, REQUIRED.to_string());
        return;
    }
    match Url::parse(value) {
        Ok(url) if url.has_host() => {}
        _ => {
            errors.insert(field, BAD_URL.to_string());
        }
    }
}

fn finish(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Registration submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_email(&mut errors, "email", &self.email);
        require(&mut errors, "password", &self.password);
        require(&mut errors, "name", &self.name);
        finish(errors)
    }
}

/// Login submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_email(&mut errors, "email", &self.email);
        require(&mut errors, "password", &self.password);
        finish(errors)
    }
}

/// Post creation/edit submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub img_url: String,
    pub body: String,
}

impl PostForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", &self.title);
        require(&mut errors, "subtitle", &self.subtitle);
        require_url(&mut errors, "img_url", &self.img_url);
        require(&mut errors, "body", &self.body);
        finish(errors)
    }
}

/// Comment submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentForm {
    pub body: String,
}

impl CommentForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "body", &self.body);
        finish(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str, name: &str) -> RegisterForm {
        RegisterForm {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn register_accepts_well_formed_input() {
        assert!(register("ana@example.com", "hunter2", "Ana").validate().is_ok());
    }

    #[test]
    fn register_rejects_malformed_email() {
        for bad in ["", "no-at-sign", "@example.com", "ana@", "ana@nodot", "ana@dot."] {
            let errors = register(bad, "hunter2", "Ana").validate().unwrap_err();
            assert_eq!(errors.get("email").map(String::as_str), Some(BAD_EMAIL));
        }
    }

    #[test]
    fn register_reports_all_failing_fields() {
        let errors = register("", "", "").validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password"));
        assert!(errors.contains_key("name"));
    }

    #[test]
    fn login_requires_password() {
        let form = LoginForm {
            email: "ana@example.com".to_string(),
            password: "   ".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("password").map(String::as_str), Some(REQUIRED));
    }

    #[test]
    fn post_form_rejects_relative_image_url() {
        let form = PostForm {
            title: "Title".to_string(),
            subtitle: "Subtitle".to_string(),
            img_url: "/static/cat.png".to_string(),
            body: "Body".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("img_url").map(String::as_str), Some(BAD_URL));
    }

    #[test]
    fn post_form_accepts_absolute_image_url() {
        let form = PostForm {
            title: "Title".to_string(),
            subtitle: "Subtitle".to_string(),
            img_url: "https://example.com/cat.png".to_string(),
            body: "Body".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn comment_form_requires_body() {
        let form = CommentForm { body: String::new() };
        assert!(form.validate().is_err());
    }

    #[test]
    fn validation_is_idempotent() {
        let form = register("not-an-email", "", "Ana");
        assert_eq!(form.validate(), form.validate());
    }
}
