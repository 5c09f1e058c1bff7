//! # Quill Shared
//!
//! Types shared between the server and any client: form shapes with their
//! validation rules, page payloads, and the standard error body.

pub mod dto;
pub mod forms;
pub mod response;

pub use forms::FieldErrors;
pub use response::ErrorResponse;
