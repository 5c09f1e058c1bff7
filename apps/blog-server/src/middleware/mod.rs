//! Cross-cutting request/response concerns.

pub mod error;
