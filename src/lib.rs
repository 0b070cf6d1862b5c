//! Image key resolution for Lark/Feishu bots
//!
//! Turns a local path or remote URL into a platform-issued image key by
//! uploading the image once and caching the key for later messages.

pub mod auth;
pub mod error;
pub mod image;
pub mod models;
pub mod openapi;

pub use error::{Error, Result};
