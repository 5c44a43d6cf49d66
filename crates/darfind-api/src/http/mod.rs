//! HTTP layer: the `/chatbot` endpoint, the chat page and a health check.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
