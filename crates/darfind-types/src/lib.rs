//! Shared domain types for DarFind.
//!
//! This crate contains the core domain types used across the DarFind service:
//! chat sessions and turns, LLM request/response shapes, configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
