//! Infrastructure layer for DarFind.
//!
//! Contains implementations of the ports defined in `darfind-core`:
//! SQLite session storage and the OpenAI-compatible LLM provider, plus the
//! configuration loader and data directory resolution.

pub mod config;
pub mod llm;
pub mod sqlite;
