//! Business logic and port trait definitions for DarFind.
//!
//! This crate defines the "ports" (the session repository and LLM provider
//! traits) that the infrastructure layer implements, plus the per-turn chat
//! flow built on top of them. It depends only on `darfind-types` -- never on
//! `darfind-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
