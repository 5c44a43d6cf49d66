//! Session history, prompt assembly, and the per-turn chat flow.
//!
//! - `repository`: the `SessionRepository` port implemented by infra
//! - `history`: renders stored turns as prompt context
//! - `prompt`: the lead-intake instruction template
//! - `service`: `ChatService`, which runs one turn end to end

pub mod history;
pub mod prompt;
pub mod repository;
pub mod service;
