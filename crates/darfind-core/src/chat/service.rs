//! Chat service running one conversational turn end to end.
//!
//! ChatService coordinates the SessionRepository, the prompt builder, and the
//! LLM provider: make sure the session exists, read its history, render the
//! prompt, call the model once, persist the new turn, return the reply.

use darfind_types::config::LlmConfig;
use darfind_types::error::{ChatError, RepositoryError};
use darfind_types::llm::{CompletionRequest, LlmError};
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::chat::history::HistoryFormatter;
use crate::chat::prompt::PromptBuilder;
use crate::chat::repository::SessionRepository;
use crate::llm::box_provider::BoxLlmProvider;

/// Orchestrates a chat turn across storage, prompt assembly, and the model.
///
/// Generic over `SessionRepository` (darfind-core never depends on
/// darfind-infra). The provider is type-erased so the application state can
/// hold any backend.
pub struct ChatService<R: SessionRepository> {
    repo: R,
    provider: BoxLlmProvider,
    prompt: PromptBuilder,
    model: String,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
}

impl<R: SessionRepository> ChatService<R> {
    /// Create a new chat service.
    ///
    /// `llm` supplies the model name and sampling settings sent with every
    /// completion request.
    pub fn new(repo: R, provider: BoxLlmProvider, prompt: PromptBuilder, llm: &LlmConfig) -> Self {
        Self {
            repo,
            provider,
            prompt,
            model: llm.model.clone(),
            temperature: Some(llm.temperature),
            max_tokens: llm.max_tokens,
        }
    }

    /// Access the session repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Run one turn and return the model's reply.
    ///
    /// A turn is persisted only after the model has produced a reply; a
    /// failed or empty completion leaves the history unchanged. Nothing is
    /// retried and nothing is rolled back: if the session was created but
    /// the append fails, the empty session stays.
    pub async fn handle_turn(&self, session_id: &str, user_input: &str) -> Result<String, ChatError> {
        let span = info_span!("chat.turn", session_id = %session_id);

        async move {
            self.repo.ensure_session(session_id).await?;

            let turns = self.repo.load_history(session_id).await?;
            let history = HistoryFormatter::format(&turns);
            let prompt = self.prompt.build(&history, user_input);
            debug!(prior_turns = turns.len(), prompt_chars = prompt.len(), "Prompt assembled");

            let reply = match self.complete(prompt).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(error = %e, "Model call failed, turn not recorded");
                    return Err(ChatError::Upstream(e));
                }
            };

            self.repo
                .append_turn(session_id, user_input, &reply)
                .await
                .map_err(|e| match e {
                    RepositoryError::NotFound => {
                        error!("Session vanished between ensure and append");
                        ChatError::SessionNotFound(session_id.to_string())
                    }
                    other => ChatError::Persistence(other),
                })?;

            info!(turn = turns.len() + 1, "Turn recorded");
            Ok(reply)
        }
        .instrument(span)
        .await
    }

    /// Send the rendered prompt as a single user message.
    async fn complete(&self, prompt: String) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            prompt,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = ?request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
        );

        let response = self.provider.complete(&request).instrument(span).await?;

        debug!(
            model = %response.model,
            stop_reason = %response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Completion received"
        );

        if response.content.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(response.content)
    }
}
