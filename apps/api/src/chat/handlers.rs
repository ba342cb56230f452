//! Axum route handler for chat answers.

use std::time::Instant;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chat::prompts::{build_chat_prompt, ANSWER_MAX_TOKENS, NO_CONTENT_ANSWER};
use crate::errors::AppError;
use crate::llm_client::CompletionProvider;
use crate::sanitize::SanitizationEngine;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    /// Link targets in the answer, first occurrence order, no repeats.
    pub links: Vec<String>,
    pub latency_ms: u64,
}

/// POST /api/v1/ask
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let started = Instant::now();
    let (answer, links) = answer_question(state.llm.as_ref(), &state.sanitizer, question).await?;
    let latency_ms = started.elapsed().as_millis() as u64;

    info!(
        "Answered question: chars={}, links={}, latency_ms={}",
        answer.len(),
        links.len(),
        latency_ms
    );

    Ok(Json(AskResponse {
        answer,
        links,
        latency_ms,
    }))
}

/// Asks the model and sanitizes its reply.
/// Without a loaded corpus the model is never called.
pub async fn answer_question(
    llm: &dyn CompletionProvider,
    sanitizer: &SanitizationEngine,
    question: &str,
) -> Result<(String, Vec<String>), AppError> {
    let corpus = sanitizer.corpus();
    if corpus.is_empty() {
        return Ok((NO_CONTENT_ANSWER.to_string(), Vec::new()));
    }

    let prompt = build_chat_prompt(corpus.content(), question);
    let raw = llm.complete(&prompt, Some(ANSWER_MAX_TOKENS)).await?;

    let sanitized = sanitizer.sanitize(&raw);
    let links = sanitized.link_targets();
    let outside = links.iter().filter(|l| !sanitizer.is_trusted(l)).count();
    if outside > 0 {
        debug!("{outside} of {} answer links are not in the trusted corpus", links.len());
    }

    Ok((sanitized.to_string().trim().to_string(), links))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::StubProvider;
    use crate::sanitize::TrustedCorpus;

    fn engine(content: &str) -> SanitizationEngine {
        SanitizationEngine::new(TrustedCorpus::from_text(content))
    }

    #[tokio::test]
    async fn test_answer_is_sanitized_and_links_collected() {
        let llm = StubProvider::replying(
            "Apply early [1]. See [https://a.com/visa](https://a.com/visa) and https://b.org.  ",
        );
        let (answer, links) = answer_question(&llm, &engine("visa info https://a.com/visa"), "visa?")
            .await
            .unwrap();

        assert_eq!(
            answer,
            "Apply early . See [https://a.com/visa](https://a.com/visa) and [https://b.org](https://b.org)."
        );
        assert_eq!(links, vec!["https://a.com/visa", "https://b.org"]);
        assert!(llm.last_prompt().unwrap().contains("visa info https://a.com/visa"));
    }

    #[tokio::test]
    async fn test_empty_corpus_short_circuits() {
        let llm = StubProvider::replying("unused");
        let (answer, links) = answer_question(&llm, &engine(""), "anything").await.unwrap();

        assert_eq!(answer, NO_CONTENT_ANSWER);
        assert!(links.is_empty());
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_timeout_propagates() {
        let llm = StubProvider::timing_out();
        let err = answer_question(&llm, &engine("content"), "q").await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::GATEWAY_TIMEOUT);
    }
}
