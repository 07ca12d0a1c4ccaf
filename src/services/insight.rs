// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prose commentary for a Prakriti result from an OpenAI-compatible
//! chat-completions service.
//!
//! There is no retry and no local fallback: any failure is surfaced to the
//! caller as an upstream error.

use crate::error::AppError;
use crate::models::{Dosha, DoshaCounts};
use serde::{Deserialize, Serialize};

const SYSTEM_MESSAGE: &str = "You are an Ayurvedic practitioner providing personalized health insights based on Prakriti analysis.";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Build the instruction sent to the completion service.
pub fn build_prompt(scores: &DoshaCounts, primary: Dosha) -> String {
    format!(
        "Based on the following Prakriti assessment results:\n\
         Vata score: {}/10\n\
         Pitta score: {}/10\n\
         Kapha score: {}/10\n\
         Primary Dosha: {}\n\
         \n\
         Provide a brief, personalized analysis (3-4 sentences) explaining:\n\
         1. What this Prakriti type means\n\
         2. Key physical and mental characteristics\n\
         3. General wellness recommendations\n\
         \n\
         Keep it warm, encouraging, and easy to understand.",
        scores.vata, scores.pitta, scores.kapha, primary
    )
}

/// Completion service client.
#[derive(Clone)]
pub struct InsightService {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl InsightService {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            model,
        }
    }

    /// Generate a short explanation of the result.
    pub async fn generate(&self, scores: &DoshaCounts, primary: Dosha) -> Result<String, AppError> {
        let prompt = build_prompt(scores, primary);
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Completion request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                tracing::warn!("Completion service rate limit hit (429)");
            }
            return Err(AppError::Upstream(format!(
                "Completion HTTP {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Completion JSON parse error: {}", e)))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::Upstream("Completion returned no content".to_string()))?;

        tracing::debug!(
            prakriti_type = %primary,
            chars = text.len(),
            "Generated Prakriti insight"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_scores_and_type() {
        let scores = DoshaCounts {
            vata: 2,
            pitta: 7,
            kapha: 1,
        };
        let prompt = build_prompt(&scores, Dosha::Pitta);

        assert!(prompt.contains("Vata score: 2/10"));
        assert!(prompt.contains("Pitta score: 7/10"));
        assert!(prompt.contains("Kapha score: 1/10"));
        assert!(prompt.contains("Primary Dosha: Pitta"));
        assert!(prompt.contains("3-4 sentences"));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_upstream_error() {
        let service = InsightService::new(
            "http://127.0.0.1:9/v1".to_string(),
            "key".to_string(),
            "model".to_string(),
        );
        let err = service
            .generate(&DoshaCounts::default(), Dosha::Vata)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
