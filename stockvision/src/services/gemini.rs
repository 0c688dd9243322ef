//! Gemini transport
//!
//! One `generateContent` exchange per call: system instruction, a single user
//! turn and a JSON response schema go out, the candidate text comes back.
//! Interpreting that text is the research service's job.

use crate::config::{API_KEY_HEADER, DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// What the research service asks of the model
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub system_instruction: String,
    pub contents: String,
    pub response_schema: serde_json::Value,
}

/// Boundary to the hosted generative model.
///
/// Returns the raw text of the model's answer. Network failures and
/// non-success statuses map to [`AppError::GenerationFailed`].
pub trait ModelTransport: Send + Sync {
    fn generate(
        &self,
        api_key: &str,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Serialize, Debug)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
struct RequestContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    system_instruction: RequestContent<'a>,
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Deserialize, Debug, Default)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: ResponseContent,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// HTTP client for the Gemini REST API
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_MODEL)
    }
}

impl GeminiClient {
    pub fn new(api_base: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

fn build_body(request: &GenerateRequest) -> GenerateContentBody<'_> {
    GenerateContentBody {
        system_instruction: RequestContent {
            role: None,
            parts: vec![TextPart {
                text: &request.system_instruction,
            }],
        },
        contents: vec![RequestContent {
            role: Some("user"),
            parts: vec![TextPart {
                text: &request.contents,
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: &request.response_schema,
        },
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(body: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| AppError::InvalidResponse(format!("unreadable response envelope: {}", e)))?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AppError::InvalidResponse("no candidates in response".to_string()))?;

    let text: String = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        return Err(AppError::InvalidResponse(
            "candidate contained no text".to_string(),
        ));
    }

    Ok(text)
}

impl ModelTransport for GeminiClient {
    async fn generate(&self, api_key: &str, request: &GenerateRequest) -> Result<String> {
        tracing::info!("Sending research request to model {}", self.model);

        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&build_body(request))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network request to Gemini API failed: {}", e);
                AppError::GenerationFailed(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read Gemini API response body: {}", e);
            AppError::GenerationFailed(e.to_string())
        })?;

        if !status.is_success() {
            tracing::error!("Gemini API request failed with status {}: {}", status, body);
            return Err(AppError::GenerationFailed(format!("{} - {}", status, body)));
        }

        tracing::debug!("Gemini API responded with {} bytes", body.len());
        extract_text(&body)
    }
}
