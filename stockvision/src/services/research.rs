//! Research service
//!
//! Turns a research request into a complete [`ResearchResult`]: builds the
//! expert system instruction and response schema, makes one model call, and
//! stamps the parsed brief with identity and request parameters. Either a
//! whole result comes back or an error does.

use super::gemini::{GenerateRequest, ModelTransport};
use crate::config::{KEYWORD_COUNT, TITLE_MAX_CHARS};
use crate::error::{AppError, Result};
use crate::models::{ResearchRequest, ResearchResult};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

/// The eight fields the model must return
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedBrief {
    title: String,
    description: String,
    keywords: Vec<String>,
    tags: Vec<String>,
    theme: String,
    commercial_angle: String,
    buyer_intent: String,
    ai_prompt: String,
}

pub struct ResearchClient<T> {
    transport: T,
}

impl<T: ModelTransport> ResearchClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Generate a brief. Fails with [`AppError::MissingApiKey`] before any
    /// request when `api_key` is empty.
    pub async fn generate(&self, request: &ResearchRequest, api_key: &str) -> Result<ResearchResult> {
        if api_key.is_empty() {
            return Err(AppError::MissingApiKey);
        }

        let model_request = GenerateRequest {
            system_instruction: system_instruction(request),
            contents: user_contents(request),
            response_schema: response_schema(),
        };

        let text = self.transport.generate(api_key, &model_request).await?;

        let brief: GeneratedBrief = serde_json::from_str(text.trim()).map_err(|e| {
            tracing::error!("Failed to parse model response: {}", e);
            AppError::InvalidResponse(e.to_string())
        })?;

        let result = ResearchResult {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            topic: request.topic.clone(),
            platform: request.platform,
            market_type: request.market_type,
            style: request.style,
            title: brief.title,
            description: brief.description,
            keywords: brief.keywords,
            tags: brief.tags,
            theme: brief.theme,
            commercial_angle: brief.commercial_angle,
            buyer_intent: brief.buyer_intent,
            ai_prompt: brief.ai_prompt,
            is_favorite: false,
        };

        tracing::info!(
            "Generated research for '{}' with {} keywords",
            result.topic,
            result.keywords.len()
        );
        Ok(result)
    }
}

fn system_instruction(request: &ResearchRequest) -> String {
    format!(
        "You are a professional stock image SEO and market research expert.

Your task:
Analyze each image idea I provide.
Research real buyer demand.
Optimize for stock marketplaces and commercial use.

Always focus on:
- High search volume
- Buyer intent
- Evergreen + Seasonal trends
- Monetizable topics

Avoid:
- Generic words
- Low-competition phrases
- Vague descriptions

Optimize for:
- Shutterstock SEO
- Adobe Stock SEO
- Commercial buyers

Language: Generate content in {language}.

Think like a professional stock seller. Maximize discoverability and sales potential.
Structure your response according to the provided JSON schema.

For 'aiPrompt', create a highly detailed, professional-grade prompt for an AI generator \
(like Midjourney or DALL-E) that matches the requested style: {style}.",
        language = request.language,
        style = request.style,
    )
}

fn user_contents(request: &ResearchRequest) -> String {
    format!(
        "Topic: {}\nPlatform: {}\nMarket Type: {}\nRequested Visual Style: {}",
        request.topic, request.platform, request.market_type, request.style
    )
}

fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": format!("SEO optimized title, max {} characters", TITLE_MAX_CHARS)
            },
            "description": {
                "type": "STRING",
                "description": "Detailed description including main keywords naturally"
            },
            "keywords": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": format!("Top {} relevant SEO keywords (Primary and Secondary)", KEYWORD_COUNT)
            },
            "tags": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Platform tags"
            },
            "theme": { "type": "STRING", "description": "Overall mood and theme" },
            "commercialAngle": {
                "type": "STRING",
                "description": "Commercial Use Suggestion: The unique selling point for buyers"
            },
            "buyerIntent": {
                "type": "STRING",
                "description": "Buyer Intent: Who would buy this and why?"
            },
            "aiPrompt": {
                "type": "STRING",
                "description": "A long, detailed, high-quality prompt for AI image generation"
            }
        },
        "required": [
            "title", "description", "keywords", "tags",
            "theme", "commercialAngle", "buyerIntent", "aiPrompt"
        ]
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{ImageStyle, Language, MarketType, Platform};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    pub(crate) const VALID_BRIEF: &str = r#"{
        "title": "Cozy Coffee Shop Interior with Morning Light",
        "description": "Warm coffee shop interior with latte art and wooden tables",
        "keywords": ["coffee shop", "cafe interior", "latte art"],
        "tags": ["coffee", "cafe"],
        "theme": "Warm and inviting",
        "commercialAngle": "Hospitality marketing",
        "buyerIntent": "Cafe owners refreshing their menus",
        "aiPrompt": "A photorealistic cozy coffee shop bathed in morning light"
    }"#;

    /// Transport that replays canned responses and records every call
    #[derive(Clone, Default)]
    pub(crate) struct FakeTransport {
        responses: Arc<Mutex<VecDeque<Result<String>>>>,
        calls: Arc<Mutex<Vec<(String, GenerateRequest)>>>,
    }

    impl FakeTransport {
        pub(crate) fn replying(response: Result<String>) -> Self {
            let fake = Self::default();
            fake.push(response);
            fake
        }

        pub(crate) fn push(&self, response: Result<String>) {
            self.responses.lock().unwrap().push_back(response);
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub(crate) fn last_call(&self) -> Option<(String, GenerateRequest)> {
            self.calls.lock().unwrap().last().cloned()
        }
    }

    impl ModelTransport for FakeTransport {
        async fn generate(&self, api_key: &str, request: &GenerateRequest) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((api_key.to_string(), request.clone()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AppError::GenerationFailed("no response queued".into())))
        }
    }

    pub(crate) fn sample_request() -> ResearchRequest {
        ResearchRequest {
            topic: "coffee shop aesthetics".to_string(),
            platform: Platform::Shutterstock,
            market_type: MarketType::Evergreen,
            style: ImageStyle::Realistic,
            language: Language::English,
        }
    }

    #[tokio::test]
    async fn test_empty_api_key_fails_before_request() {
        let transport = FakeTransport::replying(Ok(VALID_BRIEF.to_string()));
        let client = ResearchClient::new(transport.clone());

        for platform in [Platform::Shutterstock, Platform::Canva, Platform::ThaiMarket] {
            for style in [ImageStyle::Vector, ImageStyle::Minimal] {
                let request = ResearchRequest {
                    platform,
                    style,
                    ..sample_request()
                };
                let result = client.generate(&request, "").await;
                assert!(matches!(result, Err(AppError::MissingApiKey)));
            }
        }

        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_generation_echoes_request() {
        let transport = FakeTransport::replying(Ok(VALID_BRIEF.to_string()));
        let client = ResearchClient::new(transport.clone());

        let result = client.generate(&sample_request(), "secret").await.unwrap();

        assert_eq!(result.topic, "coffee shop aesthetics");
        assert_eq!(result.platform, Platform::Shutterstock);
        assert_eq!(result.market_type, MarketType::Evergreen);
        assert_eq!(result.style, ImageStyle::Realistic);
        assert_eq!(result.title, "Cozy Coffee Shop Interior with Morning Light");
        assert_eq!(result.keywords.len(), 3);
        assert_eq!(result.commercial_angle, "Hospitality marketing");
        assert!(!result.is_favorite);
        assert!(Uuid::parse_str(&result.id).is_ok());
        assert!(result.timestamp > 0);

        let (api_key, sent) = transport.last_call().unwrap();
        assert_eq!(api_key, "secret");
        assert_eq!(
            sent.contents,
            "Topic: coffee shop aesthetics\nPlatform: Shutterstock\nMarket Type: Evergreen\nRequested Visual Style: Realistic"
        );
        assert!(sent.system_instruction.contains("Generate content in English."));
        assert!(sent
            .system_instruction
            .contains("matches the requested style: Realistic."));
        assert_eq!(sent.response_schema["required"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_language_reaches_instruction() {
        let transport = FakeTransport::replying(Ok(VALID_BRIEF.to_string()));
        let client = ResearchClient::new(transport.clone());
        let request = ResearchRequest {
            language: Language::Thai,
            ..sample_request()
        };

        client.generate(&request, "secret").await.unwrap();

        let (_, sent) = transport.last_call().unwrap();
        assert!(sent.system_instruction.contains("Generate content in Thai."));
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let transport = FakeTransport::default();
        transport.push(Ok(VALID_BRIEF.to_string()));
        transport.push(Ok(VALID_BRIEF.to_string()));
        let client = ResearchClient::new(transport);

        let first = client.generate(&sample_request(), "k").await.unwrap();
        let second = client.generate(&sample_request(), "k").await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_non_json_response_is_invalid() {
        let client = ResearchClient::new(FakeTransport::replying(Ok(
            "Sorry, I cannot help with that.".to_string(),
        )));

        let result = client.generate(&sample_request(), "k").await;
        assert!(matches!(result, Err(AppError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_missing_field_is_invalid() {
        let client = ResearchClient::new(FakeTransport::replying(Ok(
            r#"{"title":"t","description":"d","keywords":[],"tags":[],"theme":"x","commercialAngle":"c","buyerIntent":"b"}"#
                .to_string(),
        )));

        let result = client.generate(&sample_request(), "k").await;
        assert!(matches!(result, Err(AppError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_mistyped_field_is_invalid() {
        let client = ResearchClient::new(FakeTransport::replying(Ok(VALID_BRIEF.replace(
            r#"["coffee", "cafe"]"#,
            r#""coffee, cafe""#,
        ))));

        let result = client.generate(&sample_request(), "k").await;
        assert!(matches!(result, Err(AppError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_passes_through() {
        let client = ResearchClient::new(FakeTransport::replying(Err(
            AppError::GenerationFailed("503 Service Unavailable".to_string()),
        )));

        let result = client.generate(&sample_request(), "k").await;
        assert!(matches!(result, Err(AppError::GenerationFailed(_))));
    }

    #[tokio::test]
    async fn test_surrounding_whitespace_is_tolerated() {
        let client =
            ResearchClient::new(FakeTransport::replying(Ok(format!("\n  {}\n", VALID_BRIEF))));

        assert!(client.generate(&sample_request(), "k").await.is_ok());
    }
}
