//! Gemini-backed `SuggestionService` implementation.
//!
//! Talks to the Google Generative Language REST API. Every operation sends a
//! single prompt that instructs the model to answer with minified JSON only;
//! the response text is run through the intake parser before anything
//! reaches the session engine.

use crate::intake;
use async_trait::async_trait;
use kfdb_core::assist::{GeneratedPlan, SuggestionService};
use kfdb_core::category::Category;
use kfdb_core::error::{KfdbError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Suggestion service backed by the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiSuggestionService {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl GeminiSuggestionService {
    /// Creates a new service with the provided API key and default
    /// endpoint/model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Loads the API key from the `GEMINI_API_KEY` environment variable.
    pub fn try_from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            KfdbError::transport("GEMINI_API_KEY not found in environment variables")
        })?;
        Ok(Self::new(api_key))
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the API base URL (used to point tests at a local server).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Sends one prompt and returns the first candidate's text.
    async fn generate(&self, prompt: String) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_url, self.model, self.api_key
        );

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                max_output_tokens: 1024,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| KfdbError::transport(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(KfdbError::transport(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| KfdbError::format(format!("failed to parse Gemini response: {}", e)))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| KfdbError::format("Gemini response carried no candidate text"))?;

        Ok(text.trim().to_string())
    }
}

fn initial_plan_prompt(topic: &str) -> String {
    format!(
        r#"You are an expert curriculum designer and leadership coach specializing in the "Know, Feel, Do, Be" framework. Your sole function is to return valid, minified JSON. Do not include markdown, comments, or any conversational text. Your entire response must be ONLY the JSON object.

For the session topic "{topic}", generate a "Know, Feel, Do, Be" plan.
Create a concise title (3-7 words) and 2-3 distinct ideas for each category.

Return a single, minified, valid JSON object with this exact structure, ensuring no trailing commas:
{{"title":"string","know":["string","string"],"feel":["string","string"],"do":["string","string"],"be":["string","string"]}}"#
    )
}

fn category_ideas_prompt(topic: &str, category: Category, existing_items: &[String]) -> String {
    let existing = serde_json::to_string(existing_items).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"You are an expert curriculum designer specializing in the "Know, Feel, Do, Be" framework. Your sole function is to return valid, minified JSON. Do not include markdown, comments, or any conversational text. Your entire response must be ONLY the JSON object.

The session topic is "{topic}".
The category is "{category}".
Existing items are: {existing}.

Generate exactly 3 new, diverse ideas for the "{category}" category. Do not repeat existing items.

Return a single, minified, valid JSON object with this exact structure, ensuring no trailing commas:
{{"ideas":["new idea 1","new idea 2","new idea 3"]}}"#
    )
}

fn outline_prompt(title: &str, markdown: &str) -> String {
    format!(
        r#"You are an expert curriculum designer. Expand the following "Know, Feel, Do, Be" plan into a practical session outline with an opening, a sequenced agenda covering every listed objective, and a closing. Respond in plain markdown, no code fences.

Session title: "{title}"

Plan:
{markdown}"#
    )
}

#[async_trait]
impl SuggestionService for GeminiSuggestionService {
    async fn generate_initial(&self, topic: &str) -> Result<GeneratedPlan> {
        let text = self.generate(initial_plan_prompt(topic)).await?;
        intake::parse_initial_plan(&text)
    }

    async fn generate_ideas(
        &self,
        topic: &str,
        category: Category,
        existing_items: &[String],
    ) -> Result<Vec<String>> {
        let text = self
            .generate(category_ideas_prompt(topic, category, existing_items))
            .await?;
        intake::parse_category_ideas(&text)
    }

    async fn generate_outline(&self, title: &str, markdown: &str) -> Result<String> {
        self.generate(outline_prompt(title, markdown)).await
    }
}
