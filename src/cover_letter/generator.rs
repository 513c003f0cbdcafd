//! Cover letter generation backends

use crate::config::CoverLetterConfig;
use crate::cover_letter::prompts::{self, SAMPLE_COVER_LETTER, SYSTEM_PROMPT};
use crate::error::{Result, ScorerError};
use log::{debug, info};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// A backend that turns a system prompt and a user prompt into text
pub trait TextGenerator {
    fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> impl Future<Output = Result<String>> + Send;

    fn name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Chat-completions client for OpenAI compatible endpoints
#[derive(Clone)]
pub struct OpenAiGenerator {
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    client: Client,
}

impl OpenAiGenerator {
    pub fn new(api_key: String, config: &CoverLetterConfig) -> Self {
        Self {
            api_key,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            client: Client::new(),
        }
    }

    /// Build a generator with the key taken from `OPENAI_API_KEY`
    pub fn from_env(config: &CoverLetterConfig) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ScorerError::Configuration(format!(
                    "OpenAI API key not found. Please set {} environment variable.",
                    API_KEY_ENV
                ))
            })?;

        Ok(Self::new(api_key, config))
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: user_prompt },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!("Requesting cover letter from {} ({})", self.endpoint(), self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED => {
                    ScorerError::Configuration("Invalid OpenAI API key".to_string())
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    ScorerError::Network("Rate limit exceeded".to_string())
                }
                _ => ScorerError::Generation(format!("API returned {}: {}", status, body)),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ScorerError::Generation("Empty response from model".to_string()))
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Offline backend returning the sample letter
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TextGenerator for TemplateGenerator {
    async fn generate(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String> {
        Ok(SAMPLE_COVER_LETTER.to_string())
    }

    fn name(&self) -> &str {
        "template"
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoverLetterRequest {
    pub resume_text: String,
    pub job_description: String,
    pub company_name: Option<String>,
    pub position_title: Option<String>,
}

impl CoverLetterRequest {
    pub fn new(resume_text: impl Into<String>, job_description: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            job_description: job_description.into(),
            ..Default::default()
        }
    }

    pub fn with_company(mut self, company: Option<String>) -> Self {
        self.company_name = company;
        self
    }

    pub fn with_position(mut self, position: Option<String>) -> Self {
        self.position_title = position;
        self
    }
}

pub struct CoverLetterGenerator<G: TextGenerator> {
    backend: G,
}

impl<G: TextGenerator> CoverLetterGenerator<G> {
    pub fn new(backend: G) -> Self {
        Self { backend }
    }

    pub async fn generate(&self, request: &CoverLetterRequest) -> Result<String> {
        if request.resume_text.trim().is_empty() || request.job_description.trim().is_empty() {
            return Err(ScorerError::InvalidInput(
                "Resume and job description are required for a cover letter".to_string(),
            ));
        }

        let company = request.company_name.as_deref();
        let position = request.position_title.as_deref();
        let prompt = prompts::build_prompt(
            &request.resume_text,
            &request.job_description,
            company,
            position,
        );

        info!("Generating cover letter with {}", self.backend.name());
        let letter = self
            .backend
            .generate(SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| match e {
                ScorerError::Generation(msg) => {
                    ScorerError::Generation(format!("Error generating cover letter: {}", msg))
                }
                other => other,
            })?;

        Ok(prompts::post_process(&letter, company, position))
    }
}
