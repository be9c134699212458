//! Anthropic Messages API client over blocking HTTP.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Generator, Message};
use crate::config::{LlmConfig, API_KEY_ENV};
use crate::error::GenerateError;

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

const CONNECT_TIMEOUT_SECS: u64 = 10;

pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
}

impl AnthropicClient {
    /// Build a client from configuration. The request timeout bounds each call.
    pub fn from_config(config: &LlmConfig, max_tokens: u32) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| GenerateError::MissingApiKey(API_KEY_ENV.to_string()))?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("skillsmith/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request<'a>(&'a self, system: &'a str, messages: &'a [Message]) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages,
        }
    }

    fn send(&self, request: &MessagesRequest<'_>) -> Result<String, GenerateError> {
        let url = format!("{}/messages", self.base_url);
        tracing::debug!(
            model = %self.model,
            messages = request.messages.len(),
            "Calling messages API"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        parse_response(&body)
    }
}

impl Generator for AnthropicClient {
    fn generate(&self, system: &str, messages: &[Message]) -> Result<String> {
        Ok(self.send(&self.request(system, messages))?)
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

/// Concatenate the text blocks of a successful response.
fn parse_response(body: &str) -> Result<String, GenerateError> {
    let response: MessagesResponse =
        serde_json::from_str(body).map_err(|_| GenerateError::EmptyResponse)?;
    let text: String = response
        .content
        .into_iter()
        .filter(|block| block.content_type == "text")
        .filter_map(|block| block.text)
        .collect();
    if text.is_empty() {
        return Err(GenerateError::EmptyResponse);
    }
    Ok(text)
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => format!("{}: {}", parsed.error.error_type, parsed.error.message),
        Err(_) => crate::utils::truncate(body.trim(), 200),
    }
}
