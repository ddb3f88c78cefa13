use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::llm::schema::ToolSchema;
use crate::llm::{ExtractionRequest, LlmClient};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client.
///
/// Structured output is obtained by declaring the mode's schema as the
/// only tool and forcing the model to call it; the tool input is the
/// schema-shaped value.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    /// Create a client from configuration plus an optional per-household
    /// API key supplied by the caller.
    ///
    /// Key resolution order: caller-supplied key, config file, then the
    /// ANTHROPIC_API_KEY environment variable. With none of the three,
    /// `NoCredential`.
    pub fn new(config: &IngestConfig, api_key: Option<String>) -> Result<Self, IngestError> {
        let api_key = api_key
            .or_else(|| config.api_key.clone())
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or(IngestError::NoCredential)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|err| IngestError::ExtractionFailed(err.to_string()))?;

        Ok(AnthropicClient {
            client,
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn extract(
        &self,
        request: &ExtractionRequest<'_>,
        schema: &ToolSchema,
    ) -> Result<Value, IngestError> {
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [
                {
                    "role": "user",
                    "content": request.message_content()
                }
            ],
            "tools": [
                {
                    "name": schema.name,
                    "description": schema.description,
                    "input_schema": schema.input_schema
                }
            ],
            "tool_choice": {"type": "tool", "name": schema.name}
        });

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|err| IngestError::ExtractionFailed(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(IngestError::ExtractionFailed(format!(
                "Anthropic API returned {}: {}",
                status, detail
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|err| IngestError::ExtractionFailed(err.to_string()))?;
        debug!("{:?}", response_body);

        // The forced tool call arrives as a tool_use content block whose
        // input is the schema-shaped value.
        response_body["content"]
            .as_array()
            .and_then(|blocks| {
                blocks
                    .iter()
                    .find(|block| block["type"] == "tool_use")
                    .map(|block| block["input"].clone())
            })
            .ok_or_else(|| {
                IngestError::SchemaViolation(
                    "model response contained no tool_use block".to_string(),
                )
            })
    }
}
