//! AI extraction adapter.
//!
//! One polymorphic capability over a closed set of request modes, all
//! sharing a single response-validation contract: the model is asked for a
//! schema-shaped value, and whatever comes back is deserialized against
//! that shape before any caller sees it. A response missing a required
//! field surfaces as `IngestError::SchemaViolation`, never as a partially
//! typed recipe.

mod anthropic;
mod schema;

pub use anthropic::AnthropicClient;
pub use schema::{Schemas, ToolSchema};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::IngestError;
use crate::model::{ParsedIngredient, Recipe};

/// Hard cap on page text submitted for full-recipe extraction. Protects
/// cost, latency and model context limits; applied before submission.
pub const MAX_PAGE_TEXT_CHARS: usize = 12_000;

/// A single extraction exchange: input shape per mode, one request, one
/// validated response. No streaming, no multi-turn state.
#[derive(Debug, Clone)]
pub enum ExtractionRequest<'a> {
    /// Structure raw ingredient lines already isolated by deterministic
    /// extraction.
    IngredientsOnly { raw: &'a [String] },
    /// Extract a full recipe from sanitized page text (pre-truncated).
    RecipeFromText { text: &'a str },
    /// Extract a full recipe from a base64-encoded PDF.
    RecipeFromDocument { base64: &'a str },
}

impl<'a> ExtractionRequest<'a> {
    pub fn ingredients_only(raw: &'a [String]) -> Self {
        ExtractionRequest::IngredientsOnly { raw }
    }

    /// Build a text-mode request, truncating to [`MAX_PAGE_TEXT_CHARS`]
    /// before the text ever reaches a transport.
    pub fn recipe_from_text(text: &'a str) -> Self {
        let cut = text
            .char_indices()
            .nth(MAX_PAGE_TEXT_CHARS)
            .map(|(idx, _)| idx)
            .unwrap_or(text.len());
        ExtractionRequest::RecipeFromText { text: &text[..cut] }
    }

    pub fn recipe_from_document(base64: &'a str) -> Self {
        ExtractionRequest::RecipeFromDocument { base64 }
    }

    /// The output schema this mode's response is validated against.
    pub fn schema<'s>(&self, schemas: &'s Schemas) -> &'s ToolSchema {
        match self {
            ExtractionRequest::IngredientsOnly { .. } => &schemas.ingredients,
            ExtractionRequest::RecipeFromText { .. } => &schemas.recipe,
            ExtractionRequest::RecipeFromDocument { .. } => &schemas.recipe,
        }
    }

    /// User-message content blocks for this request.
    pub fn message_content(&self) -> Value {
        match self {
            ExtractionRequest::IngredientsOnly { raw } => json!([{
                "type": "text",
                "text": format!(
                    "Parse these recipe ingredient strings into structured data:\n\n{}",
                    raw.join("\n")
                )
            }]),
            ExtractionRequest::RecipeFromText { text } => json!([{
                "type": "text",
                "text": format!("Extract the recipe from this webpage text:\n\n{}", text)
            }]),
            ExtractionRequest::RecipeFromDocument { base64 } => json!([
                {
                    "type": "document",
                    "source": {
                        "type": "base64",
                        "media_type": "application/pdf",
                        "data": base64
                    }
                },
                {
                    "type": "text",
                    "text": "Extract the recipe from this PDF."
                }
            ]),
        }
    }
}

/// The LLM capability consumed by the adapter: one synchronous
/// request/response exchange returning the raw schema-shaped value.
/// Credential and model identity live in the implementation.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn extract(
        &self,
        request: &ExtractionRequest<'_>,
        schema: &ToolSchema,
    ) -> Result<Value, IngestError>;
}

/// Envelope for ingredients-only mode; tool input must be a top-level
/// object, so the array is wrapped.
#[derive(Debug, Deserialize)]
struct IngredientsEnvelope {
    ingredients: Vec<ParsedIngredient>,
}

/// A schema-validated recipe, before the caller attaches its source URL.
#[derive(Debug, Deserialize)]
pub struct RecipeDraft {
    title: String,
    servings: Option<u32>,
    image_url: Option<String>,
    instructions: Vec<String>,
    ingredients: Vec<ParsedIngredient>,
}

impl RecipeDraft {
    pub fn into_recipe(self, source_url: Option<String>) -> Recipe {
        Recipe {
            title: self.title,
            servings: self.servings,
            source_url,
            image_url: self.image_url,
            instructions: self.instructions,
            ingredients: self.ingredients,
        }
    }
}

fn validate<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, IngestError> {
    serde_json::from_value(value).map_err(|err| IngestError::SchemaViolation(err.to_string()))
}

/// Ingredients-only mode: structure raw ingredient lines, preserving order.
pub async fn parse_ingredient_strings(
    llm: &dyn LlmClient,
    schemas: &Schemas,
    raw: &[String],
) -> Result<Vec<ParsedIngredient>, IngestError> {
    let request = ExtractionRequest::ingredients_only(raw);
    let value = llm.extract(&request, request.schema(schemas)).await?;
    let envelope: IngredientsEnvelope = validate(value)?;
    Ok(envelope.ingredients)
}

/// Full-recipe-from-text mode. The caller attaches the source URL.
pub async fn extract_recipe_from_text(
    llm: &dyn LlmClient,
    schemas: &Schemas,
    text: &str,
) -> Result<RecipeDraft, IngestError> {
    let request = ExtractionRequest::recipe_from_text(text);
    let value = llm.extract(&request, request.schema(schemas)).await?;
    validate(value)
}

/// Full-recipe-from-document mode. The caller sets source URL to None.
pub async fn extract_recipe_from_document(
    llm: &dyn LlmClient,
    schemas: &Schemas,
    base64: &str,
) -> Result<RecipeDraft, IngestError> {
    let request = ExtractionRequest::recipe_from_document(base64);
    let value = llm.extract(&request, request.schema(schemas)).await?;
    validate(value)
}
