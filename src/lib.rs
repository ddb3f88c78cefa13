//! Recipe ingestion and pantry ingredient resolution.
//!
//! Two concerns live here: turning a web page or uploaded PDF into a
//! normalized [`Recipe`] (deterministic JSON-LD extraction with an
//! AI-assisted fallback), and deciding whether two free-text ingredient
//! names denote the same ingredient (exact, household substitution pairs,
//! then fuzzy token-sort similarity).
//!
//! The engine is stateless: each ingestion or matching call is independent,
//! so a single [`RecipeIngestor`] is safely shared across concurrent
//! request handlers. Persistence, sessions and routing are the caller's
//! problem; this crate only reads substitution pairs and pantry items and
//! hands back finished recipes.

pub mod config;
pub mod error;
pub mod extractors;
pub mod llm;
pub mod matcher;
pub mod model;
pub mod pipelines;
pub mod redirect;
pub mod sanitize;

pub use config::IngestConfig;
pub use error::IngestError;
pub use matcher::{find_match, names_match};
pub use model::{
    DocumentKind, PantryItem, ParsedIngredient, Recipe, SourceDocument, SubstitutionPair,
};

use llm::{AnthropicClient, LlmClient, Schemas};
use reqwest::Client;
use std::time::Duration;

/// Recipe ingestion engine.
///
/// Holds the HTTP client, the LLM capability and the immutable extraction
/// schemas. Construct once, share freely.
pub struct RecipeIngestor {
    http: Client,
    llm: Box<dyn LlmClient>,
    schemas: Schemas,
    config: IngestConfig,
}

impl RecipeIngestor {
    /// Build an ingestor from configuration plus an optional per-household
    /// API key (supplied by the household collaborator).
    pub fn new(config: IngestConfig, api_key: Option<String>) -> Result<Self, IngestError> {
        let llm = AnthropicClient::new(&config, api_key)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|err| IngestError::FetchFailed(err.to_string()))?;

        Ok(RecipeIngestor {
            http,
            llm: Box::new(llm),
            schemas: Schemas::new(),
            config,
        })
    }

    /// Build an ingestor around a caller-supplied LLM capability.
    pub fn with_llm(config: IngestConfig, llm: Box<dyn LlmClient>) -> Self {
        RecipeIngestor {
            http: Client::new(),
            llm,
            schemas: Schemas::new(),
            config,
        }
    }

    /// Ingest a recipe from a web page URL.
    ///
    /// On success the recipe always has a non-null source URL.
    pub async fn ingest_from_url(&self, url: &str) -> Result<Recipe, IngestError> {
        pipelines::url::process(&self.http, self.llm.as_ref(), &self.schemas, &self.config, url)
            .await
    }

    /// Ingest a recipe from an uploaded document (PDF only).
    ///
    /// The resulting recipe's source URL is always None.
    pub async fn ingest_from_document(
        &self,
        document: &SourceDocument,
    ) -> Result<Recipe, IngestError> {
        pipelines::document::process(self.llm.as_ref(), &self.schemas, document).await
    }
}
