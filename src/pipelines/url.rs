//! URL ingestion pipeline.
//!
//! Per request: resolve share-link indirection, fetch the page, try
//! structured extraction; when a JSON-LD candidate exists, only its raw
//! ingredient lines go through the model (ingredients-only mode),
//! otherwise the sanitized page text goes through full-recipe extraction.

use log::debug;
use reqwest::header::USER_AGENT;
use reqwest::Client;

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::extractors::extract_structured;
use crate::llm::{self, LlmClient, Schemas};
use crate::model::Recipe;
use crate::redirect::resolve_share_link;
use crate::sanitize::html_to_text;

/// Ingest a recipe from a web page.
///
/// The returned recipe always carries a non-null source URL: the page's
/// own canonical URL when the structured data declares one, otherwise the
/// URL that was actually fetched.
pub async fn process(
    http: &Client,
    llm: &dyn LlmClient,
    schemas: &Schemas,
    config: &IngestConfig,
    url: &str,
) -> Result<Recipe, IngestError> {
    let target = resolve_share_link(http, url, &config.share_domains, &config.user_agent).await;

    let response = http
        .get(&target)
        .header(USER_AGENT, config.user_agent.as_str())
        .send()
        .await
        .map_err(|err| IngestError::FetchFailed(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(IngestError::FetchFailed(format!(
            "{} returned {}",
            target, status
        )));
    }

    let html = response
        .text()
        .await
        .map_err(|err| IngestError::FetchFailed(err.to_string()))?;

    // Cheap deterministic path first; the model only sees the ingredient
    // lines, which JSON-LD leaves unstructured.
    if let Some(candidate) = extract_structured(&html) {
        debug!("Structured path for {}: {}", target, candidate.title);
        let ingredients =
            llm::parse_ingredient_strings(llm, schemas, &candidate.raw_ingredients).await?;
        return Ok(Recipe {
            title: candidate.title,
            servings: candidate.servings,
            source_url: Some(candidate.source_url.unwrap_or_else(|| target.clone())),
            image_url: candidate.image_url,
            instructions: candidate.instructions,
            ingredients,
        });
    }

    // No structured metadata: sanitize and let the model extract everything.
    debug!("Fallback text path for {}", target);
    let page_text = html_to_text(&html);
    let draft = llm::extract_recipe_from_text(llm, schemas, &page_text).await?;
    Ok(draft.into_recipe(Some(target)))
}
