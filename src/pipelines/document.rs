//! Document ingestion pipeline.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::IngestError;
use crate::llm::{self, LlmClient, Schemas};
use crate::model::{DocumentKind, Recipe, SourceDocument};

/// Ingest a recipe from an uploaded document.
///
/// Only PDF uploads are supported. Documents have no canonical web
/// address, so the resulting recipe's source URL is always None.
pub async fn process(
    llm: &dyn LlmClient,
    schemas: &Schemas,
    document: &SourceDocument,
) -> Result<Recipe, IngestError> {
    if document.kind != DocumentKind::Pdf {
        return Err(IngestError::UnsupportedInput(
            "Only PDF documents are supported".to_string(),
        ));
    }

    let encoded = STANDARD.encode(&document.data);
    let draft = llm::extract_recipe_from_document(llm, schemas, &encoded).await?;
    Ok(draft.into_recipe(None))
}
