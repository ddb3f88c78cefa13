use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use pantry_ingest::llm::{ExtractionRequest, LlmClient, ToolSchema};
use pantry_ingest::{IngestConfig, IngestError, RecipeIngestor};

/// Records which extraction mode was invoked and replays a canned value.
#[derive(Clone)]
struct ScriptedLlm {
    response: Value,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLlm {
    fn new(response: Value) -> Self {
        ScriptedLlm {
            response,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn extract(
        &self,
        request: &ExtractionRequest<'_>,
        _schema: &ToolSchema,
    ) -> Result<Value, IngestError> {
        let mode = match request {
            ExtractionRequest::IngredientsOnly { .. } => "ingredients_only",
            ExtractionRequest::RecipeFromText { .. } => "recipe_from_text",
            ExtractionRequest::RecipeFromDocument { .. } => "recipe_from_document",
        };
        self.calls.lock().unwrap().push(mode.to_string());
        Ok(self.response.clone())
    }
}

const JSON_LD_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<script type="application/ld+json">
{
    "@context": "https://schema.org/",
    "@type": "Recipe",
    "name": "Weeknight Chili",
    "recipeYield": "6 servings",
    "image": "https://example.com/chili.jpg",
    "recipeIngredient": ["1 lb ground beef", "1 can beans", "2 tomatoes"],
    "recipeInstructions": [
        {"@type": "HowToStep", "text": "Brown the beef"},
        {"@type": "HowToStep", "text": "Add beans and tomatoes"},
        {"@type": "HowToStep", "text": "Simmer 30 minutes"}
    ]
}
</script>
</head>
<body><h1>Weeknight Chili</h1></body>
</html>"#;

const PLAIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><script>var analytics = true;</script></head>
<body>
<h1>Grandma's Soup</h1>
<p>Simmer two carrots and one onion in broth for an hour.</p>
</body>
</html>"#;

fn ingredients_response() -> Value {
    json!({
        "ingredients": [
            {"name": "ground beef", "quantity": 1.0, "unit": "lb", "note": null},
            {"name": "beans", "quantity": 1.0, "unit": "can", "note": null},
            {"name": "tomatoes", "quantity": 2.0, "unit": null, "note": null}
        ]
    })
}

fn full_recipe_response() -> Value {
    json!({
        "title": "Grandma's Soup",
        "servings": null,
        "image_url": null,
        "instructions": ["Simmer carrots and onion in broth for an hour."],
        "ingredients": [
            {"name": "carrots", "quantity": 2.0, "unit": null, "note": null},
            {"name": "onion", "quantity": 1.0, "unit": null, "note": null}
        ]
    })
}

#[tokio::test]
async fn test_structured_path_only_parses_ingredients() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chili")
        .with_status(200)
        .with_body(JSON_LD_PAGE)
        .create_async()
        .await;

    let llm = ScriptedLlm::new(ingredients_response());
    let ingestor = RecipeIngestor::with_llm(IngestConfig::default(), Box::new(llm.clone()));

    let url = format!("{}/chili", server.url());
    let recipe = ingestor.ingest_from_url(&url).await.unwrap();

    mock.assert_async().await;
    assert_eq!(recipe.title, "Weeknight Chili");
    assert_eq!(recipe.servings, Some(6));
    assert_eq!(
        recipe.image_url.as_deref(),
        Some("https://example.com/chili.jpg")
    );
    assert_eq!(recipe.instructions.len(), 3);
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.ingredients[0].name, "ground beef");
    // JSON-LD declared no canonical url, so the fetched one is attached
    assert_eq!(recipe.source_url.as_deref(), Some(url.as_str()));
    assert_eq!(llm.calls(), vec!["ingredients_only"]);
}

#[tokio::test]
async fn test_fallback_path_uses_full_text_extraction() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/soup")
        .with_status(200)
        .with_body(PLAIN_PAGE)
        .create_async()
        .await;

    let llm = ScriptedLlm::new(full_recipe_response());
    let ingestor = RecipeIngestor::with_llm(IngestConfig::default(), Box::new(llm.clone()));

    let url = format!("{}/soup", server.url());
    let recipe = ingestor.ingest_from_url(&url).await.unwrap();

    assert_eq!(recipe.title, "Grandma's Soup");
    assert_eq!(recipe.source_url.as_deref(), Some(url.as_str()));
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(llm.calls(), vec!["recipe_from_text"]);
}

#[tokio::test]
async fn test_non_2xx_fetch_is_fetch_failed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/gone")
        .with_status(404)
        .create_async()
        .await;

    let llm = ScriptedLlm::new(json!({}));
    let ingestor = RecipeIngestor::with_llm(IngestConfig::default(), Box::new(llm));

    let url = format!("{}/gone", server.url());
    let result = ingestor.ingest_from_url(&url).await;
    assert!(matches!(result, Err(IngestError::FetchFailed(_))));
}

#[tokio::test]
async fn test_malformed_block_falls_through_to_later_block() {
    let page = r#"<html><head>
        <script type="application/ld+json">{ broken</script>
        <script type="application/ld+json">
        {
            "@type": "Recipe",
            "name": "Second Block Wins",
            "recipeIngredient": ["butter"],
            "recipeInstructions": ["Melt"]
        }
        </script>
        </head><body></body></html>"#;

    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/two-blocks")
        .with_status(200)
        .with_body(page)
        .create_async()
        .await;

    let llm = ScriptedLlm::new(json!({
        "ingredients": [{"name": "butter", "quantity": null, "unit": null, "note": null}]
    }));
    let ingestor = RecipeIngestor::with_llm(IngestConfig::default(), Box::new(llm));

    let url = format!("{}/two-blocks", server.url());
    let recipe = ingestor.ingest_from_url(&url).await.unwrap();
    assert_eq!(recipe.title, "Second Block Wins");
}

#[tokio::test]
async fn test_schema_violation_surfaces_distinctly() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/soup")
        .with_status(200)
        .with_body(PLAIN_PAGE)
        .create_async()
        .await;

    // Model "forgets" the instructions field
    let llm = ScriptedLlm::new(json!({
        "title": "Grandma's Soup",
        "servings": null,
        "image_url": null,
        "ingredients": []
    }));
    let ingestor = RecipeIngestor::with_llm(IngestConfig::default(), Box::new(llm));

    let url = format!("{}/soup", server.url());
    let result = ingestor.ingest_from_url(&url).await;
    assert!(matches!(result, Err(IngestError::SchemaViolation(_))));
}
