//! JSON-LD recipe extraction.
//!
//! Scans every `application/ld+json` block in document order and returns
//! the first entry typed as a schema.org Recipe. Blocks may hold a single
//! object, an array of objects, or an `@graph` wrapper. Malformed blocks
//! are logged and skipped; only the absence of any Recipe entry makes the
//! scan come up empty.

use html_escape::decode_html_entities;
use log::{debug, warn};
use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::IngestError;
use crate::extractors::StructuredRecipeCandidate;

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn is_recipe_type(entry: &Value) -> bool {
    match entry.get("@type") {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

/// Locate the Recipe-typed entry within one JSON-LD value, which may be a
/// bare object, an array of entries, or a `@graph` wrapper.
fn find_recipe_entry(json_ld: &Value) -> Option<&Value> {
    if let Some(entries) = json_ld.as_array() {
        return entries.iter().find(|entry| is_recipe_type(entry));
    }
    if is_recipe_type(json_ld) {
        return Some(json_ld);
    }
    json_ld
        .get("@graph")
        .and_then(Value::as_array)
        .and_then(|graph| graph.iter().find(|entry| is_recipe_type(entry)))
}

/// Parse `recipeYield`, which shows up as a number, a string with leading
/// digits ("4 servings"), or an array of either.
fn parse_servings(yield_value: Option<&Value>) -> Option<u32> {
    match yield_value? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()
        }
        Value::Array(entries) => parse_servings(entries.first()),
        _ => None,
    }
}

/// Image can be a URL string, an ImageObject, or an array of either;
/// the first entry wins.
fn parse_image(image: Option<&Value>) -> Option<String> {
    match image? {
        Value::String(url) => Some(decode_html_symbols(url)),
        Value::Object(obj) => obj
            .get("url")
            .and_then(Value::as_str)
            .map(|url| url.to_string()),
        Value::Array(entries) => parse_image(entries.first()),
        _ => None,
    }
}

/// Instructions flatten plain strings or objects carrying a `text` field,
/// preserving order. Entries with neither are skipped.
fn parse_instructions(instructions: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(steps)) = instructions else {
        return Vec::new();
    };
    steps
        .iter()
        .filter_map(|step| match step {
            Value::String(s) => Some(decode_html_symbols(s)),
            Value::Object(obj) => obj
                .get("text")
                .and_then(Value::as_str)
                .map(decode_html_symbols),
            _ => None,
        })
        .collect()
}

fn candidate_from_entry(entry: &Value) -> StructuredRecipeCandidate {
    let title = entry
        .get("name")
        .and_then(Value::as_str)
        .map(decode_html_symbols)
        .unwrap_or_else(|| "Untitled Recipe".to_string());

    let raw_ingredients = entry
        .get("recipeIngredient")
        .and_then(Value::as_array)
        .map(|lines| {
            lines
                .iter()
                .filter_map(Value::as_str)
                .map(decode_html_symbols)
                .collect()
        })
        .unwrap_or_default();

    StructuredRecipeCandidate {
        title,
        servings: parse_servings(entry.get("recipeYield")),
        source_url: entry
            .get("url")
            .and_then(Value::as_str)
            .map(|url| url.to_string()),
        image_url: parse_image(entry.get("image")),
        instructions: parse_instructions(entry.get("recipeInstructions")),
        raw_ingredients,
    }
}

fn parse_block(raw: &str) -> Result<Value, IngestError> {
    serde_json::from_str(raw).map_err(|err| IngestError::MalformedStructuredData(err.to_string()))
}

/// Scan the page's JSON-LD blocks for a Recipe entry.
///
/// Returns the first Recipe found in document order, or None when no block
/// yields one and the caller should fall back to AI extraction.
pub fn extract_structured(html: &str) -> Option<StructuredRecipeCandidate> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();

    for script in document.select(&selector) {
        let json_ld = match parse_block(&script.inner_html()) {
            Ok(json_ld) => json_ld,
            Err(err) => {
                warn!("Skipping structured-data block: {}", err);
                continue;
            }
        };

        if let Some(entry) = find_recipe_entry(&json_ld) {
            let candidate = candidate_from_entry(entry);
            debug!("Structured extraction found recipe: {}", candidate.title);
            return Some(candidate);
        }
    }

    None
}
