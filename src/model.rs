use serde::{Deserialize, Serialize};

/// A single structured ingredient line.
///
/// Quantity and unit are independently nullable because natural-language
/// ingredient lines are frequently ambiguous ("a pinch of salt").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// The ingredient name, e.g. "chicken breast"
    pub name: String,
    /// Numeric quantity, or None if unspecified
    pub quantity: Option<f64>,
    /// Unit of measure (cups, oz, lbs...), or None
    pub unit: Option<String>,
    /// Prep notes like "finely chopped", or None
    pub note: Option<String>,
}

/// The normalized recipe produced by ingestion.
///
/// Instructions and ingredients preserve source ordering. `source_url` is
/// None if and only if the recipe came from an uploaded document.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub title: String,
    pub servings: Option<u32>,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub instructions: Vec<String>,
    pub ingredients: Vec<ParsedIngredient>,
}

/// Content kind of an uploaded source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Html,
    Pdf,
}

impl DocumentKind {
    /// Map a MIME type to a known document kind.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "text/html" => Some(DocumentKind::Html),
            "application/pdf" => Some(DocumentKind::Pdf),
            _ => None,
        }
    }
}

/// Raw source content handed to ingestion. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub kind: DocumentKind,
    pub data: Vec<u8>,
    /// Originating URL, or None for uploads.
    pub origin: Option<String>,
}

impl SourceDocument {
    pub fn pdf(data: Vec<u8>) -> Self {
        SourceDocument {
            kind: DocumentKind::Pdf,
            data,
            origin: None,
        }
    }
}

/// A household-declared equivalence between two ingredient names,
/// e.g. "butter" and "margarine".
///
/// The pair is unordered and symmetric. Equivalence is pairwise only:
/// (A, B) and (B, C) do not make A match C.
#[derive(Debug, Clone, Deserialize)]
pub struct SubstitutionPair {
    pub ingredient_a: String,
    pub ingredient_b: String,
}

impl SubstitutionPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        SubstitutionPair {
            ingredient_a: a.into(),
            ingredient_b: b.into(),
        }
    }
}

/// A stocked pantry ingredient. Owned and persisted elsewhere; this crate
/// only reads it as a matching target.
#[derive(Debug, Clone, Deserialize)]
pub struct PantryItem {
    pub id: String,
    pub specific_name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
}
