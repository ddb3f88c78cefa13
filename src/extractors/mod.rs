mod json_ld;

pub use json_ld::extract_structured;

/// Deterministic extraction result: the recipe fields a structured-metadata
/// block supplies directly, with ingredient lines still unparsed.
///
/// Transient: exists only between extraction and orchestration. The raw
/// ingredient strings still need the ingredients-only extraction pass
/// before a `Recipe` can be assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRecipeCandidate {
    pub title: String,
    pub servings: Option<u32>,
    /// Canonical URL declared by the page itself, when present.
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub instructions: Vec<String>,
    /// Unparsed ingredient lines, in source order.
    pub raw_ingredients: Vec<String>,
}
