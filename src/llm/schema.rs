//! Output schemas for model extraction.
//!
//! Each extraction mode declares the exact shape the model must return.
//! The schemas are plain JSON Schema values sent as tool definitions;
//! they are built once at startup and shared by reference, never mutated.

use serde_json::{json, Value};

/// A named output schema presented to the model as a forced tool call.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// The full set of extraction schemas, one per request mode (text and
/// document extraction share the recipe shape).
#[derive(Debug, Clone)]
pub struct Schemas {
    pub ingredients: ToolSchema,
    pub recipe: ToolSchema,
}

fn ingredient_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": {
                "type": "string",
                "description": "The ingredient name, e.g. \"chicken breast\""
            },
            "quantity": {
                "type": ["number", "null"],
                "description": "Numeric quantity, or null if unspecified"
            },
            "unit": {
                "type": ["string", "null"],
                "description": "Unit of measure (cups, oz, lbs...), or null"
            },
            "note": {
                "type": ["string", "null"],
                "description": "Prep notes like \"finely chopped\", or null"
            }
        },
        "required": ["name", "quantity", "unit", "note"]
    })
}

impl Schemas {
    /// Build the immutable schema set. Called once per engine instance.
    pub fn new() -> Self {
        let ingredients = ToolSchema {
            name: "record_ingredients",
            description: "Record the parsed ingredient list",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "ingredients": {
                        "type": "array",
                        "description": "List of parsed ingredients, in input order",
                        "items": ingredient_schema()
                    }
                },
                "required": ["ingredients"]
            }),
        };

        let recipe = ToolSchema {
            name: "record_recipe",
            description: "Record the extracted recipe",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "The recipe title"
                    },
                    "servings": {
                        "type": ["integer", "null"],
                        "description": "Number of servings, or null if unknown"
                    },
                    "image_url": {
                        "type": ["string", "null"],
                        "description": "Image URL if found, or null"
                    },
                    "instructions": {
                        "type": "array",
                        "description": "Step-by-step cooking instructions",
                        "items": {"type": "string"}
                    },
                    "ingredients": {
                        "type": "array",
                        "description": "List of ingredients",
                        "items": ingredient_schema()
                    }
                },
                "required": ["title", "servings", "image_url", "instructions", "ingredients"]
            }),
        };

        Schemas {
            ingredients,
            recipe,
        }
    }
}

impl Default for Schemas {
    fn default() -> Self {
        Self::new()
    }
}
