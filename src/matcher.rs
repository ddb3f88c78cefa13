//! Ingredient name matching.
//!
//! Decides when two free-text ingredient names denote the same ingredient,
//! honoring household substitution pairs and fuzzy spelling variance.

use crate::model::{PantryItem, SubstitutionPair};

/// Minimum token-sort similarity (0-100) for two names to be considered
/// the same ingredient. Calibrated so "tomatoe"/"tomato" passes and
/// "tomato"/"potato" does not.
const FUZZY_MATCH_THRESHOLD: f64 = 82.0;

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Token-sort similarity ratio on a 0-100 scale.
///
/// Word tokens are sorted before comparison, so "breast chicken" and
/// "chicken breast" score 100.
fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let mut tokens_a: Vec<&str> = a.split_whitespace().collect();
    let mut tokens_b: Vec<&str> = b.split_whitespace().collect();
    tokens_a.sort_unstable();
    tokens_b.sort_unstable();

    strsim::normalized_levenshtein(&tokens_a.join(" "), &tokens_b.join(" ")) * 100.0
}

/// Returns true when `a` and `b` name the same ingredient.
///
/// Resolution order, short-circuiting:
/// 1. Exact equality after trimming and lowercasing
/// 2. The two names are the two sides of a substitution pair (either
///    assignment)
/// 3. Token-sort similarity at or above the calibrated threshold
///
/// Substitution equivalence is pairwise only, never transitive: pairs
/// (A, B) and (B, C) do not make A match C.
pub fn names_match(a: &str, b: &str, substitutions: &[SubstitutionPair]) -> bool {
    let a_norm = normalize(a);
    let b_norm = normalize(b);

    if a_norm == b_norm {
        return true;
    }

    for sub in substitutions {
        let pair_a = normalize(&sub.ingredient_a);
        let pair_b = normalize(&sub.ingredient_b);
        if (a_norm == pair_a && b_norm == pair_b) || (a_norm == pair_b && b_norm == pair_a) {
            return true;
        }
    }

    token_sort_ratio(&a_norm, &b_norm) >= FUZZY_MATCH_THRESHOLD
}

/// Find the first pantry item whose name matches `needle`, in list order.
pub fn find_match<'a>(
    needle: &str,
    items: &'a [PantryItem],
    substitutions: &[SubstitutionPair],
) -> Option<&'a PantryItem> {
    items
        .iter()
        .find(|item| names_match(needle, &item.specific_name, substitutions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pantry_item(id: &str, name: &str) -> PantryItem {
        PantryItem {
            id: id.to_string(),
            specific_name: name.to_string(),
            quantity: None,
            unit: None,
        }
    }

    #[test]
    fn test_exact_match_ignores_case_and_whitespace() {
        assert!(names_match("Chicken Breast", "chicken breast", &[]));
        assert!(names_match("  butter ", "Butter", &[]));
    }

    #[test]
    fn test_substitution_pair_matches_both_directions() {
        let subs = vec![SubstitutionPair::new("butter", "margarine")];
        assert!(names_match("Butter", "Margarine", &subs));
        assert!(names_match("Margarine", "Butter", &subs));
        assert!(!names_match("Butter", "Oil", &subs));
    }

    #[test]
    fn test_substitutions_are_not_transitive() {
        let subs = vec![
            SubstitutionPair::new("butter", "margarine"),
            SubstitutionPair::new("margarine", "shortening"),
        ];
        assert!(names_match("butter", "margarine", &subs));
        assert!(names_match("margarine", "shortening", &subs));
        assert!(!names_match("butter", "shortening", &subs));
    }

    #[test]
    fn test_fuzzy_accepts_near_miss_spelling() {
        assert!(names_match("tomatoe", "tomato", &[]));
    }

    #[test]
    fn test_fuzzy_rejects_unrelated_names() {
        assert!(!names_match("tomato", "potato", &[]));
        assert!(!names_match("flour", "sugar", &[]));
    }

    #[test]
    fn test_token_order_does_not_matter() {
        assert!(names_match("breast chicken", "chicken breast", &[]));
    }

    #[test]
    fn test_find_match_returns_first_in_list_order() {
        let items = vec![
            pantry_item("1", "olive oil"),
            pantry_item("2", "tomato"),
            pantry_item("3", "tomatoes"),
        ];
        let found = find_match("Tomato", &items, &[]).unwrap();
        assert_eq!(found.id, "2");
    }

    #[test]
    fn test_find_match_returns_none_when_nothing_matches() {
        let items = vec![pantry_item("1", "olive oil")];
        assert!(find_match("cinnamon", &items, &[]).is_none());
    }

    #[test]
    fn test_find_match_honors_substitutions() {
        let items = vec![pantry_item("1", "margarine")];
        let subs = vec![SubstitutionPair::new("butter", "margarine")];
        let found = find_match("butter", &items, &subs).unwrap();
        assert_eq!(found.id, "1");
    }
}
