//! Filter for recipes whose split slots add nothing
//!
//! Splitting a slot into two halves of the same herb only matters if the
//! extra slot changes the temperature balance. Otherwise the recipe is a
//! restatement of the unsplit one.

use crate::balance::balancing_property;
use crate::models::{Recipe, Slot, SlotEntry};

const PAIRS: [(Slot, Slot); 2] = [
    (Slot::Primary, Slot::Primary2),
    (Slot::Secondary, Slot::Secondary2),
];

fn is_collapsible(recipe: &Recipe, (first, second): (Slot, Slot)) -> bool {
    match (recipe.get(first), recipe.get(second)) {
        (Some(a), Some(b)) => a.ingredient == b.ingredient,
        _ => false,
    }
}

/// Fold the second half of each pair back into the first
fn collapse(recipe: &Recipe, pairs: &[(Slot, Slot)]) -> Recipe {
    let mut collapsed = recipe.clone();
    for &(first, second) in pairs {
        if let (Some(a), Some(b)) = (recipe.get(first), recipe.get(second)) {
            let merged = SlotEntry::new(a.ingredient.clone(), a.quantity.saturating_add(b.quantity));
            collapsed = collapsed.with(first, merged).without(second);
        }
    }
    collapsed
}

pub fn is_redundant(recipe: &Recipe) -> bool {
    let collapsible: Vec<(Slot, Slot)> = PAIRS
        .into_iter()
        .filter(|pair| is_collapsible(recipe, *pair))
        .collect();
    if collapsible.is_empty() {
        return false;
    }

    let balance = balancing_property(recipe);
    let unchanged =
        |pairs: &[(Slot, Slot)]| balancing_property(&collapse(recipe, pairs)) == balance;

    collapsible.iter().any(|pair| unchanged(std::slice::from_ref(pair)))
        || (collapsible.len() == PAIRS.len() && unchanged(&collapsible))
}

pub fn only_minimal(recipes: Vec<Recipe>) -> Vec<Recipe> {
    recipes.into_iter().filter(|r| !is_redundant(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{self, fixture_catalog};
    use std::sync::Arc;

    #[test]
    fn test_split_that_changes_balance_is_kept() {
        let catalog = fixture_catalog();
        let ember = Arc::clone(catalog.ingredient("Emberseed").unwrap());
        // Heat, Heat, Cold needs Cold; without the second half it is Balanced
        let recipe = testutil::recipe(&catalog, ("Emberseed", 2), ("Frostleaf", 1), ("Dewcap", 1))
            .with(Slot::Primary2, SlotEntry::new(ember, 1));

        assert!(!is_redundant(&recipe));
    }

    #[test]
    fn test_split_that_keeps_balance_is_redundant() {
        let catalog = fixture_catalog();
        let ember = Arc::clone(catalog.ingredient("Emberseed").unwrap());
        // Three heat herbs or two, either way it needs Cold
        let recipe = testutil::recipe(&catalog, ("Emberseed", 2), ("Sunroot", 1), ("Dewcap", 1))
            .with(Slot::Primary2, SlotEntry::new(ember, 1));

        assert!(is_redundant(&recipe));
    }

    #[test]
    fn test_split_between_different_herbs_is_never_collapsible() {
        let catalog = fixture_catalog();
        let bloodvine = Arc::clone(catalog.ingredient("Bloodvine").unwrap());
        let recipe = testutil::recipe(&catalog, ("Emberseed", 2), ("Sunroot", 1), ("Dewcap", 1))
            .with(Slot::Primary2, SlotEntry::new(bloodvine, 1));

        assert!(!is_redundant(&recipe));
    }

    #[test]
    fn test_both_pairs_collapsed_together() {
        let catalog = fixture_catalog();
        let ember = Arc::clone(catalog.ingredient("Emberseed").unwrap());
        let dew = Arc::clone(catalog.ingredient("Dewcap").unwrap());
        // Two heat and two cold herbs are Balanced. Collapsing one pair tips
        // the balance, collapsing both leaves one of each
        let recipe = testutil::recipe(&catalog, ("Emberseed", 2), ("Dewcap", 2), ("Mistmoss", 1))
            .with(Slot::Primary2, SlotEntry::new(ember, 1))
            .with(Slot::Secondary2, SlotEntry::new(dew, 1));

        assert!(is_redundant(&recipe));
    }

    #[test]
    fn test_only_minimal_drops_redundant_recipes() {
        let catalog = fixture_catalog();
        let ember = Arc::clone(catalog.ingredient("Emberseed").unwrap());
        let plain = testutil::recipe(&catalog, ("Emberseed", 3), ("Sunroot", 1), ("Dewcap", 1));
        let redundant = testutil::recipe(&catalog, ("Emberseed", 2), ("Sunroot", 1), ("Dewcap", 1))
            .with(Slot::Primary2, SlotEntry::new(ember, 1));

        assert_eq!(only_minimal(vec![plain.clone(), redundant]), vec![plain]);
    }
}
