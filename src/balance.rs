//! Temperature balancing
//!
//! The temperature slot has to counter whichever of Heat or Cold dominates
//! the other slots. Any substitution outside the temperature slot can change
//! that, so the temperature herb is re-picked afterwards.

use std::fmt;

use crate::catalog::Catalog;
use crate::models::{Recipe, Slot, SlotEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Balance {
    Heat,
    Cold,
    Balanced,
}

impl Balance {
    pub fn as_str(self) -> &'static str {
        match self {
            Balance::Heat => "Heat",
            Balance::Cold => "Cold",
            Balance::Balanced => "Balanced",
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The temperature property that balances the non-temperature slots
pub fn balancing_property(recipe: &Recipe) -> Balance {
    let (mut cold, mut heat) = (0usize, 0usize);
    for (slot, entry) in recipe.entries() {
        if slot == Slot::Temperature {
            continue;
        }
        match entry.ingredient.temperature.as_str() {
            "Cold" => cold += 1,
            "Heat" => heat += 1,
            _ => {}
        }
    }

    if cold > heat {
        Balance::Heat
    } else if cold < heat {
        Balance::Cold
    } else {
        Balance::Balanced
    }
}

/// Every variant of `recipe` whose temperature herb balances the rest
///
/// Candidates share the grade of the current temperature herb and keep its
/// quantity. Returns nothing if the catalog has no herb with the needed
/// property at that grade.
pub fn rebalance(catalog: &Catalog, recipe: &Recipe) -> Vec<Recipe> {
    let Some(current) = recipe.get(Slot::Temperature) else {
        return vec![recipe.clone()];
    };

    let needed = balancing_property(recipe);
    catalog
        .ingredients_where(current.ingredient.grade, needed.as_str())
        .into_iter()
        .map(|herb| recipe.with(Slot::Temperature, SlotEntry::new(herb, current.quantity)))
        .collect()
}
