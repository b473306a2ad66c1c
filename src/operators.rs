//! Single-slot substitution rules
//!
//! Each operator takes a recipe and one slot and returns every recipe one
//! rule application away, with the temperature slot already rebalanced.

use std::collections::HashSet;
use std::sync::Arc;

use crate::balance;
use crate::catalog::Catalog;
use crate::config::SearchConfig;
use crate::models::{substitution_ratio, Ingredient, Recipe, Slot, SlotEntry, MAX_GRADE};

/// Which substitution rule to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Same grade, different herb, optionally splitting the slot
    Side,
    /// One grade lower, quantity multiplied by the ratio
    Down,
    /// One grade higher, quantity divided by the ratio
    Up,
}

pub struct Operators<'c> {
    catalog: &'c Catalog,
    rules: SearchConfig,
}

impl<'c> Operators<'c> {
    pub fn new(catalog: &'c Catalog, rules: SearchConfig) -> Self {
        Self { catalog, rules }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn apply(&self, tier: Tier, slot: Slot, recipe: &Recipe, capacity: u32) -> Vec<Recipe> {
        match tier {
            Tier::Side => self.sidetier_ingredient(slot, recipe, capacity),
            Tier::Down => self.downtier_ingredient(slot, recipe),
            Tier::Up => self.uptier_ingredient(slot, recipe),
        }
    }

    pub fn is_splittable(&self, slot: Slot, recipe: &Recipe, capacity: u32) -> bool {
        match slot {
            Slot::Primary => {
                !recipe.contains(Slot::Primary2) && capacity == self.rules.max_capacity
            }
            Slot::Secondary => {
                !recipe.contains(Slot::Secondary2)
                    && self
                        .rules
                        .secondary_split_min_capacity
                        .is_none_or(|min| capacity >= min)
            }
            _ => false,
        }
    }

    /// Same-grade substitutes for `slot`, plus split variants where allowed
    pub fn sidetier_ingredient(&self, slot: Slot, recipe: &Recipe, capacity: u32) -> Vec<Recipe> {
        let Some(current) = recipe.get(slot) else {
            return Vec::new();
        };
        let herb = &current.ingredient;
        let quantity = current.quantity;

        let alternatives: Vec<Arc<Ingredient>> = self
            .catalog
            .ingredients_where(herb.grade, herb.property_for(slot))
            .into_iter()
            .filter(|candidate| candidate != herb)
            .collect();

        let mut variants: Vec<Recipe> = alternatives
            .iter()
            .map(|alt| recipe.with(slot, SlotEntry::new(Arc::clone(alt), quantity)))
            .collect();

        if let Some(half) = slot.split_half() {
            if self.is_splittable(slot, recipe, capacity) {
                for i in 1..quantity {
                    for split_herb in alternatives.iter().chain(std::iter::once(herb)) {
                        variants.push(
                            recipe
                                .with(slot, SlotEntry::new(Arc::clone(split_herb), quantity - i))
                                .with(half, SlotEntry::new(Arc::clone(split_herb), i)),
                        );
                    }
                }
            }
        }

        self.finish(slot, variants)
    }

    /// Substitutes one grade lower, scaled up by the ratio of the replaced herb
    pub fn downtier_ingredient(&self, slot: Slot, recipe: &Recipe) -> Vec<Recipe> {
        let Some(current) = recipe.get(slot) else {
            return Vec::new();
        };
        let herb = &current.ingredient;
        let Some(ratio) = substitution_ratio(herb.grade) else {
            return Vec::new();
        };
        let Some(quantity) = current.quantity.checked_mul(ratio) else {
            return Vec::new();
        };

        let variants = self
            .catalog
            .ingredients_where(herb.grade - 1, herb.property_for(slot))
            .into_iter()
            .map(|lower| recipe.with(slot, SlotEntry::new(lower, quantity)))
            .collect();

        self.finish(slot, variants)
    }

    /// Substitutes one grade higher, scaled down by the ratio of the new grade
    ///
    /// A slot whose quantity does not divide evenly contributes nothing, since
    /// fractional herbs cannot be put in a furnace.
    pub fn uptier_ingredient(&self, slot: Slot, recipe: &Recipe) -> Vec<Recipe> {
        let Some(current) = recipe.get(slot) else {
            return Vec::new();
        };
        let herb = &current.ingredient;
        if herb.grade >= MAX_GRADE {
            return Vec::new();
        }
        let new_grade = herb.grade + 1;
        let Some(ratio) = substitution_ratio(new_grade) else {
            return Vec::new();
        };
        if current.quantity % ratio != 0 {
            return Vec::new();
        }
        let quantity = current.quantity / ratio;

        let variants = self
            .catalog
            .ingredients_where(new_grade, herb.property_for(slot))
            .into_iter()
            .map(|higher| recipe.with(slot, SlotEntry::new(higher, quantity)))
            .collect();

        self.finish(slot, variants)
    }

    /// Rebalance temperature after a non-temperature change and drop repeats
    fn finish(&self, slot: Slot, variants: Vec<Recipe>) -> Vec<Recipe> {
        let balanced: Vec<Recipe> = if slot == Slot::Temperature {
            variants
        } else {
            variants
                .iter()
                .flat_map(|r| balance::rebalance(self.catalog, r))
                .collect()
        };

        let mut seen = HashSet::new();
        balanced
            .into_iter()
            .filter(|r| seen.insert(r.key()))
            .collect()
    }
}
