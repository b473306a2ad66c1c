//! Recipe cost, ranking and presentation

use serde::Serialize;

use crate::models::{unit_price, ElixirInfo, Recipe};

/// Share of an elixir's value that turns into experience, by elixir grade
pub fn experience_ratio(grade: u8) -> Option<f64> {
    match grade {
        1 => Some(1.0),
        2 => Some(0.8),
        3 => Some(0.6),
        4 => Some(0.5),
        5 => Some(0.4),
        6 => Some(0.3),
        _ => None,
    }
}

/// Cost of buying every herb in the recipe
pub fn cost(recipe: &Recipe) -> u64 {
    recipe
        .entries()
        .map(|(_, entry)| {
            // base_recipe rejects unpriced grades and substitutes stay within 1 to 6
            let price = unit_price(entry.ingredient.grade).unwrap_or_default();
            price * u64::from(entry.quantity) * 2
        })
        .sum()
}

/// Presentation order: cheapest first, then fewest distinct herbs, then fewest slots
pub fn rank_key(recipe: &Recipe) -> (u64, usize, usize) {
    (cost(recipe), recipe.distinct_ingredients(), recipe.slot_count())
}

pub fn rank(mut recipes: Vec<Recipe>) -> Vec<Recipe> {
    recipes.sort_by_key(rank_key);
    recipes
}

/// The recipes tied at the lowest cost
pub fn cheapest(recipes: &[Recipe]) -> Vec<Recipe> {
    let Some(lowest) = recipes.iter().map(cost).min() else {
        return Vec::new();
    };
    recipes
        .iter()
        .filter(|r| cost(r) == lowest)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotDescriptor {
    pub slot: String,
    pub quantity: u32,
    pub ingredient: String,
    pub grade: String,
    pub property: String,
    pub temperature: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeDescriptor {
    pub slots: Vec<SlotDescriptor>,
    pub slot_count: usize,
    pub distinct_ingredients: usize,
    pub complexity: usize,
    pub cost: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<u64>,
}

pub fn describe(recipe: &Recipe, elixir: Option<&ElixirInfo>) -> RecipeDescriptor {
    let slots = recipe
        .entries()
        .map(|(slot, entry)| SlotDescriptor {
            slot: slot.label().to_string(),
            quantity: entry.quantity,
            ingredient: entry.ingredient.name.clone(),
            grade: format!("T{}", entry.ingredient.grade),
            property: entry.ingredient.property_for(slot).to_string(),
            temperature: entry.ingredient.temperature.clone(),
        })
        .collect();

    let cost = cost(recipe);
    let slot_count = recipe.slot_count();
    let distinct_ingredients = recipe.distinct_ingredients();
    let value = elixir.map(|e| e.value);
    let profit = value.map(|v| v as i64 - cost as i64);
    let experience = elixir.and_then(|e| {
        experience_ratio(e.grade).map(|ratio| (e.value as f64 * ratio).round() as u64)
    });

    RecipeDescriptor {
        slots,
        slot_count,
        distinct_ingredients,
        complexity: slot_count + distinct_ingredients,
        cost,
        value,
        profit,
        experience,
    }
}

/// Rank recipes and describe them in presentation order
pub fn describe_ranked(recipes: Vec<Recipe>, elixir: Option<&ElixirInfo>) -> Vec<RecipeDescriptor> {
    rank(recipes).iter().map(|r| describe(r, elixir)).collect()
}
