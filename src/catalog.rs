//! In-memory herb, recipe and elixir catalog
//!
//! The catalog is materialized once from the database and never mutated
//! afterwards. Property typos are fixed while loading, so the substitution
//! rules only ever see canonical property names.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::db;
use crate::error::CatalogError;
use crate::models::{unit_price, ElixirInfo, Ingredient, Recipe, RecipeSlotRow, Slot, MAX_GRADE};

#[derive(Debug, Default)]
pub struct Catalog {
    /// Ordered by grade then name
    ingredients: Vec<Arc<Ingredient>>,
    by_name: HashMap<String, Arc<Ingredient>>,
    recipes: HashMap<String, Vec<RecipeSlotRow>>,
    elixirs: HashMap<String, ElixirInfo>,
    config: CatalogConfig,
}

impl Catalog {
    /// Load the full catalog from the database
    pub fn load(conn: &Connection, config: &CatalogConfig) -> Result<Self> {
        let ingredients = db::list_ingredients(conn)?;
        let rows = db::list_recipe_slots(conn)?;
        let elixirs = db::list_elixirs(conn)?;

        let catalog = Self::from_parts(ingredients, rows, elixirs, config);
        info!(
            "Loaded catalog: {} herbs, {} recipes, {} elixirs",
            catalog.ingredients.len(),
            catalog.recipes.len(),
            catalog.elixirs.len()
        );
        Ok(catalog)
    }

    pub fn from_parts(
        ingredients: Vec<Ingredient>,
        rows: Vec<RecipeSlotRow>,
        elixirs: Vec<ElixirInfo>,
        config: &CatalogConfig,
    ) -> Self {
        let mut ingredients: Vec<Arc<Ingredient>> = ingredients
            .into_iter()
            .map(|mut herb| {
                herb.primary = config.normalize_property(&herb.primary);
                herb.secondary = config.normalize_property(&herb.secondary);
                herb.temperature = config.normalize_property(&herb.temperature);
                Arc::new(herb)
            })
            .collect();
        ingredients.sort_by(|a, b| (a.grade, &a.name).cmp(&(b.grade, &b.name)));
        for herb in ingredients.iter().filter(|h| unit_price(h.grade).is_none()) {
            warn!("Herb {} has out-of-range grade {}", herb.name, herb.grade);
        }

        let by_name = ingredients
            .iter()
            .map(|herb| (herb.name.clone(), Arc::clone(herb)))
            .collect();

        let mut recipes: HashMap<String, Vec<RecipeSlotRow>> = HashMap::new();
        for row in rows {
            recipes.entry(row.recipe_name.clone()).or_default().push(row);
        }

        let elixirs = elixirs.into_iter().map(|e| (e.name.clone(), e)).collect();

        Self {
            ingredients,
            by_name,
            recipes,
            elixirs,
            config: config.clone(),
        }
    }

    pub fn ingredients(&self) -> &[Arc<Ingredient>] {
        &self.ingredients
    }

    /// Exact lookup by name, denylisted herbs included
    pub fn ingredient(&self, name: &str) -> Option<&Arc<Ingredient>> {
        self.by_name.get(name)
    }

    /// Herbs of `grade` carrying `property` as primary, secondary or temperature
    pub fn ingredients_where(&self, grade: u8, property: &str) -> Vec<Arc<Ingredient>> {
        self.ingredients
            .iter()
            .filter(|herb| herb.grade == grade && herb.has_property(property))
            .filter(|herb| !self.config.is_denied(&herb.name))
            .cloned()
            .collect()
    }

    pub fn elixir_info(&self, name: &str) -> Option<&ElixirInfo> {
        self.elixirs.get(name)
    }

    /// Assemble the base recipe for `name` from its stored slots
    pub fn base_recipe(&self, name: &str) -> Result<Recipe, CatalogError> {
        let rows = self
            .recipes
            .get(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;

        let mut recipe = Recipe::new(name);
        for row in rows {
            let slot: Slot = row
                .slot
                .parse()
                .map_err(|reason: String| CatalogError::integrity(name, reason))?;
            if recipe.contains(slot) {
                return Err(CatalogError::integrity(
                    name,
                    format!("slot '{}' is filled twice", slot),
                ));
            }
            let herb = self.ingredient(&row.ingredient_name).ok_or_else(|| {
                CatalogError::integrity(
                    name,
                    format!("unknown herb '{}' in slot '{}'", row.ingredient_name, slot),
                )
            })?;
            if unit_price(herb.grade).is_none() {
                return Err(CatalogError::integrity(
                    name,
                    format!(
                        "herb '{}' has grade {}, expected 1 to {}",
                        herb.name, herb.grade, MAX_GRADE
                    ),
                ));
            }
            recipe = recipe.slot(slot, Arc::clone(herb), row.quantity);
        }

        for half in [Slot::Primary2, Slot::Secondary2] {
            if recipe.contains(half) && !recipe.contains(half.base()) {
                return Err(CatalogError::integrity(
                    name,
                    format!("slot '{}' without '{}'", half, half.base()),
                ));
            }
        }
        if !recipe.contains(Slot::Temperature) {
            return Err(CatalogError::integrity(name, "no temperature slot"));
        }

        debug!("Assembled base recipe {}: {}", name, recipe);
        Ok(recipe)
    }
}
