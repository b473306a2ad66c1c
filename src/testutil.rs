//! Small hand-checked catalog shared by the unit tests
//!
//! Grade 2: Sunroot, Bloodvine and Frostleaf. Grade 1: Emberseed and Dewcap
//! plus three temperature-only herbs (Ashbloom, Mistmoss, Rimefern) whose
//! primary and secondary properties never match anything.
//!
//! "Tonic" is `Primary: 1x Sunroot`, `Secondary: 1x Frostleaf`,
//! `Temperature: 1x Mistmoss`.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::models::{ElixirInfo, Ingredient, Recipe, RecipeSlotRow, Slot};

pub fn herb(
    name: &str,
    grade: u8,
    primary: &str,
    secondary: &str,
    temperature: &str,
) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        grade,
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        temperature: temperature.to_string(),
    }
}

pub fn fixture_herbs() -> Vec<Ingredient> {
    vec![
        herb("Sunroot", 2, "Mending", "Focusing", "Heat"),
        herb("Bloodvine", 2, "Mending", "Soothing", "Cold"),
        herb("Frostleaf", 2, "Warding", "Calming", "Cold"),
        herb("Emberseed", 1, "Mending", "Focusing", "Heat"),
        herb("Dewcap", 1, "Warding", "Calming", "Cold"),
        herb("Mistmoss", 1, "Inert", "Inert", "Balanced"),
        herb("Ashbloom", 1, "Inert", "Inert", "Heat"),
        herb("Rimefern", 1, "Inert", "Inert", "Cold"),
    ]
}

pub fn row(recipe: &str, slot: &str, quantity: u32, herb: &str) -> RecipeSlotRow {
    RecipeSlotRow {
        recipe_name: recipe.to_string(),
        slot: slot.to_string(),
        quantity,
        ingredient_name: herb.to_string(),
    }
}

pub fn fixture_catalog() -> Catalog {
    let rows = vec![
        row("Tonic", "Primary", 1, "Sunroot"),
        row("Tonic", "Secondary", 1, "Frostleaf"),
        row("Tonic", "Temperature", 1, "Mistmoss"),
    ];
    let elixirs = vec![ElixirInfo {
        name: "Tonic".to_string(),
        grade: 2,
        value: 100,
        effect: "Soothes".to_string(),
    }];
    Catalog::from_parts(fixture_herbs(), rows, elixirs, &CatalogConfig::default())
}

/// Build a three-slot recipe from catalog herbs
pub fn recipe(
    catalog: &Catalog,
    primary: (&str, u32),
    secondary: (&str, u32),
    temperature: (&str, u32),
) -> Recipe {
    let get = |name: &str| Arc::clone(catalog.ingredient(name).unwrap());
    Recipe::new("Tonic")
        .slot(Slot::Primary, get(primary.0), primary.1)
        .slot(Slot::Secondary, get(secondary.0), secondary.1)
        .slot(Slot::Temperature, get(temperature.0), temperature.1)
}
