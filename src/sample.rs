//! Sample catalog for trying the tool without a full data import

use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

use crate::db;
use crate::models::{ElixirInfo, Ingredient, RecipeSlotRow};

/// (name, grade, primary, secondary, temperature)
const HERBS: &[(&str, u8, &str, &str, &str)] = &[
    ("Azuresky Flower", 1, "Mending", "Focusing", "Heat"),
    ("Frostbite Moss", 1, "Mending", "Calming", "Cold"),
    ("Dawnpetal", 1, "Fortifying", "Focusing", "Balanced"),
    ("Ironroot Sprout", 1, "Fortifying", "Calming", "Heat"),
    ("Snowdrop Reed", 1, "Invigorating", "Focusing", "Cold"),
    ("Cinderleaf", 1, "Invigorating", "Calming", "Balanced"),
    ("Waterglade Lily", 2, "Mending", "Focusing", "Cold"),
    ("Emberbloom", 2, "Mending", "Calming", "Heat"),
    ("Sepastra Herb", 2, "Fortifying", "Focusing", "Heat"),
    ("Panacea Dew", 2, "Invigorating", "Focusing", "Balanced"),
    ("Stonecap", 2, "Fortifying", "Calming", "Cold"),
    ("Mistvine", 2, "Invigorating", "Calming", "Balanced"),
    // The source data misspells Coalescing for this herb
    ("Threadbind Vine", 3, "Mending", "Coalesing", "Heat"),
    ("Glimmerroot", 3, "Fortifying", "Coalescing", "Cold"),
    ("Sunspire Lotus", 3, "Invigorating", "Focusing", "Balanced"),
    ("Palegrass", 3, "Mending", "Calming", "Cold"),
    ("Moonveil Orchid", 4, "Mending", "Focusing", "Cold"),
    ("Tidecall Kelp", 4, "Fortifying", "Calming", "Cold"),
    ("Frostfang Lichen", 4, "Invigorating", "Coalescing", "Cold"),
    ("Ashen Thistle", 4, "Mending", "Calming", "Heat"),
    ("Dragonscale Fern", 4, "Fortifying", "Focusing", "Balanced"),
    ("Phoenix Feather Grass", 5, "Mending", "Focusing", "Heat"),
    ("Glacier Heart Lotus", 5, "Fortifying", "Calming", "Cold"),
    ("Void Blossom", 5, "Invigorating", "Coalescing", "Balanced"),
    ("Celestial Peach", 6, "Mending", "Focusing", "Balanced"),
    ("Eternal Frost Lily", 6, "Fortifying", "Calming", "Cold"),
    ("Sunforge Root", 6, "Invigorating", "Coalescing", "Heat"),
    ("Crimson Demon Core", 6, "Invigorating", "Focusing", "Heat"),
];

/// (recipe, slot, quantity, herb)
const RECIPE_SLOTS: &[(&str, &str, u32, &str)] = &[
    ("Azure Heart Elixir", "Primary", 4, "Azuresky Flower"),
    ("Azure Heart Elixir", "Secondary", 3, "Frostbite Moss"),
    ("Azure Heart Elixir", "Temperature", 1, "Dawnpetal"),
    ("Bright Heart Elixir", "Primary", 3, "Waterglade Lily"),
    ("Bright Heart Elixir", "Secondary", 4, "Sepastra Herb"),
    ("Bright Heart Elixir", "Secondary 2", 2, "Panacea Dew"),
    ("Bright Heart Elixir", "Temperature", 1, "Panacea Dew"),
    ("Greater Healing Elixir", "Primary", 3, "Palegrass"),
    ("Greater Healing Elixir", "Secondary", 2, "Sunspire Lotus"),
    ("Greater Healing Elixir", "Temperature", 1, "Threadbind Vine"),
    ("Expert Healing Elixir", "Primary", 2, "Moonveil Orchid"),
    ("Expert Healing Elixir", "Secondary", 1, "Tidecall Kelp"),
    ("Expert Healing Elixir", "Temperature", 1, "Ashen Thistle"),
    ("Divine Heart Elixir", "Primary", 2, "Phoenix Feather Grass"),
    ("Divine Heart Elixir", "Secondary", 1, "Sunforge Root"),
    ("Divine Heart Elixir", "Temperature", 1, "Eternal Frost Lily"),
];

/// (elixir, grade, value, effect)
const ELIXIRS: &[(&str, u8, u64, &str)] = &[
    ("Azure Heart Elixir", 1, 90, "Restores a little qi"),
    ("Bright Heart Elixir", 2, 400, "Clears the mind"),
    ("Greater Healing Elixir", 3, 2600, "Heals moderate wounds"),
    ("Expert Healing Elixir", 4, 20000, "Heals grievous wounds"),
];

/// Replace the catalog with the sample data set
pub fn load_sample_data(conn: &Connection) -> Result<()> {
    db::clear_catalog(conn)?;

    for (name, grade, primary, secondary, temperature) in HERBS {
        db::upsert_ingredient(
            conn,
            &Ingredient {
                name: name.to_string(),
                grade: *grade,
                primary: primary.to_string(),
                secondary: secondary.to_string(),
                temperature: temperature.to_string(),
            },
        )?;
    }

    for (recipe, slot, quantity, herb) in RECIPE_SLOTS {
        db::insert_recipe_slot(
            conn,
            &RecipeSlotRow {
                recipe_name: recipe.to_string(),
                slot: slot.to_string(),
                quantity: *quantity,
                ingredient_name: herb.to_string(),
            },
        )?;
    }

    for (name, grade, value, effect) in ELIXIRS {
        db::upsert_elixir(
            conn,
            &ElixirInfo {
                name: name.to_string(),
                grade: *grade,
                value: *value,
                effect: effect.to_string(),
            },
        )?;
    }

    info!(
        "Loaded {} sample herbs and {} sample elixirs",
        HERBS.len(),
        ELIXIRS.len()
    );
    Ok(())
}
