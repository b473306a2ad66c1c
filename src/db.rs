//! Database schema and operations

use anyhow::Result;
use rusqlite::Connection;

use crate::models::{ElixirInfo, Ingredient, RecipeSlotRow};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Herbs and their categorical properties
        CREATE TABLE IF NOT EXISTS ingredients (
            name TEXT PRIMARY KEY,
            grade INTEGER NOT NULL,
            primary_property TEXT NOT NULL,
            secondary_property TEXT NOT NULL,
            temperature TEXT NOT NULL
        );

        -- One row per filled slot of a base recipe
        CREATE TABLE IF NOT EXISTS recipe_slots (
            recipe_name TEXT NOT NULL,
            slot TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            ingredient_name TEXT NOT NULL,
            PRIMARY KEY (recipe_name, slot)
        );

        -- Market data for finished elixirs
        CREATE TABLE IF NOT EXISTS elixirs (
            name TEXT PRIMARY KEY,
            grade INTEGER NOT NULL,
            value INTEGER NOT NULL,
            effect TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_ingredients_grade ON ingredients(grade);
        "#,
    )?;
    Ok(())
}

/// Insert or replace a herb
pub fn upsert_ingredient(conn: &Connection, ingredient: &Ingredient) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO ingredients (name, grade, primary_property, secondary_property, temperature)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            &ingredient.name,
            ingredient.grade,
            &ingredient.primary,
            &ingredient.secondary,
            &ingredient.temperature,
        ),
    )?;
    Ok(())
}

/// Insert or replace one slot of a base recipe
pub fn insert_recipe_slot(conn: &Connection, row: &RecipeSlotRow) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO recipe_slots (recipe_name, slot, quantity, ingredient_name)
         VALUES (?1, ?2, ?3, ?4)",
        (&row.recipe_name, &row.slot, row.quantity, &row.ingredient_name),
    )?;
    Ok(())
}

/// Insert or replace elixir market data
pub fn upsert_elixir(conn: &Connection, elixir: &ElixirInfo) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO elixirs (name, grade, value, effect)
         VALUES (?1, ?2, ?3, ?4)",
        (&elixir.name, elixir.grade, elixir.value, &elixir.effect),
    )?;
    Ok(())
}

/// Clear all catalog data (for reloading)
pub fn clear_catalog(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM elixirs;
        DELETE FROM recipe_slots;
        DELETE FROM ingredients;
        "#,
    )?;
    Ok(())
}

/// List all herbs, lowest grade first
pub fn list_ingredients(conn: &Connection) -> Result<Vec<Ingredient>> {
    let mut stmt = conn.prepare(
        "SELECT name, grade, primary_property, secondary_property, temperature
         FROM ingredients ORDER BY grade, name",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Ingredient {
            name: row.get(0)?,
            grade: row.get(1)?,
            primary: row.get(2)?,
            secondary: row.get(3)?,
            temperature: row.get(4)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// List every stored recipe slot
pub fn list_recipe_slots(conn: &Connection) -> Result<Vec<RecipeSlotRow>> {
    let mut stmt = conn.prepare(
        "SELECT recipe_name, slot, quantity, ingredient_name
         FROM recipe_slots ORDER BY recipe_name, slot",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(RecipeSlotRow {
            recipe_name: row.get(0)?,
            slot: row.get(1)?,
            quantity: row.get(2)?,
            ingredient_name: row.get(3)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// List all elixirs with market data
pub fn list_elixirs(conn: &Connection) -> Result<Vec<ElixirInfo>> {
    let mut stmt = conn.prepare("SELECT name, grade, value, effect FROM elixirs ORDER BY name")?;

    let rows = stmt.query_map([], |row| {
        Ok(ElixirInfo {
            name: row.get(0)?,
            grade: row.get(1)?,
            value: row.get(2)?,
            effect: row.get(3)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// List the names of all stored recipes
pub fn list_recipe_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT DISTINCT recipe_name FROM recipe_slots ORDER BY recipe_name")?;

    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}
