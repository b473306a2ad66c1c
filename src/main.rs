//! Alchemy Variant Generator
//!
//! Finds alternative herb recipes for an elixir by swapping herbs within a
//! grade, across grades, and by splitting slots.

mod balance;
mod catalog;
mod config;
mod db;
mod error;
mod explorer;
mod minimality;
mod models;
mod operators;
mod pricing;
mod sample;
#[cfg(test)]
mod testutil;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::explorer::{EveryCandidate, Explorer};

#[derive(Parser)]
#[command(name = "alchemy-variants")]
#[command(about = "Alternative recipe generator for alchemy elixirs")]
struct Cli {
    /// Path to the SQLite database
    #[arg(short, long, env = "ALCHEMY_DB", default_value = "alchemy.db")]
    database: PathBuf,

    /// JSON file overriding catalog and search settings
    #[arg(short, long, env = "ALCHEMY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every alternative recipe for an elixir
    Variants {
        /// Elixir name (e.g., "Greater Healing Elixir")
        name: String,

        /// Furnace capacity (maximum total herbs)
        #[arg(short = 'n', long, default_value = "14")]
        capacity: u32,

        /// Drop recipes whose split slots make no difference
        #[arg(short, long)]
        minimal: bool,

        /// Only show the recipes tied at the lowest cost
        #[arg(long)]
        cheapest: bool,

        /// Expand every candidate instead of the first per slot (slow)
        #[arg(long)]
        exhaustive: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the base recipe for an elixir
    Show {
        /// Elixir name
        name: String,
    },

    /// List all recipes in the database
    ListRecipes,

    /// List herbs, optionally filtered by grade and property
    ListIngredients {
        #[arg(short, long)]
        grade: Option<u8>,

        #[arg(short, long)]
        property: Option<String>,
    },

    /// Initialize empty database with schema
    Init,

    /// Load sample data for testing (without a full catalog)
    LoadSample,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let conn = Connection::open(&cli.database)?;
    db::init_schema(&conn)?;

    match cli.command {
        Commands::Variants {
            name,
            capacity,
            minimal,
            cheapest,
            exhaustive,
            json,
        } => {
            let catalog = Catalog::load(&conn, &config.catalog)?;
            let mut explorer = if exhaustive {
                Explorer::with_policy(&catalog, config.search.clone(), Box::new(EveryCandidate))
            } else {
                Explorer::new(&catalog, config.search.clone())
            };

            info!("Generating variants for {} (capacity {})", name, capacity);
            let mut recipes = explorer.generate_all(&name, capacity)?;
            if minimal {
                recipes = minimality::only_minimal(recipes);
            }
            if cheapest {
                recipes = pricing::cheapest(&recipes);
            }

            let elixir = catalog.elixir_info(&name);
            let described = pricing::describe_ranked(recipes, elixir);

            if json {
                println!("{}", serde_json::to_string_pretty(&described)?);
            } else {
                if let Some(e) = elixir {
                    println!("{} (T{}, value {}): {}", e.name, e.grade, e.value, e.effect);
                }
                println!("{} recipes\n", described.len());
                for d in &described {
                    let slots: Vec<String> = d
                        .slots
                        .iter()
                        .map(|s| {
                            format!("{}: {}x {} ({})", s.slot, s.quantity, s.ingredient, s.grade)
                        })
                        .collect();
                    let profit = d.profit.map(|p| format!("\tProfit: {}", p)).unwrap_or_default();
                    println!("Price: {}{}\t{}", d.cost, profit, slots.join("\t"));
                }
            }
        }

        Commands::Show { name } => {
            let catalog = Catalog::load(&conn, &config.catalog)?;
            let recipe = catalog.base_recipe(&name)?;
            println!("{}", recipe.name);
            println!("  Needs temperature: {}", balance::balancing_property(&recipe));
            println!("  Price: {}", pricing::cost(&recipe));
            for (slot, entry) in recipe.entries() {
                println!(
                    "  {:<12} {:>3}x {} (T{}, {}, {})",
                    slot.label(),
                    entry.quantity,
                    entry.ingredient.name,
                    entry.ingredient.grade,
                    entry.ingredient.property_for(slot),
                    entry.ingredient.temperature
                );
            }
        }

        Commands::ListRecipes => {
            let names = db::list_recipe_names(&conn)?;
            if names.is_empty() {
                println!("No recipes in database. Run 'load-sample' first.");
            } else {
                println!("Recipes:");
                for name in names {
                    println!("  {}", name);
                }
            }
        }

        Commands::ListIngredients { grade, property } => {
            let catalog = Catalog::load(&conn, &config.catalog)?;
            let herbs: Vec<_> = match (grade, &property) {
                (Some(g), Some(p)) => catalog.ingredients_where(g, p),
                _ => catalog
                    .ingredients()
                    .iter()
                    .filter(|h| grade.is_none_or(|g| h.grade == g))
                    .filter(|h| property.as_deref().is_none_or(|p| h.has_property(p)))
                    .cloned()
                    .collect(),
            };

            if herbs.is_empty() {
                println!("No matching herbs. Run 'load-sample' first.");
            } else {
                println!(
                    "{:<24} {:>5} {:<14} {:<14} {:<10}",
                    "Herb", "Grade", "Primary", "Secondary", "Temp"
                );
                println!("{}", "-".repeat(71));
                for h in herbs {
                    println!(
                        "{:<24} {:>5} {:<14} {:<14} {:<10}",
                        h.name, h.grade, h.primary, h.secondary, h.temperature
                    );
                }
            }
        }

        Commands::Init => {
            println!("Database initialized at: {}", cli.database.display());
        }

        Commands::LoadSample => {
            sample::load_sample_data(&conn)?;
            println!("Sample data loaded successfully!");
        }
    }

    Ok(())
}
