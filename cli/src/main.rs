use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use skillet_core::timing::format_minutes;
use skillet_core::{parse_feed, Catalog, CookingSession, CuratedRecipe};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skillet")]
#[command(about = "Skillet CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the recipes in a curated feed file
    List {
        /// Path to the feed JSON file
        feed: PathBuf,
    },
    /// Show one recipe with timing, ingredients, and nutrition
    Show {
        /// Path to the feed JSON file
        feed: PathBuf,
        /// Recipe id within the feed
        id: String,
    },
    /// Cook through a recipe's steps, printing progress after each
    Cook {
        /// Path to the feed JSON file
        feed: PathBuf,
        /// Recipe id within the feed
        id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { feed } => {
            let catalog = load_catalog(&feed)?;
            list(&catalog);
        }
        Commands::Show { feed, id } => {
            let catalog = load_catalog(&feed)?;
            show(find(&catalog, &id)?);
        }
        Commands::Cook { feed, id } => {
            let catalog = load_catalog(&feed)?;
            cook(find(&catalog, &id)?)?;
        }
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read feed file {}", path.display()))?;
    let outcome = parse_feed(&json).context("Failed to parse feed")?;

    for failure in &outcome.failures {
        eprintln!(
            "warning: skipped record {} ({}): {}",
            failure.index,
            failure.id.as_deref().unwrap_or("no id"),
            failure.error
        );
    }

    Ok(Catalog::from_records(outcome.recipes))
}

fn find<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a CuratedRecipe> {
    match catalog.get(id) {
        Some(recipe) => Ok(recipe),
        None => bail!("No recipe with id \"{}\" in the feed", id),
    }
}

fn list(catalog: &Catalog) {
    for curated in catalog.iter() {
        let lock = if curated.is_locked { " [locked]" } else { "" };
        let per_serving = curated.total_nutrition().calories / f64::from(curated.servings.max(1));
        println!(
            "{:<30} {:<12} {:<8} {:>4.0} cal/serving{}",
            curated.name, curated.category, curated.difficulty, per_serving, lock
        );
    }
}

fn show(curated: &CuratedRecipe) {
    println!("{} ({})", curated.name, curated.category);
    println!("{}", curated.description);
    println!();
    println!(
        "Serves {} | Difficulty: {} | Rating: {:.1}",
        curated.servings, curated.difficulty, curated.rating
    );
    println!(
        "Prep: {} | Cook: {} | Rest: {}",
        format_minutes(curated.prep_time),
        format_minutes(curated.cook_time),
        format_minutes(curated.rest_time)
    );
    println!();

    println!("Ingredients:");
    for ingredient in &curated.ingredients {
        println!(
            "  {} ({} {})",
            ingredient.name, ingredient.serving_size, ingredient.unit
        );
    }
    println!();

    println!("Steps:");
    for step in &curated.steps {
        println!("  {}. {}", step.step_number, step.instruction);
    }
    println!();

    let per_serving = curated
        .total_nutrition()
        .scaled(1.0 / f64::from(curated.servings.max(1)));
    println!("Per serving: {}", per_serving.summary());
}

fn cook(curated: &CuratedRecipe) -> Result<()> {
    let mut recipe = curated.to_editable_recipe()?;
    println!("Cooking: {}\n", recipe.name);

    let mut session = CookingSession::resume(&recipe);
    while let Some(step) = session.current_step(&recipe) {
        if step.is_completed() {
            break;
        }
        println!("Step {}: {}", step.step_number, step.instruction);
        session.complete_current(&mut recipe);
        println!("  progress: {:.0}%", recipe.cooking_progress() * 100.0);
    }

    recipe.mark_completed();
    if let Some(cooked_at) = recipe.last_cooked() {
        println!("\nRecipe complete! Cooked at {}", cooked_at.to_rfc3339());
    }
    Ok(())
}
