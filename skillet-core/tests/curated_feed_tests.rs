//! Feed decoding and conversion tests over JSON fixtures.
//!
//! Fixtures live in `tests/fixtures/` and model the shipped curated content.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use skillet_core::{parse_feed, Catalog, ConvertError, Difficulty};

fn load_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

#[test]
fn test_feed_decodes_all_records() {
    let outcome = parse_feed(&load_fixture("feed.json")).unwrap();
    assert_eq!(outcome.recipes.len(), 3);
    assert!(outcome.failures.is_empty());
}

#[test]
fn test_malformed_record_does_not_abort_batch() {
    let outcome = parse_feed(&load_fixture("feed_with_bad_record.json")).unwrap();

    assert_eq!(outcome.recipes.len(), 2);
    assert_eq!(outcome.failures.len(), 1);

    let failure = &outcome.failures[0];
    assert_eq!(failure.index, 1);
    assert_eq!(failure.id.as_deref(), Some("mediterranean_quinoa_bowl"));

    let names: Vec<&str> = outcome.recipes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Chocolate Lava Cake", "Green Smoothie"]);
}

#[test]
fn test_catalog_queries_over_fixture_feed() {
    let outcome = parse_feed(&load_fixture("feed.json")).unwrap();
    let catalog = Catalog::from_records(outcome.recipes);

    let names: Vec<&str> = catalog.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Artisan Sourdough Bread",
            "Gourmet Salmon Teriyaki",
            "Truffle Mushroom Risotto"
        ]
    );

    assert_eq!(catalog.in_category("dinner").len(), 2);
    assert_eq!(catalog.locked().len(), 1);
    assert_eq!(catalog.locked()[0].id, "truffle_mushroom_risotto");
    assert_eq!(catalog.unlocked().len(), 2);
}

#[test]
fn test_missing_optional_fields_default() {
    let outcome = parse_feed(&load_fixture("feed.json")).unwrap();
    let catalog = Catalog::from_records(outcome.recipes);

    let sourdough = catalog.get("artisan_sourdough_bread").unwrap();
    let salt = &sourdough.ingredients[2];
    assert_eq!(salt.macros.calories, 0.0);
    assert_eq!(salt.macros.sodium, 3875.0);

    let risotto = catalog.get("truffle_mushroom_risotto").unwrap();
    assert_eq!(risotto.rest_time, None);
    assert_eq!(sourdough.ingredients[1].category, None);
}

#[test]
fn test_conversion_preserves_nutrition_totals() {
    let outcome = parse_feed(&load_fixture("feed.json")).unwrap();
    let catalog = Catalog::from_records(outcome.recipes);

    let curated = catalog.get("gourmet_salmon_teriyaki").unwrap();
    let recipe = curated.to_editable_recipe().unwrap();

    let source = curated.total_nutrition();
    let converted = recipe.total_nutrition();
    assert!((converted.calories - source.calories).abs() < 1e-9);
    assert!((converted.protein - source.protein).abs() < 1e-9);
    assert!((converted.sodium - source.sodium).abs() < 1e-9);
    assert!((converted.sugar - source.sugar).abs() < 1e-9);

    // Per-serving at the curated servings count.
    let per = recipe.nutrition_per_serving().unwrap();
    assert!((per.calories * recipe.servings() as f64 - source.calories).abs() < 1e-9);
}

#[test]
fn test_conversion_copies_timing_and_metadata() {
    let outcome = parse_feed(&load_fixture("feed.json")).unwrap();
    let catalog = Catalog::from_records(outcome.recipes);

    let recipe = catalog
        .get("artisan_sourdough_bread")
        .unwrap()
        .to_editable_recipe()
        .unwrap();

    assert_eq!(recipe.servings(), 8);
    assert_eq!(recipe.difficulty, Difficulty::Hard);
    assert_eq!(recipe.category, "Bakery");
    assert_eq!(recipe.prep_time, Some(Duration::from_secs(1800)));
    assert_eq!(recipe.rest_time, Some(Duration::from_secs(7200)));
    assert_eq!(recipe.prep_time_formatted(), "30 min");
    assert_eq!(recipe.steps().len(), 4);
    assert_eq!(recipe.ordered_steps()[0].instruction, "Mix flour and water and rest for the autolyse");
    assert_eq!(
        recipe.ingredients()[0].category.as_deref(),
        Some("Baking")
    );
}

#[test]
fn test_locked_recipe_refuses_conversion() {
    let outcome = parse_feed(&load_fixture("feed.json")).unwrap();
    let catalog = Catalog::from_records(outcome.recipes);

    let locked = catalog.get("truffle_mushroom_risotto").unwrap();
    match locked.to_editable_recipe() {
        Err(ConvertError::Locked(name)) => assert_eq!(name, "Truffle Mushroom Risotto"),
        Ok(_) => panic!("locked recipe must not convert"),
        Err(e) => panic!("unexpected error: {}", e),
    }
}

#[test]
fn test_cooking_a_conversion_leaves_curated_record_untouched() {
    let outcome = parse_feed(&load_fixture("feed.json")).unwrap();
    let catalog = Catalog::from_records(outcome.recipes);

    let curated = catalog.get("gourmet_salmon_teriyaki").unwrap();
    let before = curated.total_nutrition();

    let mut recipe = curated.to_editable_recipe().unwrap();
    recipe.mark_completed();
    let first = recipe.ingredients()[0].id();
    recipe.remove_ingredient(first).unwrap();
    recipe.set_steps_from_text("Do something else entirely");

    assert_eq!(curated.ingredients.len(), 4);
    assert_eq!(curated.steps.len(), 4);
    assert_eq!(curated.total_nutrition().calories, before.calories);
}
