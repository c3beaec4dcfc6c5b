mod common;

use nutrilog::core::aggregate::MergeAction;
use nutrilog::core::logging::{
    delete_meal_log, log_batch, log_meal, parse_nutrients, preview_meal, update_meal_log,
};
use nutrilog::core::query;
use nutrilog::core::store::LogStore;
use nutrilog::error::error_code;
use nutrilog::models::config::{Config, NutrientCodes};
use nutrilog::models::{MealLogUpdate, MealType};

// ── logging and merge ────────────────────────────────────────────────────────

#[test]
fn test_repeated_log_accumulates_quantity() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);

    let first = log_meal(&db, common::meal("lunch", "salad", 1, today), today).unwrap();
    let second = log_meal(&db, common::meal("lunch", "salad", 2, today), today).unwrap();

    assert!(!first.merged);
    assert!(second.merged);
    assert_eq!(second.entry.id, first.entry.id);
    assert_eq!(second.entry.quantity, 3);

    let rows = db.fetch_entries("alice").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity, 3);
}

#[test]
fn test_log_defaults_date_to_reference_day() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);
    let mut candidate = common::meal("dinner", "soup", 1, today);
    candidate.date = None;

    let logged = log_meal(&db, candidate, today).unwrap();
    assert_eq!(logged.entry.date, today);
}

#[test]
fn test_merge_keeps_first_nutrients() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);
    log_meal(
        &db,
        common::meal("lunch", "rice", 1, today).with_nutrient("NUTR_CONT1", "200"),
        today,
    )
    .unwrap();
    let merged = log_meal(
        &db,
        common::meal("lunch", "rice", 1, today).with_nutrient("NUTR_CONT1", "999"),
        today,
    )
    .unwrap();

    assert_eq!(merged.entry.nutrients["NUTR_CONT1"], "200");
}

#[test]
fn test_distinct_keys_stay_separate() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);
    log_meal(&db, common::meal("lunch", "rice", 1, today), today).unwrap();
    log_meal(&db, common::meal("dinner", "rice", 1, today), today).unwrap();
    log_meal(&db, common::meal("lunch", "rice", 1, common::day(2026, 3, 9)), today).unwrap();

    assert_eq!(db.fetch_entries("alice").unwrap().len(), 3);
}

#[test]
fn test_log_rejects_zero_quantity_and_blank_description() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);

    let err = log_meal(&db, common::meal("lunch", "rice", 0, today), today).unwrap_err();
    assert_eq!(error_code(&err), "validation_error");
    let err = log_meal(&db, common::meal("lunch", "  ", 1, today), today).unwrap_err();
    assert_eq!(error_code(&err), "validation_error");
    assert!(db.fetch_entries("alice").unwrap().is_empty());
}

#[test]
fn test_preview_does_not_write() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);
    let candidate = common::meal("lunch", "salad", 2, today);

    assert!(matches!(
        preview_meal(&db, &candidate, today).unwrap(),
        MergeAction::Insert { .. }
    ));
    assert!(db.fetch_entries("alice").unwrap().is_empty());

    let stored = log_meal(&db, candidate.clone(), today).unwrap();
    assert_eq!(
        preview_meal(&db, &candidate, today).unwrap(),
        MergeAction::Increment {
            id: stored.entry.id,
            by: 2
        }
    );
}

#[test]
fn test_log_batch_uses_fallback_user_and_merges() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);
    let batch = r#"[
        {"meal_type": "breakfast", "description": "oats", "nutrients": {"NUTR_CONT1": 350}},
        {"meal_type": "breakfast", "description": "oats", "quantity": 2},
        {"meal_type": "snack", "description": "apple", "username": "bob", "date": "2026-03-09"}
    ]"#;

    let logged = log_batch(&db, "alice", batch, today).unwrap();
    assert_eq!(logged.len(), 3);
    assert!(logged[1].merged);

    let alice = db.fetch_entries("alice").unwrap();
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].quantity, 3);
    assert_eq!(alice[0].nutrients["NUTR_CONT1"], "350");

    let bob = db.fetch_entries("bob").unwrap();
    assert_eq!(bob[0].date, common::day(2026, 3, 9));
}

#[test]
fn test_log_batch_requires_description() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);
    assert!(log_batch(&db, "alice", r#"[{"meal_type": "lunch"}]"#, today).is_err());
}

// ── update and delete ────────────────────────────────────────────────────────

#[test]
fn test_update_overwrites_only_supplied_fields() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);
    let logged = log_meal(
        &db,
        common::meal("lunch", "rice", 1, today).with_nutrient("NUTR_CONT1", "200"),
        today,
    )
    .unwrap();

    let update = MealLogUpdate {
        quantity: Some(4),
        meal_type: Some(MealType::Dinner),
        ..Default::default()
    };
    let updated = update_meal_log(&db, logged.entry.id, &update).unwrap();

    assert_eq!(updated.quantity, 4);
    assert_eq!(updated.meal_type, MealType::Dinner);
    assert_eq!(updated.description, "rice");
    assert_eq!(updated.nutrients["NUTR_CONT1"], "200");
    assert_eq!(db.get_entry(logged.entry.id).unwrap().unwrap(), updated);
}

#[test]
fn test_update_unknown_id_is_not_found() {
    let (_dir, db) = common::setup_db();
    let update = MealLogUpdate {
        quantity: Some(2),
        ..Default::default()
    };
    let err = update_meal_log(&db, 42, &update).unwrap_err();
    assert_eq!(error_code(&err), "not_found");
}

#[test]
fn test_update_into_existing_key_is_rejected() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);
    log_meal(&db, common::meal("lunch", "rice", 1, today), today).unwrap();
    let other = log_meal(&db, common::meal("dinner", "rice", 1, today), today).unwrap();

    let update = MealLogUpdate {
        meal_type: Some(MealType::Lunch),
        ..Default::default()
    };
    let err = update_meal_log(&db, other.entry.id, &update).unwrap_err();
    assert!(err.to_string().contains("would duplicate"));
}

#[test]
fn test_delete_then_delete_again() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);
    let logged = log_meal(&db, common::meal("lunch", "rice", 1, today), today).unwrap();

    delete_meal_log(&db, logged.entry.id).unwrap();
    assert!(db.get_entry(logged.entry.id).unwrap().is_none());
    let err = delete_meal_log(&db, logged.entry.id).unwrap_err();
    assert_eq!(error_code(&err), "not_found");
}

// ── queries ──────────────────────────────────────────────────────────────────

#[test]
fn test_range_fetch_is_inclusive_and_per_user() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);
    for d in 7..=11 {
        log_meal(&db, common::meal("lunch", "rice", 1, common::day(2026, 3, d)), today).unwrap();
    }
    let mut bob = common::meal("lunch", "rice", 1, common::day(2026, 3, 9));
    bob.username = "bob".into();
    log_meal(&db, bob, today).unwrap();

    let rows = db
        .fetch_entries_in_range("alice", common::day(2026, 3, 8), common::day(2026, 3, 10))
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|e| e.username == "alice"));
}

#[test]
fn test_day_totals_and_weekly_from_store() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let today = common::day(2026, 3, 10);
    log_meal(
        &db,
        common::meal("lunch", "rice", 2, today)
            .with_nutrient("NUTR_CONT1", "210.7")
            .with_nutrient("NUTR_CONT3", "4"),
        today,
    )
    .unwrap();
    log_meal(
        &db,
        common::meal("dinner", "pasta", 1, common::day(2026, 3, 1)).with_nutrient("NUTR_CONT1", "650"),
        today,
    )
    .unwrap();

    let t = query::day_totals(&db, &config, "alice", today).unwrap();
    assert_eq!(t.entries, 1);
    assert_eq!(t.totals.calories, 420);
    assert_eq!(t.totals.protein, 8);

    let w = query::weekly(&db, &config, "alice", today).unwrap();
    assert_eq!(w.recent_total(), 420);
    assert_eq!(w.previous_total(), 650);
}

#[test]
fn test_malformed_stored_value_surfaces_as_data_integrity() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);
    log_meal(
        &db,
        common::meal("lunch", "mystery", 1, today).with_nutrient("NUTR_CONT1", "about 300"),
        today,
    )
    .unwrap();

    let err = query::day_totals(&db, &Config::default(), "alice", today).unwrap_err();
    assert_eq!(error_code(&err), "data_integrity");
}

#[test]
fn test_grouped_view_from_store() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);
    log_meal(&db, common::meal("brunch", "waffles", 1, today), today).unwrap();

    let view = query::grouped(&db, "alice").unwrap();
    let day = &view[&today];
    assert_eq!(day.len(), 5);
    assert_eq!(day.get(&"brunch".parse().unwrap()).unwrap()[0].description, "waffles");
}

// ── nutrient arguments ───────────────────────────────────────────────────────

#[test]
fn test_parse_nutrients_resolves_friendly_names() {
    let codes = NutrientCodes::default();
    let args = vec!["calories=250".to_string(), "NUTR_CONT9 = 1.5".to_string()];
    let n = parse_nutrients(&args, &codes).unwrap();
    assert_eq!(n["NUTR_CONT1"], "250");
    assert_eq!(n["NUTR_CONT9"], "1.5");
}

#[test]
fn test_parse_nutrients_rejects_malformed() {
    let codes = NutrientCodes::default();
    assert!(parse_nutrients(&["calories".to_string()], &codes).is_err());
    let err = parse_nutrients(&["fat=lots".to_string()], &codes).unwrap_err();
    assert_eq!(error_code(&err), "validation_error");
}

#[test]
fn test_merge_past_quantity_limit_is_rejected_and_rolled_back() {
    let (_dir, db) = common::setup_db();
    let today = common::day(2026, 3, 10);
    log_meal(&db, common::meal("lunch", "rice", u32::MAX, today), today).unwrap();

    let err = log_meal(&db, common::meal("lunch", "rice", 1, today), today).unwrap_err();
    assert_eq!(error_code(&err), "validation_error");

    let rows = db.fetch_entries("alice").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity, u32::MAX);
    assert_eq!(query::grouped(&db, "alice").unwrap().len(), 1);
}
