use nutrilog::models::config::{BmrCoefficients, Config, NutrientCodes};
use nutrilog::models::{DietGoal, Gender, MealType};

#[test]
fn test_default_nutrient_codes() {
    let codes = NutrientCodes::default();
    assert_eq!(codes.calories, "NUTR_CONT1");
    assert_eq!(codes.carbohydrates, "NUTR_CONT2");
    assert_eq!(codes.protein, "NUTR_CONT3");
    assert_eq!(codes.fat, "NUTR_CONT4");
    assert_eq!(codes.resolve("Carbs"), "NUTR_CONT2");
    assert_eq!(codes.resolve("NUTR_CONT7"), "NUTR_CONT7");
}

#[test]
fn test_config_toml_partial_sections() {
    let config: Config = toml::from_str(
        r#"
default_user = "alice"

[nutrients]
calories = "ENERC_KCAL"

[bmr.other]
base = 268.0
weight = 11.3
height = 3.95
age = 5.0
"#,
    )
    .unwrap();

    assert_eq!(config.default_user.as_deref(), Some("alice"));
    assert_eq!(config.nutrients.calories, "ENERC_KCAL");
    assert_eq!(config.nutrients.fat, "NUTR_CONT4");
    let other = config.bmr_coefficients(&"other".parse().unwrap()).unwrap();
    assert_eq!(other.base, 268.0);
    assert_eq!(config.bmr_coefficients(&Gender::Male), Some(BmrCoefficients::MALE));
}

#[test]
fn test_resolve_user_prefers_flag() {
    let mut config = Config::default();
    assert!(config.resolve_user(None).is_err());
    assert!(config.resolve_user(Some("  ")).is_err());

    config.default_user = Some("alice".into());
    assert_eq!(config.resolve_user(None).unwrap(), "alice");
    assert_eq!(config.resolve_user(Some("bob")).unwrap(), "bob");
}

#[test]
fn test_meal_type_parsing_is_open() {
    assert_eq!("Breakfast ".parse::<MealType>().unwrap(), MealType::Breakfast);
    let brunch: MealType = "brunch".parse().unwrap();
    assert!(!brunch.is_canonical());
    assert_eq!(brunch.to_string(), "brunch");
    assert_eq!(serde_json::to_string(&MealType::Snack).unwrap(), "\"snack\"");
}

#[test]
fn test_diet_goal_aliases() {
    assert_eq!("lose".parse::<DietGoal>().unwrap(), DietGoal::LoseWeight);
    assert_eq!("gain-weight".parse::<DietGoal>().unwrap(), DietGoal::GainWeight);
    assert_eq!("maintain_weight".parse::<DietGoal>().unwrap(), DietGoal::MaintainWeight);
    assert!("bulk".parse::<DietGoal>().is_err());
    assert_eq!(DietGoal::LoseWeight.calorie_adjustment(), -500.0);
}

#[test]
fn test_gender_open_tag() {
    assert_eq!("F".parse::<Gender>().unwrap(), Gender::Female);
    assert_eq!(
        "Nonbinary".parse::<Gender>().unwrap(),
        Gender::Other("nonbinary".into())
    );
}
