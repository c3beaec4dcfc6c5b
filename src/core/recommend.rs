use serde::{Serialize, Serializer};
use std::fmt;

use super::catalog::{MealSuggestions, recommend_meals};
use super::metrics::{bmr, profile_bmi};
use crate::error::NutritionError;
use crate::models::config::BmrCoefficients;
use crate::models::{CandidateMeal, DietGoal, HealthProfile};

const KCAL_PER_G_CARB: f64 = 4.0;
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Diet category chosen from goal and BMI. `tag()` is the coded form used to
/// match catalog diet types; `description()` is the explanation shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DietCategory {
    LowCarbHighFat,
    LowCarbHighProtein,
    MediumCarb,
    MediumCarbHighProtein,
    HighCalorieNutrientDense,
    HighCarbHighProtein,
    HighCarbHighCalorie,
}

impl DietCategory {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::LowCarbHighFat => "low-carb, high-fat",
            Self::LowCarbHighProtein => "low-carb, high-protein",
            Self::MediumCarb => "medium-carb",
            Self::MediumCarbHighProtein => "medium-carb, high-protein",
            Self::HighCalorieNutrientDense => "high-calorie, nutrient-dense",
            Self::HighCarbHighProtein => "high-carb, high-protein",
            Self::HighCarbHighCalorie => "high-carb, high-calorie",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::LowCarbHighFat => {
                "Cut carbohydrates sharply and get most energy from fats to drive steady fat loss."
            }
            Self::LowCarbHighProtein => {
                "Reduce carbohydrates and favour lean protein to lose weight while keeping muscle."
            }
            Self::MediumCarb => "Keep a balanced intake of carbohydrates, protein and fat.",
            Self::MediumCarbHighProtein => {
                "Keep carbohydrates moderate and raise protein to hold weight with better body composition."
            }
            Self::HighCalorieNutrientDense => {
                "Eat calorie-dense, nutrient-rich foods to reach a healthy weight."
            }
            Self::HighCarbHighProtein => {
                "Raise both carbohydrates and protein to build weight and muscle."
            }
            Self::HighCarbHighCalorie => {
                "Increase carbohydrates and total calories to gain weight steadily."
            }
        }
    }
}

impl fmt::Display for DietCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for DietCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// Goal × BMI decision table. Bounds are applied exactly as listed, so for
/// maintain/gain a BMI in [24.9, 25) falls through to medium-carb.
pub fn recommend_category(goal: DietGoal, bmi: f64) -> DietCategory {
    match goal {
        DietGoal::LoseWeight => {
            if bmi >= 30.0 {
                DietCategory::LowCarbHighFat
            } else if (25.0..30.0).contains(&bmi) {
                DietCategory::LowCarbHighProtein
            } else {
                DietCategory::MediumCarb
            }
        }
        DietGoal::MaintainWeight => {
            if bmi < 18.5 {
                DietCategory::HighCalorieNutrientDense
            } else if (18.5..24.9).contains(&bmi) {
                DietCategory::MediumCarb
            } else if (25.0..30.0).contains(&bmi) {
                DietCategory::MediumCarbHighProtein
            } else {
                DietCategory::MediumCarb
            }
        }
        DietGoal::GainWeight => {
            if bmi < 18.5 {
                DietCategory::HighCarbHighProtein
            } else if (18.5..24.9).contains(&bmi) {
                DietCategory::HighCarbHighCalorie
            } else {
                DietCategory::MediumCarb
            }
        }
    }
}

/// `round(bmr × activity_factor ± goal adjustment)`, rounded once at the end.
pub fn daily_calorie_budget(
    profile: &HealthProfile,
    coefficients: &BmrCoefficients,
) -> Result<i64, NutritionError> {
    let maintenance = bmr(profile, coefficients)? * profile.activity_factor;
    Ok((maintenance + profile.diet_goal.calorie_adjustment()).round() as i64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Macros {
    pub carbohydrates: i64,
    pub proteins: i64,
    pub fats: i64,
}

impl Macros {
    /// Calories implied by the gram amounts.
    pub fn calories(&self) -> i64 {
        4 * self.carbohydrates + 4 * self.proteins + 9 * self.fats
    }
}

/// (carb, protein, fat) calorie fractions per goal.
pub fn macro_ratios(goal: DietGoal) -> (f64, f64, f64) {
    match goal {
        DietGoal::LoseWeight => (0.40, 0.40, 0.20),
        DietGoal::GainWeight | DietGoal::MaintainWeight => (0.50, 0.25, 0.25),
    }
}

/// Split a calorie budget into grams. Each gram value is rounded on its own;
/// the drift this leaves against the budget is not corrected.
pub fn macro_split(daily_calories: i64, goal: DietGoal) -> Macros {
    let (carb, protein, fat) = macro_ratios(goal);
    let kcal = daily_calories as f64;
    Macros {
        carbohydrates: (kcal * carb / KCAL_PER_G_CARB).round() as i64,
        proteins: (kcal * protein / KCAL_PER_G_PROTEIN).round() as i64,
        fats: (kcal * fat / KCAL_PER_G_FAT).round() as i64,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub diet_category: DietCategory,
    pub description: &'static str,
    pub bmi: f64,
    pub daily_calories: i64,
    pub macros: Macros,
    pub meals: MealSuggestions,
}

/// Full recommendation bundle for a profile against a candidate catalog.
pub fn recommend(
    profile: &HealthProfile,
    coefficients: &BmrCoefficients,
    catalog: &[CandidateMeal],
) -> Result<Recommendation, NutritionError> {
    let bmi = profile_bmi(profile)?;
    let category = recommend_category(profile.diet_goal, bmi);
    let daily_calories = daily_calorie_budget(profile, coefficients)?;
    let macros = macro_split(daily_calories, profile.diet_goal);
    let meals = recommend_meals(&profile.allergies, category, catalog);

    Ok(Recommendation {
        diet_category: category,
        description: category.description(),
        bmi: (bmi * 10.0).round() / 10.0,
        daily_calories,
        macros,
        meals,
    })
}
