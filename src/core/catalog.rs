use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeSet;

use super::recommend::DietCategory;
use crate::models::{CandidateMeal, MealType};

pub const NO_SUITABLE_MEALS: &str = "no suitable meals found";

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MealSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving: Option<String>,
}

impl From<&CandidateMeal> for MealSummary {
    fn from(m: &CandidateMeal) -> Self {
        Self {
            id: m.id.clone(),
            name: m.name.clone(),
            calories: m.calories,
            serving: m.serving.clone(),
        }
    }
}

/// Suggestions for one meal type. An empty match is reported as `NoneSuitable`
/// rather than an empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum MealSuggestion {
    Meals(Vec<MealSummary>),
    NoneSuitable,
}

impl MealSuggestion {
    pub fn meals(&self) -> &[MealSummary] {
        match self {
            Self::Meals(m) => m,
            Self::NoneSuitable => &[],
        }
    }
}

impl Serialize for MealSuggestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Meals(m) => m.serialize(serializer),
            Self::NoneSuitable => serializer.serialize_str(NO_SUITABLE_MEALS),
        }
    }
}

/// One suggestion per canonical meal type, in breakfast..snack order.
#[derive(Debug, Clone, PartialEq)]
pub struct MealSuggestions(Vec<(MealType, MealSuggestion)>);

impl MealSuggestions {
    pub fn get(&self, meal_type: &MealType) -> Option<&MealSuggestion> {
        self.0.iter().find(|(t, _)| t == meal_type).map(|(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MealType, &MealSuggestion)> {
        self.0.iter().map(|(t, s)| (t, s))
    }
}

impl Serialize for MealSuggestions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (meal_type, suggestion) in &self.0 {
            map.serialize_entry(&meal_type.to_string(), suggestion)?;
        }
        map.end()
    }
}

/// Whether a candidate carries any of the user's allergens. Comparison is on
/// trimmed lowercase tags.
pub fn contains_allergen(meal: &CandidateMeal, allergies: &BTreeSet<String>) -> bool {
    meal.allergy_tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .any(|t| allergies.iter().any(|a| a.trim().to_lowercase() == t))
}

/// Pick catalog meals that fit the diet category and avoid every allergen.
pub fn recommend_meals(
    allergies: &BTreeSet<String>,
    category: DietCategory,
    catalog: &[CandidateMeal],
) -> MealSuggestions {
    let tag = category.tag();
    let per_type = MealType::CANONICAL
        .iter()
        .map(|meal_type| {
            let meals: Vec<MealSummary> = catalog
                .iter()
                .filter(|m| &m.meal_type == meal_type)
                .filter(|m| m.has_diet_type(tag))
                .filter(|m| !contains_allergen(m, allergies))
                .map(MealSummary::from)
                .collect();
            let suggestion = if meals.is_empty() {
                MealSuggestion::NoneSuitable
            } else {
                MealSuggestion::Meals(meals)
            };
            (meal_type.clone(), suggestion)
        })
        .collect();
    MealSuggestions(per_type)
}

/// Load candidate meals from a JSON array into the catalog. Allergen tags are
/// normalized on the way in; one bad entry rejects the whole array.
pub fn import<C: super::store::MealCatalog + ?Sized>(
    catalog: &C,
    json: &str,
) -> anyhow::Result<Vec<CandidateMeal>> {
    let mut meals: Vec<CandidateMeal> = serde_json::from_str(json)?;
    for meal in &mut meals {
        if meal.name.trim().is_empty() {
            anyhow::bail!("catalog entry {} has an empty name", meal.id);
        }
        meal.allergy_tags = crate::models::profile::normalize_tags(&meal.allergy_tags);
    }
    catalog.insert_candidates(&meals)?;
    tracing::info!(count = meals.len(), "catalog imported");
    Ok(meals)
}
