use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::meal::MealType;
use super::profile::normalize_tags;

/// A meal the recommender may suggest. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMeal {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    pub meal_type: MealType,
    #[serde(default)]
    pub diet_types: BTreeSet<String>,
    #[serde(default)]
    pub allergy_tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving: Option<String>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl CandidateMeal {
    pub fn new(name: &str, meal_type: MealType) -> Self {
        Self {
            id: new_id(),
            name: name.to_string(),
            meal_type,
            diet_types: BTreeSet::new(),
            allergy_tags: BTreeSet::new(),
            calories: None,
            serving: None,
        }
    }

    pub fn with_diet_type(mut self, diet_type: &str) -> Self {
        self.diet_types.insert(diet_type.trim().to_string());
        self
    }

    pub fn with_allergens<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allergy_tags.extend(normalize_tags(tags));
        self
    }

    pub fn has_diet_type(&self, diet_type: &str) -> bool {
        self.diet_types.contains(diet_type.trim())
    }
}
