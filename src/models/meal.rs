use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// MealType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Other(String),
}

impl MealType {
    /// The four meal types every grouped day carries, in display order.
    pub const CANONICAL: [MealType; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    pub fn is_canonical(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl FromStr for MealType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Ok(match normalized.as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            "snack" => Self::Snack,
            _ => Self::Other(normalized),
        })
    }
}

impl From<String> for MealType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<MealType> for String {
    fn from(t: MealType) -> Self {
        t.to_string()
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Breakfast => write!(f, "breakfast"),
            Self::Lunch => write!(f, "lunch"),
            Self::Dinner => write!(f, "dinner"),
            Self::Snack => write!(f, "snack"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Meal log rows
// ---------------------------------------------------------------------------

/// Nutrient code -> numeric string, as delivered by the food database.
pub type Nutrients = BTreeMap<String, String>;

/// A stored meal-log row. One row per merge key
/// (username, date, meal_type, description).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealLogEntry {
    pub id: i64,
    pub username: String,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub description: String,
    pub quantity: u32,
    #[serde(default)]
    pub nutrients: Nutrients,
}

impl MealLogEntry {
    /// Whether this row carries the merge key of `candidate` on `date`.
    pub fn matches_key(&self, candidate: &NewMealLog, date: NaiveDate) -> bool {
        self.username == candidate.username
            && self.meal_type == candidate.meal_type
            && self.description == candidate.description
            && self.date == date
    }
}

/// A meal to be logged. `date` left unset means "the reference day".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMealLog {
    pub username: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub meal_type: MealType,
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub nutrients: Nutrients,
}

fn default_quantity() -> u32 {
    1
}

impl NewMealLog {
    pub fn new(username: &str, meal_type: MealType, description: &str, quantity: u32) -> Self {
        Self {
            username: username.to_string(),
            date: None,
            meal_type,
            description: description.to_string(),
            quantity,
            nutrients: Nutrients::new(),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_nutrient(mut self, code: &str, value: &str) -> Self {
        self.nutrients.insert(code.to_string(), value.to_string());
        self
    }

    /// The date this candidate lands on, given the reference day.
    pub fn resolved_date(&self, today: NaiveDate) -> NaiveDate {
        self.date.unwrap_or(today)
    }
}

/// Partial update of a meal-log row; only supplied fields overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealLogUpdate {
    pub meal_type: Option<MealType>,
    pub description: Option<String>,
    pub quantity: Option<u32>,
    pub nutrients: Option<Nutrients>,
    pub date: Option<NaiveDate>,
}

impl MealLogUpdate {
    pub fn is_empty(&self) -> bool {
        self.meal_type.is_none()
            && self.description.is_none()
            && self.quantity.is_none()
            && self.nutrients.is_none()
            && self.date.is_none()
    }

    pub fn apply_to(&self, entry: &mut MealLogEntry) {
        if let Some(ref t) = self.meal_type {
            entry.meal_type = t.clone();
        }
        if let Some(ref d) = self.description {
            entry.description = d.clone();
        }
        if let Some(q) = self.quantity {
            entry.quantity = q;
        }
        if let Some(ref n) = self.nutrients {
            entry.nutrients = n.clone();
        }
        if let Some(d) = self.date {
            entry.date = d;
        }
    }
}
