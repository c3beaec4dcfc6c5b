use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietGoal {
    LoseWeight,
    MaintainWeight,
    GainWeight,
}

impl DietGoal {
    /// Daily calorie adjustment applied on top of maintenance energy.
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            Self::LoseWeight => -500.0,
            Self::MaintainWeight => 0.0,
            Self::GainWeight => 500.0,
        }
    }
}

impl FromStr for DietGoal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "lose_weight" | "lose" => Ok(Self::LoseWeight),
            "maintain_weight" | "maintain" => Ok(Self::MaintainWeight),
            "gain_weight" | "gain" => Ok(Self::GainWeight),
            _ => anyhow::bail!(
                "invalid diet goal: {} (expected lose_weight/maintain_weight/gain_weight)",
                s
            ),
        }
    }
}

impl fmt::Display for DietGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoseWeight => write!(f, "lose_weight"),
            Self::MaintainWeight => write!(f, "maintain_weight"),
            Self::GainWeight => write!(f, "gain_weight"),
        }
    }
}

/// Open gender tag. BMR coefficients are looked up by its string form, so
/// new values only need a coefficient row, not a new formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Other(String),
}

impl FromStr for Gender {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Ok(match normalized.as_str() {
            "male" | "m" => Self::Male,
            "female" | "f" => Self::Female,
            _ => Self::Other(normalized),
        })
    }
}

impl From<String> for Gender {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(g) => g,
            Err(never) => match never {},
        }
    }
}

impl From<Gender> for String {
    fn from(g: Gender) -> Self {
        g.to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Lowercase, trim and drop empty allergen tags.
pub fn normalize_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub username: String,
    pub diet_goal: DietGoal,
    pub age: i32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_factor: f64,
    #[serde(default)]
    pub allergies: BTreeSet<String>,
    pub updated_at: DateTime<Utc>,
}

impl HealthProfile {
    pub fn new(
        username: &str,
        diet_goal: DietGoal,
        age: i32,
        gender: Gender,
        height_cm: f64,
        weight_kg: f64,
        activity_factor: f64,
    ) -> Self {
        Self {
            username: username.to_string(),
            diet_goal,
            age,
            gender,
            height_cm,
            weight_kg,
            activity_factor,
            allergies: BTreeSet::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn with_allergies<I, S>(mut self, allergies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allergies = normalize_tags(allergies);
        self
    }
}

/// Partial profile update; only supplied fields overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub diet_goal: Option<DietGoal>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_factor: Option<f64>,
    pub allergies: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn apply_to(&self, profile: &mut HealthProfile) {
        if let Some(g) = self.diet_goal {
            profile.diet_goal = g;
        }
        if let Some(a) = self.age {
            profile.age = a;
        }
        if let Some(ref g) = self.gender {
            profile.gender = g.clone();
        }
        if let Some(h) = self.height_cm {
            profile.height_cm = h;
        }
        if let Some(w) = self.weight_kg {
            profile.weight_kg = w;
        }
        if let Some(a) = self.activity_factor {
            profile.activity_factor = a;
        }
        if let Some(ref a) = self.allergies {
            profile.allergies = normalize_tags(a);
        }
        profile.updated_at = Utc::now();
    }
}
