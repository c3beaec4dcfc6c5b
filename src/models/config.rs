use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::profile::Gender;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// User assumed when `--user` is not given.
    pub default_user: Option<String>,
    #[serde(default)]
    pub nutrients: NutrientCodes,
    /// Extra or overriding BMR coefficient rows, keyed by gender tag.
    #[serde(default)]
    pub bmr: BTreeMap<String, BmrCoefficients>,
}

/// Nutrient codes used as keys in a meal log's `nutrients` map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutrientCodes {
    #[serde(default = "default_calories_code")]
    pub calories: String,
    #[serde(default = "default_carbohydrates_code")]
    pub carbohydrates: String,
    #[serde(default = "default_protein_code")]
    pub protein: String,
    #[serde(default = "default_fat_code")]
    pub fat: String,
}

fn default_calories_code() -> String {
    "NUTR_CONT1".to_string()
}
fn default_carbohydrates_code() -> String {
    "NUTR_CONT2".to_string()
}
fn default_protein_code() -> String {
    "NUTR_CONT3".to_string()
}
fn default_fat_code() -> String {
    "NUTR_CONT4".to_string()
}

impl Default for NutrientCodes {
    fn default() -> Self {
        Self {
            calories: default_calories_code(),
            carbohydrates: default_carbohydrates_code(),
            protein: default_protein_code(),
            fat: default_fat_code(),
        }
    }
}

impl NutrientCodes {
    /// Resolve a friendly nutrient name to its code; unknown names pass through.
    pub fn resolve(&self, name: &str) -> String {
        match name.trim().to_lowercase().as_str() {
            "calories" | "kcal" | "energy" => self.calories.clone(),
            "carbohydrates" | "carbs" | "carb" => self.carbohydrates.clone(),
            "protein" | "proteins" => self.protein.clone(),
            "fat" | "fats" => self.fat.clone(),
            _ => name.trim().to_string(),
        }
    }
}

/// One row of the BMR coefficient table:
/// `base + weight·kg + height·cm − age·years`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BmrCoefficients {
    pub base: f64,
    pub weight: f64,
    pub height: f64,
    pub age: f64,
}

impl BmrCoefficients {
    pub const MALE: Self = Self {
        base: 88.362,
        weight: 13.397,
        height: 4.799,
        age: 5.677,
    };

    pub const FEMALE: Self = Self {
        base: 447.593,
        weight: 9.247,
        height: 3.098,
        age: 4.330,
    };

    pub fn builtin(gender: &Gender) -> Option<Self> {
        match gender {
            Gender::Male => Some(Self::MALE),
            Gender::Female => Some(Self::FEMALE),
            Gender::Other(_) => None,
        }
    }
}

impl Config {
    /// Load config from the standard path, or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the standard path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        let contents = toml::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::fs::{self, OpenOptions};
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut options = OpenOptions::new();
            options.write(true).create(true).truncate(true).mode(0o600);
            let mut file = options.open(&path)?;
            file.write_all(contents.as_bytes())?;

            // An existing file keeps its old mode on open
            let mut perms = file.metadata()?.permissions();
            if perms.mode() & 0o777 != 0o600 {
                perms.set_mode(0o600);
                fs::set_permissions(&path, perms)?;
            }
        }
        #[cfg(not(unix))]
        {
            std::fs::write(&path, contents)?;
        }

        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Coefficient row for a gender: configured rows win over built-in ones.
    pub fn bmr_coefficients(&self, gender: &Gender) -> Option<BmrCoefficients> {
        self.bmr
            .get(&gender.to_string())
            .copied()
            .or_else(|| BmrCoefficients::builtin(gender))
    }

    /// The user a command acts for: the `--user` flag, else `default_user`.
    pub fn resolve_user(&self, flag: Option<&str>) -> Result<String, crate::error::NutritionError> {
        flag.or(self.default_user.as_deref())
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                crate::error::NutritionError::validation(
                    "user",
                    "no user given; pass --user or run `nutrilog config set default_user <name>`",
                )
            })
    }

    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("NUTRILOG_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".nutrilog")
    }

    pub fn path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    pub fn db_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }
}
