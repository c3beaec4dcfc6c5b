pub mod catalog;
pub mod config;
pub mod meal;
pub mod profile;

pub use catalog::CandidateMeal;
pub use meal::{MealLogEntry, MealLogUpdate, MealType, NewMealLog, Nutrients};
pub use profile::{DietGoal, Gender, HealthProfile, ProfileUpdate};
