use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "nutrilog", version, about = "Meal logging and nutrition recommendation CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Reference day used as "today" (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    /// User to act for (default: config default_user)
    #[arg(long, short = 'u', global = true)]
    pub user: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize config, data directory and optionally a health profile
    Init {
        /// Skip interactive profile setup
        #[arg(long)]
        skip: bool,
    },

    /// Log a meal; repeated logs of the same meal add up
    Log {
        /// Meal type (breakfast, lunch, dinner, snack, or any other label)
        #[arg(required_unless_present = "batch")]
        meal_type: Option<String>,

        /// Food description
        #[arg(required_unless_present = "batch")]
        description: Option<String>,

        /// Number of servings
        #[arg(long, short = 'q', default_value_t = 1)]
        quantity: u32,

        /// Nutrient value per serving as CODE=VALUE (repeatable)
        #[arg(long = "nutrient", short = 'n')]
        nutrients: Vec<String>,

        /// Calories per serving
        #[arg(long)]
        calories: Option<String>,

        /// Carbohydrates per serving (g)
        #[arg(long)]
        carbs: Option<String>,

        /// Protein per serving (g)
        #[arg(long)]
        protein: Option<String>,

        /// Fat per serving (g)
        #[arg(long)]
        fat: Option<String>,

        /// Batch JSON array of meals
        #[arg(long)]
        batch: Option<String>,

        /// Show what would be stored without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Change fields of a logged meal
    Update {
        /// Meal log id
        id: i64,

        #[arg(long)]
        meal_type: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, short = 'q')]
        quantity: Option<u32>,

        /// Replace nutrients with these CODE=VALUE pairs (repeatable)
        #[arg(long = "nutrient", short = 'n')]
        nutrients: Vec<String>,

        /// Move the meal to another day
        #[arg(long)]
        on: Option<NaiveDate>,
    },

    /// Delete a logged meal
    Delete {
        /// Meal log id
        id: i64,
    },

    /// Show logged meals grouped by date and meal type
    Show {
        /// List raw log rows instead of the grouped view
        #[arg(long)]
        raw: bool,
    },

    /// Nutrient totals for the reference day
    Totals,

    /// Calories of the last 7 days against the 7 days before
    Week,

    /// Calories per day over a date range
    Calories {
        #[arg(long)]
        from: NaiveDate,

        #[arg(long)]
        to: NaiveDate,
    },

    /// Manage the health profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Diet category, calorie budget, macros and meal suggestions
    Recommend,

    /// Manage the candidate meal catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the health profile
    Show,
    /// Create the health profile
    Set {
        /// lose_weight, maintain_weight or gain_weight
        #[arg(long)]
        goal: String,
        #[arg(long)]
        age: i32,
        #[arg(long)]
        gender: String,
        /// Height in cm
        #[arg(long)]
        height: f64,
        /// Weight in kg
        #[arg(long)]
        weight: f64,
        /// Activity multiplier, 1.2 (sedentary) to 1.9 (very active)
        #[arg(long, default_value_t = 1.2)]
        activity: f64,
        /// Comma-separated allergen tags
        #[arg(long)]
        allergies: Option<String>,
    },
    /// Update supplied fields of the health profile
    Update {
        #[arg(long)]
        goal: Option<String>,
        #[arg(long)]
        age: Option<i32>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        activity: Option<f64>,
        /// Comma-separated allergen tags (replaces the current set)
        #[arg(long)]
        allergies: Option<String>,
    },
    /// Delete the health profile
    Delete,
}

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Add a candidate meal
    Add {
        name: String,
        #[arg(long)]
        meal_type: String,
        /// Diet category tag, e.g. "medium-carb" (repeatable)
        #[arg(long = "diet", required = true)]
        diets: Vec<String>,
        /// Allergen tag (repeatable)
        #[arg(long = "allergen")]
        allergens: Vec<String>,
        #[arg(long)]
        calories: Option<f64>,
        #[arg(long)]
        serving: Option<String>,
    },
    /// List the catalog
    List,
    /// Import candidate meals from a JSON file
    Import {
        file: std::path::PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a config value
    Set {
        /// Config key (e.g. default_user, nutrients.calories, bmr.<gender>)
        key: String,
        /// Config value
        value: String,
    },
}

impl Commands {
    /// Name reported in the JSON envelope.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::Log { .. } => "log",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Show { .. } => "show",
            Self::Totals => "totals",
            Self::Week => "week",
            Self::Calories { .. } => "calories",
            Self::Profile { .. } => "profile",
            Self::Recommend => "recommend",
            Self::Catalog { .. } => "catalog",
            Self::Config { .. } => "config",
            Self::Completions { .. } => "completions",
        }
    }
}
