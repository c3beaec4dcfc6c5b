use thiserror::Error;

/// Typed outcomes of the nutrition engine.
///
/// Store and service layers return `anyhow::Result`; these travel inside
/// `anyhow::Error` and are recovered at the boundary with `downcast_ref`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NutritionError {
    #[error("{what} not found: {key}")]
    NotFound { what: &'static str, key: String },

    #[error("malformed nutrient value in meal log {entry_id}: {code} = {value:?}")]
    DataIntegrity {
        entry_id: i64,
        code: String,
        value: String,
    },

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

impl NutritionError {
    pub fn not_found(what: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            what,
            key: key.to_string(),
        }
    }

    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code used in the JSON error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::DataIntegrity { .. } => "data_integrity",
            Self::Validation { .. } => "validation_error",
        }
    }
}

/// Map any error to the envelope code, falling back to `general_error`.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<NutritionError>()
        .map(NutritionError::code)
        .unwrap_or("general_error")
}
