use crate::error::NutritionError;
use crate::models::HealthProfile;
use crate::models::config::BmrCoefficients;

/// Reject profiles whose numbers cannot feed the BMR/BMI formulas.
pub fn validate_profile(profile: &HealthProfile) -> Result<(), NutritionError> {
    if profile.username.trim().is_empty() {
        return Err(NutritionError::validation("username", "must not be empty"));
    }
    if !profile.height_cm.is_finite() || profile.height_cm <= 0.0 {
        return Err(NutritionError::validation(
            "height_cm",
            format!("must be positive, got {}", profile.height_cm),
        ));
    }
    if !profile.weight_kg.is_finite() || profile.weight_kg <= 0.0 {
        return Err(NutritionError::validation(
            "weight_kg",
            format!("must be positive, got {}", profile.weight_kg),
        ));
    }
    if profile.age < 0 {
        return Err(NutritionError::validation(
            "age",
            format!("must not be negative, got {}", profile.age),
        ));
    }
    if !profile.activity_factor.is_finite() || profile.activity_factor < 1.0 {
        return Err(NutritionError::validation(
            "activity_factor",
            format!("must be at least 1.0, got {}", profile.activity_factor),
        ));
    }
    Ok(())
}

/// Basal metabolic rate in kcal/day from one coefficient row.
pub fn bmr(profile: &HealthProfile, coefficients: &BmrCoefficients) -> Result<f64, NutritionError> {
    validate_profile(profile)?;
    Ok(coefficients.base + coefficients.weight * profile.weight_kg
        + coefficients.height * profile.height_cm
        - coefficients.age * f64::from(profile.age))
}

/// Body mass index: kg / m².
pub fn bmi(height_cm: f64, weight_kg: f64) -> Result<f64, NutritionError> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(NutritionError::validation(
            "height_cm",
            format!("must be positive, got {}", height_cm),
        ));
    }
    let h_m = height_cm / 100.0;
    Ok(weight_kg / (h_m * h_m))
}

pub fn profile_bmi(profile: &HealthProfile) -> Result<f64, NutritionError> {
    validate_profile(profile)?;
    bmi(profile.height_cm, profile.weight_kg)
}

/// Coefficient row for the profile's gender from `config`, or a validation
/// error naming the gender.
pub fn coefficients_for(
    profile: &HealthProfile,
    config: &crate::models::config::Config,
) -> Result<BmrCoefficients, NutritionError> {
    config.bmr_coefficients(&profile.gender).ok_or_else(|| {
        NutritionError::validation(
            "gender",
            format!(
                "no BMR coefficients configured for '{}' (add [bmr.{}] to config.toml)",
                profile.gender, profile.gender
            ),
        )
    })
}
