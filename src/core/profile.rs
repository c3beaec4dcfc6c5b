use anyhow::{Result, bail};

use super::metrics::validate_profile;
use super::store::ProfileStore;
use crate::error::NutritionError;
use crate::models::{HealthProfile, ProfileUpdate};

/// Create a health profile. One profile per username.
pub fn create<P: ProfileStore + ?Sized>(store: &P, profile: HealthProfile) -> Result<HealthProfile> {
    validate_profile(&profile)?;
    if store.fetch_profile(&profile.username)?.is_some() {
        bail!(
            "health profile for '{}' already exists; use `profile update` instead",
            profile.username
        );
    }
    store.insert_profile(&profile)?;
    tracing::info!(username = %profile.username, "health profile created");
    Ok(profile)
}

pub fn get<P: ProfileStore + ?Sized>(store: &P, username: &str) -> Result<HealthProfile> {
    store
        .fetch_profile(username)?
        .ok_or_else(|| NutritionError::not_found("health profile", username).into())
}

/// Overwrite only the supplied fields, validating the result before saving.
pub fn update<P: ProfileStore + ?Sized>(
    store: &P,
    username: &str,
    update: &ProfileUpdate,
) -> Result<HealthProfile> {
    let mut profile = get(store, username)?;
    update.apply_to(&mut profile);
    validate_profile(&profile)?;
    store.save_profile(&profile)?;
    tracing::info!(username, "health profile updated");
    Ok(profile)
}

pub fn delete<P: ProfileStore + ?Sized>(store: &P, username: &str) -> Result<()> {
    if !store.delete_profile(username)? {
        return Err(NutritionError::not_found("health profile", username).into());
    }
    tracing::info!(username, "health profile deleted");
    Ok(())
}
