//! Pet owners (clinic clients).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::not_blank;
use super::pet::Pet;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Owner {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,

    /// `None` when pets were not loaded with the owner.
    #[sqlx(skip)]
    pub pets: Option<Vec<Pet>>,
}

impl Owner {
    /// Pet with the given name, compared case-insensitively.
    pub fn pet_named(&self, name: &str) -> Option<&Pet> {
        let wanted = name.trim().to_lowercase();
        self.pets
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
    }

    pub fn pet(&self, id: Uuid) -> Option<&Pet> {
        self.pets
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|p| p.id == id)
    }
}

/// Create/update payload for an owner.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OwnerForm {
    #[validate(custom(function = "not_blank"), length(max = 30))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"), length(max = 30))]
    pub last_name: String,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub address: String,
    #[validate(custom(function = "not_blank"), length(max = 80))]
    pub city: String,
    #[validate(custom(function = "telephone_digits"))]
    pub telephone: String,
}

/// Telephone numbers are exactly ten ASCII digits.
fn telephone_digits(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    if value.len() != 10 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new("telephone"));
    }
    Ok(())
}

/// Search-result row for owner listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    /// Comma-separated pet names, sorted.
    pub pet_names: Option<String>,
}

/// Query parameters for owner search.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OwnerFilters {
    pub last_name: Option<String>,
}
