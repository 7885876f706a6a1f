//! Pets, pet types and the pet form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::visit::Visit;

/// Longest pet name the `pets.name` column holds, in characters.
pub const PET_NAME_MAX_LEN: usize = 30;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct PetType {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Pet {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub type_id: Option<Uuid>,
    pub type_name: Option<String>,
    pub has_image: bool,

    /// `None` when visits were not loaded with the pet.
    #[sqlx(skip)]
    pub visits: Option<Vec<Visit>>,
}

/// Raw pet form fields as submitted in a multipart request.
///
/// Everything stays textual until validation so that type and date
/// mismatches can be reported per field.
#[derive(Debug, Clone, Default)]
pub struct PetForm {
    pub name: Option<String>,
    pub pet_type: Option<String>,
    pub birth_date: Option<String>,
    pub image: Option<Vec<u8>>,
}

/// Pet form after validation, ready to persist.
#[derive(Debug, Clone)]
pub struct ValidPet {
    pub name: String,
    /// `None` keeps the current type on update.
    pub type_id: Option<Uuid>,
    pub birth_date: NaiveDate,
    /// `None` keeps the current image.
    pub image: Option<Vec<u8>>,
}
