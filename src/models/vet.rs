//! Veterinarians and their specialties.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Specialty {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Vet {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sqlx(skip)]
    pub specialties: Vec<Specialty>,
}

/// Join row linking a vet to one of its specialties.
#[derive(Debug, FromRow)]
pub struct VetSpecialtyRow {
    pub vet_id: Uuid,
    pub id: Uuid,
    pub name: String,
}
