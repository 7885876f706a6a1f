//! Visit booking.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::visit::{Visit, VisitForm};

/// Book a visit for one of an owner's pets. A missing date means today.
pub async fn create(
    pool: &PgPool,
    owner_id: Uuid,
    pet_id: Uuid,
    form: &VisitForm,
    today: NaiveDate,
) -> Result<Visit, AppError> {
    form.validate()?;
    ensure_pet_of_owner(pool, owner_id, pet_id).await?;

    let visit = sqlx::query_as::<_, Visit>(
        r#"
        INSERT INTO visits (pet_id, visit_date, description)
        VALUES ($1, $2, $3)
        RETURNING id, pet_id, visit_date, description
        "#,
    )
    .bind(pet_id)
    .bind(form.date.unwrap_or(today))
    .bind(form.description.trim())
    .fetch_one(pool)
    .await?;

    tracing::info!(pet_id = %pet_id, visit_id = %visit.id, date = ?visit.visit_date, "Visit booked");
    Ok(visit)
}

/// Visits of a pet, earliest first.
pub async fn list_for_pet(
    pool: &PgPool,
    owner_id: Uuid,
    pet_id: Uuid,
) -> Result<Vec<Visit>, AppError> {
    ensure_pet_of_owner(pool, owner_id, pet_id).await?;

    let visits = sqlx::query_as::<_, Visit>(
        "SELECT id, pet_id, visit_date, description FROM visits WHERE pet_id = $1 ORDER BY visit_date ASC",
    )
    .bind(pet_id)
    .fetch_all(pool)
    .await?;
    Ok(visits)
}

async fn ensure_pet_of_owner(pool: &PgPool, owner_id: Uuid, pet_id: Uuid) -> Result<(), AppError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM pets WHERE id = $1 AND owner_id = $2)",
    )
    .bind(pet_id)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    if !exists {
        return Err(AppError::NotFound(format!(
            "Pet {pet_id} not found for owner {owner_id}"
        )));
    }
    Ok(())
}
