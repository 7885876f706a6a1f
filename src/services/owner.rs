//! Owner registry: search, create, update, and loading owners with their
//! pets and visits.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::owner::{Owner, OwnerFilters, OwnerForm, OwnerSummary};
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::pet::Pet;
use crate::models::visit::Visit;

const OWNER_COLUMNS: &str = "id, first_name, last_name, address, city, telephone";

const PET_SELECT: &str = r#"
    SELECT p.id, p.owner_id, p.name, p.birth_date, p.type_id,
           t.name AS type_name, (p.image IS NOT NULL) AS has_image
    FROM pets p
    LEFT JOIN types t ON t.id = p.type_id
"#;

/// Search owners by last-name prefix. An absent or blank filter matches all.
pub async fn search(
    pool: &PgPool,
    filters: &OwnerFilters,
    pagination: &Pagination,
) -> Result<PagedResult<OwnerSummary>, AppError> {
    let pattern = last_name_pattern(filters.last_name.as_deref());

    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM owners WHERE last_name ILIKE $1",
    )
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, OwnerSummary>(
        r#"
        SELECT o.id, o.first_name, o.last_name, o.address, o.city, o.telephone,
               string_agg(p.name, ', ' ORDER BY p.name) AS pet_names
        FROM owners o
        LEFT JOIN pets p ON p.owner_id = o.id
        WHERE o.last_name ILIKE $1
        GROUP BY o.id
        ORDER BY o.last_name ASC, o.first_name ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&pattern)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}

/// Owner with pets (by name) and each pet's visits (by date).
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Owner, AppError> {
    let owner = sqlx::query_as::<_, Owner>(&format!(
        "SELECT {OWNER_COLUMNS} FROM owners WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Owner {id} not found")))?;

    let pets = sqlx::query_as::<_, Pet>(&format!(
        "{PET_SELECT} WHERE p.owner_id = $1 ORDER BY p.name ASC"
    ))
    .bind(id)
    .fetch_all(pool)
    .await?;

    let visits = sqlx::query_as::<_, Visit>(
        r#"
        SELECT v.id, v.pet_id, v.visit_date, v.description
        FROM visits v
        INNER JOIN pets p ON p.id = v.pet_id
        WHERE p.owner_id = $1
        ORDER BY v.visit_date ASC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let mut owners = assemble(vec![owner], pets, visits);
    owners
        .pop()
        .ok_or_else(|| AppError::Internal("Owner lost while loading pets".to_string()))
}

/// Every owner with pets and visits loaded.
pub async fn find_all_with_pets(pool: &PgPool) -> Result<Vec<Owner>, AppError> {
    let owners = sqlx::query_as::<_, Owner>(&format!(
        "SELECT {OWNER_COLUMNS} FROM owners ORDER BY last_name ASC, first_name ASC"
    ))
    .fetch_all(pool)
    .await?;

    let pets = sqlx::query_as::<_, Pet>(&format!("{PET_SELECT} ORDER BY p.name ASC"))
        .fetch_all(pool)
        .await?;

    let visits = sqlx::query_as::<_, Visit>(
        "SELECT id, pet_id, visit_date, description FROM visits ORDER BY visit_date ASC",
    )
    .fetch_all(pool)
    .await?;

    tracing::debug!(
        owners = owners.len(),
        pets = pets.len(),
        visits = visits.len(),
        "Loaded owner graph"
    );
    Ok(assemble(owners, pets, visits))
}

/// Number of registered owners.
pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM owners")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Register a new owner.
pub async fn create(pool: &PgPool, input: &OwnerForm) -> Result<Owner, AppError> {
    input.validate()?;

    let mut owner = sqlx::query_as::<_, Owner>(&format!(
        r#"
        INSERT INTO owners (first_name, last_name, address, city, telephone)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {OWNER_COLUMNS}
        "#
    ))
    .bind(input.first_name.trim())
    .bind(input.last_name.trim())
    .bind(input.address.trim())
    .bind(input.city.trim())
    .bind(&input.telephone)
    .fetch_one(pool)
    .await?;

    owner.pets = Some(Vec::new());
    tracing::info!(owner_id = %owner.id, "Owner created");
    Ok(owner)
}

/// Replace an owner's details.
pub async fn update(pool: &PgPool, id: Uuid, input: &OwnerForm) -> Result<Owner, AppError> {
    input.validate()?;

    let updated = sqlx::query_scalar::<_, Uuid>(
        r#"
        UPDATE owners SET
            first_name = $2,
            last_name = $3,
            address = $4,
            city = $5,
            telephone = $6
        WHERE id = $1
        RETURNING id
        "#,
    )
    .bind(id)
    .bind(input.first_name.trim())
    .bind(input.last_name.trim())
    .bind(input.address.trim())
    .bind(input.city.trim())
    .bind(&input.telephone)
    .fetch_optional(pool)
    .await?;

    if updated.is_none() {
        return Err(AppError::NotFound(format!("Owner {id} not found")));
    }

    tracing::info!(owner_id = %id, "Owner updated");
    find_by_id(pool, id).await
}

/// ILIKE pattern matching last names that start with `prefix`.
fn last_name_pattern(prefix: Option<&str>) -> String {
    let prefix = prefix.map(str::trim).unwrap_or_default();
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Nest visits under pets and pets under owners, keeping row order.
///
/// Every owner and pet ends up with a loaded (possibly empty) collection.
fn assemble(mut owners: Vec<Owner>, pets: Vec<Pet>, visits: Vec<Visit>) -> Vec<Owner> {
    let mut visits_by_pet: HashMap<Uuid, Vec<Visit>> = HashMap::new();
    for visit in visits {
        visits_by_pet.entry(visit.pet_id).or_default().push(visit);
    }

    let mut pets_by_owner: HashMap<Uuid, Vec<Pet>> = HashMap::new();
    for mut pet in pets {
        pet.visits = Some(visits_by_pet.remove(&pet.id).unwrap_or_default());
        pets_by_owner.entry(pet.owner_id).or_default().push(pet);
    }

    for owner in owners.iter_mut() {
        owner.pets = Some(pets_by_owner.remove(&owner.id).unwrap_or_default());
    }
    owners
}
