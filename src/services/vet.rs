//! Veterinarian registry, served through the `vets` cache.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{VetCache, ALL_VETS};
use crate::errors::AppError;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::vet::{Specialty, Vet, VetSpecialtyRow};

/// All vets ordered by name, each with specialties sorted by name.
pub async fn find_all(pool: &PgPool, cache: &VetCache) -> Result<Vec<Vet>, AppError> {
    cache
        .get_or_try_insert_with(ALL_VETS, || load_all(pool))
        .await
}

/// One page of the vet list.
pub async fn list(
    pool: &PgPool,
    cache: &VetCache,
    pagination: &Pagination,
) -> Result<PagedResult<Vet>, AppError> {
    let vets = find_all(pool, cache).await?;
    Ok(PagedResult::from_slice(&vets, pagination))
}

async fn load_all(pool: &PgPool) -> Result<Vec<Vet>, AppError> {
    let mut vets = sqlx::query_as::<_, Vet>(
        "SELECT id, first_name, last_name FROM vets ORDER BY last_name, first_name",
    )
    .fetch_all(pool)
    .await?;

    let rows = sqlx::query_as::<_, VetSpecialtyRow>(
        r#"
        SELECT vs.vet_id, s.id, s.name
        FROM vet_specialties vs
        INNER JOIN specialties s ON s.id = vs.specialty_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    attach_specialties(&mut vets, rows);
    tracing::debug!(count = vets.len(), "Loaded vets from database");
    Ok(vets)
}

/// Distribute specialty rows onto their vets.
fn attach_specialties(vets: &mut [Vet], rows: Vec<VetSpecialtyRow>) {
    let mut by_vet: HashMap<Uuid, Vec<Specialty>> = HashMap::new();
    for row in rows {
        by_vet.entry(row.vet_id).or_default().push(Specialty {
            id: row.id,
            name: row.name,
        });
    }

    for vet in vets.iter_mut() {
        let mut specialties = by_vet.remove(&vet.id).unwrap_or_default();
        specialties.sort_by(|a, b| a.name.cmp(&b.name));
        vet.specialties = specialties;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vet(first: &str, last: &str) -> Vet {
        Vet {
            id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            specialties: Vec::new(),
        }
    }

    fn row(vet_id: Uuid, name: &str) -> VetSpecialtyRow {
        VetSpecialtyRow {
            vet_id,
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    #[test]
    fn specialties_are_grouped_and_sorted() {
        let mut vets = vec![vet("Linda", "Douglas"), vet("James", "Carter")];
        let rows = vec![
            row(vets[0].id, "surgery"),
            row(vets[0].id, "dentistry"),
        ];

        attach_specialties(&mut vets, rows);

        let names: Vec<&str> = vets[0].specialties.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["dentistry", "surgery"]);
        assert!(vets[1].specialties.is_empty());
    }

    #[test]
    fn rows_for_unknown_vets_are_ignored() {
        let mut vets = vec![vet("Helen", "Leary")];
        attach_specialties(&mut vets, vec![row(Uuid::new_v4(), "radiology")]);
        assert!(vets[0].specialties.is_empty());
    }
}
