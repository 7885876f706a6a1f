//! Pet management: pet types, form validation, create/update, and images.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{AppError, FieldError};
use crate::models::owner::Owner;
use crate::models::pet::{Pet, PetForm, PetType, ValidPet, PET_NAME_MAX_LEN};
use crate::models::visit::Visit;
use crate::services::owner as owner_service;

/// All pet types ordered by name.
pub async fn pet_types(pool: &PgPool) -> Result<Vec<PetType>, AppError> {
    let types = sqlx::query_as::<_, PetType>("SELECT id, name FROM types ORDER BY name ASC")
        .fetch_all(pool)
        .await?;
    Ok(types)
}

/// Add a pet to an owner.
pub async fn create(
    pool: &PgPool,
    owner_id: Uuid,
    form: &PetForm,
    today: NaiveDate,
) -> Result<Pet, AppError> {
    let owner = owner_service::find_by_id(pool, owner_id).await?;
    let types = pet_types(pool).await?;
    let valid = validate(form, &owner, None, &types, today)
        .map_err(|errors| AppError::from_field_errors(&errors))?;

    let pet_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO pets (owner_id, name, birth_date, type_id, image)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(owner_id)
    .bind(&valid.name)
    .bind(valid.birth_date)
    .bind(valid.type_id)
    .bind(&valid.image)
    .fetch_one(pool)
    .await?;

    tracing::info!(owner_id = %owner_id, pet_id = %pet_id, "Pet created");
    find(pool, owner_id, pet_id).await
}

/// Update one of an owner's pets.
pub async fn update(
    pool: &PgPool,
    owner_id: Uuid,
    pet_id: Uuid,
    form: &PetForm,
    today: NaiveDate,
) -> Result<Pet, AppError> {
    let owner = owner_service::find_by_id(pool, owner_id).await?;
    if owner.pet(pet_id).is_none() {
        return Err(AppError::NotFound(format!(
            "Pet {pet_id} not found for owner {owner_id}"
        )));
    }
    let types = pet_types(pool).await?;
    let valid = validate(form, &owner, Some(pet_id), &types, today)
        .map_err(|errors| AppError::from_field_errors(&errors))?;

    sqlx::query(
        r#"
        UPDATE pets SET
            name = $3,
            birth_date = $4,
            type_id = COALESCE($5, type_id),
            image = COALESCE($6, image)
        WHERE id = $1 AND owner_id = $2
        "#,
    )
    .bind(pet_id)
    .bind(owner_id)
    .bind(&valid.name)
    .bind(valid.birth_date)
    .bind(valid.type_id)
    .bind(&valid.image)
    .execute(pool)
    .await?;

    tracing::info!(owner_id = %owner_id, pet_id = %pet_id, "Pet updated");
    find(pool, owner_id, pet_id).await
}

/// A single pet of an owner, with its visits.
pub async fn find(pool: &PgPool, owner_id: Uuid, pet_id: Uuid) -> Result<Pet, AppError> {
    let mut pet = sqlx::query_as::<_, Pet>(
        r#"
        SELECT p.id, p.owner_id, p.name, p.birth_date, p.type_id,
               t.name AS type_name, (p.image IS NOT NULL) AS has_image
        FROM pets p
        LEFT JOIN types t ON t.id = p.type_id
        WHERE p.id = $1 AND p.owner_id = $2
        "#,
    )
    .bind(pet_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Pet {pet_id} not found for owner {owner_id}")))?;

    let visits = sqlx::query_as::<_, Visit>(
        "SELECT id, pet_id, visit_date, description FROM visits WHERE pet_id = $1 ORDER BY visit_date ASC",
    )
    .bind(pet_id)
    .fetch_all(pool)
    .await?;

    pet.visits = Some(visits);
    Ok(pet)
}

/// Stored image bytes of a pet.
pub async fn image(pool: &PgPool, owner_id: Uuid, pet_id: Uuid) -> Result<Vec<u8>, AppError> {
    let image = sqlx::query_scalar::<_, Option<Vec<u8>>>(
        "SELECT image FROM pets WHERE id = $1 AND owner_id = $2",
    )
    .bind(pet_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .flatten();

    image.ok_or_else(|| AppError::NotFound(format!("No image for pet {pet_id}")))
}

/// Check every pet form field, collecting all problems.
///
/// `editing` is the id of the pet being updated, `None` for a new pet.
pub fn validate(
    form: &PetForm,
    owner: &Owner,
    editing: Option<Uuid>,
    types: &[PetType],
    today: NaiveDate,
) -> Result<ValidPet, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = form.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        errors.push(FieldError::new("name", "required"));
    } else if name.chars().count() > PET_NAME_MAX_LEN {
        errors.push(FieldError::new("name", "length"));
    } else if owner
        .pet_named(name)
        .is_some_and(|existing| Some(existing.id) != editing)
    {
        errors.push(FieldError::new("name", "duplicate"));
    }

    let type_name = form
        .pet_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let type_id = match type_name {
        Some(wanted) => match types.iter().find(|t| t.name.eq_ignore_ascii_case(wanted)) {
            Some(found) => Some(found.id),
            None => {
                errors.push(FieldError::new("type", "typeMismatch"));
                None
            }
        },
        None if editing.is_none() => {
            errors.push(FieldError::new("type", "required"));
            None
        }
        None => None,
    };

    let birth_date = match form.birth_date.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(FieldError::new("birth_date", "required"));
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) if date > today => {
                errors.push(FieldError::new("birth_date", "typeMismatch.birthDate"));
                None
            }
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(FieldError::new("birth_date", "typeMismatch"));
                None
            }
        },
    };

    match birth_date {
        Some(birth_date) if errors.is_empty() => Ok(ValidPet {
            name: name.to_string(),
            type_id,
            birth_date,
            image: form.image.clone().filter(|bytes| !bytes.is_empty()),
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn hamster() -> PetType {
        PetType {
            id: Uuid::from_u128(3),
            name: "hamster".to_string(),
        }
    }

    fn pet(id: u128, name: &str) -> Pet {
        Pet {
            id: Uuid::from_u128(id),
            owner_id: Uuid::from_u128(100),
            name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2015, 2, 12),
            type_id: Some(hamster().id),
            type_name: Some("hamster".to_string()),
            has_image: false,
            visits: Some(Vec::new()),
        }
    }

    /// Owner with "petty" (id 1) and "doggy" (id 2).
    fn owner() -> Owner {
        Owner {
            id: Uuid::from_u128(100),
            first_name: "George".to_string(),
            last_name: "Franklin".to_string(),
            address: "110 W. Liberty St.".to_string(),
            city: "Madison".to_string(),
            telephone: "6085551023".to_string(),
            pets: Some(vec![pet(1, "petty"), pet(2, "doggy")]),
        }
    }

    fn form(name: &str, pet_type: Option<&str>, birth_date: &str) -> PetForm {
        PetForm {
            name: Some(name.to_string()),
            pet_type: pet_type.map(str::to_string),
            birth_date: Some(birth_date.to_string()),
            image: None,
        }
    }

    fn codes(result: Result<ValidPet, Vec<FieldError>>) -> Vec<(&'static str, &'static str)> {
        result
            .unwrap_err()
            .into_iter()
            .map(|e| (e.field, e.code))
            .collect()
    }

    #[test]
    fn valid_new_pet() {
        let valid = validate(
            &form("Betty", Some("hamster"), "2015-02-12"),
            &owner(),
            None,
            &[hamster()],
            today(),
        )
        .unwrap();
        assert_eq!(valid.name, "Betty");
        assert_eq!(valid.type_id, Some(hamster().id));
        assert_eq!(valid.birth_date, NaiveDate::from_ymd_opt(2015, 2, 12).unwrap());
        assert!(valid.image.is_none());
    }

    #[test]
    fn blank_name_is_required() {
        let result = validate(
            &form("\t \n", Some("hamster"), "2015-02-12"),
            &owner(),
            None,
            &[hamster()],
            today(),
        );
        assert_eq!(codes(result), vec![("name", "required")]);
    }

    #[test]
    fn overlong_name_is_rejected() {
        let longest = "B".repeat(PET_NAME_MAX_LEN);
        assert!(validate(
            &form(&longest, Some("hamster"), "2015-02-12"),
            &owner(),
            None,
            &[hamster()],
            today(),
        )
        .is_ok());

        let result = validate(
            &form(&format!("{longest}y"), Some("hamster"), "2015-02-12"),
            &owner(),
            None,
            &[hamster()],
            today(),
        );
        assert_eq!(codes(result), vec![("name", "length")]);
    }

    #[test]
    fn duplicate_name_on_create() {
        let result = validate(
            &form("Petty", Some("hamster"), "2015-02-12"),
            &owner(),
            None,
            &[hamster()],
            today(),
        );
        assert_eq!(codes(result), vec![("name", "duplicate")]);
    }

    #[test]
    fn duplicate_name_of_another_pet_on_update() {
        let result = validate(
            &form("petty", Some("hamster"), "2015-02-12"),
            &owner(),
            Some(Uuid::from_u128(2)),
            &[hamster()],
            today(),
        );
        assert_eq!(codes(result), vec![("name", "duplicate")]);
    }

    #[test]
    fn keeping_own_name_on_update() {
        let result = validate(
            &form("petty", Some("hamster"), "2015-02-12"),
            &owner(),
            Some(Uuid::from_u128(1)),
            &[hamster()],
            today(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn missing_type_on_create() {
        let result = validate(
            &form("Betty", None, "2015-02-12"),
            &owner(),
            None,
            &[hamster()],
            today(),
        );
        assert_eq!(codes(result), vec![("type", "required")]);
    }

    #[test]
    fn missing_type_on_update_keeps_current() {
        let valid = validate(
            &form("Betty", None, "2015-02-12"),
            &owner(),
            Some(Uuid::from_u128(1)),
            &[hamster()],
            today(),
        )
        .unwrap();
        assert!(valid.type_id.is_none());
    }

    #[test]
    fn unknown_type() {
        let result = validate(
            &form("Betty", Some("dragon"), "2015-02-12"),
            &owner(),
            None,
            &[hamster()],
            today(),
        );
        assert_eq!(codes(result), vec![("type", "typeMismatch")]);
    }

    #[test]
    fn future_birth_date() {
        let result = validate(
            &form("Betty", Some("hamster"), "2024-06-02"),
            &owner(),
            None,
            &[hamster()],
            today(),
        );
        assert_eq!(codes(result), vec![("birth_date", "typeMismatch.birthDate")]);
    }

    #[test]
    fn birth_date_today_is_accepted() {
        let result = validate(
            &form("Betty", Some("hamster"), "2024-06-01"),
            &owner(),
            None,
            &[hamster()],
            today(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn malformed_birth_date_and_blank_name() {
        let result = validate(
            &form(" ", None, "2015/02/12"),
            &owner(),
            Some(Uuid::from_u128(1)),
            &[hamster()],
            today(),
        );
        assert_eq!(
            codes(result),
            vec![("name", "required"), ("birth_date", "typeMismatch")]
        );
    }

    #[test]
    fn missing_birth_date() {
        let mut f = form("Betty", Some("hamster"), "");
        let result = validate(&f, &owner(), None, &[hamster()], today());
        assert_eq!(codes(result), vec![("birth_date", "required")]);

        f.birth_date = None;
        let result = validate(&f, &owner(), None, &[hamster()], today());
        assert_eq!(codes(result), vec![("birth_date", "required")]);
    }

    #[test]
    fn empty_upload_keeps_image() {
        let mut f = form("Betty", Some("hamster"), "2015-02-12");
        f.image = Some(Vec::new());
        let valid = validate(&f, &owner(), None, &[hamster()], today()).unwrap();
        assert!(valid.image.is_none());

        f.image = Some(b"test image content".to_vec());
        let valid = validate(&f, &owner(), None, &[hamster()], today()).unwrap();
        assert_eq!(valid.image.as_deref(), Some(&b"test image content"[..]));
    }
}
