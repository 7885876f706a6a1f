//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires the `DATABASE_URL` environment variable (reads .env).

use chrono::{Duration, Local, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;

const VETS: &[(&str, &str, &[&str])] = &[
    ("James", "Carter", &[]),
    ("Helen", "Leary", &["radiology"]),
    ("Linda", "Douglas", &["surgery", "dentistry"]),
    ("Rafael", "Ortega", &["surgery"]),
    ("Henry", "Stevens", &["radiology"]),
    ("Sharon", "Jenkins", &[]),
];

const PET_TYPES: &[&str] = &["cat", "dog", "lizard", "snake", "bird", "hamster"];

const OWNERS: &[(&str, &str, &str, &str, &str)] = &[
    ("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023"),
    ("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"),
    ("Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763"),
    ("Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198"),
    ("Peter", "McTavish", "2387 S. Fair Way", "Madison", "6085552765"),
    ("Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654"),
    ("Jeff", "Black", "1450 Oak Blvd.", "Monona", "6085555387"),
    ("Maria", "Escobito", "345 Maple St.", "Madison", "6085557683"),
    ("David", "Schroeder", "2749 Blackhawk Trail", "Madison", "6085559435"),
    ("Carlos", "Estaban", "2335 Independence La.", "Waunakee", "6085555487"),
];

/// (pet name, type, birth date, index into OWNERS)
const PETS: &[(&str, &str, &str, usize)] = &[
    ("Leo", "cat", "2000-09-07", 0),
    ("Basil", "hamster", "2002-08-06", 1),
    ("Rosy", "dog", "2001-04-17", 2),
    ("Jewel", "dog", "2000-03-07", 2),
    ("Iggy", "lizard", "2000-11-30", 3),
    ("George", "snake", "2000-01-20", 4),
    ("Samantha", "cat", "1995-09-04", 5),
    ("Max", "cat", "1995-09-04", 5),
    ("Lucky", "bird", "1999-08-06", 6),
    ("Mulligan", "dog", "1997-02-24", 7),
    ("Freddy", "bird", "2000-03-09", 8),
    ("Lucky", "dog", "2000-06-24", 9),
    ("Sly", "cat", "2002-06-08", 9),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = petclinic::db::create_pool(&db_url, 5).await?;

    // Run migrations first
    petclinic::db::migrate(&pool).await?;

    println!("=== PetClinic Seed Script ===");

    seed_vets(&pool).await?;
    seed_pet_types(&pool).await?;
    seed_owners_and_pets(&pool).await?;

    println!("\n=== Seed complete! ===");
    Ok(())
}

async fn seed_vets(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vets")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Vets already exist ({count})");
        return Ok(());
    }

    for (first_name, last_name, specialties) in VETS {
        let vet_id: Uuid = sqlx::query_scalar(
            "INSERT INTO vets (first_name, last_name) VALUES ($1, $2) RETURNING id",
        )
        .bind(first_name)
        .bind(last_name)
        .fetch_one(pool)
        .await?;

        for specialty in specialties.iter() {
            let specialty_id: Uuid = sqlx::query_scalar(
                "INSERT INTO specialties (name) VALUES ($1)
                 ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                 RETURNING id",
            )
            .bind(specialty)
            .fetch_one(pool)
            .await?;

            sqlx::query("INSERT INTO vet_specialties (vet_id, specialty_id) VALUES ($1, $2)")
                .bind(vet_id)
                .bind(specialty_id)
                .execute(pool)
                .await?;
        }
    }

    println!("[done] Created {} vets", VETS.len());
    Ok(())
}

async fn seed_pet_types(pool: &PgPool) -> anyhow::Result<()> {
    for name in PET_TYPES {
        sqlx::query("INSERT INTO types (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }

    println!("[done] Pet types present: {}", PET_TYPES.join(", "));
    Ok(())
}

async fn seed_owners_and_pets(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM owners")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Owners already exist ({count})");
        return Ok(());
    }

    let mut owner_ids = Vec::with_capacity(OWNERS.len());
    for (first_name, last_name, address, city, telephone) in OWNERS {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO owners (first_name, last_name, address, city, telephone)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(address)
        .bind(city)
        .bind(telephone)
        .fetch_one(pool)
        .await?;
        owner_ids.push(id);
    }

    let mut pet_ids = Vec::with_capacity(PETS.len());
    for (name, pet_type, birth_date, owner) in PETS {
        let birth_date = NaiveDate::parse_from_str(birth_date, "%Y-%m-%d")?;
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO pets (owner_id, name, birth_date, type_id)
             VALUES ($1, $2, $3, (SELECT id FROM types WHERE name = $4))
             RETURNING id",
        )
        .bind(owner_ids[*owner])
        .bind(name)
        .bind(birth_date)
        .bind(pet_type)
        .fetch_one(pool)
        .await?;
        pet_ids.push(id);
    }

    let today = Local::now().date_naive();
    let samantha = pet_ids[6];
    let max = pet_ids[7];
    let leo = pet_ids[0];
    let visits = [
        (samantha, NaiveDate::from_ymd_opt(2013, 1, 1), "rabies shot"),
        (max, NaiveDate::from_ymd_opt(2013, 1, 2), "rabies shot"),
        (max, NaiveDate::from_ymd_opt(2013, 1, 3), "neutered"),
        (samantha, NaiveDate::from_ymd_opt(2013, 1, 4), "spayed"),
        (leo, Some(today + Duration::days(3)), "annual checkup"),
        (max, Some(today + Duration::days(10)), "dental cleaning"),
    ];

    for (pet_id, date, description) in visits {
        sqlx::query("INSERT INTO visits (pet_id, visit_date, description) VALUES ($1, $2, $3)")
            .bind(pet_id)
            .bind(date)
            .bind(description)
            .execute(pool)
            .await?;
    }

    println!(
        "[done] Created {} owners, {} pets, {} visits",
        OWNERS.len(),
        PETS.len(),
        visits.len()
    );
    Ok(())
}
