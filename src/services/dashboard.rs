//! Welcome-page aggregation: clinic totals and the next upcoming visits.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;

use crate::cache::VetCache;
use crate::clock::Clock;
use crate::errors::AppError;
use crate::models::owner::Owner;
use crate::models::vet::Vet;
use crate::models::visit::Visit;
use crate::services::{owner as owner_service, vet as vet_service};

/// Maximum number of upcoming visits shown on the welcome page.
pub const UPCOMING_VISITS_LIMIT: usize = 5;

/// Values rendered by the welcome page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeSummary {
    pub total_vets: i64,
    pub total_owners: i64,
    pub total_pets: i64,
    pub upcoming_visits: Vec<UpcomingVisit>,
}

/// An upcoming visit together with the name of the pet it is booked for.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpcomingVisit {
    #[serde(flatten)]
    pub visit: Visit,
    pub pet_name: String,
}

/// Load the welcome-page inputs concurrently and summarize them.
pub async fn get_summary(
    pool: &PgPool,
    vets_cache: &VetCache,
    clock: &dyn Clock,
) -> Result<WelcomeSummary, AppError> {
    let (vets, owner_count, owners) = tokio::try_join!(
        vet_service::find_all(pool, vets_cache),
        owner_service::count(pool),
        owner_service::find_all_with_pets(pool),
    )?;

    let summary = summarize(
        Some(vets.as_slice()),
        owner_count,
        Some(owners.as_slice()),
        clock.today(),
    );
    tracing::debug!(
        total_vets = summary.total_vets,
        total_owners = summary.total_owners,
        total_pets = summary.total_pets,
        upcoming = summary.upcoming_visits.len(),
        "Welcome summary computed"
    );
    Ok(summary)
}

/// Derive the welcome-page values from a snapshot of vets and owners.
///
/// Absent collections at any level count as empty. Upcoming visits are those
/// dated `today` or later, earliest first (ties keep encounter order),
/// truncated to [`UPCOMING_VISITS_LIMIT`]. Visits without a date are skipped.
pub fn summarize(
    vets: Option<&[Vet]>,
    owner_count: i64,
    owners: Option<&[Owner]>,
    today: NaiveDate,
) -> WelcomeSummary {
    let owners = owners.unwrap_or_default();

    let total_pets = owners
        .iter()
        .map(|owner| owner.pets.as_deref().map_or(0, <[_]>::len) as i64)
        .sum();

    let mut upcoming_visits: Vec<UpcomingVisit> = owners
        .iter()
        .flat_map(|owner| owner.pets.as_deref().unwrap_or_default())
        .flat_map(|pet| {
            pet.visits
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(move |visit| (pet, visit))
        })
        .filter(|(_, visit)| visit.visit_date.is_some_and(|date| date >= today))
        .map(|(pet, visit)| UpcomingVisit {
            visit: visit.clone(),
            pet_name: pet.name.clone(),
        })
        .collect();
    upcoming_visits.sort_by_key(|upcoming| upcoming.visit.visit_date);
    upcoming_visits.truncate(UPCOMING_VISITS_LIMIT);

    WelcomeSummary {
        total_vets: vets.map_or(0, |v| v.len() as i64),
        total_owners: owner_count,
        total_pets,
        upcoming_visits,
    }
}
