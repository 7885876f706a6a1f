use askama::Template;

use crate::services::dashboard::WelcomeSummary;

/// One row of the upcoming-visits table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingVisitRow {
    pub date: String,
    pub pet_name: String,
    pub description: String,
}

#[derive(Template)]
#[template(path = "welcome.html")]
pub struct WelcomeTemplate {
    pub total_vets: i64,
    pub total_owners: i64,
    pub total_pets: i64,
    pub upcoming_visits: Vec<UpcomingVisitRow>,
}

impl From<&WelcomeSummary> for WelcomeTemplate {
    fn from(summary: &WelcomeSummary) -> Self {
        Self {
            total_vets: summary.total_vets,
            total_owners: summary.total_owners,
            total_pets: summary.total_pets,
            upcoming_visits: summary
                .upcoming_visits
                .iter()
                .map(|upcoming| UpcomingVisitRow {
                    date: upcoming
                        .visit
                        .visit_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                    pet_name: upcoming.pet_name.clone(),
                    description: upcoming.visit.description.clone(),
                })
                .collect(),
        }
    }
}
