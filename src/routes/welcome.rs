//! Site root: the server-rendered welcome page.

use askama::Template;
use axum::{extract::State, response::Html};

use crate::errors::AppError;
use crate::services::dashboard;
use crate::templates::welcome::WelcomeTemplate;
use crate::AppState;

/// GET / — render the `welcome` template with clinic totals.
pub async fn welcome(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let summary =
        dashboard::get_summary(&state.db, &state.vets_cache, state.clock.as_ref()).await?;
    let page = WelcomeTemplate::from(&summary).render()?;
    Ok(Html(page))
}
