//! Route Handlers
//!
//! - `GET /` - dashboard page (`?lot={id}` opens the history modal)
//! - `POST /theme` - set the theme from the toggle form
//! - `GET /api/view` - current view model as JSON
//! - `GET /health/live` - liveness probe

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::{ServerError, ServerResult};
use super::state::AppState;
use super::templates::DashboardTemplate;
use crate::renderer::PageState;
use crate::theme::Theme;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Lot whose history modal should be open
    pub lot: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub theme: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
    pub version: &'static str,
}

/// GET /
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> ServerResult<Html<String>> {
    let modal = match query.lot.as_deref().map(str::trim) {
        Some(lot_id) if !lot_id.is_empty() => Some(state.renderer.open_lot_history(lot_id).await),
        _ => None,
    };

    let mut page = state.renderer.page_state().await;
    if let Some(modal) = modal {
        page.modal = modal;
    }
    let html = DashboardTemplate::new(&page, state.page_refresh_secs).render()?;
    Ok(Html(html))
}

/// POST /theme
pub async fn set_theme(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ThemeForm>,
) -> ServerResult<Redirect> {
    let theme: Theme = form
        .theme
        .parse()
        .map_err(|e: crate::theme::UnknownTheme| ServerError::Validation(e.to_string()))?;

    let applied = state.renderer.set_theme(theme).await;
    if !applied.persisted {
        tracing::warn!("Theme {} applied but not persisted", applied.theme);
    }

    Ok(Redirect::to("/"))
}

/// GET /api/view
pub async fn view(State(state): State<Arc<AppState>>) -> Json<PageState> {
    Json(state.renderer.page_state().await)
}

/// GET /health/live
///
/// Returns 200 if the process is alive, no upstream checks.
pub async fn liveness(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            uptime_seconds: state.uptime_seconds(),
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
