//! Dashboard Routes
//!
//! - GET / - Rendered dashboard page
//! - GET /api/v1/overview - Same values as JSON
//!
//! Each request is one independent render: read the contract, load the NAV
//! log, build the overview. Any failure aborts the render.

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult, PageError};
use crate::api::state::AppState;
use crate::history::HistoryLoader;
use crate::presenter::page::render_dashboard;
use crate::presenter::Overview;

/// GET /
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let overview = build_overview(&state).await.map_err(|error| PageError {
        error,
        title: state.presenter.title.clone(),
    })?;

    Ok(Html(render_dashboard(&overview)))
}

/// GET /api/v1/overview
pub async fn overview_json(State(state): State<Arc<AppState>>) -> ApiResult<Json<Overview>> {
    Ok(Json(build_overview(&state).await?))
}

/// Run one render's reads and build the overview
pub async fn build_overview(state: &AppState) -> ApiResult<Overview> {
    let view = state.chain.fetch_view().await?;

    let path = state.history_path.clone();
    let history = tokio::task::spawn_blocking(move || HistoryLoader::new().load(&path))
        .await
        .map_err(|e| ApiError::Internal(format!("NAV log task failed: {}", e)))??;

    let (history, excluded) = history.apply_policy(state.undated_policy)?;
    let contract = state.chain.contract_address();

    let overview = Overview::build(&view, &history, &contract, excluded, &state.presenter)?;

    tracing::debug!(
        history_rows = overview.history_rows,
        excluded_undated = overview.excluded_undated,
        nav = %overview.nav_display,
        "Built dashboard overview"
    );

    Ok(overview)
}
