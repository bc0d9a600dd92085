use askama::Template;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use std::sync::Arc;
use tracing::{error, warn};

use crate::constants::LEVELS;
use crate::dashboard::{DashboardFilter, DashboardSummary, FilterParams, JobTable};
use crate::error::JobMarketError;
use crate::observability::metrics;

use super::models::{BandRow, MetricTiles, ScatterRow, SelectOption, SummaryResponse};
use super::state::AppState;
use super::templates::{DashboardTemplate, UnavailableTemplate, PAGE_TITLE};

/// Failure of a dashboard request
#[derive(Debug)]
pub enum DashboardError {
    /// The clean dataset could not be loaded
    Unavailable { path: String, reason: String },
    Internal(String),
}

impl From<JobMarketError> for DashboardError {
    fn from(err: JobMarketError) -> Self {
        match err {
            JobMarketError::InputUnreadable { path, source } => DashboardError::Unavailable {
                path: path.display().to_string(),
                reason: source.to_string(),
            },
            other => DashboardError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        match self {
            DashboardError::Unavailable { path, reason } => {
                warn!("Clean dataset unavailable at {}: {}", path, reason);
                let page = UnavailableTemplate {
                    title: PAGE_TITLE,
                    path,
                    reason,
                };
                (StatusCode::SERVICE_UNAVAILABLE, page).into_response()
            }
            DashboardError::Internal(message) => {
                error!("Dashboard request failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

async fn load_table(state: &AppState) -> Result<Arc<JobTable>, DashboardError> {
    let cache = Arc::clone(&state.cache);
    tokio::task::spawn_blocking(move || cache.get())
        .await
        .map_err(|e| DashboardError::Internal(format!("dataset load task failed: {}", e)))?
        .map_err(DashboardError::from)
}

async fn select(
    state: &AppState,
    pairs: &[(String, String)],
) -> Result<(Arc<JobTable>, DashboardFilter, DashboardSummary), DashboardError> {
    let table = load_table(state).await?;
    let filter = FilterParams::from_pairs(pairs).resolve(&table, &state.config);
    let summary = DashboardSummary::compute(&table, &filter, state.config.sample_size);
    metrics::dashboard::filtered_rows(summary.records);
    Ok((table, filter, summary))
}

pub async fn index(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>, DashboardError> {
    metrics::dashboard::request("index");
    let (table, filter, summary) = select(&state, &pairs).await?;
    let config = &state.config;

    let template = DashboardTemplate {
        title: PAGE_TITLE,
        industry_options: SelectOption::list(&table.industries(), &filter.industries),
        adoption_options: SelectOption::list(&LEVELS, &filter.adoption_levels),
        risk_options: SelectOption::list(&LEVELS, &filter.risk_levels),
        salary_min: filter.salary_min as i64,
        salary_max: filter.salary_max as i64,
        salary_floor: config.salary_floor as i64,
        salary_ceiling: config.salary_ceiling as i64,
        salary_step: config.salary_step as i64,
        metrics: MetricTiles::from(&summary),
        points: ScatterRow::from_points(&summary.industry_points),
        bands: BandRow::from_counts(&summary.band_counts),
        sample_columns: summary.sample_columns,
        sample_rows: summary.sample_rows,
    };
    let body = template.render().map_err(JobMarketError::from)?;
    Ok(Html(body))
}

pub async fn api_summary(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SummaryResponse>, DashboardError> {
    metrics::dashboard::request("api_summary");
    let (_, filter, summary) = select(&state, &pairs).await?;
    Ok(Json(SummaryResponse {
        filter,
        metrics: MetricTiles::from(&summary),
        summary,
    }))
}

pub async fn reload(State(state): State<AppState>) -> Redirect {
    metrics::dashboard::request("reload");
    state.cache.invalidate();
    Redirect::to("/")
}

pub async fn prometheus_metrics() -> Response {
    match metrics::render() {
        Some(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

pub async fn health() -> &'static str {
    "ok"
}
