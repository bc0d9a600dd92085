use askama::Template;

use super::models::{BandRow, MetricTiles, ScatterRow, SelectOption};

pub const PAGE_TITLE: &str = "AI-Powered Job Market Insights (Interactive)";

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub title: &'static str,
    pub industry_options: Vec<SelectOption>,
    pub adoption_options: Vec<SelectOption>,
    pub risk_options: Vec<SelectOption>,
    pub salary_min: i64,
    pub salary_max: i64,
    pub salary_floor: i64,
    pub salary_ceiling: i64,
    pub salary_step: i64,
    pub metrics: MetricTiles,
    pub points: Vec<ScatterRow>,
    pub bands: Vec<BandRow>,
    pub sample_columns: Vec<String>,
    pub sample_rows: Vec<Vec<String>>,
}

#[derive(Template)]
#[template(path = "unavailable.html")]
pub struct UnavailableTemplate {
    pub title: &'static str,
    pub path: String,
    pub reason: String,
}
