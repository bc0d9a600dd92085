use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tower::ServiceExt;

use ai_job_market::config::DashboardConfig;
use ai_job_market::web::{app_router, AppState};

const CLEAN_CSV: &str = "\
job_title,industry,ai_adoption_level,automation_risk,salary_usd,skills_list,adoption_score,risk_score,salary_band
Analyst,Finance,Low,High,60000,\"[\"\"SQL\"\"]\",1,3,50-100k
Engineer,Tech,High,Low,140000,\"[\"\"Python\"\"]\",3,1,100-150k
Nurse,Healthcare,Medium,Low,75000,[],2,1,50-100k
Tutor,Education,Low,Medium,45000,[],1,2,<50k
";

fn app(data_path: &Path) -> axum::Router {
    let config = DashboardConfig {
        data_path: data_path.to_path_buf(),
        ..DashboardConfig::default()
    };
    app_router(AppState::new(config))
}

async fn get(app: axum::Router, uri: &str) -> Result<(StatusCode, String)> {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(body.to_vec())?))
}

#[tokio::test]
async fn test_index_renders_default_selection() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("clean.csv");
    fs::write(&path, CLEAN_CSV)?;

    let (status, body) = get(app(&path), "/").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("AI-Powered Job Market Insights (Interactive)"));
    // Tutor at 45000 falls below the default salary window
    assert!(body.contains("$75,000"));
    assert!(body.contains("Engineer"));
    assert!(!body.contains("<td>Tutor</td>"));
    Ok(())
}

#[tokio::test]
async fn test_summary_api_reports_metrics() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("clean.csv");
    fs::write(&path, CLEAN_CSV)?;

    let (status, body) = get(
        app(&path),
        "/api/summary?applied=1&industry=Finance&industry=Tech&adoption=Low&adoption=High&risk=Low&risk=High&salary_min=30000&salary_max=250000",
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body)?;
    assert_eq!(json["metrics"]["records"], 2);
    assert_eq!(json["metrics"]["median_salary"], "$100,000");
    assert_eq!(json["metrics"]["avg_adoption_score"], "2.00");
    assert_eq!(json["summary"]["sample_rows"][0][0], "Analyst");
    assert_eq!(json["summary"]["sample_rows"][0][5], "[\"SQL\"]");
    Ok(())
}

#[tokio::test]
async fn test_empty_selection_degrades_to_not_available() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("clean.csv");
    fs::write(&path, CLEAN_CSV)?;

    let (status, body) = get(app(&path), "/api/summary?applied=1&adoption=High").await?;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body)?;
    assert_eq!(json["metrics"]["records"], 0);
    assert_eq!(json["metrics"]["median_salary"], "N/A");
    assert_eq!(json["metrics"]["avg_adoption_score"], "N/A");
    assert_eq!(json["metrics"]["avg_risk_score"], "N/A");
    assert_eq!(json["summary"]["sample_rows"], serde_json::json!([]));

    let (status, _) = get(app(&path), "/?applied=1").await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_unknown_industry_degrades_to_not_available() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("clean.csv");
    fs::write(&path, CLEAN_CSV)?;

    let (status, body) = get(
        app(&path),
        "/api/summary?applied=1&industry=Mining&adoption=Low&risk=Low",
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body)?;
    assert_eq!(json["metrics"]["records"], 0);
    assert_eq!(json["metrics"]["median_salary"], "N/A");
    assert_eq!(json["metrics"]["avg_adoption_score"], "N/A");
    assert_eq!(json["metrics"]["avg_risk_score"], "N/A");
    assert_eq!(json["summary"]["sample_rows"], serde_json::json!([]));
    assert_eq!(json["summary"]["industry_points"], serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn test_missing_clean_file_is_service_unavailable() -> Result<()> {
    let dir = tempdir()?;
    let (status, body) = get(app(&dir.path().join("absent.csv")), "/").await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("ai_job_market clean"));

    let (status, body) = get(app(&dir.path().join("absent.csv")), "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
    Ok(())
}

#[tokio::test]
async fn test_reload_picks_up_new_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("clean.csv");
    let app = app(&path);

    let (status, _) = get(app.clone(), "/").await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    fs::write(&path, CLEAN_CSV)?;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/reload")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let (status, _) = get(app, "/").await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}
