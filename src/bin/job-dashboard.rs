use anyhow::Context;

use ai_job_market::config::Config;
use ai_job_market::{logging, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _guard = logging::init_logging("job_dashboard.log");

    let config = Config::load(None).context("Failed to load configuration")?;
    web::serve(config.dashboard).await
}
