use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use ai_job_market::app::CleanUseCase;
use ai_job_market::config::Config;
use ai_job_market::infra::{CsvDatasetReader, CsvDatasetWriter};
use ai_job_market::logging;
use ai_job_market::pipeline::CleaningPipeline;
use ai_job_market::web;

#[derive(Parser)]
#[command(name = "ai_job_market")]
#[command(about = "Clean the AI job market dataset and explore it in a dashboard")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to $JOB_MARKET_CONFIG, then ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the cleaning pipeline and write the clean dataset (default)
    Clean {
        /// Raw dataset to read
        #[arg(long)]
        input: Option<PathBuf>,
        /// Where to write the clean dataset
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run the pipeline without writing and print what each step did
    Inspect {
        /// Raw dataset to read
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Serve the interactive dashboard over the clean dataset
    Dashboard,
}

fn use_case(config: &Config, input: Option<PathBuf>, output: Option<PathBuf>) -> CleanUseCase {
    let pipeline = &config.pipeline;
    let delimiter = pipeline.delimiter_byte();
    let input = input.unwrap_or_else(|| pipeline.input_path.clone());
    let output = output.unwrap_or_else(|| pipeline.output_path.clone());

    CleanUseCase::new(
        Box::new(CsvDatasetReader::new(input).with_delimiter(delimiter)),
        Box::new(CsvDatasetWriter::new(output).with_delimiter(delimiter)),
        CleaningPipeline::standard(pipeline),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _guard = logging::init_logging("ai_job_market.log");

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Clean {
        input: None,
        output: None,
    }) {
        Commands::Clean { input, output } => {
            let report = use_case(&config, input, output)
                .run()
                .context("Cleaning pipeline failed")?;
            let written = report
                .output_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            info!("Pipeline finished: {} of {} rows kept", report.rows_written, report.rows_read);
            println!(
                "Clean file written to: {} (rows: {})",
                written, report.rows_written
            );
        }
        Commands::Inspect { input } => {
            let (dataset, report) = use_case(&config, input, None)
                .clean()
                .context("Cleaning pipeline failed")?;

            println!("Source: {} ({} rows)", report.source, report.rows_read);
            for step in &report.steps {
                println!(
                    "  {:<20} {:>7} -> {:<7} {}",
                    step.step, step.rows_before, step.rows_after, step.result.message
                );
            }
            println!("Top skills:");
            for (rank, skill) in report.top_skills().iter().enumerate() {
                println!("  {:>2}. {}", rank + 1, skill);
            }
            println!("Columns: {}", dataset.columns().join(", "));
            println!("Rows after cleaning: {}", dataset.len());
        }
        Commands::Dashboard => {
            web::serve(config.dashboard).await?;
        }
    }

    Ok(())
}
