use std::sync::Arc;

use anyhow::Context;
use tracing::error;

use validate_sitemaps::cli::Cli;
use validate_sitemaps::config::ConfigManager;
use validate_sitemaps::error::SitemapError;
use validate_sitemaps::liveness::LivenessChecker;
use validate_sitemaps::output::Output;
use validate_sitemaps::run::FileSummary;
use validate_sitemaps::telemetry::init_tracing;
use validate_sitemaps::validator::SitemapValidator;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    match run(cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!(error = %e, "Sitemap validation aborted");
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = ConfigManager::load_config(&cli)
        .await
        .map_err(SitemapError::from)?;

    let verbosity = config.verbosity();
    init_tracing(verbosity);

    let output = Arc::new(Output::new(verbosity, config.output.format.into()));

    let mut validator = SitemapValidator::new(config.sitemaps.clone());
    if config.liveness.enabled {
        let checker = LivenessChecker::new(config.liveness_config())
            .context("Failed to create liveness checker")?;
        validator = validator.with_liveness(checker);
    }

    if output.shows_progress() {
        println!(
            "{}",
            output.format_banner(validator.directory(), validator.liveness_enabled())
        );
        let progress_output = Arc::clone(&output);
        validator = validator.with_progress(Arc::new(move |summary: &FileSummary| {
            println!("{}", progress_output.format_file_line(summary));
        }));
    }

    let run = validator.run().await;
    print!("{}", output.format_report(&run.report())?);

    Ok(run.exit_code())
}
