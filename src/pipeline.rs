//! End-to-end run: extract, permute, output

use crate::cli::Cli;
use crate::core::{Driver, Jsluice};
use crate::error::Result;
use crate::output::{print_warning, write_results, ProgressTracker};
use tracing::info;

/// Counts reported once a run completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub endpoints: usize,
    pub urls: usize,
}

pub fn extractor_from(cli: &Cli) -> Result<Jsluice> {
    let mut jsluice = Jsluice::new(&cli.jsluice);
    if let Some(base) = cli.resolve_url()? {
        jsluice = jsluice.with_resolve(base);
    }
    Ok(jsluice)
}

/// Run the whole pipeline; nothing is written unless every stage succeeds
pub async fn run(cli: &Cli) -> Result<RunSummary> {
    let jsluice = extractor_from(cli)?;
    let endpoints = jsluice.run(&cli.input).await?;
    info!(count = endpoints.len(), input = %cli.input.display(), "extracted endpoints");

    if endpoints.is_empty() && !cli.quiet {
        print_warning(&format!("jsluice found no URLs in {}", cli.input.display()));
    }

    let driver = Driver::new(cli.workers()).with_strategy(cli.driver_strategy());
    let progress = ProgressTracker::new(driver.total_work(endpoints.len()), cli.hide_progress());

    let endpoint_count = endpoints.len();
    let fuzzed_urls = driver.run(endpoints, &progress).await;
    progress.finish();
    let fuzzed_urls = fuzzed_urls?;
    info!(
        count = fuzzed_urls.len(),
        workers = driver.workers(),
        strategy = ?cli.driver_strategy(),
        "generated fuzzed urls"
    );

    write_results(&fuzzed_urls, cli.output.as_deref()).await?;

    Ok(RunSummary {
        endpoints: endpoint_count,
        urls: fuzzed_urls.len(),
    })
}
