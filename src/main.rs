use clap::Parser;
use jsfuzz::cli::Cli;
use jsfuzz::output::{print_error, print_summary};
use jsfuzz::pipeline;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_logging(cli: &Cli) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // clap exits with 2 on usage errors; this tool reports them as 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(&cli);

    match pipeline::run(&cli).await {
        Ok(summary) => {
            if !cli.quiet {
                let destination = cli
                    .output
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "stdout".to_string());
                print_summary(summary.endpoints, summary.urls, &destination);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
