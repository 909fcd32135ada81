use anyhow::{Context, Result};
use clap::Parser;
use rt_bootstrap::{cli::Cli, cohort::CohortRunner};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `RUST_LOG` overrides the default `info` level
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing();

    let runner = CohortRunner::new(args.to_config()).context("Invalid arguments")?;
    let report = runner.run().with_context(|| {
        format!(
            "Failed to write cohort results for {}",
            args.input_dir.display()
        )
    })?;

    println!(
        "Processed {} participant file(s), {} failed",
        report.processed(),
        report.failures.len()
    );
    println!("{}", report.json_path.display());
    println!("{}", report.csv_path.display());

    Ok(())
}
