use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use remote_job_fetch::config::{self, Config};
use remote_job_fetch::fetch::HttpFetcher;
use remote_job_fetch::model::Source;
use remote_job_fetch::pipeline::{self, FetchMode};
use remote_job_fetch::source::{self as sources, JobSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Selection {
    Jobicy,
    Remotive,
    All,
}

impl Selection {
    fn includes(self, kind: Source) -> bool {
        match self {
            Selection::All => true,
            Selection::Jobicy => kind == Source::Jobicy,
            Selection::Remotive => kind == Source::Remotive,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Fetch remote job listings from Jobicy and Remotive into JSON files"
)]
struct Args {
    /// Path to YAML config file; built-in defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which provider(s) to fetch
    #[arg(long, value_enum, default_value_t = Selection::All)]
    source: Selection,

    /// Directory for the output files (overrides `app.output_dir`)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Treat fetch failures as "no jobs" instead of failing the run
    #[arg(long)]
    best_effort: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(dir) = &args.output_dir {
        cfg.app.output_dir = dir.to_string_lossy().into_owned();
    }
    cfg.ensure_dirs().context("failed to create output directory")?;

    let fetcher = HttpFetcher::from_config(&cfg.app).context("failed to build HTTP client")?;
    let selected: Vec<Box<dyn JobSource>> = sources::enabled(&cfg)?
        .into_iter()
        .filter(|s| args.source.includes(s.kind()))
        .collect();
    if selected.is_empty() {
        bail!("no enabled source matches --source {:?}", args.source);
    }

    let mode = if args.best_effort {
        FetchMode::BestEffort
    } else {
        FetchMode::Strict
    };
    let output_dir = cfg.output_dir();
    let today = pipeline::today();

    let mut failed = Vec::new();
    for source in &selected {
        let kind = source.kind();
        match pipeline::run_source(&fetcher, source.as_ref(), &output_dir, today, mode).await {
            Ok(report) => {
                match (&report.output, &report.sample) {
                    (Some(path), Some(sample)) => {
                        println!("Saved {} {} jobs to {}", report.fetched, kind, path.display());
                        println!("\nSample job:");
                        for line in pipeline::sample_lines(sample) {
                            println!("{line}");
                        }
                        println!();
                    }
                    _ => println!("No jobs were fetched from {} API", kind),
                }
                info!(source = %kind, fetched = report.fetched, "source done");
            }
            Err(err) => {
                error!(source = %kind, error = %err, "source failed");
                failed.push(kind);
            }
        }
    }

    if !failed.is_empty() {
        let names: Vec<&str> = failed.iter().map(Source::as_str).collect();
        bail!("fetch run failed for: {}", names.join(", "));
    }
    Ok(())
}
