use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::fetch::{FetchError, JobFetcher};
use crate::model::{NormalizedJob, RawJob, Source};
use crate::source::JobSource;
use crate::writer::{self, WriteError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// How fetch failures are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Fetch failures are returned as errors.
    #[default]
    Strict,
    /// Fetch failures are logged and treated as "no jobs".
    BestEffort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub source: Source,
    pub fetched: usize,
    pub reported_count: Option<u64>,
    /// Where the listings were written; `None` when there was nothing to write.
    pub output: Option<PathBuf>,
    pub sample: Option<NormalizedJob>,
}

/// Local calendar date stamped onto every listing as `scraped_date`.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn normalize_all(source: &dyn JobSource, raw: &[RawJob], today: NaiveDate) -> Vec<NormalizedJob> {
    raw.iter().map(|job| source.normalize(job, today)).collect()
}

/// Fetch, normalize and persist one provider's listings.
///
/// An empty result leaves any previous output file in place.
#[instrument(skip_all, fields(source = %source.kind()))]
pub async fn run_source(
    fetcher: &dyn JobFetcher,
    source: &dyn JobSource,
    output_dir: &Path,
    today: NaiveDate,
    mode: FetchMode,
) -> Result<RunReport, PipelineError> {
    let fetched = match mode {
        // The caller logs the failure.
        FetchMode::Strict => fetcher.fetch(source).await?,
        FetchMode::BestEffort => fetcher.fetch_or_empty(source).await,
    };

    let jobs = normalize_all(source, &fetched.jobs, today);
    let mut report = RunReport {
        source: source.kind(),
        fetched: jobs.len(),
        reported_count: fetched.reported_count,
        output: None,
        sample: jobs.first().cloned(),
    };

    if jobs.is_empty() {
        warn!("no jobs were fetched; nothing written");
        return Ok(report);
    }

    let path = output_dir.join(source.output_file());
    if let Err(err) = writer::write_jobs(&path, &jobs) {
        error!(error = %err, "failed to save jobs");
        return Err(err.into());
    }
    info!(count = jobs.len(), path = %path.display(), "saved jobs");

    report.output = Some(path);
    Ok(report)
}

/// `key: value` lines for a sample listing, in schema order, without the
/// long description bodies.
pub fn sample_lines(job: &NormalizedJob) -> Vec<String> {
    let mut lines = vec![
        format!("title: {}", job.title),
        format!("company: {}", job.company),
        format!("location: {}", job.location),
        format!("url: {}", job.url),
        format!("source: {}", job.source),
        format!("posted_at: {}", job.posted_at),
        format!("salary: {}", job.salary),
        format!("job_type: {}", job.job_type),
        format!("category: {}", job.category),
        format!("company_logo: {}", job.company_logo),
    ];
    if let Some(level) = &job.job_level {
        lines.push(format!("job_level: {}", level));
    }
    if !job.tech_stack.is_empty() {
        lines.push(format!("tech_stack: {}", job.tech_stack.join(", ")));
    }
    lines.push(format!("scraped_date: {}", job.scraped_date.format("%Y-%m-%d")));
    lines
}
