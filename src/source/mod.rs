//! Job-listing providers.
//!
//! Each provider is a [`JobSource`]: where to send the request, which query
//! parameters to attach, where the listing total lives in the response, and
//! how one raw listing maps onto [`NormalizedJob`]. The fetch/normalize/write
//! pipeline is shared and only ever talks to this trait.
use chrono::NaiveDate;
use reqwest::Url;

use crate::config::{Config, ConfigError};
use crate::model::{NormalizedJob, RawJob, Source};

pub mod enrich;
pub mod format;
pub mod jobicy;
pub mod remotive;

pub use jobicy::Jobicy;
pub use remotive::Remotive;

pub trait JobSource: Send + Sync {
    fn kind(&self) -> Source;

    fn endpoint(&self) -> &Url;

    /// Query parameters in request order; unset filters are left out.
    fn query(&self) -> Vec<(&'static str, String)>;

    /// Top-level key holding the provider's own listing total.
    fn count_key(&self) -> &'static str;

    /// File name, relative to the output directory.
    fn output_file(&self) -> &str;

    fn normalize(&self, raw: &RawJob, scraped_date: NaiveDate) -> NormalizedJob;
}

/// Build the configured provider for `kind`.
pub fn from_config(cfg: &Config, kind: Source) -> Result<Box<dyn JobSource>, ConfigError> {
    Ok(match kind {
        Source::Jobicy => Box::new(Jobicy::from_config(&cfg.jobicy)?),
        Source::Remotive => Box::new(Remotive::from_config(&cfg.remotive)?),
    })
}

/// Every provider enabled in `cfg`, Jobicy first.
pub fn enabled(cfg: &Config) -> Result<Vec<Box<dyn JobSource>>, ConfigError> {
    let mut sources = Vec::new();
    if cfg.jobicy.enabled {
        sources.push(from_config(cfg, Source::Jobicy)?);
    }
    if cfg.remotive.enabled {
        sources.push(from_config(cfg, Source::Remotive)?);
    }
    Ok(sources)
}
