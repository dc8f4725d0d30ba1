use chrono::NaiveDate;
use reqwest::Url;

use super::enrich::{strip_html, tech_stack};
use super::format::{text, text_or};
use super::JobSource;
use crate::config::{self, ConfigError};
use crate::model::{NormalizedJob, RawJob, Source};

/// Remotive `/api/remote-jobs`, filtered by category and result limit.
#[derive(Debug, Clone)]
pub struct Remotive {
    endpoint: Url,
    category: Option<String>,
    limit: Option<u32>,
    output_file: String,
}

impl Remotive {
    pub fn new(
        endpoint: Url,
        category: Option<String>,
        limit: Option<u32>,
        output_file: impl Into<String>,
    ) -> Self {
        Self {
            endpoint,
            category,
            limit,
            output_file: output_file.into(),
        }
    }

    pub fn from_config(cfg: &config::Remotive) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(&cfg.endpoint)
            .map_err(|_| ConfigError::Invalid("remotive.endpoint must be a valid URL"))?;
        Ok(Self::new(endpoint, cfg.category.clone(), cfg.limit, cfg.output_file.clone()))
    }
}

impl JobSource for Remotive {
    fn kind(&self) -> Source {
        Source::Remotive
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            params.push(("category", category.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(("limit", limit.to_string()));
        }
        params
    }

    fn count_key(&self) -> &'static str {
        "job-count"
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn normalize(&self, raw: &RawJob, scraped_date: NaiveDate) -> NormalizedJob {
        normalize(raw, scraped_date)
    }
}

/// Remotive already ships display-ready values, so apart from the detected
/// tech stack this is a straight copy.
pub fn normalize(raw: &RawJob, scraped_date: NaiveDate) -> NormalizedJob {
    let title = text_or(raw, "title", "No Title");
    let description = text(raw, "description");
    let tech_stack = tech_stack(&format!("{title} {}", strip_html(&description)));

    NormalizedJob {
        title,
        company: text_or(raw, "company_name", "Unknown Company"),
        location: text_or(raw, "candidate_required_location", "Remote"),
        description,
        html_description: None,
        url: text(raw, "url"),
        source: Source::Remotive,
        posted_at: text(raw, "publication_date"),
        salary: text(raw, "salary"),
        job_type: text(raw, "job_type"),
        category: text(raw, "category"),
        company_logo: text(raw, "company_logo"),
        job_level: None,
        tech_stack,
        scraped_date,
    }
}
