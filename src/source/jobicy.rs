use chrono::NaiveDate;
use reqwest::Url;

use super::enrich::{strip_html, tech_stack};
use super::format::{amount, joined, text, text_or};
use super::JobSource;
use crate::config::{self, ConfigError, JOBICY_MAX_COUNT};
use crate::model::{NormalizedJob, RawJob, Source};

/// Jobicy `/api/v2/remote-jobs`, filtered by page size and a free-text tag.
#[derive(Debug, Clone)]
pub struct Jobicy {
    endpoint: Url,
    count: u32,
    tag: Option<String>,
    output_file: String,
}

impl Jobicy {
    pub fn new(
        endpoint: Url,
        count: u32,
        tag: Option<String>,
        output_file: impl Into<String>,
    ) -> Self {
        Self {
            endpoint,
            count,
            tag,
            output_file: output_file.into(),
        }
    }

    pub fn from_config(cfg: &config::Jobicy) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(&cfg.endpoint)
            .map_err(|_| ConfigError::Invalid("jobicy.endpoint must be a valid URL"))?;
        Ok(Self::new(endpoint, cfg.count, cfg.tag.clone(), cfg.output_file.clone()))
    }
}

impl JobSource for Jobicy {
    fn kind(&self) -> Source {
        Source::Jobicy
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if (1..=JOBICY_MAX_COUNT).contains(&self.count) {
            params.push(("count", self.count.to_string()));
        }
        if let Some(tag) = self.tag.as_deref().filter(|t| !t.is_empty()) {
            params.push(("tag", tag.to_string()));
        }
        params
    }

    fn count_key(&self) -> &'static str {
        "jobCount"
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn normalize(&self, raw: &RawJob, scraped_date: NaiveDate) -> NormalizedJob {
        normalize(raw, scraped_date)
    }
}

pub fn normalize(raw: &RawJob, scraped_date: NaiveDate) -> NormalizedJob {
    let title = text_or(raw, "jobTitle", "No Title");
    let description = text(raw, "jobExcerpt");
    let html_description = text(raw, "jobDescription");
    let body = if html_description.is_empty() {
        &description
    } else {
        &html_description
    };
    let tech_stack = tech_stack(&format!("{title} {}", strip_html(body)));

    NormalizedJob {
        title,
        company: text_or(raw, "companyName", "Unknown Company"),
        location: text_or(raw, "jobGeo", "Remote"),
        description,
        html_description: Some(html_description),
        url: text(raw, "url"),
        source: Source::Jobicy,
        posted_at: text(raw, "pubDate"),
        salary: salary(raw),
        job_type: joined(raw, "jobType"),
        category: joined(raw, "jobIndustry"),
        company_logo: text(raw, "companyLogo"),
        job_level: Some(text(raw, "jobLevel")),
        tech_stack,
        scraped_date,
    }
}

/// `"USD 80,000 - 120,000"`, `"USD 80,000+"` or `"Up to USD 90,000"`;
/// empty when neither bound is set.
fn salary(raw: &RawJob) -> String {
    let min = amount(raw, "annualSalaryMin");
    let max = amount(raw, "annualSalaryMax");
    let currency = match raw.get("salaryCurrency").and_then(|v| v.as_str()) {
        Some(c) if !c.trim().is_empty() => c.trim(),
        _ => "USD",
    };

    match (min, max) {
        (Some(min), Some(max)) => format!("{currency} {min} - {max}"),
        (Some(min), None) => format!("{currency} {min}+"),
        (None, Some(max)) => format!("Up to {currency} {max}"),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn raw(value: Value) -> RawJob {
        value.as_object().cloned().unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn source(count: u32, tag: Option<&str>) -> Jobicy {
        Jobicy::new(
            Url::parse(config::JOBICY_ENDPOINT).unwrap(),
            count,
            tag.map(str::to_string),
            "jobicy_jobs.json",
        )
    }

    #[test]
    fn maps_full_record() {
        let job = normalize(
            &raw(json!({
                "id": 101,
                "url": "https://jobicy.com/jobs/101",
                "jobTitle": "Senior Rust Engineer",
                "companyName": "Ferrous Systems",
                "companyLogo": "https://jobicy.com/logo.png",
                "jobIndustry": ["Software Engineering", "DevOps"],
                "jobType": ["Full-time", "Remote"],
                "jobGeo": "Europe",
                "jobLevel": "Senior",
                "jobExcerpt": "Build things",
                "jobDescription": "<p>Build things</p>",
                "pubDate": "2024-03-08 12:00:00",
                "annualSalaryMin": 80000,
                "annualSalaryMax": 120000,
                "salaryCurrency": "EUR"
            })),
            day(),
        );

        assert_eq!(job.title, "Senior Rust Engineer");
        assert_eq!(job.company, "Ferrous Systems");
        assert_eq!(job.location, "Europe");
        assert_eq!(job.description, "Build things");
        assert_eq!(job.html_description.as_deref(), Some("<p>Build things</p>"));
        assert_eq!(job.url, "https://jobicy.com/jobs/101");
        assert_eq!(job.source, Source::Jobicy);
        assert_eq!(job.posted_at, "2024-03-08 12:00:00");
        assert_eq!(job.salary, "EUR 80,000 - 120,000");
        assert_eq!(job.job_type, "Full-time, Remote");
        assert_eq!(job.category, "Software Engineering, DevOps");
        assert_eq!(job.company_logo, "https://jobicy.com/logo.png");
        assert_eq!(job.job_level.as_deref(), Some("Senior"));
        assert_eq!(job.tech_stack, vec!["Rust"]);
        assert_eq!(job.scraped_date, day());
    }

    #[test]
    fn tech_stack_reads_title_and_stripped_description() {
        let job = normalize(
            &raw(json!({
                "jobTitle": "Platform Engineer",
                "jobExcerpt": "Java shop",
                "jobDescription": "<ul><li>Kubernetes</li><li>Terraform&nbsp;on AWS</li></ul>"
            })),
            day(),
        );
        assert_eq!(job.tech_stack, vec!["AWS", "Kubernetes"]);
        assert_eq!(
            job.html_description.as_deref(),
            Some("<ul><li>Kubernetes</li><li>Terraform&nbsp;on AWS</li></ul>")
        );

        let job = normalize(&raw(json!({ "jobTitle": "Writer", "jobExcerpt": "Python and Django" })), day());
        assert_eq!(job.tech_stack, vec!["Python", "Django"]);
    }

    #[test]
    fn defaults_for_empty_record() {
        let job = normalize(&RawJob::new(), day());
        assert_eq!(job.title, "No Title");
        assert_eq!(job.company, "Unknown Company");
        assert_eq!(job.location, "Remote");
        assert_eq!(job.description, "");
        assert_eq!(job.html_description.as_deref(), Some(""));
        assert_eq!(job.salary, "");
        assert_eq!(job.job_type, "");
        assert_eq!(job.category, "");
        assert_eq!(job.job_level.as_deref(), Some(""));
        assert!(job.tech_stack.is_empty());
    }

    #[test]
    fn null_title_uses_placeholder() {
        let job = normalize(&raw(json!({ "jobTitle": null, "jobGeo": null })), day());
        assert_eq!(job.title, "No Title");
        assert_eq!(job.location, "Remote");
    }

    #[test]
    fn salary_range_defaults_to_usd() {
        let job = normalize(
            &raw(json!({ "annualSalaryMin": 80000, "annualSalaryMax": 120000, "salaryCurrency": "USD" })),
            day(),
        );
        assert_eq!(job.salary, "USD 80,000 - 120,000");

        let job = normalize(&raw(json!({ "annualSalaryMin": 80000, "annualSalaryMax": 120000 })), day());
        assert_eq!(job.salary, "USD 80,000 - 120,000");
    }

    #[test]
    fn salary_only_min_or_only_max() {
        let job = normalize(&raw(json!({ "annualSalaryMin": 65000 })), day());
        assert_eq!(job.salary, "USD 65,000+");

        let job = normalize(&raw(json!({ "annualSalaryMax": 90000 })), day());
        assert_eq!(job.salary, "Up to USD 90,000");

        let job = normalize(
            &raw(json!({ "annualSalaryMin": 0, "annualSalaryMax": "90000", "salaryCurrency": "" })),
            day(),
        );
        assert_eq!(job.salary, "Up to USD 90,000");
    }

    #[test]
    fn scalar_job_type_passes_through() {
        let job = normalize(&raw(json!({ "jobType": "Contract", "jobIndustry": "Marketing" })), day());
        assert_eq!(job.job_type, "Contract");
        assert_eq!(job.category, "Marketing");
    }

    #[test]
    fn query_includes_count_and_tag() {
        assert_eq!(
            source(30, Some("remote")).query(),
            vec![("count", "30".to_string()), ("tag", "remote".to_string())]
        );
    }

    #[test]
    fn query_drops_out_of_range_count_and_empty_tag() {
        assert!(source(0, None).query().is_empty());
        assert!(source(51, Some("")).query().is_empty());
        assert_eq!(source(50, None).query(), vec![("count", "50".to_string())]);
    }
}
