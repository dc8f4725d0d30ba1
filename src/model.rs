use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A listing exactly as the provider returned it.
pub type RawJob = Map<String, Value>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Source {
    Jobicy,
    Remotive,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Jobicy => "Jobicy",
            Source::Remotive => "Remotive",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common record shape both providers are mapped into before persistence.
///
/// Field order is the serialized key order. `posted_at` keeps the provider's
/// string untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_description: Option<String>,
    pub url: String,
    pub source: Source,
    pub posted_at: String,
    pub salary: String,
    pub job_type: String,
    pub category: String,
    pub company_logo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_level: Option<String>,
    /// Technologies named in the title or description.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<String>,
    pub scraped_date: NaiveDate,
}
