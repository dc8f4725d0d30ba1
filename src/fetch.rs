use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::App;
use crate::model::{RawJob, Source};
use crate::source::JobSource;

/// Longest slice of an error body kept for diagnostics.
const BODY_EXCERPT_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: Source,
        status: StatusCode,
        body: String,
    },
    #[error("{provider} response is not valid JSON: {error}")]
    Decode {
        provider: Source,
        #[source]
        error: serde_json::Error,
    },
    #[error("{provider} response has unexpected shape: {detail}")]
    Shape { provider: Source, detail: String },
    #[error("failed to reach {provider}: {error}")]
    Transport {
        provider: Source,
        #[source]
        error: reqwest::Error,
    },
}

impl FetchError {
    pub fn provider(&self) -> Source {
        match self {
            FetchError::Status { provider, .. }
            | FetchError::Decode { provider, .. }
            | FetchError::Shape { provider, .. }
            | FetchError::Transport { provider, .. } => *provider,
        }
    }
}

/// Listings from one successful request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedJobs {
    pub jobs: Vec<RawJob>,
    /// The provider's own total, when it sends one.
    pub reported_count: Option<u64>,
}

#[async_trait]
pub trait JobFetcher: Send + Sync {
    async fn fetch(&self, source: &dyn JobSource) -> Result<FetchedJobs, FetchError>;

    /// Best-effort variant: any failure is logged and reported as no listings.
    async fn fetch_or_empty(&self, source: &dyn JobSource) -> FetchedJobs {
        match self.fetch(source).await {
            Ok(fetched) => fetched,
            Err(err) => {
                warn!(source = %source.kind(), error = %err, "fetch failed; continuing with no jobs");
                FetchedJobs::default()
            }
        }
    }
}

#[derive(Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher").finish_non_exhaustive()
    }
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    pub fn from_config(app: &App) -> Result<Self, reqwest::Error> {
        Self::new(&app.user_agent, app.timeout())
    }

    pub fn build_request(&self, source: &dyn JobSource) -> Result<reqwest::Request, reqwest::Error> {
        self.http
            .get(source.endpoint().clone())
            .header("Accept", "application/json")
            .query(&source.query())
            .build()
    }
}

#[async_trait]
impl JobFetcher for HttpFetcher {
    #[instrument(skip_all, fields(source = %source.kind()))]
    async fn fetch(&self, source: &dyn JobSource) -> Result<FetchedJobs, FetchError> {
        let kind = source.kind();
        let transport = |error| FetchError::Transport { provider: kind, error };

        let request = self.build_request(source).map_err(transport)?;
        info!(url = %request.url(), "fetching jobs");

        let res = self.http.execute(request).await.map_err(transport)?;
        let status = res.status();
        info!(%status, "response received");

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(%status, "{} API error", kind);
            return Err(FetchError::Status {
                provider: kind,
                status,
                body: excerpt(&body),
            });
        }

        let body = res.text().await.map_err(transport)?;
        parse_listings(kind, source.count_key(), &body)
    }
}

/// Decode a listings response body and pull out the `jobs` array.
pub fn parse_listings(kind: Source, count_key: &str, body: &str) -> Result<FetchedJobs, FetchError> {
    let data: Value = serde_json::from_str(body)
        .map_err(|error| FetchError::Decode { provider: kind, error })?;

    let Value::Object(mut top) = data else {
        return Err(FetchError::Shape {
            provider: kind,
            detail: "expected a JSON object with a `jobs` key".into(),
        });
    };

    let reported_count = top.get(count_key).and_then(Value::as_u64);
    let jobs = match top.remove("jobs") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(FetchError::Shape {
                provider: kind,
                detail: "`jobs` is not an array".into(),
            })
        }
        None => {
            let keys: Vec<&str> = top.keys().map(String::as_str).collect();
            return Err(FetchError::Shape {
                provider: kind,
                detail: format!("missing `jobs` key (found: {})", keys.join(", ")),
            });
        }
    };

    let received = jobs.len();
    let jobs: Vec<RawJob> = jobs
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();
    if jobs.len() != received {
        warn!(
            source = %kind,
            skipped = received - jobs.len(),
            "skipping listings that are not JSON objects"
        );
    }

    info!(
        source = %kind,
        reported = reported_count.unwrap_or(jobs.len() as u64),
        received = jobs.len(),
        "found jobs"
    );
    Ok(FetchedJobs {
        jobs,
        reported_count,
    })
}

fn excerpt(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(BODY_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
