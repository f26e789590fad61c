use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::jobs::dto::JobListing;

const JSEARCH_URL: &str = "https://jsearch.p.rapidapi.com/search";
const JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";

/// The provider returns whole result pages; only this many are displayed.
const MAX_LISTINGS: usize = 20;

#[derive(Debug, Error)]
pub enum JobSearchError {
    #[error("job search timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status})")]
    Api { status: u16 },
}

#[async_trait]
pub trait JobSearchClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<JobListing>, JobSearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<JSearchJob>,
}

#[derive(Debug, Deserialize)]
struct JSearchJob {
    job_title: Option<String>,
    employer_name: Option<String>,
    job_city: Option<String>,
    job_state: Option<String>,
    job_apply_link: Option<String>,
}

impl From<JSearchJob> for JobListing {
    fn from(job: JSearchJob) -> Self {
        Self {
            title: job.job_title,
            company: job.employer_name,
            location: join_location(job.job_city.as_deref(), job.job_state.as_deref()),
            link: job.job_apply_link,
        }
    }
}

/// "City, State" with missing parts dropped rather than leaving stray commas.
fn join_location(city: Option<&str>, state: Option<&str>) -> String {
    [city, state]
        .iter()
        .filter_map(|part| part.map(str::trim))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Production client for the JSearch RapidAPI endpoint.
#[derive(Clone)]
pub struct JSearchClient {
    client: Client,
    api_key: String,
}

impl JSearchClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(20))
                .build()
                .expect("failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl JobSearchClient for JSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<JobListing>, JobSearchError> {
        let response = self
            .client
            .get(JSEARCH_URL)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", JSEARCH_HOST)
            .query(&[("query", query), ("page", "1"), ("num_pages", "1")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    JobSearchError::Timeout
                } else {
                    JobSearchError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(JobSearchError::Api {
                status: status.as_u16(),
            });
        }

        let results: SearchResponse = response.json().await?;
        let listings: Vec<JobListing> = results
            .data
            .into_iter()
            .take(MAX_LISTINGS)
            .map(JobListing::from)
            .collect();

        debug!(query, count = listings.len(), "job search succeeded");
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_location_variants() {
        assert_eq!(join_location(Some("Austin"), Some("TX")), "Austin, TX");
        assert_eq!(join_location(Some("Austin"), None), "Austin");
        assert_eq!(join_location(None, Some("TX")), "TX");
        assert_eq!(join_location(None, None), "");
        assert_eq!(join_location(Some("  "), Some("TX")), "TX");
    }

    #[test]
    fn payload_reshapes_into_listings() {
        let raw = r#"{
            "status": "OK",
            "data": [
                {"job_title": "Rust Engineer", "employer_name": "Acme",
                 "job_city": "Berlin", "job_state": null,
                 "job_apply_link": "https://example.com/apply"},
                {"job_title": null, "employer_name": null}
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let listings: Vec<JobListing> = parsed.data.into_iter().map(JobListing::from).collect();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].title.as_deref(), Some("Rust Engineer"));
        assert_eq!(listings[0].location, "Berlin");
        assert_eq!(listings[1].location, "");
        assert!(listings[1].link.is_none());
    }

    #[test]
    fn missing_data_field_is_an_empty_result() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"status": "OK"}"#).unwrap();
        assert!(parsed.data.is_empty());
    }
}
