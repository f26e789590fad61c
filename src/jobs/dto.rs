use serde::{Deserialize, Serialize};

/// Query string for the job search endpoint.
#[derive(Debug, Deserialize)]
pub struct JobQuery {
    pub career: String,
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_location() -> String {
    "USA".into()
}

/// One job posting, reshaped from the provider's response for display.
#[derive(Debug, Clone, Serialize)]
pub struct JobListing {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: String,
    pub link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<JobListing>,
}
