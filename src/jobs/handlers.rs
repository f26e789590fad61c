use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::jwt::AuthUser,
    errors::AppError,
    jobs::{
        client::{JobSearchClient, JobSearchError},
        dto::{JobQuery, JobSearchResponse},
    },
    state::AppState,
};

pub fn job_routes() -> Router<AppState> {
    Router::new().route("/jobs", get(search_jobs))
}

impl From<JobSearchError> for AppError {
    fn from(e: JobSearchError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

#[instrument(skip(state, _user))]
pub async fn search_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<JobQuery>,
) -> Result<Json<JobSearchResponse>, AppError> {
    let career = params.career.trim();
    if career.is_empty() {
        return Err(AppError::Validation(
            "Enter a career or job title to search".into(),
        ));
    }

    let query = format!("{} in {}", career, params.location.trim());
    let jobs = state.jobs.search(&query).await?;
    Ok(Json(JobSearchResponse { jobs }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_uses_the_fake_client() {
        let state = crate::state::AppState::fake();
        let jobs = state.jobs.search("Rust Engineer in Berlin").await.unwrap();
        assert!(jobs.is_empty());
    }
}
