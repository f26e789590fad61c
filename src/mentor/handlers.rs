use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::{
    auth::jwt::AuthUser,
    errors::AppError,
    mentor::{
        client::{MentorClient, MentorError},
        dto::{
            GuidanceRequest, GuidanceResponse, RoadmapRequest, SuggestFieldsRequest,
            SuggestFieldsResponse,
        },
    },
    state::AppState,
};

use super::dto::Roadmap;

pub fn mentor_routes() -> Router<AppState> {
    Router::new()
        .route("/mentor/fields", post(suggest_fields))
        .route("/mentor/guidance", post(career_guidance))
        .route("/mentor/roadmap", post(career_roadmap))
}

impl From<MentorError> for AppError {
    fn from(e: MentorError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

#[instrument(skip(state, _user, payload))]
pub async fn suggest_fields(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<SuggestFieldsRequest>,
) -> Result<Json<SuggestFieldsResponse>, AppError> {
    let interests = payload.interests.trim();
    if interests.is_empty() {
        return Err(AppError::Validation(
            "Tell me about your interests first".into(),
        ));
    }
    let fields = state.mentor.suggest_fields(interests).await?;
    Ok(Json(SuggestFieldsResponse { fields }))
}

#[instrument(skip(state, _user, payload))]
pub async fn career_guidance(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<GuidanceRequest>,
) -> Result<Json<GuidanceResponse>, AppError> {
    if payload.field.trim().is_empty() {
        return Err(AppError::Validation("Choose a career field first".into()));
    }
    let guidance = state
        .mentor
        .career_guidance(payload.interests.trim(), payload.field.trim())
        .await?;
    Ok(Json(GuidanceResponse { guidance }))
}

#[instrument(skip(state, _user, payload))]
pub async fn career_roadmap(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<RoadmapRequest>,
) -> Result<Json<Roadmap>, AppError> {
    if payload.field.trim().is_empty() {
        return Err(AppError::Validation("Choose a career field first".into()));
    }
    let roadmap = state.mentor.career_roadmap(payload.field.trim()).await?;
    Ok(Json(roadmap))
}
