use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    errors::AppError,
    ratings::{
        dto::{SubmitRatingRequest, SubmittedRating},
        repo::Rating,
        services,
    },
    state::AppState,
};

pub fn rating_routes() -> Router<AppState> {
    Router::new().route("/ratings", post(submit_rating))
}

/// Repeated submissions by the same user append new rows by design.
#[instrument(skip(state, identity))]
pub async fn submit_rating(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(payload): Json<SubmitRatingRequest>,
) -> Result<(StatusCode, Json<SubmittedRating>), AppError> {
    services::validate_rating(payload.rating)?;

    let rating = Rating::insert(&state.db, &identity.email, payload.rating).await?;

    info!(rating_id = rating.id, email = %identity.email, value = rating.rating, "rating submitted");
    Ok((
        StatusCode::CREATED,
        Json(SubmittedRating {
            id: rating.id,
            rating: rating.rating,
            submitted_at: rating.submitted_at,
        }),
    ))
}
