use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    admin::dto::RatingsOverview,
    auth::{
        jwt::AdminUser,
        repo::{User, UserSummary},
    },
    errors::AppError,
    ratings::{repo::Rating, services},
    state::AppState,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/ratings", get(list_ratings))
}

/// Read-only projection of every registered user.
#[instrument(skip(state, _admin))]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let users = User::list(&state.db).await?;
    Ok(Json(users))
}

/// All submitted ratings, newest first, plus the running average.
#[instrument(skip(state, _admin))]
pub async fn list_ratings(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<RatingsOverview>, AppError> {
    let ratings = Rating::list_all(&state.db).await?;
    let values: Vec<i32> = ratings.iter().map(|r| r.rating).collect();
    Ok(Json(RatingsOverview {
        average_rating: services::average(&values),
        ratings,
    }))
}
