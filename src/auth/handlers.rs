use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, RefreshRequest, RegisterRequest},
        jwt::{AuthUser, JwtKeys},
        repo::User,
        services,
    },
    errors::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn token_pair(state: &AppState, user: &User) -> Result<AuthResponse, AppError> {
    let keys = JwtKeys::from_ref(state);
    Ok(AuthResponse {
        access_token: keys.sign_access(user)?,
        refresh_token: keys.sign_refresh(user)?,
        user: PublicUser::from(user),
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = services::register_user(
        &state.db,
        &payload.fullname,
        &payload.email,
        &payload.password,
    )
    .await?;

    Ok(Json(token_pair(&state, &user)?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = services::verify_credentials(&state.db, &payload.email, &payload.password)
        .await?
        .ok_or(AppError::Unauthorized)?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(token_pair(&state, &user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|_| AppError::Unauthorized)?;

    // Reload so a stale token never resurrects identity fields on its own.
    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(token_pair(&state, &user)?))
}

#[instrument(skip(identity))]
pub async fn get_me(AuthUser(identity): AuthUser) -> Json<PublicUser> {
    Json(PublicUser::from(identity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::Role;

    #[test]
    fn public_user_serialization() {
        let user = PublicUser {
            id: 1,
            fullname: "Alice".into(),
            email: "alice@x.com".into(),
            role: Role::User,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("alice@x.com"));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[tokio::test]
    async fn token_pair_issues_both_tokens() {
        let state = crate::state::AppState::fake();
        let user = User {
            id: 9,
            fullname: "Admin User".into(),
            email: "admin@example.com".into(),
            password_hash: "irrelevant".into(),
            role: Role::Admin,
        };
        let response = token_pair(&state, &user).expect("token pair");
        assert_ne!(response.access_token, response.refresh_token);
        assert_eq!(response.user.email, "admin@example.com");

        let keys = JwtKeys::from_ref(&state);
        let claims = keys.verify(&response.access_token).expect("access verifies");
        assert_eq!(claims.role, Role::Admin);
        assert!(keys.verify_refresh(&response.refresh_token).is_ok());
    }
}
