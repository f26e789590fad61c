use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::errors::AppError;

/// A single satisfaction rating. Rows are append-only: never updated,
/// never deleted, no deduplication per user.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Rating {
    pub id: i64,
    pub user_email: String,
    pub rating: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

/// Rating joined with the submitter's full name, for the admin dashboard.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RatingWithUser {
    pub id: i64,
    pub fullname: String,
    pub user_email: String,
    pub rating: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"))
}

impl Rating {
    /// Append one rating row stamped with the current time. A foreign-key
    /// violation surfaces as `UnknownUser`; no orphan row is ever inserted.
    pub async fn insert(db: &PgPool, user_email: &str, value: i32) -> Result<Rating, AppError> {
        let rating = sqlx::query_as::<_, Rating>(
            r#"
            INSERT INTO ratings (user_email, rating)
            VALUES ($1, $2)
            RETURNING id, user_email, rating, submitted_at
            "#,
        )
        .bind(user_email)
        .bind(value)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::UnknownUser(user_email.to_string())
            } else {
                AppError::Database(e)
            }
        })?;
        Ok(rating)
    }

    /// All ratings with resolved full names, most recent first.
    pub async fn list_all(db: &PgPool) -> Result<Vec<RatingWithUser>, AppError> {
        let rows = sqlx::query_as::<_, RatingWithUser>(
            r#"
            SELECT r.id, u.fullname, r.user_email, r.rating, r.submitted_at
            FROM ratings r
            JOIN users u ON r.user_email = u.email
            ORDER BY r.submitted_at DESC, r.id DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Every stored rating value, for on-demand aggregation.
    pub async fn values(db: &PgPool) -> Result<Vec<i32>, AppError> {
        let values = sqlx::query_scalar::<_, i32>(r#"SELECT rating FROM ratings"#)
            .fetch_all(db)
            .await?;
        Ok(values)
    }
}
