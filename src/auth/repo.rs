use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::auth::claims::Role;
use crate::errors::AppError;

/// User record in the database. Rows are created at sign-up and never
/// updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 hash, not exposed in JSON
    pub role: Role,
}

/// Admin-facing projection: everything except the password hash.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub role: Role,
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, password_hash, role
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by primary key.
    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, fullname, email, password_hash, role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password. A violated email uniqueness
    /// constraint surfaces as `DuplicateEmail`, not a generic storage error.
    pub async fn create(
        db: &PgPool,
        fullname: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (fullname, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, fullname, email, password_hash, role
            "#,
        )
        .bind(fullname)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateEmail
            } else {
                AppError::Database(e)
            }
        })?;
        Ok(user)
    }

    /// Full scan of registered users, ordered by id. No pagination; the
    /// user table stays small in this system.
    pub async fn list(db: &PgPool) -> Result<Vec<UserSummary>, AppError> {
        let users = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, fullname, email, role
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// Insert the reserved admin identity if absent. Safe to call on every
    /// process start; `ON CONFLICT DO NOTHING` keeps double boots harmless.
    pub async fn insert_admin(
        db: &PgPool,
        fullname: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (fullname, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(fullname)
        .bind(email)
        .bind(password_hash)
        .bind(Role::Admin)
        .execute(db)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_json_never_contains_the_password_hash() {
        let user = User {
            id: 1,
            fullname: "Alice".into(),
            email: "alice@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            role: Role::User,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("alice@x.com"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }
}
