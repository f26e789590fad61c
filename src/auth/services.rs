use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password, DUMMY_HASH};
use crate::auth::repo::User;
use crate::config::AdminSeedConfig;
use crate::errors::AppError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Register a new account. The password is hashed before storage and never
/// persisted or logged in plaintext. Emails are compared case-sensitively.
pub async fn register_user(
    db: &PgPool,
    fullname: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let fullname = fullname.trim();
    let email = email.trim();

    if fullname.is_empty() {
        return Err(AppError::Validation("Full name must not be empty".into()));
    }
    if !is_valid_email(email) {
        warn!(%email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    if password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }

    let hash = hash_password(password)?;
    let user = User::create(db, fullname, email, &hash).await?;
    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Check submitted credentials against the stored digest. Returns the full
/// user row on an exact match, `None` otherwise. The unknown-email path
/// still performs one argon2 verification against a dummy hash so the two
/// failure modes are not trivially timing-distinguishable.
pub async fn verify_credentials(
    db: &PgPool,
    email: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    match User::find_by_email(db, email.trim()).await? {
        Some(user) => {
            if verify_password(password, &user.password_hash)? {
                Ok(Some(user))
            } else {
                warn!(%email, user_id = user.id, "login invalid password");
                Ok(None)
            }
        }
        None => {
            let _ = verify_password(password, &DUMMY_HASH);
            warn!(%email, "login unknown email");
            Ok(None)
        }
    }
}

/// Ensure the reserved admin identity exists. The hash is only computed when
/// the row is actually missing; `insert_admin` stays conflict-safe either way.
pub async fn seed_admin(db: &PgPool, admin: &AdminSeedConfig) -> Result<(), AppError> {
    if User::find_by_email(db, &admin.email).await?.is_some() {
        return Ok(());
    }
    let hash = hash_password(&admin.password)?;
    User::insert_admin(db, "Admin User", &admin.email, &hash).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("alice@x.com"));
        assert!(is_valid_email("admin@example.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spaces in@x.com"));
        assert!(!is_valid_email("missing@tld"));
    }
}
