use serde::{Deserialize, Serialize};

/// Flat role enumeration, mapped to the `user_role` Postgres enum.
/// Only two roles exist; there is no permission hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Type of JWT: access or refresh.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT payload: the session identity plus standard claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,        // user ID
    pub name: String,    // full name
    pub email: String,   // natural external identifier
    pub role: Role,      // user or admin
    pub iat: usize,      // issued at (unix timestamp)
    pub exp: usize,      // expires at (unix timestamp)
    pub iss: String,     // issuer
    pub aud: String,     // audience
    pub kind: TokenKind, // token type
}

/// The identity established after a successful credential check,
/// carried by the session token and passed explicitly to handlers.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub user_id: i64,
    pub fullname: String,
    pub email: String,
    pub role: Role,
}

impl From<Claims> for Identity {
    fn from(c: Claims) -> Self {
        Self {
            user_id: c.sub,
            fullname: c.name,
            email: c.email,
            role: c.role,
        }
    }
}
