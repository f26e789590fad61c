use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Request body for submitting a rating.
#[derive(Debug, Deserialize)]
pub struct SubmitRatingRequest {
    pub rating: i32,
}

/// Response after a successful submission.
#[derive(Debug, Serialize)]
pub struct SubmittedRating {
    pub id: i64,
    pub rating: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}
