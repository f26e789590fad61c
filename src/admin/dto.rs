use serde::Serialize;

use crate::ratings::repo::RatingWithUser;

/// Ratings view for the admin dashboard: the table plus the aggregate.
/// `average_rating` is `null` while no ratings exist.
#[derive(Debug, Serialize)]
pub struct RatingsOverview {
    pub average_rating: Option<f64>,
    pub ratings: Vec<RatingWithUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overview_reports_null_average() {
        let overview = RatingsOverview {
            average_rating: None,
            ratings: Vec::new(),
        };
        let json = serde_json::to_string(&overview).unwrap();
        assert!(json.contains("\"average_rating\":null"));
        assert!(json.contains("\"ratings\":[]"));
    }
}
