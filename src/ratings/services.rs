use crate::errors::AppError;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// A rating is an integer star count in [1,5]; the client maps its own UI
/// representation into this integer before calling.
pub fn validate_rating(value: i32) -> Result<(), AppError> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {value}"
        )))
    }
}

/// Arithmetic mean of all stored rating values, recomputed on demand.
/// Zero ratings is "no data", not an arithmetic error.
pub fn average(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_whole_range() {
        for v in 1..=5 {
            assert!(validate_rating(v).is_ok());
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-3).is_err());
    }

    #[test]
    fn average_of_five_four_three_is_four() {
        assert_eq!(average(&[5, 4, 3]), Some(4.0));
    }

    #[test]
    fn average_of_nothing_is_no_data() {
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn average_of_single_value() {
        assert_eq!(average(&[2]), Some(2.0));
    }
}
