//! Half-up rounding shared by every score computation.

/// Round a non-negative value to the nearest integer, halves rounding up.
///
/// Negative and non-finite inputs clamp to zero; scores are never negative.
pub fn round_half_up(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value + 0.5).floor() as u32
}

/// `round_half_up(earned / max * 100)` in exact integer arithmetic.
///
/// # Panics
///
/// Panics if `max` is zero. A zero maximum is a bank configuration error
/// that [`QuestionBank::new`](crate::bank::QuestionBank::new) rejects.
pub fn percent_of(earned: u32, max: u32) -> u32 {
    assert!(max > 0, "percentage of a zero maximum");
    let earned = u64::from(earned);
    let max = u64::from(max);
    ((earned * 200 + max) / (max * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(4.5), 5);
        assert_eq!(round_half_up(4.49), 4);
        assert_eq!(round_half_up(21.0), 21);
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(-3.0), 0);
        assert_eq!(round_half_up(f64::NAN), 0);
    }

    #[test]
    fn test_percent_of_rounds_half_up() {
        assert_eq!(percent_of(45, 60), 75);
        assert_eq!(percent_of(1, 8), 13); // 12.5
        assert_eq!(percent_of(1, 3), 33); // 33.33
        assert_eq!(percent_of(2, 3), 67); // 66.67
        assert_eq!(percent_of(0, 7), 0);
        assert_eq!(percent_of(7, 7), 100);
    }

    #[test]
    #[should_panic]
    fn test_percent_of_zero_max_panics() {
        percent_of(1, 0);
    }
}
