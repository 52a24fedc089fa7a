//! Completeness: the share of non-missing values in a column.

use crate::error::InferenceError;

/// Percentage of non-missing values, rounded to the nearest integer.
///
/// Ties round half to even: 12.5 becomes 12 and 37.5 becomes 38.
///
/// # Errors
///
/// Returns [`InferenceError::EmptyColumn`] if `values` is empty.
pub fn completeness<T>(values: &[Option<T>]) -> Result<u8, InferenceError> {
    let missing = values.iter().filter(|v| v.is_none()).count();
    percent_complete(missing, values.len())
}

/// Percentage of non-missing values given counts.
///
/// The ratio is computed in integer arithmetic, so equal inputs always give
/// equal outputs.
///
/// # Errors
///
/// Returns [`InferenceError::EmptyColumn`] if `total` is zero.
pub fn percent_complete(missing: usize, total: usize) -> Result<u8, InferenceError> {
    if total == 0 {
        return Err(InferenceError::EmptyColumn);
    }
    let present = total.saturating_sub(missing) as u128;
    let total = total as u128;

    let scaled = present * 100;
    let mut percent = scaled / total;
    let remainder = scaled % total;

    // Round half to even
    if remainder * 2 > total || (remainder * 2 == total && percent % 2 == 1) {
        percent += 1;
    }

    Ok(percent.min(100) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(completeness(&[Some(1), Some(2), Some(3)]), Ok(100));
        assert_eq!(completeness::<i32>(&[None, None]), Ok(0));
    }

    #[test]
    fn test_empty_column() {
        assert_eq!(completeness::<&str>(&[]), Err(InferenceError::EmptyColumn));
        assert_eq!(percent_complete(0, 0), Err(InferenceError::EmptyColumn));
    }

    #[test]
    fn test_rounding() {
        // 19 of 20 present
        assert_eq!(percent_complete(1, 20), Ok(95));
        // 2 of 3 present: 66.67
        assert_eq!(percent_complete(1, 3), Ok(67));
        // 1 of 3 present: 33.33
        assert_eq!(percent_complete(2, 3), Ok(33));
        // exactly half missing
        assert_eq!(percent_complete(2, 4), Ok(50));
    }

    #[test]
    fn test_ties_round_to_even() {
        // 1 of 8 present: 12.5
        assert_eq!(percent_complete(7, 8), Ok(12));
        // 3 of 8 present: 37.5
        assert_eq!(percent_complete(5, 8), Ok(38));
        // 1 of 200 present: 0.5
        assert_eq!(percent_complete(199, 200), Ok(0));
        // 199 of 200 present: 99.5
        assert_eq!(percent_complete(1, 200), Ok(100));
    }

    #[test]
    fn test_near_full() {
        // 999 of 1000 present: 99.9
        assert_eq!(percent_complete(1, 1000), Ok(100));
        // 994 of 1000 present: 99.4
        assert_eq!(percent_complete(6, 1000), Ok(99));
    }
}
