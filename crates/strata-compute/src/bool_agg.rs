//! Boolean any/all and true-count folds.
//!
//! All three return `None` when the column holds no non-null value: with no
//! non-null evidence there is nothing to assert.

use strata_array::{Array, BooleanArray};

pub fn any(array: &BooleanArray) -> Option<bool> {
    if array.len() - array.null_count() == 0 {
        return None;
    }
    if array.null_count() == 0 {
        Some(array.values().set_bits() > 0)
    } else {
        Some(array.non_null_values_iter().any(|v| v))
    }
}

pub fn all(array: &BooleanArray) -> Option<bool> {
    if array.len() - array.null_count() == 0 {
        return None;
    }
    if array.null_count() == 0 {
        Some(array.values().unset_bits() == 0)
    } else {
        Some(array.non_null_values_iter().all(|v| v))
    }
}

/// Number of `true` values among the non-null positions.
pub fn true_count(array: &BooleanArray) -> Option<i64> {
    if array.len() - array.null_count() == 0 {
        return None;
    }
    if array.null_count() == 0 {
        Some(array.values().set_bits() as i64)
    } else {
        Some(array.non_null_values_iter().filter(|v| *v).count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_all_over_mixed_values() {
        let array = BooleanArray::from_slice(&[false, true, false]);
        assert_eq!(any(&array), Some(true));
        assert_eq!(all(&array), Some(false));
        assert_eq!(true_count(&array), Some(1));
    }

    #[test]
    fn nulls_contribute_nothing() {
        let array = BooleanArray::from(vec![Some(true), None, Some(true)]);
        assert_eq!(all(&array), Some(true));
        assert_eq!(true_count(&array), Some(2));
    }

    #[test]
    fn all_null_input_is_null() {
        let array = BooleanArray::from(vec![None, None, None]);
        assert_eq!(any(&array), None);
        assert_eq!(all(&array), None);
        assert_eq!(true_count(&array), None);
    }

    #[test]
    fn empty_input_is_null() {
        let array = BooleanArray::from_slice(&[]);
        assert_eq!(any(&array), None);
        assert_eq!(all(&array), None);
    }
}
