//! Min/max folds over every ordered column kind.
//!
//! Floats use a NaN-ignoring ordering so a stray NaN does not poison the
//! result. Ties keep the first-encountered value.

use strata_array::{Array, BooleanArray, NativeType, PrimitiveArray, Utf8Array};

/// Total-ish ordering used by the min/max kernels.
pub trait MinMax: Sized {
    fn min_ignore_nan(self, other: Self) -> Self;
    fn max_ignore_nan(self, other: Self) -> Self;
}

macro_rules! impl_min_max_ord {
    ($($t:ty),+) => {
        $(impl MinMax for $t {
            #[inline(always)]
            fn min_ignore_nan(self, other: Self) -> Self {
                Ord::min(self, other)
            }
            #[inline(always)]
            fn max_ignore_nan(self, other: Self) -> Self {
                Ord::max(self, other)
            }
        })+
    };
}

impl_min_max_ord!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

macro_rules! impl_min_max_float {
    ($($t:ty),+) => {
        $(impl MinMax for $t {
            #[inline(always)]
            fn min_ignore_nan(self, other: Self) -> Self {
                if other.is_nan() || self < other { self } else { other }
            }
            #[inline(always)]
            fn max_ignore_nan(self, other: Self) -> Self {
                if other.is_nan() || self > other { self } else { other }
            }
        })+
    };
}

impl_min_max_float!(f32, f64);

fn reduce_vals<T, F>(array: &PrimitiveArray<T>, f: F) -> Option<T>
where
    T: NativeType,
    F: Fn(T, T) -> T,
{
    if array.null_count() == 0 {
        array.values_iter().reduce(f)
    } else {
        array.non_null_values_iter().reduce(f)
    }
}

pub fn min_primitive<T: NativeType + MinMax>(array: &PrimitiveArray<T>) -> Option<T> {
    reduce_vals(array, MinMax::min_ignore_nan)
}

pub fn max_primitive<T: NativeType + MinMax>(array: &PrimitiveArray<T>) -> Option<T> {
    reduce_vals(array, MinMax::max_ignore_nan)
}

pub fn min_boolean(array: &BooleanArray) -> Option<bool> {
    if array.len() - array.null_count() == 0 {
        return None;
    }
    if array.null_count() == 0 {
        // min over bools is "are all values set".
        Some(array.values().unset_bits() == 0)
    } else {
        array.non_null_values_iter().reduce(|a, b| a & b)
    }
}

pub fn max_boolean(array: &BooleanArray) -> Option<bool> {
    if array.len() - array.null_count() == 0 {
        return None;
    }
    if array.null_count() == 0 {
        Some(array.values().set_bits() > 0)
    } else {
        array.non_null_values_iter().reduce(|a, b| a | b)
    }
}

pub fn min_str(array: &Utf8Array) -> Option<&str> {
    array.non_null_values_iter().reduce(Ord::min)
}

pub fn max_str(array: &Utf8Array) -> Option<&str> {
    array.non_null_values_iter().reduce(Ord::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_min_max_skip_nulls() {
        let array = PrimitiveArray::from(vec![Some(3i64), None, Some(-7), Some(11)]);
        assert_eq!(min_primitive(&array), Some(-7));
        assert_eq!(max_primitive(&array), Some(11));
    }

    #[test]
    fn float_min_max_ignore_nan() {
        let array = PrimitiveArray::from_vec(vec![1.5f64, f64::NAN, -2.5]);
        assert_eq!(min_primitive(&array), Some(-2.5));
        assert_eq!(max_primitive(&array), Some(1.5));
    }

    #[test]
    fn boolean_min_max() {
        let mixed = BooleanArray::from_slice(&[true, false, true]);
        assert_eq!(min_boolean(&mixed), Some(false));
        assert_eq!(max_boolean(&mixed), Some(true));

        let all_null = BooleanArray::from(vec![None, None]);
        assert_eq!(min_boolean(&all_null), None);
        assert_eq!(max_boolean(&all_null), None);
    }

    #[test]
    fn string_min_max_is_lexicographic() {
        let array = Utf8Array::from(vec![Some("pear"), None, Some("apple"), Some("zucchini")]);
        assert_eq!(min_str(&array), Some("apple"));
        assert_eq!(max_str(&array), Some("zucchini"));
    }
}
