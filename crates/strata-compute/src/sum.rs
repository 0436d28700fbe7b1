//! Sum, product and sum-of-squares folds.
//!
//! Integer inputs accumulate in a 64-bit integer regardless of input width;
//! sums of narrower inputs therefore cannot overflow in intermediates, while
//! products may wrap around at the accumulator's fixed width. Float inputs
//! accumulate in their own width, left-to-right.

use num_traits::{AsPrimitive, Float, One, WrappingAdd, WrappingMul, Zero};
use strata_array::{Array, NativeType, PrimitiveArray};

fn fold_non_null<T, A, F>(array: &PrimitiveArray<T>, init: A, f: F) -> Option<A>
where
    T: NativeType,
    F: FnMut(A, T) -> A,
{
    if array.len() == array.null_count() {
        return None;
    }
    if array.null_count() == 0 {
        Some(array.values_iter().fold(init, f))
    } else {
        Some(array.non_null_values_iter().fold(init, f))
    }
}

pub fn wrapping_sum<T, A>(array: &PrimitiveArray<T>) -> Option<A>
where
    T: NativeType + AsPrimitive<A>,
    A: NativeType + WrappingAdd + Zero,
{
    fold_non_null(array, A::zero(), |acc, v| acc.wrapping_add(&v.as_()))
}

pub fn wrapping_product<T, A>(array: &PrimitiveArray<T>) -> Option<A>
where
    T: NativeType + AsPrimitive<A>,
    A: NativeType + WrappingMul + One,
{
    fold_non_null(array, A::one(), |acc, v| acc.wrapping_mul(&v.as_()))
}

pub fn wrapping_sum_of_squares<T, A>(array: &PrimitiveArray<T>) -> Option<A>
where
    T: NativeType + AsPrimitive<A>,
    A: NativeType + WrappingAdd + WrappingMul + Zero,
{
    fold_non_null(array, A::zero(), |acc, v| {
        let v: A = v.as_();
        acc.wrapping_add(&v.wrapping_mul(&v))
    })
}

pub fn float_sum<T>(array: &PrimitiveArray<T>) -> Option<T>
where
    T: NativeType + Float,
{
    fold_non_null(array, T::zero(), |acc, v| acc + v)
}

pub fn float_product<T>(array: &PrimitiveArray<T>) -> Option<T>
where
    T: NativeType + Float,
{
    fold_non_null(array, T::one(), |acc, v| acc * v)
}

pub fn float_sum_of_squares<T>(array: &PrimitiveArray<T>) -> Option<T>
where
    T: NativeType + Float,
{
    fold_non_null(array, T::zero(), |acc, v| acc + v * v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_ints_widen_to_64_bit() {
        // 200 * 127 overflows i8 but not the i64 accumulator.
        let array = PrimitiveArray::from_vec(vec![i8::MAX; 200]);
        assert_eq!(wrapping_sum::<i8, i64>(&array), Some(200 * 127));
        assert_eq!(
            wrapping_sum_of_squares::<i8, i64>(&array),
            Some(200 * 127 * 127)
        );
    }

    #[test]
    fn product_wraps_at_accumulator_width() {
        let array = PrimitiveArray::from_vec(vec![2i64; 70]);
        let expected = 2i64.wrapping_pow(70);
        assert_eq!(wrapping_product::<i64, i64>(&array), Some(expected));
    }

    #[test]
    fn nulls_are_skipped() {
        let array = PrimitiveArray::from(vec![Some(1i32), None, Some(2), None, Some(3)]);
        assert_eq!(wrapping_sum::<i32, i64>(&array), Some(6));
        assert_eq!(wrapping_product::<i32, i64>(&array), Some(6));
    }

    #[test]
    fn all_null_and_empty_yield_none() {
        let all_null = PrimitiveArray::from(vec![None::<i64>, None]);
        assert_eq!(wrapping_sum::<i64, i64>(&all_null), None);
        let empty = PrimitiveArray::from_vec(Vec::<f64>::new());
        assert_eq!(float_sum(&empty), None);
    }

    #[test]
    fn float_fold_is_left_to_right() {
        let array = PrimitiveArray::from_vec(vec![0.1f64, 0.2, 0.3]);
        assert_eq!(float_sum(&array), Some(0.1f64 + 0.2 + 0.3));
        assert_eq!(float_product(&array), Some(0.1f64 * 0.2 * 0.3));
        assert_eq!(
            float_sum_of_squares(&array),
            Some(0.1f64 * 0.1 + 0.2 * 0.2 + 0.3 * 0.3)
        );
    }
}
