//! Exact fixed-point folds over unscaled `i128` decimal values.
//!
//! Intermediates are computed in `I256` space so that any result which could
//! fit the widest supported decimal storage is computed without loss; the
//! precision bound is checked exactly on the final value.

use ethnum::I256;
use strata_array::{Array, PrimitiveArray};
use strata_error::{StrataError, StrataResult};

/// Digits needed by a value that does not fit the `I256` intermediate; more
/// than any supported decimal can hold.
const WIDENED_DIGITS: usize = 77;

/// Sum at the input's own scale.
///
/// `max_precision` is the digit bound of the chosen output storage.
pub fn sum(array: &PrimitiveArray<i128>, max_precision: usize) -> StrataResult<Option<i128>> {
    let mut acc = I256::ZERO;
    let mut seen = false;
    for v in array.non_null_values_iter() {
        acc += I256::new(v);
        seen = true;
    }
    if !seen {
        return Ok(None);
    }
    check_precision("sum", acc, max_precision).map(Some)
}

/// Product; the result scale is `non_null_count * scale`.
///
/// The scale bound is checked before accumulating (it only depends on the
/// non-null count), the value bound exactly at the end.
pub fn product(
    array: &PrimitiveArray<i128>,
    scale: usize,
    max_precision: usize,
) -> StrataResult<Option<(i128, usize)>> {
    let n = array.len() - array.null_count();
    if n == 0 {
        return Ok(None);
    }
    let result_scale = n * scale;
    if result_scale > max_precision {
        return Err(StrataError::DecimalOverflow {
            op: "product".into(),
            requested: result_scale,
            max_supported: max_precision,
        });
    }
    // A single zero forces the product to zero; checking up front keeps the
    // I256 accumulation free of spurious intermediate overflow.
    if array.non_null_values_iter().any(|v| v == 0) {
        return Ok(Some((0, result_scale)));
    }
    let mut acc = I256::ONE;
    for v in array.non_null_values_iter() {
        acc = acc
            .checked_mul(I256::new(v))
            .ok_or_else(|| StrataError::DecimalOverflow {
                op: "product".into(),
                requested: WIDENED_DIGITS,
                max_supported: max_precision,
            })?;
    }
    check_precision("product", acc, max_precision).map(|v| Some((v, result_scale)))
}

/// Sum of squares; the result scale is `2 * scale`.
pub fn sum_of_squares(
    array: &PrimitiveArray<i128>,
    scale: usize,
    max_precision: usize,
) -> StrataResult<Option<(i128, usize)>> {
    if array.len() == array.null_count() {
        return Ok(None);
    }
    let result_scale = 2 * scale;
    if result_scale > max_precision {
        return Err(StrataError::DecimalOverflow {
            op: "sum_of_squares".into(),
            requested: result_scale,
            max_supported: max_precision,
        });
    }
    let mut acc = I256::ZERO;
    for v in array.non_null_values_iter() {
        let v = I256::new(v);
        // i128 * i128 always fits I256.
        acc = acc
            .checked_add(v * v)
            .ok_or_else(|| StrataError::DecimalOverflow {
                op: "sum_of_squares".into(),
                requested: WIDENED_DIGITS,
                max_supported: max_precision,
            })?;
    }
    check_precision("sum_of_squares", acc, max_precision).map(|v| Some((v, result_scale)))
}

pub fn min(array: &PrimitiveArray<i128>) -> Option<i128> {
    array.non_null_values_iter().reduce(Ord::min)
}

pub fn max(array: &PrimitiveArray<i128>) -> Option<i128> {
    array.non_null_values_iter().reduce(Ord::max)
}

fn check_precision(op: &'static str, value: I256, max_precision: usize) -> StrataResult<i128> {
    // max_precision <= 38, so the bound itself fits an i128.
    let bound = I256::new(10i128.pow(max_precision as u32));
    if value <= -bound || value >= bound {
        return Err(StrataError::DecimalOverflow {
            op: op.into(),
            requested: digits(value),
            max_supported: max_precision,
        });
    }
    Ok(value.as_i128())
}

fn digits(value: I256) -> usize {
    let mut value = if value < I256::ZERO { -value } else { value };
    let ten = I256::new(10);
    let mut digits = 1;
    while value >= ten {
        value /= ten;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unscaled values for [1.23, 4.56, 7.89] at scale 2.
    fn sample() -> PrimitiveArray<i128> {
        PrimitiveArray::from_vec(vec![123, 456, 789])
    }

    #[test]
    fn sum_keeps_the_input_scale() {
        // 1.23 + 4.56 + 7.89 == 13.68
        assert_eq!(sum(&sample(), 38).unwrap(), Some(1368));
    }

    #[test]
    fn product_scale_grows_with_the_element_count() {
        // 1.23 * 4.56 * 7.89 == 44.2545432 at scale 6.
        let (value, scale) = product(&sample(), 2, 38).unwrap().unwrap();
        assert_eq!(scale, 6);
        assert_eq!(value, 123i128 * 456 * 789);
    }

    #[test]
    fn product_scale_overflow_is_an_error() {
        // 3 elements at scale 4 need scale 12, beyond a 9-digit decimal.
        let err = product(&sample(), 4, 9).unwrap_err();
        assert!(matches!(
            err,
            StrataError::DecimalOverflow {
                requested: 12,
                max_supported: 9,
                ..
            }
        ));
    }

    #[test]
    fn product_with_zero_short_circuits() {
        let array = PrimitiveArray::from_vec(vec![i128::MAX / 2, i128::MAX / 3, 0]);
        assert_eq!(product(&array, 0, 38).unwrap(), Some((0, 0)));
    }

    #[test]
    fn value_overflow_is_checked_exactly() {
        let array = PrimitiveArray::from_vec(vec![10i128.pow(20), 10i128.pow(20)]);
        let err = product(&array, 0, 38).unwrap_err();
        assert!(matches!(
            err,
            StrataError::DecimalOverflow {
                requested: 41,
                max_supported: 38,
                ..
            }
        ));
    }

    #[test]
    fn sum_of_squares_doubles_the_scale() {
        // 1.23^2 + 4.56^2 + 7.89^2 == 71.6466 at scale 4.
        let (value, scale) = sum_of_squares(&sample(), 2, 38).unwrap().unwrap();
        assert_eq!(scale, 4);
        assert_eq!(value, 123i128 * 123 + 456 * 456 + 789 * 789);
    }

    #[test]
    fn all_null_input_is_null() {
        let array = PrimitiveArray::from(vec![None::<i128>, None]);
        assert_eq!(sum(&array, 38).unwrap(), None);
        assert_eq!(product(&array, 2, 38).unwrap(), None);
        assert_eq!(sum_of_squares(&array, 2, 38).unwrap(), None);
        assert_eq!(min(&array), None);
    }
}
