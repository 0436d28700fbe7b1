//! Per-column reduction dispatch.

mod registry;

pub use registry::{AccumulatorSpec, ReductionOp, check, compatible};
use strata_array::{Array, Utf8Array};
use strata_compute::{bool_agg, decimal, min_max, sum};
use strata_error::StrataResult;

use crate::column::{Column, ColumnData};
use crate::datatypes::{DataType, DecimalSize};
use crate::scalar::{AnyValue, Scalar};

/// Reduce one column to a scalar.
///
/// The gate runs first: an operation undefined for the column's type
/// category fails before any data is read. A fold with zero non-null
/// contributions yields a null scalar tagged with the accumulator's output
/// type. `output` optionally requests a different result type: a final cast
/// for primitive results, the storage bound for decimal results.
pub fn reduce(column: &Column, op: ReductionOp, output: Option<&DataType>) -> StrataResult<Scalar> {
    let spec = check(op, column.dtype())?;
    let scalar = match op {
        ReductionOp::Sum => sum_column(column, &spec, output)?,
        ReductionOp::Product => product_column(column, &spec, output)?,
        ReductionOp::SumOfSquares => sum_of_squares_column(column, &spec, output)?,
        ReductionOp::Min => extrema_column(column, &spec, true)?,
        ReductionOp::Max => extrema_column(column, &spec, false)?,
        ReductionOp::Any | ReductionOp::All => bool_column(column, op, &spec)?,
    };
    match output {
        Some(dtype) if scalar.dtype() != dtype && !matches!(dtype, DataType::Decimal(..)) => {
            scalar.cast(dtype)
        },
        _ => Ok(scalar),
    }
}

/// Precision bound and storage size of a decimal result, defaulting to the
/// widest supported decimal.
fn decimal_output_bound(requested: Option<&DataType>) -> (usize, DecimalSize) {
    match requested {
        Some(DataType::Decimal(precision, _, size)) => (*precision, *size),
        _ => (
            DecimalSize::Size128.max_precision(),
            DecimalSize::Size128,
        ),
    }
}

fn finish(output: DataType, value: Option<AnyValue>) -> Scalar {
    match value {
        Some(value) => Scalar::new(output, value),
        None => Scalar::null(output),
    }
}

fn sum_column(
    column: &Column,
    spec: &AccumulatorSpec,
    requested: Option<&DataType>,
) -> StrataResult<Scalar> {
    use ColumnData as D;
    let value = match column.data() {
        D::Int8(a) => sum::wrapping_sum::<_, i64>(a).map(AnyValue::Int64),
        D::Int16(a) => sum::wrapping_sum::<_, i64>(a).map(AnyValue::Int64),
        D::Int32(a) => sum::wrapping_sum::<_, i64>(a).map(AnyValue::Int64),
        D::Int64(a) => sum::wrapping_sum::<_, i64>(a).map(AnyValue::Int64),
        D::UInt8(a) => sum::wrapping_sum::<_, u64>(a).map(AnyValue::UInt64),
        D::UInt16(a) => sum::wrapping_sum::<_, u64>(a).map(AnyValue::UInt64),
        D::UInt32(a) => sum::wrapping_sum::<_, u64>(a).map(AnyValue::UInt64),
        D::UInt64(a) => sum::wrapping_sum::<_, u64>(a).map(AnyValue::UInt64),
        D::Float32(a) => sum::float_sum(a).map(AnyValue::Float32),
        D::Float64(a) => sum::float_sum(a).map(AnyValue::Float64),
        D::Boolean(a) => bool_agg::true_count(a).map(AnyValue::Int64),
        D::String(a) => concat_strings(a),
        D::Decimal(a) => {
            let DataType::Decimal(_, scale, _) = column.dtype() else {
                unreachable!()
            };
            let (max_precision, size) = decimal_output_bound(requested);
            let output = DataType::decimal(max_precision, *scale, size)?;
            let value = decimal::sum(a, max_precision)?.map(|v| AnyValue::Decimal(v, *scale));
            return Ok(finish(output, value));
        },
        _ => unreachable!("gate accepted sum for {}", column.dtype()),
    };
    Ok(finish(spec.output.clone(), value))
}

fn product_column(
    column: &Column,
    spec: &AccumulatorSpec,
    requested: Option<&DataType>,
) -> StrataResult<Scalar> {
    use ColumnData as D;
    let value = match column.data() {
        D::Int8(a) => sum::wrapping_product::<_, i64>(a).map(AnyValue::Int64),
        D::Int16(a) => sum::wrapping_product::<_, i64>(a).map(AnyValue::Int64),
        D::Int32(a) => sum::wrapping_product::<_, i64>(a).map(AnyValue::Int64),
        D::Int64(a) => sum::wrapping_product::<_, i64>(a).map(AnyValue::Int64),
        D::UInt8(a) => sum::wrapping_product::<_, u64>(a).map(AnyValue::UInt64),
        D::UInt16(a) => sum::wrapping_product::<_, u64>(a).map(AnyValue::UInt64),
        D::UInt32(a) => sum::wrapping_product::<_, u64>(a).map(AnyValue::UInt64),
        D::UInt64(a) => sum::wrapping_product::<_, u64>(a).map(AnyValue::UInt64),
        D::Float32(a) => sum::float_product(a).map(AnyValue::Float32),
        D::Float64(a) => sum::float_product(a).map(AnyValue::Float64),
        D::Decimal(a) => {
            let DataType::Decimal(_, scale, _) = column.dtype() else {
                unreachable!()
            };
            let (max_precision, size) = decimal_output_bound(requested);
            return Ok(match decimal::product(a, *scale, max_precision)? {
                Some((v, result_scale)) => Scalar::new(
                    DataType::decimal(max_precision, result_scale, size)?,
                    AnyValue::Decimal(v, result_scale),
                ),
                None => Scalar::null(DataType::decimal(max_precision, *scale, size)?),
            });
        },
        _ => unreachable!("gate accepted product for {}", column.dtype()),
    };
    Ok(finish(spec.output.clone(), value))
}

fn sum_of_squares_column(
    column: &Column,
    spec: &AccumulatorSpec,
    requested: Option<&DataType>,
) -> StrataResult<Scalar> {
    use ColumnData as D;
    let value = match column.data() {
        D::Int8(a) => sum::wrapping_sum_of_squares::<_, i64>(a).map(AnyValue::Int64),
        D::Int16(a) => sum::wrapping_sum_of_squares::<_, i64>(a).map(AnyValue::Int64),
        D::Int32(a) => sum::wrapping_sum_of_squares::<_, i64>(a).map(AnyValue::Int64),
        D::Int64(a) => sum::wrapping_sum_of_squares::<_, i64>(a).map(AnyValue::Int64),
        D::UInt8(a) => sum::wrapping_sum_of_squares::<_, u64>(a).map(AnyValue::UInt64),
        D::UInt16(a) => sum::wrapping_sum_of_squares::<_, u64>(a).map(AnyValue::UInt64),
        D::UInt32(a) => sum::wrapping_sum_of_squares::<_, u64>(a).map(AnyValue::UInt64),
        D::UInt64(a) => sum::wrapping_sum_of_squares::<_, u64>(a).map(AnyValue::UInt64),
        D::Float32(a) => sum::float_sum_of_squares(a).map(AnyValue::Float32),
        D::Float64(a) => sum::float_sum_of_squares(a).map(AnyValue::Float64),
        D::Decimal(a) => {
            let DataType::Decimal(_, scale, _) = column.dtype() else {
                unreachable!()
            };
            let (max_precision, size) = decimal_output_bound(requested);
            return Ok(match decimal::sum_of_squares(a, *scale, max_precision)? {
                Some((v, result_scale)) => Scalar::new(
                    DataType::decimal(max_precision, result_scale, size)?,
                    AnyValue::Decimal(v, result_scale),
                ),
                None => Scalar::null(DataType::decimal(max_precision, *scale, size)?),
            });
        },
        _ => unreachable!("gate accepted sum_of_squares for {}", column.dtype()),
    };
    Ok(finish(spec.output.clone(), value))
}

fn extrema_column(column: &Column, spec: &AccumulatorSpec, is_min: bool) -> StrataResult<Scalar> {
    use ColumnData as D;

    macro_rules! mm {
        ($a:expr, $min:expr, $max:expr) => {
            if is_min { $min($a) } else { $max($a) }
        };
    }

    let value = match column.data() {
        D::Int8(a) => mm!(a, min_max::min_primitive, min_max::max_primitive).map(AnyValue::Int8),
        D::Int16(a) => mm!(a, min_max::min_primitive, min_max::max_primitive).map(AnyValue::Int16),
        D::Int32(a) => mm!(a, min_max::min_primitive, min_max::max_primitive).map(AnyValue::Int32),
        D::Int64(a) => mm!(a, min_max::min_primitive, min_max::max_primitive).map(AnyValue::Int64),
        D::UInt8(a) => mm!(a, min_max::min_primitive, min_max::max_primitive).map(AnyValue::UInt8),
        D::UInt16(a) => {
            mm!(a, min_max::min_primitive, min_max::max_primitive).map(AnyValue::UInt16)
        },
        D::UInt32(a) => {
            mm!(a, min_max::min_primitive, min_max::max_primitive).map(AnyValue::UInt32)
        },
        D::UInt64(a) => {
            mm!(a, min_max::min_primitive, min_max::max_primitive).map(AnyValue::UInt64)
        },
        D::Float32(a) => {
            mm!(a, min_max::min_primitive, min_max::max_primitive).map(AnyValue::Float32)
        },
        D::Float64(a) => {
            mm!(a, min_max::min_primitive, min_max::max_primitive).map(AnyValue::Float64)
        },
        D::Boolean(a) => mm!(a, min_max::min_boolean, min_max::max_boolean).map(AnyValue::Boolean),
        D::String(a) => {
            mm!(a, min_max::min_str, min_max::max_str).map(|s| AnyValue::String(s.to_string()))
        },
        D::Decimal(a) => {
            let DataType::Decimal(_, scale, _) = column.dtype() else {
                unreachable!()
            };
            mm!(a, decimal::min, decimal::max).map(|v| AnyValue::Decimal(v, *scale))
        },
        D::Duration(a) => {
            let DataType::Duration(tu) = column.dtype() else {
                unreachable!()
            };
            mm!(a, min_max::min_primitive, min_max::max_primitive)
                .map(|v| AnyValue::Duration(v, *tu))
        },
        D::Datetime(a) => {
            let DataType::Datetime(tu) = column.dtype() else {
                unreachable!()
            };
            mm!(a, min_max::min_primitive, min_max::max_primitive)
                .map(|v| AnyValue::Datetime(v, *tu))
        },
        D::Categorical(_) => unreachable!("gate accepted min/max for categorical"),
    };
    Ok(finish(spec.output.clone(), value))
}

fn bool_column(column: &Column, op: ReductionOp, spec: &AccumulatorSpec) -> StrataResult<Scalar> {
    let ColumnData::Boolean(a) = column.data() else {
        unreachable!("gate accepted {} for {}", op, column.dtype())
    };
    let value = match op {
        ReductionOp::Any => bool_agg::any(a),
        ReductionOp::All => bool_agg::all(a),
        _ => unreachable!(),
    };
    Ok(finish(spec.output.clone(), value.map(AnyValue::Boolean)))
}

fn concat_strings(array: &Utf8Array) -> Option<AnyValue> {
    if array.len() == array.null_count() {
        return None;
    }
    let mut out = String::new();
    for s in array.non_null_values_iter() {
        out.push_str(s);
    }
    Some(AnyValue::String(out))
}
