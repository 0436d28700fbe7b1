use std::fmt;

use strata_error::{StrataError, StrataResult};

use crate::datatypes::{DataType, DecimalSize, TypeCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReductionOp {
    Sum,
    Product,
    Min,
    Max,
    SumOfSquares,
    Any,
    All,
}

impl ReductionOp {
    pub fn name(self) -> &'static str {
        match self {
            ReductionOp::Sum => "sum",
            ReductionOp::Product => "product",
            ReductionOp::Min => "min",
            ReductionOp::Max => "max",
            ReductionOp::SumOfSquares => "sum_of_squares",
            ReductionOp::Any => "any",
            ReductionOp::All => "all",
        }
    }
}

impl fmt::Display for ReductionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a legal (op, input type) pair folds into.
///
/// `output` is the accumulator/result type. For decimal product and
/// sum-of-squares the result scale depends on the data (it grows with the
/// non-null count), so `output` records the input type and the kernel
/// produces the final precision/scale.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatorSpec {
    pub op: ReductionOp,
    pub input: DataType,
    pub output: DataType,
}

/// The single source of truth for which reduction is defined on which
/// logical type, and with what accumulator.
pub fn compatible(op: ReductionOp, dtype: &DataType) -> Option<AccumulatorSpec> {
    use ReductionOp::*;
    use TypeCategory::*;
    let output = match (op, dtype.category()) {
        // Integer accumulators are at least 64 bits wide regardless of the
        // input width.
        (Sum | Product | SumOfSquares, SignedInteger) => DataType::Int64,
        (Sum | Product | SumOfSquares, UnsignedInteger) => DataType::UInt64,
        (Sum | Product | SumOfSquares, Float) => dtype.clone(),
        (Sum, Decimal) => {
            let DataType::Decimal(_, scale, _) = dtype else {
                unreachable!()
            };
            // Scale unchanged, precision widened to the widest storage.
            DataType::Decimal(
                DecimalSize::Size128.max_precision(),
                *scale,
                DecimalSize::Size128,
            )
        },
        (Product | SumOfSquares, Decimal) => dtype.clone(),
        (Sum, Boolean) => DataType::Int64,
        (Sum, String) => DataType::String,
        (
            Min | Max,
            SignedInteger | UnsignedInteger | Float | Decimal | Boolean | Duration | Datetime
            | String,
        ) => dtype.clone(),
        (Any | All, Boolean) => DataType::Boolean,
        _ => return None,
    };
    Some(AccumulatorSpec {
        op,
        input: dtype.clone(),
        output,
    })
}

/// Gate every reduction passes before any data is touched.
pub fn check(op: ReductionOp, dtype: &DataType) -> StrataResult<AccumulatorSpec> {
    compatible(op, dtype).ok_or_else(|| StrataError::InvalidOperation {
        op: op.name().into(),
        category: dtype.category().to_string().into(),
    })
}
