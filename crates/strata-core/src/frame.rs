//! Whole-frame reductions.

use strata_compute::min_max::MinMax;
use strata_error::{StrataError, StrataResult, strata_ensure, strata_err, strata_warn};

use crate::column::Column;
use crate::datatypes::{DataType, DecimalSize, TypeCategory};
use crate::reduce::{ReductionOp, check, reduce};
use crate::scalar::{AnyValue, Scalar};

/// An ordered collection of equal-length, uniquely named columns.
#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    columns: Vec<Column>,
}

impl DataFrame {
    pub fn new(columns: Vec<Column>) -> StrataResult<Self> {
        if let Some(first) = columns.first() {
            let height = first.len();
            for column in &columns {
                strata_ensure!(
                    column.len() == height,
                    ShapeMismatch: "column '{}' has length {}, expected {}",
                    column.name(), column.len(), height
                );
            }
        }
        for (i, column) in columns.iter().enumerate() {
            strata_ensure!(
                !column.name().is_empty(),
                ComputeError: "column names must not be empty"
            );
            strata_ensure!(
                columns[..i].iter().all(|c| c.name() != column.name()),
                Duplicate: "column name '{}'", column.name()
            );
        }
        Ok(Self { columns })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Reduce the whole frame, rows and columns alike, to a single scalar.
    ///
    /// Each column is reduced on its own and the per-column scalars are then
    /// folded with the same operation's combine rule. Per-column null results
    /// are skipped. A frame with zero columns yields the operation's identity
    /// value, not null.
    pub fn reduce_axis_none(&self, op: ReductionOp) -> StrataResult<Scalar> {
        if matches!(op, ReductionOp::Sum | ReductionOp::Product) {
            let name = op.name();
            strata_warn!(
                DeprecationWarning,
                "{}(axis=None) reduces the whole frame to one scalar; pass an explicit axis to reduce per row or per column",
                name
            );
        }
        match op {
            ReductionOp::Any | ReductionOp::All => self.any_all_axis_none(op),
            _ => self.numeric_axis_none(op),
        }
    }

    fn any_all_axis_none(&self, op: ReductionOp) -> StrataResult<Scalar> {
        use TypeCategory as C;
        let mut acc: Option<bool> = None;
        for column in &self.columns {
            let reduced = match column.dtype().category() {
                C::Boolean => reduce(column, op, None)?,
                C::SignedInteger | C::UnsignedInteger | C::Float | C::Decimal => {
                    reduce(&column.cast_boolean()?, op, None)?
                },
                _ => return Err(check(op, column.dtype()).unwrap_err()),
            };
            match reduced.into_value() {
                AnyValue::Boolean(v) => {
                    acc = Some(match acc {
                        None => v,
                        Some(a) if op == ReductionOp::Any => a || v,
                        Some(a) => a && v,
                    });
                },
                AnyValue::Null => {},
                _ => unreachable!("any/all produced a non-boolean scalar"),
            }
        }
        // No non-null evidence at all, including the zero-column frame:
        // the identity, as a non-null boolean.
        let identity = op == ReductionOp::All;
        Ok(Scalar::new(
            DataType::Boolean,
            AnyValue::Boolean(acc.unwrap_or(identity)),
        ))
    }

    fn numeric_axis_none(&self, op: ReductionOp) -> StrataResult<Scalar> {
        use TypeCategory as C;
        if self.columns.is_empty() {
            return Ok(match op {
                ReductionOp::Sum | ReductionOp::SumOfSquares => {
                    Scalar::new(DataType::Int64, AnyValue::Int64(0))
                },
                ReductionOp::Product => Scalar::new(DataType::Int64, AnyValue::Int64(1)),
                // Min/max have no identity in a fixed dtype.
                _ => Scalar::null(DataType::Float64),
            });
        }
        let categories: Vec<C> = self.columns.iter().map(|c| c.dtype().category()).collect();
        if categories.contains(&C::String) {
            strata_ensure!(
                categories.iter().all(|c| *c == C::String),
                ComputeError: "cannot combine string and non-string columns in a whole-frame {}",
                op
            );
            self.string_axis_none(op)
        } else if categories.contains(&C::Decimal) {
            strata_ensure!(
                categories.iter().all(|c| *c == C::Decimal),
                ComputeError: "cannot combine decimal and non-decimal columns in a whole-frame {}",
                op
            );
            self.decimal_axis_none(op)
        } else if categories
            .iter()
            .any(|c| matches!(c, C::Duration | C::Datetime))
        {
            self.temporal_axis_none(op)
        } else {
            self.primitive_axis_none(op, &categories)
        }
    }

    fn string_axis_none(&self, op: ReductionOp) -> StrataResult<Scalar> {
        let mut acc: Option<String> = None;
        for column in &self.columns {
            match reduce(column, op, None)?.into_value() {
                AnyValue::String(v) => {
                    acc = Some(match acc {
                        None => v,
                        Some(a) => match op {
                            ReductionOp::Sum => a + &v,
                            ReductionOp::Min => Ord::min(a, v),
                            ReductionOp::Max => Ord::max(a, v),
                            _ => unreachable!(),
                        },
                    });
                },
                AnyValue::Null => {},
                _ => unreachable!("string reduction produced a non-string scalar"),
            }
        }
        Ok(match acc {
            Some(v) => Scalar::new(DataType::String, AnyValue::String(v)),
            None => Scalar::null(DataType::String),
        })
    }

    fn decimal_axis_none(&self, op: ReductionOp) -> StrataResult<Scalar> {
        let max_precision = DecimalSize::Size128.max_precision();
        let overflow = || StrataError::DecimalOverflow {
            op: op.name().into(),
            requested: max_precision + 1,
            max_supported: max_precision,
        };
        let mut acc: Option<(i128, usize)> = None;
        for column in &self.columns {
            match reduce(column, op, None)?.into_value() {
                AnyValue::Decimal(v, scale) => {
                    acc = Some(match acc {
                        None => (v, scale),
                        Some((a, a_scale)) => match op {
                            ReductionOp::Sum | ReductionOp::SumOfSquares => {
                                strata_ensure!(
                                    a_scale == scale,
                                    ComputeError: "cannot combine decimal results with scales {} and {}",
                                    a_scale, scale
                                );
                                (a.checked_add(v).ok_or_else(overflow)?, scale)
                            },
                            ReductionOp::Min => {
                                strata_ensure!(
                                    a_scale == scale,
                                    ComputeError: "cannot combine decimal results with scales {} and {}",
                                    a_scale, scale
                                );
                                (Ord::min(a, v), scale)
                            },
                            ReductionOp::Max => {
                                strata_ensure!(
                                    a_scale == scale,
                                    ComputeError: "cannot combine decimal results with scales {} and {}",
                                    a_scale, scale
                                );
                                (Ord::max(a, v), scale)
                            },
                            ReductionOp::Product => {
                                let result_scale = a_scale + scale;
                                if result_scale > max_precision {
                                    return Err(StrataError::DecimalOverflow {
                                        op: op.name().into(),
                                        requested: result_scale,
                                        max_supported: max_precision,
                                    });
                                }
                                if a == 0 || v == 0 {
                                    (0, result_scale)
                                } else {
                                    (a.checked_mul(v).ok_or_else(overflow)?, result_scale)
                                }
                            },
                            _ => unreachable!(),
                        },
                    });
                },
                AnyValue::Null => {},
                _ => unreachable!("decimal reduction produced a non-decimal scalar"),
            }
        }
        match acc {
            Some((v, scale)) => {
                if decimal_digits(v) > max_precision {
                    return Err(StrataError::DecimalOverflow {
                        op: op.name().into(),
                        requested: decimal_digits(v),
                        max_supported: max_precision,
                    });
                }
                Ok(Scalar::new(
                    DataType::decimal(max_precision, scale, DecimalSize::Size128)?,
                    AnyValue::Decimal(v, scale),
                ))
            },
            None => {
                let DataType::Decimal(_, scale, _) = self.columns[0].dtype() else {
                    unreachable!()
                };
                Ok(Scalar::null(DataType::decimal(
                    max_precision,
                    *scale,
                    DecimalSize::Size128,
                )?))
            },
        }
    }

    fn temporal_axis_none(&self, op: ReductionOp) -> StrataResult<Scalar> {
        let dtype = self.columns[0].dtype().clone();
        strata_ensure!(
            self.columns.iter().all(|c| c.dtype() == &dtype),
            ComputeError: "cannot combine mixed temporal columns in a whole-frame {}", op
        );
        let mut acc: Option<i64> = None;
        for column in &self.columns {
            let v = match reduce(column, op, None)?.into_value() {
                AnyValue::Duration(v, _) | AnyValue::Datetime(v, _) => v,
                AnyValue::Null => continue,
                _ => unreachable!("temporal reduction produced a non-temporal scalar"),
            };
            acc = Some(match acc {
                None => v,
                Some(a) if op == ReductionOp::Min => Ord::min(a, v),
                Some(a) => Ord::max(a, v),
            });
        }
        let value = match (acc, &dtype) {
            (None, _) => AnyValue::Null,
            (Some(v), DataType::Duration(tu)) => AnyValue::Duration(v, *tu),
            (Some(v), DataType::Datetime(tu)) => AnyValue::Datetime(v, *tu),
            _ => unreachable!(),
        };
        Ok(Scalar::new(dtype, value))
    }

    fn primitive_axis_none(
        &self,
        op: ReductionOp,
        categories: &[TypeCategory],
    ) -> StrataResult<Scalar> {
        use TypeCategory as C;

        macro_rules! combine {
            ($t:ty, $dtype:expr, $to_any:expr, $combine:expr) => {{
                let mut acc: Option<$t> = None;
                for column in &self.columns {
                    let reduced = reduce(column, op, None)?;
                    if reduced.is_null() {
                        continue;
                    }
                    let v: $t = reduced.value().extract().ok_or_else(|| {
                        strata_err!(
                            ComputeError: "cannot combine the {} result of column '{}' into a whole-frame scalar",
                            op, column.name()
                        )
                    })?;
                    acc = Some(match acc {
                        None => v,
                        Some(a) => $combine(op, a, v),
                    });
                }
                Ok(match acc {
                    Some(v) => Scalar::new($dtype, $to_any(v)),
                    None => Scalar::null($dtype),
                })
            }};
        }

        if categories.contains(&C::Float) {
            combine!(f64, DataType::Float64, AnyValue::Float64, combine_f64)
        } else if categories.iter().all(|c| *c == C::UnsignedInteger) {
            combine!(u64, DataType::UInt64, AnyValue::UInt64, combine_u64)
        } else {
            combine!(i64, DataType::Int64, AnyValue::Int64, combine_i64)
        }
    }
}

fn combine_f64(op: ReductionOp, a: f64, b: f64) -> f64 {
    match op {
        ReductionOp::Sum | ReductionOp::SumOfSquares => a + b,
        ReductionOp::Product => a * b,
        ReductionOp::Min => MinMax::min_ignore_nan(a, b),
        ReductionOp::Max => MinMax::max_ignore_nan(a, b),
        _ => unreachable!(),
    }
}

fn combine_i64(op: ReductionOp, a: i64, b: i64) -> i64 {
    match op {
        ReductionOp::Sum | ReductionOp::SumOfSquares => a.wrapping_add(b),
        ReductionOp::Product => a.wrapping_mul(b),
        ReductionOp::Min => Ord::min(a, b),
        ReductionOp::Max => Ord::max(a, b),
        _ => unreachable!(),
    }
}

fn combine_u64(op: ReductionOp, a: u64, b: u64) -> u64 {
    match op {
        ReductionOp::Sum | ReductionOp::SumOfSquares => a.wrapping_add(b),
        ReductionOp::Product => a.wrapping_mul(b),
        ReductionOp::Min => Ord::min(a, b),
        ReductionOp::Max => Ord::max(a, b),
        _ => unreachable!(),
    }
}

fn decimal_digits(value: i128) -> usize {
    let mut value = value.unsigned_abs();
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use strata_error::{StrataWarning, set_warning_function};

    use super::*;

    static DEPRECATIONS: AtomicUsize = AtomicUsize::new(0);

    fn count_deprecations(_message: &str, warning: StrataWarning) {
        if matches!(warning, StrataWarning::DeprecationWarning) {
            DEPRECATIONS.fetch_add(1, Ordering::SeqCst);
        }
    }

    // The warning hook is process-global; this is the only test in this
    // binary that emits warnings, so the count below is deterministic.
    #[test]
    fn whole_frame_sum_and_product_emit_a_deprecation_warning() {
        unsafe { set_warning_function(count_deprecations) };
        let df = DataFrame::new(vec![Column::new("a", vec![Some(1i64), Some(2)])]).unwrap();

        df.reduce_axis_none(ReductionOp::Sum).unwrap();
        df.reduce_axis_none(ReductionOp::Product).unwrap();
        assert_eq!(DEPRECATIONS.load(Ordering::SeqCst), 2);

        df.reduce_axis_none(ReductionOp::Min).unwrap();
        df.reduce_axis_none(ReductionOp::Any).unwrap();
        assert_eq!(DEPRECATIONS.load(Ordering::SeqCst), 2);
    }
}
