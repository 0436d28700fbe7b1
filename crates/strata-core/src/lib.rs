//! Null-aware scalar reductions over columnar data.
//!
//! The engine reduces a single [`Column`](column::Column) or a whole
//! [`DataFrame`](frame::DataFrame) to one scalar. Which operation is defined
//! for which logical type is decided by a single compatibility matrix in
//! [`reduce::compatible`]; everything else either folds through it or fails
//! fast with a typed error.

pub mod column;
pub mod datatypes;
pub mod frame;
pub mod reduce;
pub mod scalar;

pub mod prelude {
    pub use strata_error::{StrataError, StrataResult};

    pub use crate::column::{Column, ColumnData};
    pub use crate::datatypes::{DataType, DecimalSize, TimeUnit, TypeCategory};
    pub use crate::frame::DataFrame;
    pub use crate::reduce::{AccumulatorSpec, ReductionOp, check, compatible, reduce};
    pub use crate::scalar::{AnyValue, Scalar};
}
