//! Scalar reduction kernels.
//!
//! Every kernel folds a single column buffer left-to-right by logical index,
//! skips null positions, and returns `None` when there were zero non-null
//! contributions. Numeric overflow behavior is kernel-specific: integer
//! kernels wrap in a 64-bit accumulator, float kernels propagate NaN and
//! infinities, decimal kernels are exact and fail on precision overflow.

pub mod bool_agg;
pub mod decimal;
pub mod min_max;
pub mod sum;
