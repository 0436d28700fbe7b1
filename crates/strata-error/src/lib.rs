mod warning;

use std::borrow::Cow;

use thiserror::Error;

pub use crate::warning::{StrataWarning, get_warning_function, set_warning_function};

pub type ErrString = Cow<'static, str>;

pub type StrataResult<T> = Result<T, StrataError>;

#[derive(Debug, Error)]
pub enum StrataError {
    /// The requested reduction is not defined for the column's type category.
    #[error("operation '{op}' is not supported for columns of category '{category}'")]
    InvalidOperation { op: ErrString, category: ErrString },
    /// A decimal reduction needs more digits than the widest supported
    /// decimal storage can hold.
    #[error(
        "decimal overflow in '{op}': result requires {requested} digits, \
         but at most {max_supported} are supported"
    )]
    DecimalOverflow {
        op: ErrString,
        requested: usize,
        max_supported: usize,
    },
    #[error("compute error: {0}")]
    ComputeError(ErrString),
    #[error("duplicate: {0}")]
    Duplicate(ErrString),
    #[error("lengths don't match: {0}")]
    ShapeMismatch(ErrString),
}

#[macro_export]
macro_rules! strata_err {
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::StrataError::$variant(format!($fmt $(, $arg)*).into())
    };
}

#[macro_export]
macro_rules! strata_bail {
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {
        return Err($crate::strata_err!($variant: $fmt $(, $arg)*))
    };
}

#[macro_export]
macro_rules! strata_ensure {
    ($cond:expr, $variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {
        if !$cond {
            $crate::strata_bail!($variant: $fmt $(, $arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_op_and_category() {
        let err = StrataError::InvalidOperation {
            op: "sum".into(),
            category: "categorical".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sum"));
        assert!(msg.contains("categorical"));
    }

    #[test]
    fn macros_build_compute_errors() {
        fn fails() -> StrataResult<()> {
            strata_ensure!(1 > 2, ComputeError: "{} is not greater than {}", 1, 2);
            Ok(())
        }
        let err = fails().unwrap_err();
        assert!(matches!(err, StrataError::ComputeError(_)));
    }
}
