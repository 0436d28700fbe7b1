use std::fmt;

use strata_error::{StrataResult, strata_ensure};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Milliseconds => write!(f, "ms"),
            TimeUnit::Microseconds => write!(f, "us"),
            TimeUnit::Nanoseconds => write!(f, "ns"),
        }
    }
}

/// Nominal storage width of a decimal column.
///
/// The physical representation is always an `i128` unscaled value; the size
/// only bounds the precision/scale a column or result may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecimalSize {
    Size32,
    Size64,
    Size128,
}

impl DecimalSize {
    /// Largest number of significant digits this width can represent.
    pub fn max_precision(self) -> usize {
        match self {
            DecimalSize::Size32 => 9,
            DecimalSize::Size64 => 18,
            DecimalSize::Size128 => 38,
        }
    }
}

/// The logical type of a column, independent of physical storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    /// Fixed point decimal: precision, non-negative scale, storage size.
    Decimal(usize, usize, DecimalSize),
    String,
    /// Difference between two points in time, in the given unit.
    Duration(TimeUnit),
    /// Time since UNIX epoch (1970-01-01), in the given unit.
    Datetime(TimeUnit),
    Categorical,
}

impl DataType {
    /// Checked constructor for decimal types; the invariants
    /// `0 < precision`, `scale <= precision` and
    /// `precision <= size.max_precision()` hold for every constructed value.
    pub fn decimal(precision: usize, scale: usize, size: DecimalSize) -> StrataResult<Self> {
        strata_ensure!(precision > 0, ComputeError: "decimal precision must be positive");
        strata_ensure!(
            scale <= precision,
            ComputeError: "decimal scale {} exceeds precision {}", scale, precision
        );
        strata_ensure!(
            precision <= size.max_precision(),
            ComputeError: "decimal precision {} exceeds the {} digits of {:?}",
            precision, size.max_precision(), size
        );
        Ok(DataType::Decimal(precision, scale, size))
    }

    pub fn category(&self) -> TypeCategory {
        use DataType::*;
        match self {
            Boolean => TypeCategory::Boolean,
            Int8 | Int16 | Int32 | Int64 => TypeCategory::SignedInteger,
            UInt8 | UInt16 | UInt32 | UInt64 => TypeCategory::UnsignedInteger,
            Float32 | Float64 => TypeCategory::Float,
            Decimal(..) => TypeCategory::Decimal,
            String => TypeCategory::String,
            Duration(_) => TypeCategory::Duration,
            Datetime(_) => TypeCategory::Datetime,
            Categorical => TypeCategory::Categorical,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self.category(),
            TypeCategory::SignedInteger | TypeCategory::UnsignedInteger
        )
    }

    pub fn is_float(&self) -> bool {
        self.category() == TypeCategory::Float
    }

    /// Integer or float; decimals are handled on their own exact path.
    pub fn is_primitive_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DataType::*;
        match self {
            Boolean => write!(f, "bool"),
            Int8 => write!(f, "i8"),
            Int16 => write!(f, "i16"),
            Int32 => write!(f, "i32"),
            Int64 => write!(f, "i64"),
            UInt8 => write!(f, "u8"),
            UInt16 => write!(f, "u16"),
            UInt32 => write!(f, "u32"),
            UInt64 => write!(f, "u64"),
            Float32 => write!(f, "f32"),
            Float64 => write!(f, "f64"),
            Decimal(precision, scale, _) => write!(f, "decimal({},{})", precision, scale),
            String => write!(f, "str"),
            Duration(tu) => write!(f, "duration[{}]", tu),
            Datetime(tu) => write!(f, "datetime[{}]", tu),
            Categorical => write!(f, "cat"),
        }
    }
}

/// Dispatch category used by the operation registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    SignedInteger,
    UnsignedInteger,
    Float,
    Decimal,
    Boolean,
    Duration,
    Datetime,
    String,
    Categorical,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeCategory::SignedInteger => "signed integer",
            TypeCategory::UnsignedInteger => "unsigned integer",
            TypeCategory::Float => "floating point",
            TypeCategory::Decimal => "decimal",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Duration => "duration",
            TypeCategory::Datetime => "datetime",
            TypeCategory::String => "string",
            TypeCategory::Categorical => "categorical",
        };
        write!(f, "{}", name)
    }
}
