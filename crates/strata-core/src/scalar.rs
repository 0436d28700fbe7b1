use num_traits::NumCast;
use strata_error::{StrataResult, strata_bail};

use crate::datatypes::{DataType, TimeUnit};

/// A single dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyValue {
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    /// Unscaled value and scale.
    Decimal(i128, usize),
    String(String),
    Duration(i64, TimeUnit),
    Datetime(i64, TimeUnit),
    Categorical(u32),
}

impl AnyValue {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, AnyValue::Null)
    }

    /// Numeric extraction with the usual lossy-cast caveats; decimals are
    /// deliberately excluded so exact values never sneak through a float.
    pub fn extract<T: NumCast>(&self) -> Option<T> {
        use AnyValue::*;
        match self {
            Boolean(v) => T::from(*v as u8),
            Int8(v) => T::from(*v),
            Int16(v) => T::from(*v),
            Int32(v) => T::from(*v),
            Int64(v) => T::from(*v),
            UInt8(v) => T::from(*v),
            UInt16(v) => T::from(*v),
            UInt32(v) => T::from(*v),
            UInt64(v) => T::from(*v),
            Float32(v) => T::from(*v),
            Float64(v) => T::from(*v),
            _ => None,
        }
    }
}

/// An [`AnyValue`] tagged with its logical type; `Null` values keep the
/// type of the column or accumulator they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar {
    dtype: DataType,
    value: AnyValue,
}

impl Scalar {
    #[inline]
    pub const fn new(dtype: DataType, value: AnyValue) -> Self {
        Self { dtype, value }
    }

    #[inline]
    pub const fn null(dtype: DataType) -> Self {
        Self::new(dtype, AnyValue::Null)
    }

    #[inline]
    pub fn dtype(&self) -> &DataType {
        &self.dtype
    }

    #[inline]
    pub fn value(&self) -> &AnyValue {
        &self.value
    }

    #[inline]
    pub fn into_value(self) -> AnyValue {
        self.value
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Cast between primitive numeric / boolean types. Null stays null.
    pub fn cast(&self, dtype: &DataType) -> StrataResult<Scalar> {
        if self.is_null() {
            return Ok(Scalar::null(dtype.clone()));
        }
        if &self.dtype == dtype {
            return Ok(self.clone());
        }
        let value = match dtype {
            DataType::Boolean => {
                let v: f64 = self.extract_or_bail(dtype)?;
                AnyValue::Boolean(v != 0.0)
            },
            DataType::Int8 => AnyValue::Int8(self.extract_or_bail(dtype)?),
            DataType::Int16 => AnyValue::Int16(self.extract_or_bail(dtype)?),
            DataType::Int32 => AnyValue::Int32(self.extract_or_bail(dtype)?),
            DataType::Int64 => AnyValue::Int64(self.extract_or_bail(dtype)?),
            DataType::UInt8 => AnyValue::UInt8(self.extract_or_bail(dtype)?),
            DataType::UInt16 => AnyValue::UInt16(self.extract_or_bail(dtype)?),
            DataType::UInt32 => AnyValue::UInt32(self.extract_or_bail(dtype)?),
            DataType::UInt64 => AnyValue::UInt64(self.extract_or_bail(dtype)?),
            DataType::Float32 => AnyValue::Float32(self.extract_or_bail(dtype)?),
            DataType::Float64 => AnyValue::Float64(self.extract_or_bail(dtype)?),
            _ => strata_bail!(
                ComputeError: "cannot cast scalar of type {} to {}", self.dtype, dtype
            ),
        };
        Ok(Scalar::new(dtype.clone(), value))
    }

    fn extract_or_bail<T: NumCast>(&self, target: &DataType) -> StrataResult<T> {
        match self.value.extract::<T>() {
            Some(v) => Ok(v),
            None => strata_bail!(
                ComputeError: "cannot cast scalar of type {} to {}", self.dtype, target
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_to_boolean_is_nonzero() {
        let s = Scalar::new(DataType::Int64, AnyValue::Int64(99998));
        let b = s.cast(&DataType::Boolean).unwrap();
        assert_eq!(b.value(), &AnyValue::Boolean(true));

        let z = Scalar::new(DataType::Int64, AnyValue::Int64(0));
        assert_eq!(
            z.cast(&DataType::Boolean).unwrap().value(),
            &AnyValue::Boolean(false)
        );
    }

    #[test]
    fn null_casts_stay_null() {
        let s = Scalar::null(DataType::Float64);
        let out = s.cast(&DataType::Int32).unwrap();
        assert!(out.is_null());
        assert_eq!(out.dtype(), &DataType::Int32);
    }

    #[test]
    fn out_of_range_casts_fail() {
        let s = Scalar::new(DataType::Int64, AnyValue::Int64(-1));
        assert!(s.cast(&DataType::UInt8).is_err());
    }
}
