use num_traits::{NumCast, Zero};
use strata_array::{Array, Bitmap, BooleanArray, NativeType, PrimitiveArray, Utf8Array};
use strata_error::{StrataResult, strata_err};

use crate::datatypes::{DataType, DecimalSize, TimeUnit};
use crate::scalar::AnyValue;

/// The typed buffer behind a [`Column`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Boolean(BooleanArray),
    Int8(PrimitiveArray<i8>),
    Int16(PrimitiveArray<i16>),
    Int32(PrimitiveArray<i32>),
    Int64(PrimitiveArray<i64>),
    UInt8(PrimitiveArray<u8>),
    UInt16(PrimitiveArray<u16>),
    UInt32(PrimitiveArray<u32>),
    UInt64(PrimitiveArray<u64>),
    Float32(PrimitiveArray<f32>),
    Float64(PrimitiveArray<f64>),
    /// Unscaled values; precision/scale/size live in the column's dtype.
    Decimal(PrimitiveArray<i128>),
    String(Utf8Array),
    Duration(PrimitiveArray<i64>),
    Datetime(PrimitiveArray<i64>),
    Categorical(PrimitiveArray<u32>),
}

macro_rules! for_each_array {
    ($self:expr, $a:ident => $body:expr) => {
        match $self {
            ColumnData::Boolean($a) => $body,
            ColumnData::Int8($a) => $body,
            ColumnData::Int16($a) => $body,
            ColumnData::Int32($a) => $body,
            ColumnData::Int64($a) => $body,
            ColumnData::UInt8($a) => $body,
            ColumnData::UInt16($a) => $body,
            ColumnData::UInt32($a) => $body,
            ColumnData::UInt64($a) => $body,
            ColumnData::Float32($a) => $body,
            ColumnData::Float64($a) => $body,
            ColumnData::Decimal($a) => $body,
            ColumnData::String($a) => $body,
            ColumnData::Duration($a) => $body,
            ColumnData::Datetime($a) => $body,
            ColumnData::Categorical($a) => $body,
        }
    };
}

/// A named, read-only column view: a logical type plus a typed buffer.
///
/// The engine never mutates a column; reductions only read through it.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: DataType,
    data: ColumnData,
}

/// Conversion of owned buffers into a column payload. Implemented for
/// `Vec<T>` and `Vec<Option<T>>` of every primitive, plus bool and string
/// slices.
pub trait IntoColumnData {
    fn into_column_data(self) -> (DataType, ColumnData);
}

macro_rules! impl_into_column_data {
    ($($native:ty => $variant:ident),+ $(,)?) => {
        $(
            impl IntoColumnData for Vec<$native> {
                fn into_column_data(self) -> (DataType, ColumnData) {
                    (
                        DataType::$variant,
                        ColumnData::$variant(PrimitiveArray::from_vec(self)),
                    )
                }
            }
            impl IntoColumnData for Vec<Option<$native>> {
                fn into_column_data(self) -> (DataType, ColumnData) {
                    (
                        DataType::$variant,
                        ColumnData::$variant(PrimitiveArray::from(self)),
                    )
                }
            }
        )+
    };
}

impl_into_column_data!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
);

impl IntoColumnData for Vec<bool> {
    fn into_column_data(self) -> (DataType, ColumnData) {
        (
            DataType::Boolean,
            ColumnData::Boolean(BooleanArray::from_slice(&self)),
        )
    }
}

impl IntoColumnData for Vec<Option<bool>> {
    fn into_column_data(self) -> (DataType, ColumnData) {
        (DataType::Boolean, ColumnData::Boolean(BooleanArray::from(self)))
    }
}

impl IntoColumnData for Vec<&str> {
    fn into_column_data(self) -> (DataType, ColumnData) {
        (
            DataType::String,
            ColumnData::String(Utf8Array::from_slice(&self)),
        )
    }
}

impl IntoColumnData for Vec<Option<&str>> {
    fn into_column_data(self) -> (DataType, ColumnData) {
        (DataType::String, ColumnData::String(Utf8Array::from(self)))
    }
}

impl Column {
    pub fn new(name: impl Into<String>, data: impl IntoColumnData) -> Self {
        let (dtype, data) = data.into_column_data();
        Self {
            name: name.into(),
            dtype,
            data,
        }
    }

    /// A decimal column from unscaled values; fails on invalid
    /// precision/scale combinations.
    pub fn new_decimal(
        name: impl Into<String>,
        values: Vec<Option<i128>>,
        precision: usize,
        scale: usize,
        size: DecimalSize,
    ) -> StrataResult<Self> {
        let dtype = DataType::decimal(precision, scale, size)?;
        Ok(Self {
            name: name.into(),
            dtype,
            data: ColumnData::Decimal(PrimitiveArray::from(values)),
        })
    }

    pub fn new_duration(
        name: impl Into<String>,
        values: Vec<Option<i64>>,
        time_unit: TimeUnit,
    ) -> Self {
        Self {
            name: name.into(),
            dtype: DataType::Duration(time_unit),
            data: ColumnData::Duration(PrimitiveArray::from(values)),
        }
    }

    pub fn new_datetime(
        name: impl Into<String>,
        values: Vec<Option<i64>>,
        time_unit: TimeUnit,
    ) -> Self {
        Self {
            name: name.into(),
            dtype: DataType::Datetime(time_unit),
            data: ColumnData::Datetime(PrimitiveArray::from(values)),
        }
    }

    pub fn new_categorical(name: impl Into<String>, codes: Vec<Option<u32>>) -> Self {
        Self {
            name: name.into(),
            dtype: DataType::Categorical,
            data: ColumnData::Categorical(PrimitiveArray::from(codes)),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn dtype(&self) -> &DataType {
        &self.dtype
    }

    #[inline]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        for_each_array!(&self.data, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn null_count(&self) -> usize {
        for_each_array!(&self.data, a => a.null_count())
    }

    /// The value at position `i`.
    ///
    /// # Panics
    /// Panics iff `i >= self.len()`.
    pub fn get(&self, i: usize) -> AnyValue {
        use ColumnData as D;
        if !for_each_array!(&self.data, a => a.is_valid(i)) {
            return AnyValue::Null;
        }
        match (&self.data, &self.dtype) {
            (D::Boolean(a), _) => AnyValue::Boolean(a.value(i)),
            (D::Int8(a), _) => AnyValue::Int8(a.value(i)),
            (D::Int16(a), _) => AnyValue::Int16(a.value(i)),
            (D::Int32(a), _) => AnyValue::Int32(a.value(i)),
            (D::Int64(a), _) => AnyValue::Int64(a.value(i)),
            (D::UInt8(a), _) => AnyValue::UInt8(a.value(i)),
            (D::UInt16(a), _) => AnyValue::UInt16(a.value(i)),
            (D::UInt32(a), _) => AnyValue::UInt32(a.value(i)),
            (D::UInt64(a), _) => AnyValue::UInt64(a.value(i)),
            (D::Float32(a), _) => AnyValue::Float32(a.value(i)),
            (D::Float64(a), _) => AnyValue::Float64(a.value(i)),
            (D::Decimal(a), DataType::Decimal(_, scale, _)) => {
                AnyValue::Decimal(a.value(i), *scale)
            },
            (D::String(a), _) => AnyValue::String(a.value(i).to_string()),
            (D::Duration(a), DataType::Duration(tu)) => AnyValue::Duration(a.value(i), *tu),
            (D::Datetime(a), DataType::Datetime(tu)) => AnyValue::Datetime(a.value(i), *tu),
            (D::Categorical(a), _) => AnyValue::Categorical(a.value(i)),
            _ => unreachable!("column dtype out of sync with its buffer"),
        }
    }

    /// Elementwise `self > rhs`, yielding a null-preserving boolean column.
    pub fn gt_scalar(&self, rhs: &AnyValue) -> StrataResult<Column> {
        use ColumnData as D;
        let data = match &self.data {
            D::Int8(a) => gt_primitive(a, rhs)?,
            D::Int16(a) => gt_primitive(a, rhs)?,
            D::Int32(a) => gt_primitive(a, rhs)?,
            D::Int64(a) => gt_primitive(a, rhs)?,
            D::UInt8(a) => gt_primitive(a, rhs)?,
            D::UInt16(a) => gt_primitive(a, rhs)?,
            D::UInt32(a) => gt_primitive(a, rhs)?,
            D::UInt64(a) => gt_primitive(a, rhs)?,
            D::Float32(a) => gt_primitive(a, rhs)?,
            D::Float64(a) => gt_primitive(a, rhs)?,
            _ => {
                return Err(strata_err!(
                    ComputeError: "'>' comparison is not supported for {} columns", self.dtype
                ));
            },
        };
        Ok(Column {
            name: self.name.clone(),
            dtype: DataType::Boolean,
            data: ColumnData::Boolean(data),
        })
    }

    /// Explicit cast to a boolean column: non-zero values become `true`,
    /// nulls stay null. This is the cast the registry requires before
    /// running any/all over numeric data.
    pub fn cast_boolean(&self) -> StrataResult<Column> {
        use ColumnData as D;
        let data = match &self.data {
            D::Boolean(a) => a.clone(),
            D::Int8(a) => nonzero(a),
            D::Int16(a) => nonzero(a),
            D::Int32(a) => nonzero(a),
            D::Int64(a) => nonzero(a),
            D::UInt8(a) => nonzero(a),
            D::UInt16(a) => nonzero(a),
            D::UInt32(a) => nonzero(a),
            D::UInt64(a) => nonzero(a),
            D::Float32(a) => nonzero(a),
            D::Float64(a) => nonzero(a),
            D::Decimal(a) => nonzero(a),
            _ => {
                return Err(strata_err!(
                    ComputeError: "cannot cast {} column to boolean", self.dtype
                ));
            },
        };
        Ok(Column {
            name: self.name.clone(),
            dtype: DataType::Boolean,
            data: ColumnData::Boolean(data),
        })
    }
}

fn gt_primitive<T>(array: &PrimitiveArray<T>, rhs: &AnyValue) -> StrataResult<BooleanArray>
where
    T: NativeType + PartialOrd + NumCast,
{
    let rhs: T = rhs.extract().ok_or_else(
        || strata_err!(ComputeError: "comparison scalar is not numeric: {:?}", rhs),
    )?;
    let values: Bitmap = array.values_iter().map(|v| v > rhs).collect();
    Ok(BooleanArray::new(values, array.validity().cloned()))
}

fn nonzero<T>(array: &PrimitiveArray<T>) -> BooleanArray
where
    T: NativeType + Zero + PartialEq,
{
    let values: Bitmap = array.values_iter().map(|v| v != T::zero()).collect();
    BooleanArray::new(values, array.validity().cloned())
}
