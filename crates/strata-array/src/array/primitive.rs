use super::{Array, NativeType};
use crate::bitmap::Bitmap;

/// A fixed-width column buffer with an optional validity bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveArray<T: NativeType> {
    values: Vec<T>,
    validity: Option<Bitmap>,
}

impl<T: NativeType> PrimitiveArray<T> {
    /// # Panics
    /// Panics iff the validity's length differs from the values' length.
    pub fn new(values: Vec<T>, validity: Option<Bitmap>) -> Self {
        if let Some(validity) = &validity {
            assert_eq!(validity.len(), values.len());
        }
        Self { values, validity }
    }

    pub fn from_vec(values: Vec<T>) -> Self {
        Self {
            values,
            validity: None,
        }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// # Panics
    /// Panics iff `i >= self.len()`. The value at a null position is
    /// unspecified but well-defined memory.
    #[inline]
    pub fn value(&self, i: usize) -> T {
        self.values[i]
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<T>> + '_ {
        let validity = self.validity.as_ref();
        self.values.iter().enumerate().map(move |(i, v)| {
            if validity.map_or(true, |bitmap| bitmap.get_bit(i)) {
                Some(*v)
            } else {
                None
            }
        })
    }

    pub fn values_iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().copied()
    }

    pub fn non_null_values_iter(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().flatten()
    }
}

impl<T: NativeType> Array for PrimitiveArray<T> {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn validity(&self) -> Option<&Bitmap> {
        self.validity.as_ref()
    }
}

impl<T: NativeType> From<Vec<Option<T>>> for PrimitiveArray<T> {
    fn from(values: Vec<Option<T>>) -> Self {
        let validity: Bitmap = values.iter().map(Option::is_some).collect();
        let values: Vec<T> = values.into_iter().map(Option::unwrap_or_default).collect();
        let validity = (validity.unset_bits() > 0).then_some(validity);
        Self::new(values, validity)
    }
}
