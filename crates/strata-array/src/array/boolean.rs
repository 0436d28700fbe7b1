use super::Array;
use crate::bitmap::Bitmap;

/// A boolean column buffer; values and validity are both bitmaps.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanArray {
    values: Bitmap,
    validity: Option<Bitmap>,
}

impl BooleanArray {
    /// # Panics
    /// Panics iff the validity's length differs from the values' length.
    pub fn new(values: Bitmap, validity: Option<Bitmap>) -> Self {
        if let Some(validity) = &validity {
            assert_eq!(validity.len(), values.len());
        }
        Self { values, validity }
    }

    pub fn from_slice(values: &[bool]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            validity: None,
        }
    }

    pub fn values(&self) -> &Bitmap {
        &self.values
    }

    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn value(&self, i: usize) -> bool {
        self.values.get_bit(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<bool>> + '_ {
        let validity = self.validity.as_ref();
        self.values.iter().enumerate().map(move |(i, v)| {
            if validity.map_or(true, |bitmap| bitmap.get_bit(i)) {
                Some(v)
            } else {
                None
            }
        })
    }

    pub fn non_null_values_iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.iter().flatten()
    }
}

impl Array for BooleanArray {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn validity(&self) -> Option<&Bitmap> {
        self.validity.as_ref()
    }
}

impl From<Vec<Option<bool>>> for BooleanArray {
    fn from(values: Vec<Option<bool>>) -> Self {
        let validity: Bitmap = values.iter().map(Option::is_some).collect();
        let values: Bitmap = values.into_iter().map(|v| v.unwrap_or(false)).collect();
        let validity = (validity.unset_bits() > 0).then_some(validity);
        Self::new(values, validity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_are_skipped_by_non_null_iter() {
        let array = BooleanArray::from(vec![Some(true), None, Some(false)]);
        assert_eq!(array.null_count(), 1);
        let non_null: Vec<bool> = array.non_null_values_iter().collect();
        assert_eq!(non_null, [true, false]);
    }
}
