use super::Array;
use crate::bitmap::Bitmap;

/// A string column buffer.
///
/// Values are materialized `String`s; the offsets-based physical encoding is
/// the storage layer's concern, not this engine's.
#[derive(Debug, Clone, PartialEq)]
pub struct Utf8Array {
    values: Vec<String>,
    validity: Option<Bitmap>,
}

impl Utf8Array {
    /// # Panics
    /// Panics iff the validity's length differs from the values' length.
    pub fn new(values: Vec<String>, validity: Option<Bitmap>) -> Self {
        if let Some(validity) = &validity {
            assert_eq!(validity.len(), values.len());
        }
        Self { values, validity }
    }

    pub fn from_slice<S: AsRef<str>>(values: &[S]) -> Self {
        Self {
            values: values.iter().map(|s| s.as_ref().to_string()).collect(),
            validity: None,
        }
    }

    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn value(&self, i: usize) -> &str {
        &self.values[i]
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        let validity = self.validity.as_ref();
        self.values.iter().enumerate().map(move |(i, v)| {
            if validity.map_or(true, |bitmap| bitmap.get_bit(i)) {
                Some(v.as_str())
            } else {
                None
            }
        })
    }

    pub fn non_null_values_iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().flatten()
    }
}

impl Array for Utf8Array {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn validity(&self) -> Option<&Bitmap> {
        self.validity.as_ref()
    }
}

impl From<Vec<Option<&str>>> for Utf8Array {
    fn from(values: Vec<Option<&str>>) -> Self {
        let validity: Bitmap = values.iter().map(Option::is_some).collect();
        let values: Vec<String> = values
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect();
        let validity = (validity.unset_bits() > 0).then_some(validity);
        Self::new(values, validity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_slots_do_not_leak_into_values() {
        let array = Utf8Array::from(vec![Some("Hello"), None, Some("World")]);
        assert_eq!(array.null_count(), 1);
        let non_null: Vec<&str> = array.non_null_values_iter().collect();
        assert_eq!(non_null, ["Hello", "World"]);
    }
}
