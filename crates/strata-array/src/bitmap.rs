/// An immutable bitmap in LSB-first order.
///
/// Bits past `len` in the last byte are kept zero, so popcounts over the
/// backing bytes need no masking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    bytes: Vec<u8>,
    len: usize,
}

impl Bitmap {
    pub fn new_with_value(value: bool, len: usize) -> Self {
        let mut bytes = vec![if value { 0xFF } else { 0x00 }; len.div_ceil(8)];
        if value {
            clear_trailing_bits(&mut bytes, len);
        }
        Self { bytes, len }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// # Panics
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn get_bit(&self, i: usize) -> bool {
        assert!(i < self.len);
        self.bytes[i / 8] & (1 << (i % 8)) != 0
    }

    /// Number of set bits.
    pub fn set_bits(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Number of unset bits.
    pub fn unset_bits(&self) -> usize {
        self.len - self.set_bits()
    }

    pub fn iter(&self) -> BitmapIter<'_> {
        BitmapIter {
            bitmap: self,
            index: 0,
        }
    }
}

impl FromIterator<bool> for Bitmap {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut mutable = MutableBitmap::new();
        for value in iter {
            mutable.push(value);
        }
        mutable.freeze()
    }
}

impl<'a> IntoIterator for &'a Bitmap {
    type Item = bool;
    type IntoIter = BitmapIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct BitmapIter<'a> {
    bitmap: &'a Bitmap,
    index: usize,
}

impl Iterator for BitmapIter<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.bitmap.len {
            return None;
        }
        let bit = self.bitmap.get_bit(self.index);
        self.index += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bitmap.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitmapIter<'_> {}

/// A growable bitmap, frozen into a [`Bitmap`] once built.
#[derive(Debug, Clone, Default)]
pub struct MutableBitmap {
    bytes: Vec<u8>,
    len: usize,
}

impl MutableBitmap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity.div_ceil(8)),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn push(&mut self, value: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        if value {
            *self.bytes.last_mut().unwrap() |= 1 << (self.len % 8);
        }
        self.len += 1;
    }

    pub fn extend_constant(&mut self, additional: usize, value: bool) {
        for _ in 0..additional {
            self.push(value);
        }
    }

    pub fn freeze(self) -> Bitmap {
        Bitmap {
            bytes: self.bytes,
            len: self.len,
        }
    }
}

fn clear_trailing_bits(bytes: &mut [u8], len: usize) {
    if len % 8 != 0 {
        if let Some(last) = bytes.last_mut() {
            *last &= (1u8 << (len % 8)) - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_respect_trailing_bits() {
        let bitmap = Bitmap::new_with_value(true, 11);
        assert_eq!(bitmap.len(), 11);
        assert_eq!(bitmap.set_bits(), 11);
        assert_eq!(bitmap.unset_bits(), 0);

        let bitmap: Bitmap = (0..11).map(|i| i % 2 == 0).collect();
        assert_eq!(bitmap.set_bits(), 6);
        assert_eq!(bitmap.unset_bits(), 5);
    }

    #[test]
    fn roundtrips_through_iter() {
        let values = [true, false, false, true, true, false, true, true, false];
        let bitmap: Bitmap = values.iter().copied().collect();
        let out: Vec<bool> = bitmap.iter().collect();
        assert_eq!(out, values);
    }

    #[test]
    fn mutable_push_matches_get_bit() {
        let mut mutable = MutableBitmap::with_capacity(20);
        for i in 0..20 {
            mutable.push(i % 3 == 0);
        }
        let bitmap = mutable.freeze();
        for i in 0..20 {
            assert_eq!(bitmap.get_bit(i), i % 3 == 0);
        }
    }
}
