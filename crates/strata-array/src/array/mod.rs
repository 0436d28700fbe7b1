mod boolean;
mod primitive;
mod utf8;

pub use boolean::BooleanArray;
pub use primitive::PrimitiveArray;
pub use utf8::Utf8Array;

use crate::bitmap::Bitmap;

/// Sealed-ish marker for the primitive in-memory representations a
/// [`PrimitiveArray`] can hold.
pub trait NativeType:
    'static + Copy + Send + Sync + Default + PartialEq + std::fmt::Debug + bytemuck::Pod
{
}

macro_rules! native_type {
    ($($t:ty),+) => {
        $(impl NativeType for $t {})+
    };
}

native_type!(i8, i16, i32, i64, i128, u8, u16, u32, u64, f32, f64);

/// Common read surface of every column buffer.
pub trait Array {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validity(&self) -> Option<&Bitmap>;

    fn null_count(&self) -> usize {
        self.validity().map_or(0, |bitmap| bitmap.unset_bits())
    }

    /// # Panics
    /// Panics iff `i >= self.len()`.
    fn is_valid(&self, i: usize) -> bool {
        assert!(i < self.len());
        self.validity().map_or(true, |bitmap| bitmap.get_bit(i))
    }
}
