//! Read-only column buffers with Arrow-style validity semantics.
//!
//! These types are the physical views the reduction kernels operate on. A
//! buffer either carries no validity bitmap (no element is null) or a bitmap
//! of exactly its own length where an unset bit marks a null position.

mod array;
mod bitmap;

pub use array::{Array, BooleanArray, NativeType, PrimitiveArray, Utf8Array};
pub use bitmap::{Bitmap, BitmapIter, MutableBitmap};
