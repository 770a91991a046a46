// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Ready-made unpack and pack functions for numbers stored as bytes.
//!
//! These are plain functions, so a reference to one can be handed straight to a buffered view:
//!
//! ```
//! use spanview::{BufferedViewMut, codec};
//!
//! let mut storage = [0x34_u8, 0x12, 0x78, 0x56];
//! let unpack = codec::unpack_le::<u16>;
//! let pack = codec::pack_le::<u16>;
//!
//! let mut view = BufferedViewMut::new(&mut storage, &unpack, &pack)?;
//! assert_eq!(view.get(0)?, 0x1234);
//!
//! view.set(1, 0xCAFE)?;
//! assert_eq!(storage, [0x34, 0x12, 0xFE, 0xCA]);
//! # Ok::<(), spanview::Error>(())
//! ```

use num_traits::{FromBytes, ToBytes};

use crate::Record;

/// Reads a number of type `T` from a record in little-endian representation.
///
/// # Panics
///
/// Panics if the record does not hold exactly `size_of::<T>()` bytes.
#[must_use]
pub fn unpack_le<T>(record: &[u8]) -> T
where
    T: FromBytes,
    T::Bytes: Sized,
{
    T::from_le_bytes(bytes_array::<T>(record))
}

/// Reads a number of type `T` from a record in big-endian representation.
///
/// # Panics
///
/// Panics if the record does not hold exactly `size_of::<T>()` bytes.
#[must_use]
pub fn unpack_be<T>(record: &[u8]) -> T
where
    T: FromBytes,
    T::Bytes: Sized,
{
    T::from_be_bytes(bytes_array::<T>(record))
}

/// Reads a number of type `T` from a record in the native byte order of the platform.
///
/// # Panics
///
/// Panics if the record does not hold exactly `size_of::<T>()` bytes.
#[must_use]
pub fn unpack_ne<T>(record: &[u8]) -> T
where
    T: FromBytes,
    T::Bytes: Sized,
{
    T::from_ne_bytes(bytes_array::<T>(record))
}

/// Writes a number of type `T` into a record in little-endian representation.
#[must_use]
pub fn pack_le<T: ToBytes>(value: T) -> Record<u8> {
    Record::from_slice(value.to_le_bytes().as_ref())
}

/// Writes a number of type `T` into a record in big-endian representation.
#[must_use]
pub fn pack_be<T: ToBytes>(value: T) -> Record<u8> {
    Record::from_slice(value.to_be_bytes().as_ref())
}

/// Writes a number of type `T` into a record in the native byte order of the platform.
#[must_use]
pub fn pack_ne<T: ToBytes>(value: T) -> Record<u8> {
    Record::from_slice(value.to_ne_bytes().as_ref())
}

fn bytes_array<T>(record: &[u8]) -> &T::Bytes
where
    T: FromBytes,
    T::Bytes: Sized,
{
    assert_eq!(
        record.len(),
        size_of::<T::Bytes>(),
        "record must hold exactly as many bytes as the number it encodes"
    );
    assert_eq!(align_of::<T::Bytes>(), 1, "byte representation must be a byte array");

    let bytes_array_ptr = record.as_ptr().cast::<T::Bytes>();

    // SAFETY: The record holds exactly as many bytes as the target type, which is an array
    // of bytes and so has no alignment requirements. Both were checked above.
    unsafe { &*bytes_array_ptr }
}
