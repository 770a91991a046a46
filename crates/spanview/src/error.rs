// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::type_name;

use crate::Position;

/// The result for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur when constructing, indexing, slicing or copying a view.
///
/// Failures raised inside caller-supplied conversion functions are not represented here.
/// Those panic and the panic propagates to the caller untouched.
///
/// # Thread safety
///
/// This type is thread-safe.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A buffered view can not pack its record type from the storage type, because the record
    /// type is zero-sized, smaller than the storage type or not a whole multiple of it.
    #[error("record type {to} ({to_size} bytes) is not a whole multiple of storage type {from} ({from_size} bytes)")]
    RecordSize {
        /// Name of the storage element type.
        from: &'static str,
        /// Name of the logical element type.
        to: &'static str,
        /// Size of the storage element type in bytes.
        from_size: usize,
        /// Size of the logical element type in bytes.
        to_size: usize,
    },

    /// An element position does not fall inside the view.
    #[error("position {position} is out of bounds for a view of length {len}")]
    IndexOutOfBounds {
        /// The position as requested by the caller.
        position: Position,
        /// Logical length of the view.
        len: usize,
    },

    /// A slicing range or construction window does not fall inside the view or storage.
    #[error("range {range} is out of bounds for length {len}")]
    RangeOutOfBounds {
        /// The range as requested by the caller, rendered for display.
        range: String,
        /// Length the range was resolved against.
        len: usize,
    },

    /// A copy was rejected because the destination holds fewer logical elements than the source.
    #[error("destination holds {destination_len} elements but {source_len} are required")]
    DestinationTooShort {
        /// Logical length of the copy source.
        source_len: usize,
        /// Logical length of the copy destination.
        destination_len: usize,
    },
}

impl Error {
    pub(crate) fn record_size<From, To>() -> Self {
        Self::RecordSize {
            from: type_name::<From>(),
            to: type_name::<To>(),
            from_size: size_of::<From>(),
            to_size: size_of::<To>(),
        }
    }
}
