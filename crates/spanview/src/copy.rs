// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The copy algebra shared by all views and plain slices.
//!
//! Any [`ElementSource`] can be copied into any [`ElementSink`] of the same logical element
//! type. Each side applies its own conversion: the source converts on read, the destination
//! converts on write.

use crate::{Error, Result, telemetry};

/// A fixed-length sequence of logical elements.
///
/// The common base of [`ElementSource`] and [`ElementSink`].
pub trait ElementSequence {
    /// The logical element type.
    type Item;

    /// Number of logical elements.
    fn len(&self) -> usize;

    /// Whether the sequence holds no logical elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A sequence whose logical elements can be read by index.
///
/// Implemented by all views and by plain slices (`[T]`, `[T; N]` and `Vec<T>`) of cloneable
/// elements.
pub trait ElementSource: ElementSequence {
    /// Reads the logical element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`len()`][ElementSequence::len]. Any panic raised by a
    /// conversion function is propagated.
    fn read(&self, index: usize) -> Self::Item;
}

/// A sequence whose logical elements can be overwritten by index.
///
/// Implemented by the mutable views and by plain slices (`[T]`, `[T; N]` and `Vec<T>`).
pub trait ElementSink: ElementSequence {
    /// Overwrites the logical element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`len()`][ElementSequence::len]. Any panic raised by a
    /// conversion function is propagated.
    fn write(&mut self, index: usize, value: Self::Item);
}

/// Copies every logical element of `source` into the same index of `destination`.
///
/// Elements in `destination` past the length of `source` are left untouched.
///
/// # Errors
///
/// Returns [`Error::DestinationTooShort`] if `destination` holds fewer logical elements than
/// `source`. Lengths are compared before anything is written, so a rejected copy leaves
/// `destination` unmodified.
///
/// # Panics
///
/// Panics raised by conversion functions propagate. The elements copied before the panic
/// remain written.
///
/// # Example
///
/// ```
/// use spanview::{ConvertingView, copy_elements};
///
/// let storage = [1, 2, 3];
/// let negate = |x: i32| -x;
/// let view = ConvertingView::new(&storage, &negate);
///
/// let mut destination = [0; 4];
/// copy_elements(&view, &mut destination)?;
///
/// assert_eq!(destination, [-1, -2, -3, 0]);
/// # Ok::<(), spanview::Error>(())
/// ```
pub fn copy_elements<S, D>(source: &S, destination: &mut D) -> Result<()>
where
    S: ElementSource + ?Sized,
    D: ElementSink<Item = S::Item> + ?Sized,
{
    let source_len = source.len();
    let destination_len = destination.len();

    if source_len > destination_len {
        telemetry::copy_rejected(source_len, destination_len);

        return Err(Error::DestinationTooShort {
            source_len,
            destination_len,
        });
    }

    for index in 0..source_len {
        destination.write(index, source.read(index));
    }

    Ok(())
}

/// Like [`copy_elements()`] but reports a destination that is too short as `false`.
///
/// A `false` result guarantees that nothing was written.
pub fn try_copy_elements<S, D>(source: &S, destination: &mut D) -> bool
where
    S: ElementSource + ?Sized,
    D: ElementSink<Item = S::Item> + ?Sized,
{
    copy_elements(source, destination).is_ok()
}

impl<T> ElementSequence for [T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T: Clone> ElementSource for [T] {
    fn read(&self, index: usize) -> T {
        self[index].clone()
    }
}

impl<T> ElementSink for [T] {
    fn write(&mut self, index: usize, value: T) {
        self[index] = value;
    }
}

impl<T, const N: usize> ElementSequence for [T; N] {
    type Item = T;

    fn len(&self) -> usize {
        N
    }
}

impl<T: Clone, const N: usize> ElementSource for [T; N] {
    fn read(&self, index: usize) -> T {
        self[index].clone()
    }
}

impl<T, const N: usize> ElementSink for [T; N] {
    fn write(&mut self, index: usize, value: T) {
        self[index] = value;
    }
}

impl<T> ElementSequence for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl<T: Clone> ElementSource for Vec<T> {
    fn read(&self, index: usize) -> T {
        self[index].clone()
    }
}

impl<T> ElementSink for Vec<T> {
    fn write(&mut self, index: usize, value: T) {
        self[index] = value;
    }
}
