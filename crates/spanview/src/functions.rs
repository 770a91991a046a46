// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::num::NonZero;
use std::ptr;

use smallvec::SmallVec;

use crate::{Error, Result, telemetry};

/// Maps a stored element to a logical element. Used by converting views for reading.
pub type ForwardFn<'f, From, To> = dyn Fn(From) -> To + 'f;

/// Maps a logical element back to a stored element. Used by mutable converting views for writing.
///
/// Views do not verify that this is the inverse of the matching [`ForwardFn`].
pub type BackwardFn<'f, From, To> = dyn Fn(To) -> From + 'f;

/// Builds a logical element from one record of stored elements. Used by buffered views for reading.
///
/// The slice passed in always holds exactly one record, i.e. `record_size` elements.
pub type UnpackFn<'f, From, To> = dyn Fn(&[From]) -> To + 'f;

/// Breaks a logical element down into one record of stored elements. Used by mutable buffered
/// views for writing.
///
/// The returned record is expected to hold exactly `record_size` elements. This is not verified:
/// a longer record overwrites the start of the records that follow it and a shorter one leaves
/// the tail of its own record untouched.
pub type PackFn<'f, From, To> = dyn Fn(To) -> Record<From> + 'f;

/// How many stored elements a [`Record`] holds before it spills over to the heap.
pub const INLINE_RECORD_LEN: usize = 16;

/// One record of stored elements, as produced by a [`PackFn`].
pub type Record<T> = SmallVec<[T; INLINE_RECORD_LEN]>;

/// Whether two function references designate the same function.
///
/// Compares the data address and the vtable. Functions without captured state (fn items and
/// closures that capture nothing) all live at the same dangling address and differ only in
/// their vtable.
pub(crate) fn same_function<F: ?Sized>(left: &F, right: &F) -> bool {
    ptr::eq(left, right)
}

/// Calculates how many `From` elements make up one `To` record.
///
/// Fails unless `To` is a non-empty whole multiple of a non-zero-sized `From`.
pub(crate) fn record_size<From, To>() -> Result<NonZero<usize>> {
    let from_size = size_of::<From>();
    let to_size = size_of::<To>();

    to_size
        .checked_rem(from_size)
        .filter(|&remainder| remainder == 0)
        .and_then(|_| to_size.checked_div(from_size))
        .and_then(NonZero::new)
        .ok_or_else(|| {
            let error = Error::record_size::<From, To>();
            telemetry::record_size_rejected(&error);
            error
        })
}
