// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Zero-copy views that present a borrowed slice of one element type as a sequence of another.
//!
//! A view borrows a slice of stored elements of type `From` and exposes a logical sequence of
//! elements of type `To`. Nothing is converted up front: every read and write passes through a
//! caller-supplied function at the moment it happens, and the stored elements are never copied
//! into a second buffer.
//!
//! There are two ways to map stored elements to logical ones:
//!
//! * **Converting** views map each stored element to exactly one logical element, using a
//!   `forward` function for reads and a `backward` function for writes. Example: presenting a
//!   slice of integers with their signs flipped.
//! * **Buffered** views group a fixed-size record of stored elements into one logical element,
//!   using an `unpack` function for reads and a `pack` function for writes. Example: presenting
//!   a byte buffer as a sequence of 16-bit integers.
//!
//! Both come in a read-only and a mutable flavor, for four view types in total:
//!
//! |           | Read-only            | Mutable                 |
//! |-----------|----------------------|-------------------------|
//! | Converting | [`ConvertingView`]  | [`ConvertingViewMut`]   |
//! | Buffered   | [`BufferedView`]    | [`BufferedViewMut`]     |
//!
//! # Reading and writing
//!
//! Element access is checked: [`get()`][ConvertingView::get] and
//! [`set()`][ConvertingViewMut::set] return an [`Error`] for an invalid position instead of
//! panicking. Positions can be counted from either end of the view with [`Position`].
//!
//! ```
//! use spanview::{ConvertingViewMut, Position};
//!
//! let mut storage: Vec<i32> = (-50..=50).collect();
//! let negate = |x: i32| -x;
//!
//! let mut view = ConvertingViewMut::new(&mut storage, &negate, &negate);
//! assert_eq!(view.get(0)?, 50);
//! assert_eq!(view.get(Position::FromEnd(1))?, -50);
//!
//! view.set(0, -21)?;
//! assert_eq!(view.get(0)?, -21);
//! assert_eq!(storage[0], 21);
//! # Ok::<(), spanview::Error>(())
//! ```
//!
//! # Records
//!
//! The record size of a buffered view is `size_of::<To>() / size_of::<From>()`. Creating a
//! buffered view fails if `To` is not a whole multiple of `From` in size. If the storage does
//! not end on a record boundary, the incomplete trailing record is not part of the view.
//!
//! The [`codec`] module provides ready-made functions for numbers stored as bytes.
//!
//! ```
//! use spanview::{BufferedView, Position, codec};
//!
//! let storage: Vec<u8> = (-25_i16..=25).flat_map(i16::to_le_bytes).collect();
//! let unpack = codec::unpack_le::<i16>;
//!
//! let view = BufferedView::new(&storage, &unpack)?;
//! assert_eq!(view.len(), 51);
//! assert_eq!(view.get(Position::FromEnd(1))?, 25);
//!
//! let middle = view.slice(Position::FromStart(15)..Position::FromEnd(15))?;
//! assert_eq!(middle.len(), 21);
//! assert_eq!(middle.get(0)?, -10);
//! # Ok::<(), spanview::Error>(())
//! ```
//!
//! # Slicing
//!
//! Every view can be narrowed to a sub-range of its logical elements with `slice()`,
//! `slice_from()`, `slice_at()` and `advance()`. The result shares the storage and the
//! functions of the original view. Mutable views reborrow on `slice()` and offer
//! `into_slice()` to narrow without shortening the lifetime.
//!
//! # Copying
//!
//! Any view or plain slice can be copied into any mutable view or plain slice with the same
//! logical element type, using [`copy_elements()`] or the `copy_to()` method on each view.
//! The destination converts each element with its own write function. A copy into a
//! destination that is too short is rejected before anything is written.
//!
//! ```
//! use spanview::{BufferedViewMut, ConvertingView, codec};
//!
//! let source_storage = [1_i16, 2, 3];
//! let negate = |x: i16| -x;
//! let source = ConvertingView::new(&source_storage, &negate);
//!
//! let mut bytes = [0_u8; 6];
//! let unpack = codec::unpack_be::<i16>;
//! let pack = codec::pack_be::<i16>;
//! let mut destination = BufferedViewMut::new(&mut bytes, &unpack, &pack)?;
//!
//! source.copy_to(&mut destination)?;
//! assert_eq!(bytes, [0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFD]);
//!
//! let mut too_short = [0_i16; 2];
//! assert!(!source.try_copy_to(&mut too_short));
//! # Ok::<(), spanview::Error>(())
//! ```
//!
//! # Equality
//!
//! Views compare equal when they cover the same memory and were built with the same function
//! references. Two distinct closures with identical behavior are not equal. Views do not
//! implement `Eq` or `Hash` and are not meant to be used as map keys.
//!
//! # Conversion functions
//!
//! Views hold their functions by reference, so one function can serve many views. The
//! [factories][ConvertingViewFactory] capture functions once for repeated use. Panics raised by
//! conversion functions propagate to the caller, except during [`inspect()`][ConvertingView::inspect],
//! which renders them as text.
//!
//! # Logging
//!
//! With the `logs` feature enabled, the crate emits `tracing` events when it rejects a record
//! size or a copy and when a conversion function panics during inspection.

mod buffered_view;
mod buffered_view_mut;
pub mod codec;
mod converting_view;
mod converting_view_mut;
mod copy;
mod error;
mod factory;
mod functions;
mod inspect;
mod iter;
mod position;
mod slice_ext;
mod telemetry;

pub use buffered_view::BufferedView;
pub use buffered_view_mut::BufferedViewMut;
pub use converting_view::ConvertingView;
pub use converting_view_mut::ConvertingViewMut;
pub use copy::{ElementSequence, ElementSink, ElementSource, copy_elements, try_copy_elements};
pub use error::{Error, Result};
pub use factory::{BufferedViewFactory, BufferedViewMutFactory, ConvertingViewFactory, ConvertingViewMutFactory};
pub use functions::{BackwardFn, ForwardFn, INLINE_RECORD_LEN, PackFn, Record, UnpackFn};
pub use iter::Iter;
pub use position::{IntoPosition, Position, PositionRange};
pub use slice_ext::SliceExt;

#[cfg(test)]
mod testing;
