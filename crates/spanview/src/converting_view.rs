// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::type_name;
use std::fmt::{self, Debug};
use std::{ptr, slice};

use crate::copy::{ElementSequence, ElementSink, ElementSource, copy_elements, try_copy_elements};
use crate::functions::same_function;
use crate::position::{IntoPosition, PositionRange, resolve_range, resolve_window};
use crate::{ForwardFn, Iter, Result, inspect};

/// A read-only view over a slice of `From` that presents each element as a `To`.
///
/// Every read passes the stored element through the `forward` function. Nothing is converted
/// or copied up front, so creating and slicing views is free regardless of the slice length.
///
/// The view is `Copy`: it is only a borrowed slice plus a borrowed function.
///
/// ```
/// use spanview::ConvertingView;
///
/// let celsius = [0.0, 37.0, 100.0];
/// let to_fahrenheit = |c: f64| c * 9.0 / 5.0 + 32.0;
///
/// let fahrenheit = ConvertingView::new(&celsius, &to_fahrenheit);
///
/// assert_eq!(fahrenheit.len(), 3);
/// assert_eq!(fahrenheit.get(2)?, 212.0);
/// # Ok::<(), spanview::Error>(())
/// ```
///
/// # Equality
///
/// Two views are equal if they cover the same memory (same address and length) and were
/// built with the very same function reference. Behaviorally identical but distinct
/// functions do not compare equal. Views implement neither `Eq` nor `Hash`.
pub struct ConvertingView<'a, 'f, From, To> {
    storage: &'a [From],
    forward: &'f ForwardFn<'f, From, To>,
}

impl<'a, 'f, From, To> ConvertingView<'a, 'f, From, To> {
    /// Creates a view over all of `storage`.
    #[must_use]
    pub fn new(storage: &'a [From], forward: &'f ForwardFn<'f, From, To>) -> Self {
        Self { storage, forward }
    }

    /// Creates a view over `len` elements of `storage`, starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the window does
    /// not fit inside `storage`.
    pub fn with_window(storage: &'a [From], start: usize, len: usize, forward: &'f ForwardFn<'f, From, To>) -> Result<Self> {
        let window = resolve_window(start, len, storage.len())?;

        Ok(Self::new(&storage[window], forward))
    }

    /// Creates a view over `len` elements starting at `ptr`.
    ///
    /// This exists for interoperability with memory owned outside of Rust.
    ///
    /// # Safety
    ///
    /// The caller must uphold the requirements of [`std::slice::from_raw_parts()`] for
    /// `ptr` and `len` for the entire lifetime `'a`.
    #[must_use]
    pub unsafe fn from_raw_parts(ptr: *const From, len: usize, forward: &'f ForwardFn<'f, From, To>) -> Self {
        // SAFETY: Forwarding the safety requirements of this function.
        let storage = unsafe { slice::from_raw_parts(ptr, len) };

        Self::new(storage, forward)
    }

    /// Creates a view over no elements at all.
    #[must_use]
    pub fn empty(forward: &'f ForwardFn<'f, From, To>) -> Self {
        Self::new(Default::default(), forward)
    }

    /// The number of logical elements, which is always the number of stored elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the view covers no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// The underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &'a [From] {
        self.storage
    }

    /// The function used to convert stored elements on read.
    #[must_use]
    pub fn forward(&self) -> &'f ForwardFn<'f, From, To> {
        self.forward
    }

    /// Returns a view over a range of this view's elements, using the same function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the range is
    /// reversed or reaches outside the view.
    pub fn slice<R>(&self, range: R) -> Result<Self>
    where
        R: PositionRange,
    {
        let range = resolve_range(&range, self.len())?;

        Ok(Self::new(&self.storage[range], self.forward))
    }

    /// Returns a view over the elements from `start` to the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if `start` is
    /// greater than the length of the view.
    pub fn slice_from(&self, start: usize) -> Result<Self> {
        self.slice(start..)
    }

    /// Returns a view over `len` elements starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the window
    /// reaches outside the view.
    pub fn slice_at(&self, start: usize, len: usize) -> Result<Self> {
        let window = resolve_window(start, len, self.len())?;

        self.slice(window)
    }

    /// Drops the first `count` elements from the view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if `count` is
    /// greater than the length of the view. The view is left unchanged in that case.
    pub fn advance(&mut self, count: usize) -> Result<()> {
        *self = self.slice_from(count)?;
        Ok(())
    }
}

impl<'a, 'f, From: Clone, To> ConvertingView<'a, 'f, From, To> {
    /// Reads the element at `position`, converting it with the `forward` function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`][crate::Error::IndexOutOfBounds] if the position
    /// does not designate an element of the view. The function is not called in that case.
    pub fn get(&self, position: impl IntoPosition) -> Result<To> {
        let index = position.into_position().resolve_index(self.len())?;

        Ok(self.read(index))
    }

    /// Copies all elements of the view into `destination`, which may be a plain slice or a
    /// mutable view with the same logical element type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DestinationTooShort`][crate::Error::DestinationTooShort] if
    /// `destination` is shorter than this view. Nothing is written in that case.
    pub fn copy_to<D>(&self, destination: &mut D) -> Result<()>
    where
        D: ElementSink<Item = To> + ?Sized,
    {
        copy_elements(self, destination)
    }

    /// Like [`copy_to()`][Self::copy_to] but reports a destination that is too short as `false`.
    pub fn try_copy_to<D>(&self, destination: &mut D) -> bool
    where
        D: ElementSink<Item = To> + ?Sized,
    {
        try_copy_elements(self, destination)
    }

    /// Converts every element into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<To> {
        self.iter().collect()
    }

    /// Returns an iterator over the converted elements.
    #[must_use]
    pub fn iter(&self) -> Iter<Self> {
        Iter::new(*self)
    }
}

impl<From: Clone + Debug, To: Debug> ConvertingView<'_, '_, From, To> {
    /// Renders every element for debugging as `"{stored} -Get-> {value}"`.
    ///
    /// Panics raised by the conversion function are caught and rendered in place of the value.
    /// The panic hook still runs for each caught panic, so the default hook prints it to stderr.
    #[must_use]
    pub fn inspect(&self) -> Vec<String> {
        self.storage
            .iter()
            .enumerate()
            .map(|(index, stored)| inspect::render_read(index, stored, || (self.forward)(stored.clone())))
            .collect()
    }
}

impl<From, To> Clone for ConvertingView<'_, '_, From, To> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<From, To> Copy for ConvertingView<'_, '_, From, To> {}

impl<From, To> Debug for ConvertingView<'_, '_, From, To> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertingView")
            .field("from", &type_name::<From>())
            .field("to", &type_name::<To>())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<From, To> PartialEq for ConvertingView<'_, '_, From, To> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.storage, other.storage) && same_function(self.forward, other.forward)
    }
}

impl<From, To> ElementSequence for ConvertingView<'_, '_, From, To> {
    type Item = To;

    fn len(&self) -> usize {
        self.storage.len()
    }
}

impl<From: Clone, To> ElementSource for ConvertingView<'_, '_, From, To> {
    fn read(&self, index: usize) -> To {
        (self.forward)(self.storage[index].clone())
    }
}

impl<'a, 'f, From: Clone, To> IntoIterator for ConvertingView<'a, 'f, From, To> {
    type Item = To;
    type IntoIter = Iter<Self>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

impl<'a, 'f, From: Clone, To> IntoIterator for &ConvertingView<'a, 'f, From, To> {
    type Item = To;
    type IntoIter = Iter<ConvertingView<'a, 'f, From, To>>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(*self)
    }
}
