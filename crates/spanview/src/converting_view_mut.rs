// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::type_name;
use std::fmt::{self, Debug};
use std::{mem, slice};

use crate::copy::{ElementSequence, ElementSink, ElementSource, copy_elements, try_copy_elements};
use crate::functions::same_function;
use crate::position::{IntoPosition, PositionRange, resolve_range, resolve_window};
use crate::{BackwardFn, ConvertingView, ForwardFn, Iter, Result, inspect};

/// A mutable view over a slice of `From` that presents each element as a `To`.
///
/// Reads pass the stored element through `forward`, writes pass the new value through
/// `backward` and store the result. The two functions are expected to be inverses of each
/// other, which the view does not verify.
///
/// ```
/// use spanview::ConvertingViewMut;
///
/// let mut storage = [1, 2, 3];
/// let negate = |x: i32| -x;
///
/// let mut view = ConvertingViewMut::new(&mut storage, &negate, &negate);
/// assert_eq!(view.get(0)?, -1);
///
/// view.set(0, 10)?;
/// assert_eq!(view.get(0)?, 10);
/// assert_eq!(storage, [-10, 2, 3]);
/// # Ok::<(), spanview::Error>(())
/// ```
///
/// Slicing a mutable view reborrows it. Use [`into_slice()`][Self::into_slice] to narrow a
/// view without shortening its lifetime, or [`as_read_only()`][Self::as_read_only] to get a
/// [`ConvertingView`] over the same storage.
pub struct ConvertingViewMut<'a, 'f, From, To> {
    storage: &'a mut [From],
    forward: &'f ForwardFn<'f, From, To>,
    backward: &'f BackwardFn<'f, From, To>,
}

impl<'a, 'f, From, To> ConvertingViewMut<'a, 'f, From, To> {
    /// Creates a view over all of `storage`.
    #[must_use]
    pub fn new(storage: &'a mut [From], forward: &'f ForwardFn<'f, From, To>, backward: &'f BackwardFn<'f, From, To>) -> Self {
        Self {
            storage,
            forward,
            backward,
        }
    }

    /// Creates a view over `len` elements of `storage`, starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the window does
    /// not fit inside `storage`.
    pub fn with_window(
        storage: &'a mut [From],
        start: usize,
        len: usize,
        forward: &'f ForwardFn<'f, From, To>,
        backward: &'f BackwardFn<'f, From, To>,
    ) -> Result<Self> {
        let window = resolve_window(start, len, storage.len())?;

        Ok(Self::new(&mut storage[window], forward, backward))
    }

    /// Creates a view over `len` elements starting at `ptr`.
    ///
    /// # Safety
    ///
    /// The caller must uphold the requirements of [`std::slice::from_raw_parts_mut()`] for
    /// `ptr` and `len` for the entire lifetime `'a`.
    #[must_use]
    pub unsafe fn from_raw_parts_mut(
        ptr: *mut From,
        len: usize,
        forward: &'f ForwardFn<'f, From, To>,
        backward: &'f BackwardFn<'f, From, To>,
    ) -> Self {
        // SAFETY: Forwarding the safety requirements of this function.
        let storage = unsafe { slice::from_raw_parts_mut(ptr, len) };

        Self::new(storage, forward, backward)
    }

    /// Creates a view over no elements at all.
    #[must_use]
    pub fn empty(forward: &'f ForwardFn<'f, From, To>, backward: &'f BackwardFn<'f, From, To>) -> Self {
        Self::new(Default::default(), forward, backward)
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
    pub fn storage(&self) -> &[From] {
        self.storage
    }

    /// The underlying storage, for direct modification.
    #[must_use]
    pub fn storage_mut(&mut self) -> &mut [From] {
        self.storage
    }

    /// Consumes the view, returning the underlying storage.
    #[must_use]
    pub fn into_storage(self) -> &'a mut [From] {
        self.storage
    }

    /// The function used to convert stored elements on read.
    #[must_use]
    pub fn forward(&self) -> &'f ForwardFn<'f, From, To> {
        self.forward
    }

    /// The function used to convert values into stored elements on write.
    #[must_use]
    pub fn backward(&self) -> &'f BackwardFn<'f, From, To> {
        self.backward
    }

    /// Returns a read-only view over the same storage.
    #[must_use]
    pub fn as_read_only(&self) -> ConvertingView<'_, 'f, From, To> {
        ConvertingView::new(self.storage, self.forward)
    }

    /// Returns a view over a range of this view's elements, reborrowing this view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the range is
    /// reversed or reaches outside the view.
    pub fn slice<R>(&mut self, range: R) -> Result<ConvertingViewMut<'_, 'f, From, To>>
    where
        R: PositionRange,
    {
        let range = resolve_range(&range, self.len())?;

        Ok(ConvertingViewMut::new(&mut self.storage[range], self.forward, self.backward))
    }

    /// Narrows the view to a range of its elements, keeping the original storage lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the range is
    /// reversed or reaches outside the view.
    pub fn into_slice<R>(self, range: R) -> Result<Self>
    where
        R: PositionRange,
    {
        let range = resolve_range(&range, self.len())?;
        let Self {
            storage,
            forward,
            backward,
        } = self;

        Ok(Self::new(&mut storage[range], forward, backward))
    }

    /// Returns a view over the elements from `start` to the end, reborrowing this view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if `start` is
    /// greater than the length of the view.
    pub fn slice_from(&mut self, start: usize) -> Result<ConvertingViewMut<'_, 'f, From, To>> {
        self.slice(start..)
    }

    /// Returns a view over `len` elements starting at `start`, reborrowing this view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the window
    /// reaches outside the view.
    pub fn slice_at(&mut self, start: usize, len: usize) -> Result<ConvertingViewMut<'_, 'f, From, To>> {
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
        let range = resolve_range(&(count..), self.len())?;

        let storage = mem::take(&mut self.storage);
        self.storage = &mut storage[range];
        Ok(())
    }

    /// Writes `value` at `position`, converting it with the `backward` function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`][crate::Error::IndexOutOfBounds] if the position
    /// does not designate an element of the view. The function is not called in that case.
    pub fn set(&mut self, position: impl IntoPosition, value: To) -> Result<()> {
        let index = position.into_position().resolve_index(self.len())?;

        self.write(index, value);
        Ok(())
    }
}

impl<'f, From: Clone, To> ConvertingViewMut<'_, 'f, From, To> {
    /// Reads the element at `position`, converting it with the `forward` function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`][crate::Error::IndexOutOfBounds] if the position
    /// does not designate an element of the view. The function is not called in that case.
    pub fn get(&self, position: impl IntoPosition) -> Result<To> {
        self.as_read_only().get(position)
    }

    /// Copies all elements of the view into `destination`.
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
        self.as_read_only().to_vec()
    }

    /// Returns an iterator over the converted elements.
    #[must_use]
    pub fn iter(&self) -> Iter<ConvertingView<'_, 'f, From, To>> {
        self.as_read_only().iter()
    }
}

impl<From: Clone + Debug, To: Debug> ConvertingViewMut<'_, '_, From, To> {
    /// Renders every element for debugging as `"{stored} -Get-> {value} -Set-> {stored_again}"`.
    ///
    /// The write path is only simulated: `backward` is called but nothing is stored. Panics
    /// raised by either function are caught and rendered in place of the value.
    /// The panic hook still runs for each caught panic, so the default hook prints it to stderr.
    #[must_use]
    pub fn inspect(&self) -> Vec<String> {
        self.storage
            .iter()
            .enumerate()
            .map(|(index, stored)| inspect::render_round_trip(index, stored, || (self.forward)(stored.clone()), self.backward))
            .collect()
    }
}

impl<From, To> Debug for ConvertingViewMut<'_, '_, From, To> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertingViewMut")
            .field("from", &type_name::<From>())
            .field("to", &type_name::<To>())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<From, To> PartialEq for ConvertingViewMut<'_, '_, From, To> {
    fn eq(&self, other: &Self) -> bool {
        self.as_read_only() == other.as_read_only() && same_function(self.backward, other.backward)
    }
}

impl<From, To> PartialEq<ConvertingView<'_, '_, From, To>> for ConvertingViewMut<'_, '_, From, To> {
    fn eq(&self, other: &ConvertingView<'_, '_, From, To>) -> bool {
        self.as_read_only() == *other
    }
}

impl<From, To> PartialEq<ConvertingViewMut<'_, '_, From, To>> for ConvertingView<'_, '_, From, To> {
    fn eq(&self, other: &ConvertingViewMut<'_, '_, From, To>) -> bool {
        *self == other.as_read_only()
    }
}

impl<'a, 'f, From, To> std::convert::From<ConvertingViewMut<'a, 'f, From, To>> for ConvertingView<'a, 'f, From, To> {
    fn from(view: ConvertingViewMut<'a, 'f, From, To>) -> Self {
        Self::new(view.storage, view.forward)
    }
}

impl<From, To> ElementSequence for ConvertingViewMut<'_, '_, From, To> {
    type Item = To;

    fn len(&self) -> usize {
        self.storage.len()
    }
}

impl<From: Clone, To> ElementSource for ConvertingViewMut<'_, '_, From, To> {
    fn read(&self, index: usize) -> To {
        (self.forward)(self.storage[index].clone())
    }
}

impl<From, To> ElementSink for ConvertingViewMut<'_, '_, From, To> {
    fn write(&mut self, index: usize, value: To) {
        self.storage[index] = (self.backward)(value);
    }
}

impl<'v, 'f, From: Clone, To> IntoIterator for &'v ConvertingViewMut<'_, 'f, From, To> {
    type Item = To;
    type IntoIter = Iter<ConvertingView<'v, 'f, From, To>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
