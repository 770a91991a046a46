// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::copy::{ElementSink, copy_elements, try_copy_elements};
use crate::{
    BackwardFn, BufferedView, BufferedViewMut, ConvertingView, ConvertingViewMut, ForwardFn, PackFn, Result, UnpackFn,
};

/// Extension trait for creating views over plain slices and copying slices into views.
///
/// # Examples
///
/// ```
/// use spanview::SliceExt;
///
/// let mut storage = [1, 2, 3];
/// let negate = |x: i32| -x;
///
/// let mut negated = storage.as_converting_mut(&negate, &negate);
/// [10, 20].copy_to_view(&mut negated)?;
///
/// assert_eq!(storage, [-10, -20, 3]);
/// # Ok::<(), spanview::Error>(())
/// ```
pub trait SliceExt<T> {
    /// Copies every element of the slice into the same index of `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DestinationTooShort`][crate::Error::DestinationTooShort] if
    /// `destination` is shorter than the slice. Nothing is written in that case.
    fn copy_to_view<D>(&self, destination: &mut D) -> Result<()>
    where
        T: Clone,
        D: ElementSink<Item = T> + ?Sized;

    /// Like [`copy_to_view()`][Self::copy_to_view] but reports a destination that is too short
    /// as `false`.
    fn try_copy_to_view<D>(&self, destination: &mut D) -> bool
    where
        T: Clone,
        D: ElementSink<Item = T> + ?Sized;

    /// Creates a [`ConvertingView`] over the whole slice.
    fn as_converting<'f, To>(&self, forward: &'f ForwardFn<'f, T, To>) -> ConvertingView<'_, 'f, T, To>;

    /// Creates a [`ConvertingViewMut`] over the whole slice.
    fn as_converting_mut<'f, To>(
        &mut self,
        forward: &'f ForwardFn<'f, T, To>,
        backward: &'f BackwardFn<'f, T, To>,
    ) -> ConvertingViewMut<'_, 'f, T, To>;

    /// Creates a [`BufferedView`] over the whole slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordSize`][crate::Error::RecordSize] if `To` is not a whole multiple
    /// of `T` in size.
    fn as_buffered<'f, To>(&self, unpack: &'f UnpackFn<'f, T, To>) -> Result<BufferedView<'_, 'f, T, To>>;

    /// Creates a [`BufferedViewMut`] over the whole slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordSize`][crate::Error::RecordSize] if `To` is not a whole multiple
    /// of `T` in size.
    fn as_buffered_mut<'f, To>(
        &mut self,
        unpack: &'f UnpackFn<'f, T, To>,
        pack: &'f PackFn<'f, T, To>,
    ) -> Result<BufferedViewMut<'_, 'f, T, To>>;
}

impl<T> SliceExt<T> for [T] {
    fn copy_to_view<D>(&self, destination: &mut D) -> Result<()>
    where
        T: Clone,
        D: ElementSink<Item = T> + ?Sized,
    {
        copy_elements(self, destination)
    }

    fn try_copy_to_view<D>(&self, destination: &mut D) -> bool
    where
        T: Clone,
        D: ElementSink<Item = T> + ?Sized,
    {
        try_copy_elements(self, destination)
    }

    fn as_converting<'f, To>(&self, forward: &'f ForwardFn<'f, T, To>) -> ConvertingView<'_, 'f, T, To> {
        ConvertingView::new(self, forward)
    }

    fn as_converting_mut<'f, To>(
        &mut self,
        forward: &'f ForwardFn<'f, T, To>,
        backward: &'f BackwardFn<'f, T, To>,
    ) -> ConvertingViewMut<'_, 'f, T, To> {
        ConvertingViewMut::new(self, forward, backward)
    }

    fn as_buffered<'f, To>(&self, unpack: &'f UnpackFn<'f, T, To>) -> Result<BufferedView<'_, 'f, T, To>> {
        BufferedView::new(self, unpack)
    }

    fn as_buffered_mut<'f, To>(
        &mut self,
        unpack: &'f UnpackFn<'f, T, To>,
        pack: &'f PackFn<'f, T, To>,
    ) -> Result<BufferedViewMut<'_, 'f, T, To>> {
        BufferedViewMut::new(self, unpack, pack)
    }
}
