// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::type_name;
use std::fmt::{self, Debug};
use std::num::NonZero;
use std::ops::Range;
use std::{ptr, slice};

use crate::copy::{ElementSequence, ElementSink, ElementSource, copy_elements, try_copy_elements};
use crate::functions::{record_size, same_function};
use crate::position::{IntoPosition, PositionRange, resolve_range, resolve_window};
use crate::{Iter, Result, UnpackFn, inspect};

/// A read-only view over a slice of `From` that presents each fixed-size record as a `To`.
///
/// A record is the run of `size_of::<To>() / size_of::<From>()` stored elements that make up
/// one logical element. Reading an element passes its record to the `unpack` function. If the
/// storage length is not a whole multiple of the record size, the incomplete trailing record
/// is not part of the view.
///
/// ```
/// use spanview::{BufferedView, codec};
///
/// let storage = [0x01_u8, 0x00, 0xFF, 0xFF, 0x7F];
/// let unpack = codec::unpack_le::<i16>;
///
/// let view = BufferedView::new(&storage, &unpack)?;
///
/// assert_eq!(view.record_size(), 2);
/// assert_eq!(view.len(), 2);
/// assert_eq!(view.to_vec(), [1, -1]);
/// # Ok::<(), spanview::Error>(())
/// ```
///
/// # Equality
///
/// Two views are equal if they cover the same memory (same address and length) and were
/// built with the very same `unpack` function reference.
pub struct BufferedView<'a, 'f, From, To> {
    storage: &'a [From],
    unpack: &'f UnpackFn<'f, From, To>,
    record_size: NonZero<usize>,
}

impl<'a, 'f, From, To> BufferedView<'a, 'f, From, To> {
    /// Creates a view over all of `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordSize`][crate::Error::RecordSize] if `To` is not a whole multiple
    /// of `From` in size.
    pub fn new(storage: &'a [From], unpack: &'f UnpackFn<'f, From, To>) -> Result<Self> {
        Ok(Self::from_parts(storage, unpack, record_size::<From, To>()?))
    }

    /// Creates a view over `len` stored elements of `storage`, starting at `start`.
    ///
    /// The window is measured in stored elements, not records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordSize`][crate::Error::RecordSize] if `To` is not a whole multiple
    /// of `From` in size, or [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the
    /// window does not fit inside `storage`.
    pub fn with_window(storage: &'a [From], start: usize, len: usize, unpack: &'f UnpackFn<'f, From, To>) -> Result<Self> {
        let record_size = record_size::<From, To>()?;
        let window = resolve_window(start, len, storage.len())?;

        Ok(Self::from_parts(&storage[window], unpack, record_size))
    }

    /// Creates a view over `len` stored elements starting at `ptr`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordSize`][crate::Error::RecordSize] if `To` is not a whole multiple
    /// of `From` in size.
    ///
    /// # Safety
    ///
    /// The caller must uphold the requirements of [`std::slice::from_raw_parts()`] for
    /// `ptr` and `len` for the entire lifetime `'a`.
    pub unsafe fn from_raw_parts(ptr: *const From, len: usize, unpack: &'f UnpackFn<'f, From, To>) -> Result<Self> {
        let record_size = record_size::<From, To>()?;

        // SAFETY: Forwarding the safety requirements of this function.
        let storage = unsafe { slice::from_raw_parts(ptr, len) };

        Ok(Self::from_parts(storage, unpack, record_size))
    }

    /// Creates a view over no records at all.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordSize`][crate::Error::RecordSize] if `To` is not a whole multiple
    /// of `From` in size.
    pub fn empty(unpack: &'f UnpackFn<'f, From, To>) -> Result<Self> {
        Self::new(Default::default(), unpack)
    }

    pub(crate) fn from_parts(storage: &'a [From], unpack: &'f UnpackFn<'f, From, To>, record_size: NonZero<usize>) -> Self {
        Self {
            storage,
            unpack,
            record_size,
        }
    }

    /// The number of complete records in the storage.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.storage.len() / self.record_size.get()
    }

    /// Whether the view holds no complete record.
    ///
    /// This can be `true` while the storage is not empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many stored elements make up one logical element.
    #[must_use]
    pub const fn record_size(&self) -> usize {
        self.record_size.get()
    }

    /// The underlying storage, including any incomplete trailing record.
    #[must_use]
    pub const fn storage(&self) -> &'a [From] {
        self.storage
    }

    /// The function used to build logical elements from records.
    #[must_use]
    pub fn unpack(&self) -> &'f UnpackFn<'f, From, To> {
        self.unpack
    }

    /// The stored elements that make up the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`][crate::Error::IndexOutOfBounds] if the position
    /// does not designate an element of the view.
    pub fn record(&self, position: impl IntoPosition) -> Result<&'a [From]> {
        let index = position.into_position().resolve_index(self.len())?;

        Ok(&self.storage[record_range(index, self.record_size)])
    }

    /// Reads the element at `position`, building it from its record with the `unpack` function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`][crate::Error::IndexOutOfBounds] if the position
    /// does not designate an element of the view. The function is not called in that case.
    pub fn get(&self, position: impl IntoPosition) -> Result<To> {
        self.record(position).map(self.unpack)
    }

    /// Returns a view over a range of this view's records, using the same function.
    ///
    /// The range is measured in records. The result never includes an incomplete trailing record.
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

        Ok(Self::from_parts(
            &self.storage[storage_range(range, self.record_size)],
            self.unpack,
            self.record_size,
        ))
    }

    /// Returns a view over the records from `start` to the end.
    ///
    /// Unlike [`slice()`][Self::slice], this keeps an incomplete trailing record in the
    /// storage, so `slice_from(0)` is equal to the view itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if `start` is
    /// greater than the length of the view.
    pub fn slice_from(&self, start: usize) -> Result<Self> {
        let range = resolve_range(&(start..), self.len())?;

        Ok(Self::from_parts(
            &self.storage[range.start * self.record_size.get()..],
            self.unpack,
            self.record_size,
        ))
    }

    /// Returns a view over `len` records starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the window
    /// reaches outside the view.
    pub fn slice_at(&self, start: usize, len: usize) -> Result<Self> {
        let window = resolve_window(start, len, self.len())?;

        self.slice(window)
    }

    /// Drops the first `count` records from the view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if `count` is
    /// greater than the length of the view. The view is left unchanged in that case.
    pub fn advance(&mut self, count: usize) -> Result<()> {
        *self = self.slice_from(count)?;
        Ok(())
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

    /// Unpacks every record into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<To> {
        self.iter().collect()
    }

    /// Returns an iterator over the unpacked records.
    #[must_use]
    pub fn iter(&self) -> Iter<Self> {
        Iter::new(*self)
    }
}

impl<From: Debug, To: Debug> BufferedView<'_, '_, From, To> {
    /// Renders every record for debugging as `"{record} -Get-> {value}"`.
    ///
    /// Panics raised by the `unpack` function are caught and rendered in place of the value.
    /// The panic hook still runs for each caught panic, so the default hook prints it to stderr.
    #[must_use]
    pub fn inspect(&self) -> Vec<String> {
        self.storage
            .chunks_exact(self.record_size.get())
            .enumerate()
            .map(|(index, record)| inspect::render_read(index, record, || (self.unpack)(record)))
            .collect()
    }
}

/// The stored elements of the record at `index`.
pub(crate) const fn record_range(index: usize, record_size: NonZero<usize>) -> Range<usize> {
    let start = index * record_size.get();
    start..start + record_size.get()
}

/// The stored elements of a range of records.
pub(crate) const fn storage_range(records: Range<usize>, record_size: NonZero<usize>) -> Range<usize> {
    records.start * record_size.get()..records.end * record_size.get()
}

impl<From, To> Clone for BufferedView<'_, '_, From, To> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<From, To> Copy for BufferedView<'_, '_, From, To> {}

impl<From, To> Debug for BufferedView<'_, '_, From, To> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedView")
            .field("from", &type_name::<From>())
            .field("to", &type_name::<To>())
            .field("len", &self.len())
            .field("storage_len", &self.storage.len())
            .field("record_size", &self.record_size)
            .finish_non_exhaustive()
    }
}

impl<From, To> PartialEq for BufferedView<'_, '_, From, To> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.storage, other.storage) && same_function(self.unpack, other.unpack)
    }
}

impl<From, To> ElementSequence for BufferedView<'_, '_, From, To> {
    type Item = To;

    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl<From, To> ElementSource for BufferedView<'_, '_, From, To> {
    fn read(&self, index: usize) -> To {
        (self.unpack)(&self.storage[record_range(index, self.record_size)])
    }
}

impl<'a, 'f, From, To> IntoIterator for BufferedView<'a, 'f, From, To> {
    type Item = To;
    type IntoIter = Iter<Self>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::testing::neg25_to_pos25_le;
    use crate::{Error, Position, codec};

    assert_impl_all!(BufferedView<'static, 'static, u8, i16>: Copy, Debug);
    assert_not_impl_any!(BufferedView<'static, 'static, u8, i16>: Eq, std::hash::Hash);

    fn unpack_i16(record: &[u8]) -> i16 {
        codec::unpack_le(record)
    }

    #[test]
    fn length_counts_records() {
        let storage = neg25_to_pos25_le();
        let view = BufferedView::new(&storage, &unpack_i16).unwrap();

        assert_eq!(storage.len(), 102);
        assert_eq!(view.record_size(), 2);
        assert_eq!(view.len(), 51);
    }

    #[test]
    fn incomplete_trailing_record_is_hidden() {
        let storage = [1_u8, 0, 2, 0, 3];
        let view = BufferedView::new(&storage, &unpack_i16).unwrap();

        assert_eq!(view.len(), 2);
        assert_eq!(view.to_vec(), [1, 2]);
        assert_eq!(view.storage().len(), 5);
        assert_eq!(view.get(Position::FromEnd(1)).unwrap(), 2);
        assert!(view.get(2).is_err());

        let lone = BufferedView::new(&storage[..1], &unpack_i16).unwrap();
        assert!(lone.is_empty());
        assert!(lone.to_vec().is_empty());
    }

    #[test]
    fn reads_unpack_records() {
        let storage = neg25_to_pos25_le();
        let view = BufferedView::new(&storage, &unpack_i16).unwrap();

        for (index, expected) in (-25..=25).enumerate() {
            assert_eq!(view.get(index).unwrap(), expected);
        }

        assert_eq!(view.record(0).unwrap(), [231, 255]);
    }

    #[test]
    fn end_relative_reads() {
        let storage = neg25_to_pos25_le();
        let view = BufferedView::new(&storage, &unpack_i16).unwrap();

        assert_eq!(view.get(Position::FromEnd(1)).unwrap(), 25);
        assert_eq!(view.get(Position::FromEnd(51)).unwrap(), -25);
        assert!(matches!(
            view.get(Position::FromEnd(52)),
            Err(Error::IndexOutOfBounds { len: 51, .. })
        ));
    }

    #[test]
    fn record_size_is_validated() {
        let storage = [1_i16, 2, 3];
        let unpack = |_: &[i16]| 0_u8;

        assert!(matches!(BufferedView::new(&storage, &unpack), Err(Error::RecordSize { .. })));
        assert!(BufferedView::with_window(&storage, 0, 1, &unpack).is_err());
        assert!(BufferedView::empty(&unpack).is_err());
    }

    #[test]
    fn unit_record_size() {
        let storage = [1_u32, 2, 3];
        let to_f32 = |record: &[u32]| f32::from_bits(record[0]);
        let view = BufferedView::new(&storage, &to_f32).unwrap();

        assert_eq!(view.record_size(), 1);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn slices() {
        let storage = neg25_to_pos25_le();
        let view = BufferedView::new(&storage, &unpack_i16).unwrap();

        let slice = view.slice(Position::FromStart(15)..Position::FromEnd(15)).unwrap();
        assert_eq!(slice.len(), 21);
        assert_eq!(slice.get(0).unwrap(), -10);
        assert_eq!(slice.get(Position::FromEnd(1)).unwrap(), 10);

        let slice = view.slice(5..16).unwrap();
        assert_eq!(slice.len(), 11);
        assert_eq!(slice.get(0).unwrap(), -20);
        assert_eq!(slice.get(Position::FromEnd(1)).unwrap(), -10);
        for j in 0..slice.len() {
            assert_eq!(slice.get(j).unwrap(), view.get(5 + j).unwrap());
        }

        assert_eq!(view.slice(..21).unwrap().len(), 21);
        assert_eq!(view.slice(5..).unwrap().len(), 46);
        assert!(view.slice(..52).is_err());
    }

    #[test]
    fn slice_from_and_slice_at() {
        let storage = neg25_to_pos25_le();
        let view = BufferedView::new(&storage, &unpack_i16).unwrap();

        let tail = view.slice_from(1).unwrap();
        assert_eq!(tail.len(), 50);
        assert_eq!(tail.get(0).unwrap(), -24);

        assert_eq!(view.slice_at(50, 1).unwrap().to_vec(), [25]);
        assert!(view.slice_at(50, 2).is_err());
    }

    #[test]
    fn advance() {
        let storage = neg25_to_pos25_le();
        let mut view = BufferedView::new(&storage, &unpack_i16).unwrap();

        view.advance(10).unwrap();
        assert_eq!(view.len(), 41);
        assert_eq!(view.get(0).unwrap(), -15);

        assert!(view.advance(42).is_err());
        assert_eq!(view.len(), 41);

        view.advance(41).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn slice_from_keeps_trailing_partial_record() {
        let storage = [1_u8, 0, 2, 0, 3];
        let view = BufferedView::new(&storage, &unpack_i16).unwrap();

        assert_eq!(view.slice_from(0).unwrap(), view);
        assert_eq!(view.slice_from(1).unwrap().storage(), [2, 0, 3]);
        assert_eq!(view.slice_from(2).unwrap().storage(), [3]);
        assert!(view.slice_from(2).unwrap().is_empty());
        assert_eq!(view.slice(1..).unwrap().storage(), [2, 0]);
    }

    #[test]
    fn advance_keeps_trailing_partial_record() {
        let storage = [1_u8, 0, 2, 0, 3];
        let mut view = BufferedView::new(&storage, &unpack_i16).unwrap();

        view.advance(1).unwrap();

        assert_eq!(view.storage(), [2, 0, 3]);
        assert_eq!(view.to_vec(), [2]);
    }

    #[test]
    fn with_window_counts_stored_elements() {
        let storage = neg25_to_pos25_le();
        let view = BufferedView::with_window(&storage, 2, 5, &unpack_i16).unwrap();

        assert_eq!(view.len(), 2);
        assert_eq!(view.to_vec(), [-24, -23]);
        assert!(BufferedView::with_window(&storage, 100, 3, &unpack_i16).is_err());
    }

    #[test]
    fn from_raw_parts() {
        let storage = [5_u8, 0, 6, 0];

        // SAFETY: The pointer and length describe `storage`, which outlives the view.
        let view = unsafe { BufferedView::from_raw_parts(storage.as_ptr(), storage.len(), &unpack_i16) }.unwrap();

        assert_eq!(view.to_vec(), [5, 6]);
    }

    #[test]
    fn copy_into_slice() {
        let storage = neg25_to_pos25_le();
        let view = BufferedView::new(&storage, &unpack_i16).unwrap().slice(..3).unwrap();

        let mut destination = [0_i16; 3];
        view.copy_to(&mut destination).unwrap();
        assert_eq!(destination, [-25, -24, -23]);

        let mut short = [0_i16; 2];
        assert!(matches!(
            view.copy_to(&mut short),
            Err(Error::DestinationTooShort {
                source_len: 3,
                destination_len: 2
            })
        ));
        assert!(!view.try_copy_to(&mut short));
        assert_eq!(short, [0, 0]);
    }

    #[test]
    fn iteration() {
        let storage = neg25_to_pos25_le();
        let view = BufferedView::new(&storage, &unpack_i16).unwrap();

        assert_eq!(view.iter().len(), 51);
        assert_eq!(view.iter().next_back(), Some(25));
        assert_eq!(view.into_iter().sum::<i16>(), 0);
    }

    #[test]
    fn equality() {
        let storage = neg25_to_pos25_le();
        let other_storage = neg25_to_pos25_le();
        let offset = 0_i16;
        let unpack = move |record: &[u8]| codec::unpack_le::<i16>(record) + offset;
        let also_unpack = move |record: &[u8]| codec::unpack_le::<i16>(record) + offset;

        let view = BufferedView::new(&storage, &unpack).unwrap();

        assert_eq!(view, BufferedView::new(&storage, &unpack).unwrap());
        assert_eq!(view, view.slice(..).unwrap());
        assert_ne!(view, BufferedView::new(&other_storage, &unpack).unwrap());
        assert_ne!(view, BufferedView::new(&storage, &also_unpack).unwrap());
        assert_ne!(view, view.slice(1..).unwrap());
    }

    #[test]
    fn equality_tells_fn_items_apart() {
        fn unpack_doubled(record: &[u8]) -> i16 {
            unpack_i16(record) * 2
        }

        let storage = neg25_to_pos25_le();
        let unpack: &UnpackFn<'_, u8, i16> = &unpack_i16;
        let unpack_doubled: &UnpackFn<'_, u8, i16> = &unpack_doubled;
        let unpack_be: &UnpackFn<'_, u8, i16> = &codec::unpack_be::<i16>;

        let view = BufferedView::new(&storage, unpack).unwrap();
        let middle = view.slice(5..16).unwrap();
        let doubled = BufferedView::new(&storage, unpack_doubled).unwrap();

        assert_eq!(view, BufferedView::new(&storage, unpack).unwrap());
        assert_ne!(view, middle);
        assert_ne!(middle, doubled.slice(5..16).unwrap());
        assert_ne!(view, doubled);
        assert_ne!(view, BufferedView::new(&storage, unpack_be).unwrap());
    }

    #[test]
    fn debug() {
        let storage = [1_u8, 0, 2, 0, 3];
        let view = BufferedView::new(&storage, &unpack_i16).unwrap();

        assert_eq!(
            format!("{view:?}"),
            "BufferedView { from: \"u8\", to: \"i16\", len: 2, storage_len: 5, record_size: 2, .. }"
        );
    }

    #[test]
    fn inspect_renders_records() {
        let storage = [231_u8, 255, 25, 0, 7];
        let view = BufferedView::new(&storage, &unpack_i16).unwrap();

        assert_eq!(view.inspect(), ["[231, 255] -Get-> -25", "[25, 0] -Get-> 25"]);
    }
}
