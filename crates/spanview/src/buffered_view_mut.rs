// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::type_name;
use std::fmt::{self, Debug};
use std::num::NonZero;
use std::{mem, slice};

use crate::buffered_view::{record_range, storage_range};
use crate::copy::{ElementSequence, ElementSink, ElementSource, copy_elements, try_copy_elements};
use crate::functions::{record_size, same_function};
use crate::position::{IntoPosition, PositionRange, resolve_range, resolve_window};
use crate::{BufferedView, Iter, PackFn, Result, UnpackFn, inspect};

/// A mutable view over a slice of `From` that presents each fixed-size record as a `To`.
///
/// Reads pass each record to `unpack`. Writes call `pack` and store the returned record in
/// place. `pack` must return exactly [`record_size()`][Self::record_size] elements; a record
/// that runs past the end of the storage causes a panic.
///
/// ```
/// use spanview::{BufferedViewMut, Record};
///
/// let mut storage = [0_u8; 4];
/// let unpack = |record: &[u8]| i16::from_le_bytes([record[0], record[1]]);
/// let pack = |value: i16| Record::from_slice(&value.to_le_bytes());
///
/// let mut view = BufferedViewMut::new(&mut storage, &unpack, &pack)?;
/// view.set(1, -2)?;
///
/// assert_eq!(view.get(1)?, -2);
/// assert_eq!(storage, [0, 0, 0xFE, 0xFF]);
/// # Ok::<(), spanview::Error>(())
/// ```
pub struct BufferedViewMut<'a, 'f, From, To> {
    storage: &'a mut [From],
    unpack: &'f UnpackFn<'f, From, To>,
    pack: &'f PackFn<'f, From, To>,
    record_size: NonZero<usize>,
}

impl<'a, 'f, From, To> BufferedViewMut<'a, 'f, From, To> {
    /// Creates a view over all of `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordSize`][crate::Error::RecordSize] if `To` is not a whole multiple
    /// of `From` in size.
    pub fn new(storage: &'a mut [From], unpack: &'f UnpackFn<'f, From, To>, pack: &'f PackFn<'f, From, To>) -> Result<Self> {
        Ok(Self::from_parts(storage, unpack, pack, record_size::<From, To>()?))
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
    pub fn with_window(
        storage: &'a mut [From],
        start: usize,
        len: usize,
        unpack: &'f UnpackFn<'f, From, To>,
        pack: &'f PackFn<'f, From, To>,
    ) -> Result<Self> {
        let record_size = record_size::<From, To>()?;
        let window = resolve_window(start, len, storage.len())?;

        Ok(Self::from_parts(&mut storage[window], unpack, pack, record_size))
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
    /// The caller must uphold the requirements of [`std::slice::from_raw_parts_mut()`] for
    /// `ptr` and `len` for the entire lifetime `'a`.
    pub unsafe fn from_raw_parts_mut(
        ptr: *mut From,
        len: usize,
        unpack: &'f UnpackFn<'f, From, To>,
        pack: &'f PackFn<'f, From, To>,
    ) -> Result<Self> {
        let record_size = record_size::<From, To>()?;

        // SAFETY: Forwarding the safety requirements of this function.
        let storage = unsafe { slice::from_raw_parts_mut(ptr, len) };

        Ok(Self::from_parts(storage, unpack, pack, record_size))
    }

    /// Creates a view over no records at all.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordSize`][crate::Error::RecordSize] if `To` is not a whole multiple
    /// of `From` in size.
    pub fn empty(unpack: &'f UnpackFn<'f, From, To>, pack: &'f PackFn<'f, From, To>) -> Result<Self> {
        Self::new(Default::default(), unpack, pack)
    }

    pub(crate) fn from_parts(
        storage: &'a mut [From],
        unpack: &'f UnpackFn<'f, From, To>,
        pack: &'f PackFn<'f, From, To>,
        record_size: NonZero<usize>,
    ) -> Self {
        Self {
            storage,
            unpack,
            pack,
            record_size,
        }
    }

    /// The number of complete records in the storage.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.storage.len() / self.record_size.get()
    }

    /// Whether the view holds no complete record.
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

    /// The function used to build logical elements from records.
    #[must_use]
    pub fn unpack(&self) -> &'f UnpackFn<'f, From, To> {
        self.unpack
    }

    /// The function used to break logical elements down into records.
    #[must_use]
    pub fn pack(&self) -> &'f PackFn<'f, From, To> {
        self.pack
    }

    /// Returns a read-only view over the same storage.
    #[must_use]
    pub fn as_read_only(&self) -> BufferedView<'_, 'f, From, To> {
        BufferedView::from_parts(self.storage, self.unpack, self.record_size)
    }

    /// Reads the element at `position`, building it from its record with the `unpack` function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`][crate::Error::IndexOutOfBounds] if the position
    /// does not designate an element of the view. The function is not called in that case.
    pub fn get(&self, position: impl IntoPosition) -> Result<To> {
        self.as_read_only().get(position)
    }

    /// Writes `value` at `position`, storing the record returned by the `pack` function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`][crate::Error::IndexOutOfBounds] if the position
    /// does not designate an element of the view. The function is not called in that case.
    ///
    /// # Panics
    ///
    /// Panics if the packed record runs past the end of the storage.
    pub fn set(&mut self, position: impl IntoPosition, value: To) -> Result<()> {
        let index = position.into_position().resolve_index(self.len())?;

        self.write(index, value);
        Ok(())
    }

    /// Returns a view over a range of this view's records, reborrowing this view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the range is
    /// reversed or reaches outside the view.
    pub fn slice<R>(&mut self, range: R) -> Result<BufferedViewMut<'_, 'f, From, To>>
    where
        R: PositionRange,
    {
        let range = resolve_range(&range, self.len())?;

        Ok(BufferedViewMut::from_parts(
            &mut self.storage[storage_range(range, self.record_size)],
            self.unpack,
            self.pack,
            self.record_size,
        ))
    }

    /// Narrows the view to a range of its records, keeping the original storage lifetime.
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
            unpack,
            pack,
            record_size,
        } = self;

        Ok(Self::from_parts(
            &mut storage[storage_range(range, record_size)],
            unpack,
            pack,
            record_size,
        ))
    }

    /// Returns a view over the records from `start` to the end, reborrowing this view.
    ///
    /// Unlike [`slice()`][Self::slice], this keeps an incomplete trailing record in the storage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if `start` is
    /// greater than the length of the view.
    pub fn slice_from(&mut self, start: usize) -> Result<BufferedViewMut<'_, 'f, From, To>> {
        let range = resolve_range(&(start..), self.len())?;

        Ok(BufferedViewMut::from_parts(
            &mut self.storage[range.start * self.record_size.get()..],
            self.unpack,
            self.pack,
            self.record_size,
        ))
    }

    /// Returns a view over `len` records starting at `start`, reborrowing this view.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the window
    /// reaches outside the view.
    pub fn slice_at(&mut self, start: usize, len: usize) -> Result<BufferedViewMut<'_, 'f, From, To>> {
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
        let range = resolve_range(&(count..), self.len())?;

        let storage = mem::take(&mut self.storage);
        self.storage = &mut storage[range.start * self.record_size.get()..];
        Ok(())
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

    /// Unpacks every record into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<To> {
        self.as_read_only().to_vec()
    }

    /// Returns an iterator over the unpacked records.
    #[must_use]
    pub fn iter(&self) -> Iter<BufferedView<'_, 'f, From, To>> {
        self.as_read_only().iter()
    }
}

impl<From: Debug, To: Debug> BufferedViewMut<'_, '_, From, To> {
    /// Renders every record for debugging as `"{record} -Get-> {value} -Set-> {record_again}"`.
    ///
    /// The write path is only simulated: `pack` is called but nothing is stored. Panics raised
    /// by either function are caught and rendered in place of the value.
    /// The panic hook still runs for each caught panic, so the default hook prints it to stderr.
    #[must_use]
    pub fn inspect(&self) -> Vec<String> {
        self.storage
            .chunks_exact(self.record_size.get())
            .enumerate()
            .map(|(index, record)| {
                inspect::render_round_trip(index, record, || (self.unpack)(record), |value| (self.pack)(value).into_vec())
            })
            .collect()
    }
}

impl<From, To> Debug for BufferedViewMut<'_, '_, From, To> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedViewMut")
            .field("from", &type_name::<From>())
            .field("to", &type_name::<To>())
            .field("len", &self.len())
            .field("storage_len", &self.storage.len())
            .field("record_size", &self.record_size)
            .finish_non_exhaustive()
    }
}

impl<From, To> PartialEq for BufferedViewMut<'_, '_, From, To> {
    fn eq(&self, other: &Self) -> bool {
        self.as_read_only() == other.as_read_only() && same_function(self.pack, other.pack)
    }
}

impl<From, To> PartialEq<BufferedView<'_, '_, From, To>> for BufferedViewMut<'_, '_, From, To> {
    fn eq(&self, other: &BufferedView<'_, '_, From, To>) -> bool {
        self.as_read_only() == *other
    }
}

impl<From, To> PartialEq<BufferedViewMut<'_, '_, From, To>> for BufferedView<'_, '_, From, To> {
    fn eq(&self, other: &BufferedViewMut<'_, '_, From, To>) -> bool {
        *self == other.as_read_only()
    }
}

impl<'a, 'f, From, To> std::convert::From<BufferedViewMut<'a, 'f, From, To>> for BufferedView<'a, 'f, From, To> {
    fn from(view: BufferedViewMut<'a, 'f, From, To>) -> Self {
        Self::from_parts(view.storage, view.unpack, view.record_size)
    }
}

impl<From, To> ElementSequence for BufferedViewMut<'_, '_, From, To> {
    type Item = To;

    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl<From, To> ElementSource for BufferedViewMut<'_, '_, From, To> {
    fn read(&self, index: usize) -> To {
        (self.unpack)(&self.storage[record_range(index, self.record_size)])
    }
}

impl<From, To> ElementSink for BufferedViewMut<'_, '_, From, To> {
    fn write(&mut self, index: usize, value: To) {
        let record = (self.pack)(value);
        let start = record_range(index, self.record_size).start;

        for (slot, element) in self.storage[start..start + record.len()].iter_mut().zip(record) {
            *slot = element;
        }
    }
}

impl<'v, 'f, From, To> IntoIterator for &'v BufferedViewMut<'_, 'f, From, To> {
    type Item = To;
    type IntoIter = Iter<BufferedView<'v, 'f, From, To>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::testing::neg25_to_pos25_le;
    use crate::{ConvertingView, ConvertingViewMut, Error, Position, Record, codec};

    assert_impl_all!(BufferedViewMut<'static, 'static, u8, i16>: Debug);
    assert_not_impl_any!(BufferedViewMut<'static, 'static, u8, i16>: Clone, Eq, std::hash::Hash);

    fn unpack_i16(record: &[u8]) -> i16 {
        codec::unpack_le(record)
    }

    fn pack_i16(value: i16) -> Record<u8> {
        codec::pack_le(value)
    }

    fn pack_doubled(value: i16) -> Record<u8> {
        codec::pack_le(value * 2)
    }

    #[test]
    fn setter_packs_in_place() {
        let mut storage = neg25_to_pos25_le();
        assert_eq!(storage[..2], [231, 255]);
        assert_eq!(storage[100..], [25, 0]);

        let mut view = BufferedViewMut::new(&mut storage, &unpack_i16, &pack_doubled).unwrap();
        assert_eq!(view.get(0).unwrap(), -25);
        assert_eq!(view.get(Position::FromEnd(1)).unwrap(), 25);

        view.set(0, -21).unwrap();
        view.set(Position::FromEnd(1), 7).unwrap();

        assert_eq!(view.get(0).unwrap(), -42);
        assert_eq!(view.get(Position::FromEnd(1)).unwrap(), 14);
        assert_eq!(storage[..2], [214, 255]);
        assert_eq!(storage[100..], [14, 0]);
    }

    #[test]
    fn self_assignment_is_identity() {
        let mut storage = neg25_to_pos25_le();
        let original = storage.clone();
        let mut view = BufferedViewMut::new(&mut storage, &unpack_i16, &pack_i16).unwrap();

        for index in 0..view.len() {
            let value = view.get(index).unwrap();
            view.set(index, value).unwrap();
        }

        assert_eq!(storage, original);
    }

    #[test]
    fn trailing_partial_record_is_never_written() {
        let mut storage = [0_u8, 0, 0, 0, 9];
        let mut view = BufferedViewMut::new(&mut storage, &unpack_i16, &pack_i16).unwrap();

        assert_eq!(view.len(), 2);
        view.set(Position::FromEnd(1), -1).unwrap();
        assert!(view.set(2, 1).is_err());

        assert_eq!(storage, [0, 0, 255, 255, 9]);
    }

    #[test]
    fn out_of_bounds_set_does_not_pack() {
        let mut storage = [0_u8; 4];
        let calls = std::cell::Cell::new(0);
        let counting_pack = |value: i16| {
            calls.set(calls.get() + 1);
            codec::pack_le(value)
        };
        let mut view = BufferedViewMut::new(&mut storage, &unpack_i16, &counting_pack).unwrap();

        assert!(matches!(view.set(2, 1), Err(Error::IndexOutOfBounds { len: 2, .. })));
        assert!(view.set(Position::FromEnd(3), 1).is_err());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn short_record_leaves_tail_untouched() {
        let mut storage = [9_u8; 4];
        let unpack = |record: &[u8]| u16::from_le_bytes([record[0], record[1]]);
        let pack_one = |value: u16| Record::from_slice(&value.to_le_bytes()[..1]);
        let mut view = BufferedViewMut::new(&mut storage, &unpack, &pack_one).unwrap();

        view.set(0, 1).unwrap();

        assert_eq!(storage, [1, 9, 9, 9]);
    }

    #[test]
    #[should_panic]
    fn record_past_end_of_storage_panics() {
        let mut storage = [0_u8; 4];
        let unpack = |record: &[u8]| u16::from_le_bytes([record[0], record[1]]);
        let pack_three = |_: u16| Record::from_slice(&[1_u8, 2, 3]);
        let mut view = BufferedViewMut::new(&mut storage, &unpack, &pack_three).unwrap();

        _ = view.set(1, 0);
    }

    #[test]
    fn record_size_is_validated() {
        let mut storage = [1_i16, 2, 3];
        let unpack = |_: &[i16]| 0_u8;
        let pack = |_: u8| Record::<i16>::new();

        assert!(matches!(
            BufferedViewMut::new(&mut storage, &unpack, &pack),
            Err(Error::RecordSize { .. })
        ));
        assert!(BufferedViewMut::with_window(&mut storage, 0, 1, &unpack, &pack).is_err());
        assert!(BufferedViewMut::empty(&unpack, &pack).is_err());
    }

    #[test]
    fn slice_writes_through() {
        let mut storage = neg25_to_pos25_le();
        let mut view = BufferedViewMut::new(&mut storage, &unpack_i16, &pack_i16).unwrap();

        let mut slice = view.slice(Position::FromStart(15)..Position::FromEnd(15)).unwrap();
        assert_eq!(slice.len(), 21);
        assert_eq!(slice.get(0).unwrap(), -10);
        slice.set(0, 100).unwrap();

        assert_eq!(view.get(15).unwrap(), 100);
        assert_eq!(storage[30..32], [100, 0]);
    }

    #[test]
    fn into_slice_and_advance() {
        let mut storage = neg25_to_pos25_le();

        let mut view = BufferedViewMut::new(&mut storage, &unpack_i16, &pack_i16)
            .unwrap()
            .into_slice(5..16)
            .unwrap();
        assert_eq!(view.len(), 11);
        assert_eq!(view.get(0).unwrap(), -20);
        assert_eq!(view.get(Position::FromEnd(1)).unwrap(), -10);

        view.advance(10).unwrap();
        assert_eq!(view.to_vec(), [-10]);
        assert!(view.advance(2).is_err());
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn slice_from_and_slice_at() {
        let mut storage = neg25_to_pos25_le();
        let mut view = BufferedViewMut::new(&mut storage, &unpack_i16, &pack_i16).unwrap();

        let tail = view.slice_from(1).unwrap();
        assert_eq!(tail.len(), 50);
        assert_eq!(tail.get(0).unwrap(), -24);

        assert_eq!(view.slice_at(49, 2).unwrap().to_vec(), [24, 25]);
        assert!(view.slice_at(49, 3).is_err());
    }

    #[test]
    fn slice_from_keeps_trailing_partial_record() {
        let mut storage = [1_u8, 0, 2, 0, 3];
        let mut view = BufferedViewMut::new(&mut storage, &unpack_i16, &pack_i16).unwrap();

        let mut tail = view.slice_from(1).unwrap();
        assert_eq!(tail.storage(), [2, 0, 3]);
        tail.set(0, -1).unwrap();

        assert_eq!(view.slice(1..).unwrap().storage(), [255, 255]);
        assert_eq!(storage, [1, 0, 255, 255, 3]);
    }

    #[test]
    fn with_window_and_from_raw_parts() {
        let mut storage = [1_u8, 0, 2, 0, 3, 0];

        let view = BufferedViewMut::with_window(&mut storage, 2, 4, &unpack_i16, &pack_i16).unwrap();
        assert_eq!(view.to_vec(), [2, 3]);

        // SAFETY: The pointer and length describe `storage`, which outlives the view.
        let mut view =
            unsafe { BufferedViewMut::from_raw_parts_mut(storage.as_mut_ptr(), storage.len(), &unpack_i16, &pack_i16) }.unwrap();
        view.set(0, 0x0102).unwrap();

        assert_eq!(storage, [2, 1, 2, 0, 3, 0]);
    }

    #[test]
    fn copy_from_converting_view() {
        let source_storage = [1_i16, 2, 3];
        let negate = |x: i16| -x;
        let source = ConvertingView::new(&source_storage, &negate);

        let mut destination_storage = [0_u8; 6];
        let mut destination = BufferedViewMut::new(&mut destination_storage, &unpack_i16, &pack_i16).unwrap();

        source.copy_to(&mut destination).unwrap();

        assert_eq!(destination.to_vec(), [-1, -2, -3]);
        assert_eq!(destination_storage, [255, 255, 254, 255, 253, 255]);
    }

    #[test]
    fn copy_into_converting_view() {
        let mut source_storage = neg25_to_pos25_le();
        let source = BufferedViewMut::new(&mut source_storage, &unpack_i16, &pack_i16).unwrap();

        let mut destination_storage = [0_i16; 51];
        let negate = |x: i16| -x;
        let mut destination = ConvertingViewMut::new(&mut destination_storage, &negate, &negate);

        assert!(source.try_copy_to(&mut destination));
        assert_eq!(destination.get(0).unwrap(), -25);
        assert_eq!(destination_storage[0], 25);

        let mut short_storage = [0_i16; 50];
        let mut short = ConvertingViewMut::new(&mut short_storage, &negate, &negate);
        assert!(!source.try_copy_to(&mut short));
        assert!(source.copy_to(&mut short).is_err());
        assert_eq!(short_storage, [0; 50]);
    }

    #[test]
    fn iteration() {
        let mut storage = neg25_to_pos25_le();
        let view = BufferedViewMut::new(&mut storage, &unpack_i16, &pack_i16).unwrap();

        assert_eq!(view.iter().take(2).collect::<Vec<_>>(), [-25, -24]);

        let mut count = 0;
        for _ in &view {
            count += 1;
        }
        assert_eq!(count, 51);
    }

    #[test]
    fn read_only_counterpart() {
        let mut storage = neg25_to_pos25_le();
        let view = BufferedViewMut::new(&mut storage, &unpack_i16, &pack_i16).unwrap();

        assert_eq!(view, view.as_read_only());
        assert_eq!(view.as_read_only(), view);

        let read_only = BufferedView::from(view);
        assert_eq!(read_only.len(), 51);
        assert_eq!(read_only.get(Position::FromEnd(1)).unwrap(), 25);
    }

    #[test]
    fn equality() {
        let offset = 0_i16;
        let pack = move |value: i16| codec::pack_le(value + offset);
        let also_pack = move |value: i16| codec::pack_le(value + offset);
        let unpack: &UnpackFn<'_, u8, i16> = &unpack_i16;

        // Zero-length views may share a dangling address without aliasing any element.
        let dangling = std::ptr::NonNull::<u8>::dangling().as_ptr();

        // SAFETY: A dangling, aligned pointer is valid for zero elements.
        let view = unsafe { BufferedViewMut::from_raw_parts_mut(dangling, 0, unpack, &pack) }.unwrap();
        // SAFETY: As above.
        let same = unsafe { BufferedViewMut::from_raw_parts_mut(dangling, 0, unpack, &pack) }.unwrap();
        // SAFETY: As above.
        let other_pack = unsafe { BufferedViewMut::from_raw_parts_mut(dangling, 0, unpack, &also_pack) }.unwrap();

        assert_eq!(view, same);
        assert_ne!(view, other_pack);

        // Read-only comparisons ignore the pack function.
        assert_eq!(other_pack, view.as_read_only());
    }

    #[test]
    fn equality_tells_fn_items_apart() {
        let unpack: &UnpackFn<'_, u8, i16> = &unpack_i16;
        let pack: &PackFn<'_, u8, i16> = &pack_i16;
        let pack_doubled: &PackFn<'_, u8, i16> = &pack_doubled;
        let unpack_be: &UnpackFn<'_, u8, i16> = &codec::unpack_be::<i16>;
        let dangling = std::ptr::NonNull::<u8>::dangling().as_ptr();

        // SAFETY: A dangling, aligned pointer is valid for zero elements.
        let view = unsafe { BufferedViewMut::from_raw_parts_mut(dangling, 0, unpack, pack) }.unwrap();
        // SAFETY: As above.
        let same = unsafe { BufferedViewMut::from_raw_parts_mut(dangling, 0, unpack, pack) }.unwrap();
        // SAFETY: As above.
        let doubled_write = unsafe { BufferedViewMut::from_raw_parts_mut(dangling, 0, unpack, pack_doubled) }.unwrap();
        // SAFETY: As above.
        let big_endian_read = unsafe { BufferedViewMut::from_raw_parts_mut(dangling, 0, unpack_be, pack) }.unwrap();

        assert_eq!(view, same);
        assert_ne!(view, doubled_write);
        assert_ne!(view, big_endian_read);
        assert_ne!(view.as_read_only(), big_endian_read);
        assert_eq!(view.as_read_only(), doubled_write);
    }

    #[test]
    fn inspect_renders_round_trip() {
        let mut storage = [231_u8, 255, 7];
        let view = BufferedViewMut::new(&mut storage, &unpack_i16, &pack_doubled).unwrap();

        assert_eq!(view.inspect(), ["[231, 255] -Get-> -25 -Set-> [206, 255]"]);
        assert_eq!(storage, [231, 255, 7]);
    }

    #[test]
    fn debug() {
        let mut storage = [0_u8; 7];
        let view = BufferedViewMut::new(&mut storage, &unpack_i16, &pack_i16).unwrap();

        assert_eq!(
            format!("{view:?}"),
            "BufferedViewMut { from: \"u8\", to: \"i16\", len: 3, storage_len: 7, record_size: 2, .. }"
        );
    }
}
