// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builders that capture conversion functions once and create any number of views with them.
//!
//! Building a view through a factory is equivalent to calling the view constructor with the
//! same functions. Views built by one factory over the same storage compare equal.
//!
//! ```
//! use spanview::ConvertingViewFactory;
//!
//! let negate = |x: i32| -x;
//! let factory = ConvertingViewFactory::new(&negate);
//!
//! let first = [1, 2];
//! let second = [3, 4, 5];
//!
//! assert_eq!(factory.build(&first).to_vec(), [-1, -2]);
//! assert_eq!(factory.build_window(&second, 1, 2)?.to_vec(), [-4, -5]);
//! # Ok::<(), spanview::Error>(())
//! ```

use std::any::type_name;
use std::fmt::{self, Debug};
use std::num::NonZero;
use std::slice;

use crate::functions::record_size;
use crate::position::resolve_window;
use crate::{
    BackwardFn, BufferedView, BufferedViewMut, ConvertingView, ConvertingViewMut, ForwardFn, PackFn, Result, UnpackFn,
};

/// Creates [`ConvertingView`]s that share one `forward` function.
pub struct ConvertingViewFactory<'f, From, To> {
    forward: &'f ForwardFn<'f, From, To>,
}

impl<'f, From, To> ConvertingViewFactory<'f, From, To> {
    /// Creates a factory for views that convert with `forward`.
    #[must_use]
    pub fn new(forward: &'f ForwardFn<'f, From, To>) -> Self {
        Self { forward }
    }

    /// Creates a view over all of `storage`.
    #[must_use]
    pub fn build<'a>(&self, storage: &'a [From]) -> ConvertingView<'a, 'f, From, To> {
        ConvertingView::new(storage, self.forward)
    }

    /// Creates a view over `len` elements of `storage`, starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the window does
    /// not fit inside `storage`.
    pub fn build_window<'a>(&self, storage: &'a [From], start: usize, len: usize) -> Result<ConvertingView<'a, 'f, From, To>> {
        ConvertingView::with_window(storage, start, len, self.forward)
    }

    /// Creates a view over `len` elements starting at `ptr`.
    ///
    /// # Safety
    ///
    /// The caller must uphold the requirements of [`std::slice::from_raw_parts()`] for
    /// `ptr` and `len` for the entire lifetime `'a`.
    #[must_use]
    pub unsafe fn build_raw<'a>(&self, ptr: *const From, len: usize) -> ConvertingView<'a, 'f, From, To> {
        // SAFETY: Forwarding the safety requirements of this function.
        unsafe { ConvertingView::from_raw_parts(ptr, len, self.forward) }
    }

    /// Creates a view over no elements at all.
    #[must_use]
    pub fn empty<'a>(&self) -> ConvertingView<'a, 'f, From, To> {
        ConvertingView::empty(self.forward)
    }
}

/// Creates [`ConvertingViewMut`]s that share one `forward` and one `backward` function.
pub struct ConvertingViewMutFactory<'f, From, To> {
    forward: &'f ForwardFn<'f, From, To>,
    backward: &'f BackwardFn<'f, From, To>,
}

impl<'f, From, To> ConvertingViewMutFactory<'f, From, To> {
    /// Creates a factory for views that convert with `forward` and `backward`.
    #[must_use]
    pub fn new(forward: &'f ForwardFn<'f, From, To>, backward: &'f BackwardFn<'f, From, To>) -> Self {
        Self { forward, backward }
    }

    /// Creates a view over all of `storage`.
    #[must_use]
    pub fn build<'a>(&self, storage: &'a mut [From]) -> ConvertingViewMut<'a, 'f, From, To> {
        ConvertingViewMut::new(storage, self.forward, self.backward)
    }

    /// Creates a view over `len` elements of `storage`, starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the window does
    /// not fit inside `storage`.
    pub fn build_window<'a>(&self, storage: &'a mut [From], start: usize, len: usize) -> Result<ConvertingViewMut<'a, 'f, From, To>> {
        ConvertingViewMut::with_window(storage, start, len, self.forward, self.backward)
    }

    /// Creates a view over `len` elements starting at `ptr`.
    ///
    /// # Safety
    ///
    /// The caller must uphold the requirements of [`std::slice::from_raw_parts_mut()`] for
    /// `ptr` and `len` for the entire lifetime `'a`.
    #[must_use]
    pub unsafe fn build_raw<'a>(&self, ptr: *mut From, len: usize) -> ConvertingViewMut<'a, 'f, From, To> {
        // SAFETY: Forwarding the safety requirements of this function.
        unsafe { ConvertingViewMut::from_raw_parts_mut(ptr, len, self.forward, self.backward) }
    }

    /// Creates a view over no elements at all.
    #[must_use]
    pub fn empty<'a>(&self) -> ConvertingViewMut<'a, 'f, From, To> {
        ConvertingViewMut::empty(self.forward, self.backward)
    }

    /// Returns a factory for read-only views with the same `forward` function.
    #[must_use]
    pub fn read_only(&self) -> ConvertingViewFactory<'f, From, To> {
        ConvertingViewFactory::new(self.forward)
    }
}

/// Creates [`BufferedView`]s that share one `unpack` function.
///
/// The record size is validated once, when the factory is created.
pub struct BufferedViewFactory<'f, From, To> {
    unpack: &'f UnpackFn<'f, From, To>,
    record_size: NonZero<usize>,
}

impl<'f, From, To> BufferedViewFactory<'f, From, To> {
    /// Creates a factory for views that unpack records with `unpack`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordSize`][crate::Error::RecordSize] if `To` is not a whole multiple
    /// of `From` in size.
    pub fn new(unpack: &'f UnpackFn<'f, From, To>) -> Result<Self> {
        Ok(Self {
            unpack,
            record_size: record_size::<From, To>()?,
        })
    }

    /// How many stored elements make up one logical element.
    #[must_use]
    pub const fn record_size(&self) -> usize {
        self.record_size.get()
    }

    /// Creates a view over all of `storage`.
    #[must_use]
    pub fn build<'a>(&self, storage: &'a [From]) -> BufferedView<'a, 'f, From, To> {
        BufferedView::from_parts(storage, self.unpack, self.record_size)
    }

    /// Creates a view over `len` stored elements of `storage`, starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the window does
    /// not fit inside `storage`.
    pub fn build_window<'a>(&self, storage: &'a [From], start: usize, len: usize) -> Result<BufferedView<'a, 'f, From, To>> {
        let window = resolve_window(start, len, storage.len())?;

        Ok(self.build(&storage[window]))
    }

    /// Creates a view over `len` stored elements starting at `ptr`.
    ///
    /// # Safety
    ///
    /// The caller must uphold the requirements of [`std::slice::from_raw_parts()`] for
    /// `ptr` and `len` for the entire lifetime `'a`.
    #[must_use]
    pub unsafe fn build_raw<'a>(&self, ptr: *const From, len: usize) -> BufferedView<'a, 'f, From, To> {
        // SAFETY: Forwarding the safety requirements of this function.
        let storage = unsafe { slice::from_raw_parts(ptr, len) };

        self.build(storage)
    }

    /// Creates a view over no records at all.
    #[must_use]
    pub fn empty<'a>(&self) -> BufferedView<'a, 'f, From, To> {
        self.build(Default::default())
    }
}

/// Creates [`BufferedViewMut`]s that share one `unpack` and one `pack` function.
///
/// The record size is validated once, when the factory is created.
///
/// ```
/// use spanview::{BufferedViewMutFactory, codec};
///
/// let unpack = codec::unpack_be::<u16>;
/// let pack = codec::pack_be::<u16>;
/// let factory = BufferedViewMutFactory::new(&unpack, &pack)?;
///
/// let mut header = [0_u8; 4];
/// let mut view = factory.build(&mut header);
/// view.set(0, 0xCAFE)?;
/// view.set(1, 0xBABE)?;
///
/// assert_eq!(header, [0xCA, 0xFE, 0xBA, 0xBE]);
/// # Ok::<(), spanview::Error>(())
/// ```
pub struct BufferedViewMutFactory<'f, From, To> {
    unpack: &'f UnpackFn<'f, From, To>,
    pack: &'f PackFn<'f, From, To>,
    record_size: NonZero<usize>,
}

impl<'f, From, To> BufferedViewMutFactory<'f, From, To> {
    /// Creates a factory for views that unpack records with `unpack` and pack them with `pack`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordSize`][crate::Error::RecordSize] if `To` is not a whole multiple
    /// of `From` in size.
    pub fn new(unpack: &'f UnpackFn<'f, From, To>, pack: &'f PackFn<'f, From, To>) -> Result<Self> {
        Ok(Self {
            unpack,
            pack,
            record_size: record_size::<From, To>()?,
        })
    }

    /// How many stored elements make up one logical element.
    #[must_use]
    pub const fn record_size(&self) -> usize {
        self.record_size.get()
    }

    /// Creates a view over all of `storage`.
    #[must_use]
    pub fn build<'a>(&self, storage: &'a mut [From]) -> BufferedViewMut<'a, 'f, From, To> {
        BufferedViewMut::from_parts(storage, self.unpack, self.pack, self.record_size)
    }

    /// Creates a view over `len` stored elements of `storage`, starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`][crate::Error::RangeOutOfBounds] if the window does
    /// not fit inside `storage`.
    pub fn build_window<'a>(&self, storage: &'a mut [From], start: usize, len: usize) -> Result<BufferedViewMut<'a, 'f, From, To>> {
        let window = resolve_window(start, len, storage.len())?;

        Ok(self.build(&mut storage[window]))
    }

    /// Creates a view over `len` stored elements starting at `ptr`.
    ///
    /// # Safety
    ///
    /// The caller must uphold the requirements of [`std::slice::from_raw_parts_mut()`] for
    /// `ptr` and `len` for the entire lifetime `'a`.
    #[must_use]
    pub unsafe fn build_raw<'a>(&self, ptr: *mut From, len: usize) -> BufferedViewMut<'a, 'f, From, To> {
        // SAFETY: Forwarding the safety requirements of this function.
        let storage = unsafe { slice::from_raw_parts_mut(ptr, len) };

        self.build(storage)
    }

    /// Creates a view over no records at all.
    #[must_use]
    pub fn empty<'a>(&self) -> BufferedViewMut<'a, 'f, From, To> {
        self.build(Default::default())
    }

    /// Returns a factory for read-only views with the same `unpack` function.
    #[must_use]
    pub fn read_only(&self) -> BufferedViewFactory<'f, From, To> {
        BufferedViewFactory {
            unpack: self.unpack,
            record_size: self.record_size,
        }
    }
}

macro_rules! impl_factory_traits {
    ($($factory:ident),* $(,)?) => {$(
        impl<From, To> Clone for $factory<'_, From, To> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<From, To> Copy for $factory<'_, From, To> {}

        impl<From, To> Debug for $factory<'_, From, To> {
            #[cfg_attr(test, mutants::skip)] // Debug output is not an API contract.
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($factory))
                    .field("from", &type_name::<From>())
                    .field("to", &type_name::<To>())
                    .finish_non_exhaustive()
            }
        }
    )*};
}

impl_factory_traits!(
    ConvertingViewFactory,
    ConvertingViewMutFactory,
    BufferedViewFactory,
    BufferedViewMutFactory,
);

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;
    use crate::testing::{neg25_to_pos25_le, neg50_to_pos50};
    use crate::{Error, codec};

    assert_impl_all!(ConvertingViewFactory<'static, i32, i32>: Copy, Debug);
    assert_impl_all!(ConvertingViewMutFactory<'static, i32, i32>: Copy, Debug);
    assert_impl_all!(BufferedViewFactory<'static, u8, i16>: Copy, Debug);
    assert_impl_all!(BufferedViewMutFactory<'static, u8, i16>: Copy, Debug);

    fn negate(x: i32) -> i32 {
        -x
    }

    #[test]
    fn converting_factory_builds_equal_views() {
        let storage = neg50_to_pos50();
        let factory = ConvertingViewFactory::new(&negate);

        let view = factory.build(&storage);

        assert_eq!(view, factory.build(&storage));
        assert_eq!(view.get(0).unwrap(), 50);
        assert_eq!(factory.build_window(&storage, 100, 1).unwrap().to_vec(), [-50]);
        assert!(factory.build_window(&storage, 100, 2).is_err());
        assert!(factory.empty().is_empty());
    }

    #[test]
    fn converting_factory_builds_from_raw_parts() {
        let storage = [1, 2, 3];
        let factory = ConvertingViewFactory::new(&negate);

        // SAFETY: The pointer and length describe `storage`, which outlives the view.
        let view = unsafe { factory.build_raw(storage.as_ptr(), storage.len()) };

        assert_eq!(view, factory.build(&storage));
    }

    #[test]
    fn converting_mut_factory() {
        let mut storage = neg50_to_pos50();
        let factory = ConvertingViewMutFactory::new(&negate, &negate);

        let mut view = factory.build(&mut storage);
        view.set(0, -21).unwrap();
        assert_eq!(view.get(0).unwrap(), -21);

        let mut window = factory.build_window(&mut storage, 0, 2).unwrap();
        assert_eq!(window.to_vec(), [-21, 49]);
        window.set(1, 0).unwrap();

        // SAFETY: The pointer and length describe `storage`, which outlives the view.
        let raw = unsafe { factory.build_raw(storage.as_mut_ptr(), 2) };
        assert_eq!(raw.to_vec(), [-21, 0]);

        assert!(factory.empty().is_empty());
        assert_eq!(factory.read_only().build(&storage).get(0).unwrap(), -21);
    }

    #[test]
    fn buffered_factory_validates_record_size_once() {
        let unpack = |_: &[i16]| 0_u8;

        assert!(matches!(BufferedViewFactory::new(&unpack), Err(Error::RecordSize { .. })));

        let pack = |_: u8| crate::Record::<i16>::new();
        assert!(BufferedViewMutFactory::new(&unpack, &pack).is_err());
    }

    #[test]
    fn buffered_factory() {
        let storage = neg25_to_pos25_le();
        let unpack = codec::unpack_le::<i16>;
        let factory = BufferedViewFactory::new(&unpack).unwrap();

        assert_eq!(factory.record_size(), 2);

        let view = factory.build(&storage);
        assert_eq!(view.len(), 51);
        assert_eq!(view, factory.build(&storage));
        assert_eq!(factory.build_window(&storage, 100, 2).unwrap().to_vec(), [25]);
        assert!(factory.build_window(&storage, 101, 2).is_err());
        assert!(factory.empty().is_empty());

        // SAFETY: The pointer and length describe `storage`, which outlives the view.
        let raw = unsafe { factory.build_raw(storage.as_ptr(), 4) };
        assert_eq!(raw.to_vec(), [-25, -24]);
    }

    #[test]
    fn buffered_mut_factory() {
        let mut storage = neg25_to_pos25_le();
        let unpack = codec::unpack_le::<i16>;
        let pack = codec::pack_le::<i16>;
        let factory = BufferedViewMutFactory::new(&unpack, &pack).unwrap();

        let mut view = factory.build(&mut storage);
        view.set(0, 1000).unwrap();

        let mut window = factory.build_window(&mut storage, 2, 2).unwrap();
        window.set(0, -1).unwrap();

        // SAFETY: The pointer and length describe `storage`, which outlives the view.
        let raw = unsafe { factory.build_raw(storage.as_mut_ptr(), 4) };
        assert_eq!(raw.to_vec(), [1000, -1]);

        assert!(factory.empty().is_empty());
        assert_eq!(factory.read_only().build(&storage).get(0).unwrap(), 1000);
        assert_eq!(factory.read_only().record_size(), 2);
    }

    #[test]
    fn debug() {
        let factory = ConvertingViewFactory::new(&negate);

        assert_eq!(
            format!("{factory:?}"),
            "ConvertingViewFactory { from: \"i32\", to: \"i32\", .. }"
        );
    }
}
