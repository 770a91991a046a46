// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::ops::{Bound, Range, RangeBounds, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use crate::{Error, Result};

/// An element position in a view, counted either from the start or from the end.
///
/// `FromEnd(1)` designates the last element, `FromEnd(len)` the first one. As a range bound,
/// `FromEnd(0)` designates the position just past the last element.
///
/// Every API that accepts a position also accepts a plain `usize` index, and every API that
/// accepts a range of positions also accepts the standard range types over `usize`:
///
/// ```
/// use spanview::{ConvertingView, Position};
///
/// let storage = [1, 2, 3, 4, 5];
/// let double = |x: i32| x * 2;
/// let view = ConvertingView::new(&storage, &double);
///
/// assert_eq!(view.get(0)?, 2);
/// assert_eq!(view.get(Position::FromEnd(1))?, 10);
///
/// let middle = view.slice(Position::FromStart(1)..Position::FromEnd(1))?;
/// assert_eq!(middle.to_vec(), [4, 6, 8]);
/// # Ok::<(), spanview::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// Offset from the first element.
    FromStart(usize),
    /// Offset back from the end of the view.
    FromEnd(usize),
}

impl Position {
    /// Resolves the position into an offset from the start of a view of length `len`.
    ///
    /// The result may equal `len` (a position just past the end, valid as a range bound)
    /// or exceed it for `FromStart`. Returns `None` if a `FromEnd` offset reaches before
    /// the start of the view.
    #[must_use]
    pub const fn resolve(self, len: usize) -> Option<usize> {
        match self {
            Self::FromStart(offset) => Some(offset),
            Self::FromEnd(offset) => len.checked_sub(offset),
        }
    }

    /// Resolves the position into the index of an existing element.
    pub(crate) fn resolve_index(self, len: usize) -> Result<usize> {
        self.resolve(len)
            .filter(|&index| index < len)
            .ok_or(Error::IndexOutOfBounds { position: self, len })
    }
}

impl From<usize> for Position {
    fn from(value: usize) -> Self {
        Self::FromStart(value)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromStart(offset) => write!(f, "{offset}"),
            Self::FromEnd(offset) => write!(f, "^{offset}"),
        }
    }
}

/// A value that designates a single element position: a `usize` index or a [`Position`].
pub trait IntoPosition: Copy {
    /// Converts the value into a [`Position`].
    fn into_position(self) -> Position;
}

impl IntoPosition for usize {
    fn into_position(self) -> Position {
        Position::FromStart(self)
    }
}

impl IntoPosition for Position {
    fn into_position(self) -> Position {
        self
    }
}

/// A range of element positions, used for slicing views.
///
/// Implemented for all standard range types over `usize` or [`Position`], for `..`, and for
/// a `(Bound, Bound)` pair.
pub trait PositionRange {
    /// The lower bound of the range.
    fn start_position(&self) -> Bound<Position>;

    /// The upper bound of the range.
    fn end_position(&self) -> Bound<Position>;
}

macro_rules! impl_position_range {
    ($($range:ty),* $(,)?) => {$(
        impl<P: IntoPosition> PositionRange for $range {
            fn start_position(&self) -> Bound<Position> {
                RangeBounds::start_bound(self).map(|x| x.into_position())
            }

            fn end_position(&self) -> Bound<Position> {
                RangeBounds::end_bound(self).map(|x| x.into_position())
            }
        }
    )*};
}

impl_position_range!(
    Range<P>,
    RangeFrom<P>,
    RangeTo<P>,
    RangeInclusive<P>,
    RangeToInclusive<P>,
    (Bound<P>, Bound<P>),
);

impl PositionRange for RangeFull {
    fn start_position(&self) -> Bound<Position> {
        Bound::Unbounded
    }

    fn end_position(&self) -> Bound<Position> {
        Bound::Unbounded
    }
}

/// Resolves a range of positions against a view of length `len` into a range of offsets.
pub(crate) fn resolve_range<R>(range: &R, len: usize) -> Result<Range<usize>>
where
    R: PositionRange + ?Sized,
{
    let start_bound = range.start_position();
    let end_bound = range.end_position();

    let start = match start_bound {
        Bound::Included(x) => x.resolve(len),
        Bound::Excluded(x) => x.resolve(len).and_then(|x| x.checked_add(1)),
        Bound::Unbounded => Some(0),
    };

    let end = match end_bound {
        Bound::Included(x) => x.resolve(len).and_then(|x| x.checked_add(1)),
        Bound::Excluded(x) => x.resolve(len),
        Bound::Unbounded => Some(len),
    };

    match (start, end) {
        (Some(start), Some(end)) if start <= end && end <= len => Ok(start..end),
        _ => Err(Error::RangeOutOfBounds {
            range: describe_range(start_bound, end_bound),
            len,
        }),
    }
}

/// Resolves a `start` + `len` window over storage of length `storage_len`.
pub(crate) fn resolve_window(start: usize, len: usize, storage_len: usize) -> Result<Range<usize>> {
    start
        .checked_add(len)
        .filter(|&end| end <= storage_len)
        .map(|end| start..end)
        .ok_or_else(|| Error::RangeOutOfBounds {
            range: format!("{start}..{start}+{len}"),
            len: storage_len,
        })
}

fn describe_range(start: Bound<Position>, end: Bound<Position>) -> String {
    let start = match start {
        Bound::Included(x) => x.to_string(),
        Bound::Excluded(x) => format!("{x}+1"),
        Bound::Unbounded => String::new(),
    };

    let end = match end {
        Bound::Included(x) => format!("={x}"),
        Bound::Excluded(x) => x.to_string(),
        Bound::Unbounded => String::new(),
    };

    format!("{start}..{end}")
}
