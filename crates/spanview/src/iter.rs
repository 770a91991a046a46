// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::iter::FusedIterator;

use crate::copy::ElementSource;

/// An iterator over the logical elements of a view.
///
/// Every element is converted as it is yielded. Iterating a view again converts every
/// element again.
#[derive(Clone, Debug)]
pub struct Iter<S> {
    source: S,
    front: usize,
    back: usize,
}

impl<S: ElementSource> Iter<S> {
    pub(crate) fn new(source: S) -> Self {
        let back = source.len();

        Self { source, front: 0, back }
    }
}

impl<S: ElementSource> Iterator for Iter<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        let item = self.source.read(self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<S: ElementSource> DoubleEndedIterator for Iter<S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        Some(self.source.read(self.back))
    }
}

impl<S: ElementSource> ExactSizeIterator for Iter<S> {}

impl<S: ElementSource> FusedIterator for Iter<S> {}
