use crate::error::Error;
use crate::heap::{last_parent, left, parent, right};
use crate::position_index::PositionIndex;
use core::fmt::{Debug, Display, Formatter};
use core::iter::FromIterator;
use log::{debug, trace};
use std::hash::Hash;

/// A min-heap that also keeps a reverse index from each value to the heap
/// positions holding it. The index gives O(1) average `contains` and
/// O(log n) removal of an arbitrary value.
///
/// The heap array and the index are only ever changed together. `swap` is the
/// one place where an exchange of two positions happens, and it updates both.
///
/// Equal values may be stored more than once. Nothing is promised about the
/// relative order in which equal values leave the queue.
#[derive(Clone)]
pub struct IndexedPriorityQueue<T> {
    /// Live elements, in heap order. `heap.len()` is the logical size; the
    /// allocation may be larger.
    heap: Vec<T>,
    index: PositionIndex<T>,
}

const DEFAULT_CAPACITY: usize = 1;

impl<T: Ord + Hash + Clone> IndexedPriorityQueue<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            index: PositionIndex::with_capacity(capacity),
        }
    }

    /// Builds a queue from `elems` in O(n). The elements are first stored in the
    /// order given, then every internal node is sunk, starting from the last one.
    pub fn heapify(elems: Vec<T>) -> Self {
        let mut index = PositionIndex::with_capacity(elems.len());
        for (i, elem) in elems.iter().enumerate() {
            index.add(elem, i);
        }
        let mut q = Self { heap: elems, index };
        if let Some(last) = last_parent(q.heap.len()) {
            debug!("heapify: {} elements, sinking from {}", q.heap.len(), last);
            for k in (0..=last).rev() {
                q.sink(k);
            }
        }
        q
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn size(&self) -> usize {
        self.len()
    }

    /// Length of the backing storage. Elements are appended into it without
    /// reallocating until it is exhausted.
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// Removes every element. The backing storage is kept.
    pub fn clear(&mut self) {
        debug!("clear: dropping {} elements", self.heap.len());
        self.heap.clear();
        self.index.clear();
    }

    /// Returns the smallest element without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Removes and returns the smallest element.
    pub fn poll(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.remove_at(0)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.index.contains(value)
    }

    /// Like `contains`, but an absent query is simply not contained.
    pub fn contains_opt(&self, value: Option<&T>) -> bool {
        match value {
            Some(value) => self.contains(value),
            None => false,
        }
    }

    /// Inserts an element, O(log n).
    pub fn add(&mut self, value: T) {
        let k = self.heap.len();
        self.index.add(&value, k);
        self.heap.push(value);
        let k = self.swim(k);
        self.check_at(k);
    }

    /// Inserts `value` if it is present. An absent value is rejected with
    /// `Error::InvalidArgument` and the queue is left untouched.
    pub fn try_add(&mut self, value: Option<T>) -> Result<(), Error> {
        let value = value.ok_or(Error::InvalidArgument)?;
        self.add(value);
        Ok(())
    }

    /// Removes one occurrence of `value`, O(log n). Returns false, without
    /// changing anything, if `value` is not in the queue.
    ///
    /// If `value` occurs more than once, which occurrence is removed is
    /// unspecified.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.index.get(value) {
            Some(k) => {
                self.remove_at(k);
                true
            }
            None => false,
        }
    }

    pub fn remove_opt(&mut self, value: Option<&T>) -> bool {
        match value {
            Some(value) => self.remove(value),
            None => false,
        }
    }

    /// The live elements in heap (array) order. This is not sorted order.
    pub fn as_slice(&self) -> &[T] {
        &self.heap
    }

    /// Iterates the live elements in heap (array) order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.heap.iter()
    }

    /// Consumes the queue, returning its elements in non-decreasing order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(value) = self.poll() {
            sorted.push(value);
        }
        sorted
    }

    /// Returns true if the subtree rooted at `k` satisfies the min-heap
    /// property. Positions past the end are trivially valid.
    /// Intended for tests and debugging; this visits the whole subtree.
    pub fn is_min_heap(&self, k: usize) -> bool {
        let len = self.heap.len();
        if k >= len {
            return true;
        }
        let left = left(k);
        let right = right(k);
        if left < len && !self.less(k, left) {
            return false;
        }
        if right < len && !self.less(k, right) {
            return false;
        }
        self.is_min_heap(left) && self.is_min_heap(right)
    }

    /// Returns true if the reverse index and the heap array agree exactly: every
    /// live position is recorded under its value, every recorded position holds
    /// that value, and no value has an empty set of positions.
    /// Intended for tests and debugging.
    pub fn is_index_consistent(&self) -> bool {
        for (k, value) in self.heap.iter().enumerate() {
            match self.index.positions(value) {
                Some(positions) if positions.contains(&k) => {}
                _ => return false,
            }
        }
        for (value, positions) in self.index.iter() {
            if positions.is_empty() {
                return false;
            }
            for &k in positions.iter() {
                if k >= self.heap.len() || self.heap[k] != *value {
                    return false;
                }
            }
        }
        self.index.num_positions() == self.heap.len()
    }

    #[cfg(test)]
    pub(crate) fn position_index(&self) -> &PositionIndex<T> {
        &self.index
    }

    /// Checks only the neighbourhood of position `k`: its parent, its children,
    /// and its index entry. Debug builds only.
    fn check_at(&self, k: usize) {
        if !cfg!(debug_assertions) || k >= self.heap.len() {
            return;
        }
        if k > 0 {
            debug_assert!(self.less(parent(k), k), "heap property violated above {}", k);
        }
        for &child in [left(k), right(k)].iter() {
            if child < self.heap.len() {
                debug_assert!(self.less(k, child), "heap property violated below {}", k);
            }
        }
        debug_assert!(
            self.index
                .positions(&self.heap[k])
                .map_or(false, |positions| positions.contains(&k)),
            "position {} missing from index",
            k
        );
    }

    // heap[i] <= heap[j]
    fn less(&self, i: usize, j: usize) -> bool {
        self.heap[i] <= self.heap[j]
    }

    /// Exchanges two positions in the array and in the index.
    fn swap(&mut self, i: usize, j: usize) {
        trace!("swap {} <-> {}", i, j);
        self.heap.swap(i, j);
        // The value that was at i is now at j, and vice versa.
        self.index.swap(&self.heap[j], &self.heap[i], i, j);
    }

    /// Moves the element at `k` up until its parent is smaller. Returns the
    /// element's final position.
    fn swim(&mut self, mut k: usize) -> usize {
        while k > 0 {
            let parent = parent(k);
            if !self.less(k, parent) {
                break;
            }
            self.swap(parent, k);
            k = parent;
        }
        k
    }

    /// Moves the element at `k` down until it is no larger than its children.
    /// Returns the element's final position.
    fn sink(&mut self, mut k: usize) -> usize {
        let len = self.heap.len();
        loop {
            let left = left(k);
            let right = right(k);
            if left >= len {
                break;
            }
            let mut smallest = left;
            if right < len && self.less(right, left) {
                smallest = right;
            }
            if self.less(k, smallest) {
                break;
            }
            self.swap(smallest, k);
            k = smallest;
        }
        k
    }

    /// Removes the element at position `k`, O(log n). The last element is moved
    /// into the hole and then sunk or swum back into place.
    fn remove_at(&mut self, k: usize) -> Option<T> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(k, last);
        let removed = self.heap.pop()?;
        self.index.remove(&removed, last);

        if k == last {
            trace!("remove_at {}: was last", k);
            return Some(removed);
        }

        // The element moved into k came from a leaf. It may belong lower or
        // higher than k, but not both.
        let sunk_to = self.sink(k);
        let settled = if sunk_to == k {
            let swum_to = self.swim(k);
            trace!("remove_at {}: refilled from {}, swam to {}", k, last, swum_to);
            swum_to
        } else {
            trace!("remove_at {}: refilled from {}, sank to {}", k, last, sunk_to);
            sunk_to
        };
        self.check_at(settled);
        Some(removed)
    }
}

impl<T: Ord + Hash + Clone> Default for IndexedPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Hash + Clone> From<Vec<T>> for IndexedPriorityQueue<T> {
    fn from(elems: Vec<T>) -> Self {
        Self::heapify(elems)
    }
}

impl<T: Ord + Hash + Clone> From<&[T]> for IndexedPriorityQueue<T> {
    fn from(elems: &[T]) -> Self {
        Self::heapify(elems.to_vec())
    }
}

/// Builds the queue by inserting one element at a time, O(n log n).
/// Use `heapify` when the elements are already in a `Vec`.
impl<T: Ord + Hash + Clone> FromIterator<T> for IndexedPriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut q = Self::with_capacity(lower.max(DEFAULT_CAPACITY));
        q.extend(iter);
        q
    }
}

impl<T: Ord + Hash + Clone> Extend<T> for IndexedPriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let before = self.len();
        for value in iter {
            self.add(value);
        }
        debug!("extend: inserted {} elements", self.len() - before);
    }
}

impl<T: Debug> Debug for IndexedPriorityQueue<T> {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> core::fmt::Result {
        fmt.debug_list().entries(self.heap.iter()).finish()
    }
}

impl<T: Display> Display for IndexedPriorityQueue<T> {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> core::fmt::Result {
        write!(fmt, "[")?;
        for (i, item) in self.heap.iter().enumerate() {
            if i != 0 {
                write!(fmt, ", ")?;
            }
            write!(fmt, "{}", item)?;
        }
        write!(fmt, "]")?;
        Ok(())
    }
}
