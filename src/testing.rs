use crate::indexed_pq::IndexedPriorityQueue;
use core::fmt::Debug;
use std::hash::Hash;

pub fn init_test() {
    drop(env_logger::try_init());
}

/// Asserts both heap invariants and that every live element answers `contains`.
pub fn assert_consistent<T: Ord + Hash + Clone + Debug>(q: &IndexedPriorityQueue<T>) {
    assert!(q.is_min_heap(0), "heap property violated: {:?}", q);
    assert!(q.is_index_consistent(), "index out of sync with heap: {:?}", q);
    for value in q.iter() {
        assert!(q.contains(value), "{:?} is in the heap but not contained", value);
    }
    assert_eq!(q.iter().count(), q.len());
}

/// The complete observable state of a queue: the heap array, and the index as
/// (value, positions) pairs sorted by value.
#[derive(Debug, Eq, PartialEq)]
pub struct Snapshot<T> {
    pub heap: Vec<T>,
    pub index: Vec<(T, Vec<usize>)>,
}

impl<T: Ord + Hash + Clone> Snapshot<T> {
    pub fn of(q: &IndexedPriorityQueue<T>) -> Self {
        let mut index: Vec<(T, Vec<usize>)> = q
            .position_index()
            .iter()
            .map(|(value, positions)| (value.clone(), positions.iter().copied().collect()))
            .collect();
        index.sort();
        Self {
            heap: q.as_slice().to_vec(),
            index,
        }
    }
}
