//! A binary min-heap with a reverse index from values to heap positions.
//!
//! `IndexedPriorityQueue` supports the usual `add`/`peek`/`poll`, plus O(1)
//! average `contains` and O(log n) removal of any value it holds.

pub mod error;
pub mod heap;
pub mod indexed_pq;
pub mod position_index;

#[cfg(test)]
mod testing;

pub use crate::error::Error;
pub use crate::indexed_pq::IndexedPriorityQueue;
