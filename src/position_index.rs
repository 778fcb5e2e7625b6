use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// Reverse index for a heap array: maps each distinct value to the set of array
/// positions that currently hold an equal value.
///
/// A value that is not in the heap has no entry at all. An entry is never left
/// holding an empty set, so "has an entry" and "is contained" are the same thing.
///
/// Every method here only does bookkeeping. The caller is responsible for making
/// the matching change to the heap array in the same step.
#[derive(Clone)]
pub struct PositionIndex<T> {
    map: HashMap<T, BTreeSet<usize>>,
}

impl<T: Hash + Eq + Clone> PositionIndex<T> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Records that `value` now lives at `position`.
    pub fn add(&mut self, value: &T, position: usize) {
        if let Some(set) = self.map.get_mut(value) {
            set.insert(position);
        } else {
            let mut set = BTreeSet::new();
            set.insert(position);
            self.map.insert(value.clone(), set);
        }
    }

    /// Forgets that `value` lives at `position`. Drops the entry for `value` once
    /// its last position is gone.
    pub fn remove(&mut self, value: &T, position: usize) {
        let now_empty = match self.map.get_mut(value) {
            Some(set) => {
                let removed = set.remove(&position);
                debug_assert!(removed, "position {} was not recorded", position);
                set.is_empty()
            }
            None => {
                debug_assert!(false, "value was not recorded");
                false
            }
        };
        if now_empty {
            self.map.remove(value);
        }
    }

    /// Returns one position holding `value`. When there are several, the largest
    /// recorded position is chosen; callers should not rely on which one.
    pub fn get(&self, value: &T) -> Option<usize> {
        self.map
            .get(value)
            .and_then(|set| set.iter().next_back().copied())
    }

    /// Updates the bookkeeping after the array slots `pos1` and `pos2` have been
    /// exchanged. `val1` was at `pos1` and is now at `pos2`; `val2` was at `pos2`
    /// and is now at `pos1`.
    ///
    /// The two values may be equal, and the two positions may be the same.
    pub fn swap(&mut self, val1: &T, val2: &T, pos1: usize, pos2: usize) {
        debug_assert!(self.map.contains_key(val1), "value at {} was not recorded", pos1);
        debug_assert!(self.map.contains_key(val2), "value at {} was not recorded", pos2);
        // Sets may be empty between these steps, so entries are not pruned here.
        if let Some(set1) = self.map.get_mut(val1) {
            set1.remove(&pos1);
        }
        if let Some(set2) = self.map.get_mut(val2) {
            set2.remove(&pos2);
        }
        if let Some(set1) = self.map.get_mut(val1) {
            set1.insert(pos2);
        }
        if let Some(set2) = self.map.get_mut(val2) {
            set2.insert(pos1);
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    /// All recorded positions of `value`, smallest first.
    pub fn positions(&self, value: &T) -> Option<&BTreeSet<usize>> {
        self.map.get(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, &BTreeSet<usize>)> + '_ {
        self.map.iter()
    }

    /// Number of distinct values.
    pub fn num_values(&self) -> usize {
        self.map.len()
    }

    /// Total number of recorded positions, over all values.
    pub fn num_positions(&self) -> usize {
        self.map.values().map(|set| set.len()).sum()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions_of(index: &PositionIndex<&'static str>, value: &'static str) -> Vec<usize> {
        index
            .positions(&value)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    #[test]
    fn add_remove_test() {
        let mut index = PositionIndex::new();
        index.add(&"a", 0);
        index.add(&"b", 1);
        index.add(&"a", 4);
        assert_eq!(positions_of(&index, "a"), vec![0, 4]);
        assert_eq!(positions_of(&index, "b"), vec![1]);
        assert_eq!(index.num_values(), 2);
        assert_eq!(index.num_positions(), 3);

        index.remove(&"a", 0);
        assert!(index.contains(&"a"));
        assert_eq!(positions_of(&index, "a"), vec![4]);

        index.remove(&"a", 4);
        assert!(!index.contains(&"a"));
        assert!(index.positions(&"a").is_none(), "empty sets must not be kept");
        assert_eq!(index.num_values(), 1);
    }

    #[test]
    fn get_picks_largest_position_test() {
        let mut index = PositionIndex::new();
        assert_eq!(index.get(&"x"), None);
        index.add(&"x", 3);
        index.add(&"x", 9);
        index.add(&"x", 1);
        assert_eq!(index.get(&"x"), Some(9));
        index.remove(&"x", 9);
        assert_eq!(index.get(&"x"), Some(3));
    }

    #[test]
    fn swap_test() {
        fn case(
            description: &str,
            setup: &[(&'static str, usize)],
            swap: (&'static str, &'static str, usize, usize),
            expected: &[(&'static str, Vec<usize>)],
        ) {
            let mut index = PositionIndex::new();
            for &(value, position) in setup.iter() {
                index.add(&value, position);
            }
            let (val1, val2, pos1, pos2) = swap;
            index.swap(&val1, &val2, pos1, pos2);
            for (value, positions) in expected.iter() {
                assert_eq!(
                    &positions_of(&index, *value),
                    positions,
                    "{}: positions of {:?}",
                    description,
                    value
                );
            }
        }

        case(
            "distinct values",
            &[("a", 0), ("b", 1)],
            ("a", "b", 0, 1),
            &[("a", vec![1]), ("b", vec![0])],
        );

        case(
            "distinct values with duplicates elsewhere",
            &[("a", 0), ("b", 1), ("a", 2), ("b", 3)],
            ("a", "b", 2, 1),
            &[("a", vec![0, 1]), ("b", vec![2, 3])],
        );

        case(
            "equal values",
            &[("a", 0), ("a", 5)],
            ("a", "a", 0, 5),
            &[("a", vec![0, 5])],
        );

        case(
            "same position",
            &[("a", 0), ("b", 1)],
            ("b", "b", 1, 1),
            &[("a", vec![0]), ("b", vec![1])],
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "was not recorded")]
    fn swap_unrecorded_value_test() {
        let mut index = PositionIndex::new();
        index.add(&"a", 0);
        index.swap(&"a", &"missing", 0, 1);
    }

    #[test]
    fn clear_test() {
        let mut index = PositionIndex::with_capacity(4);
        index.add(&"a", 0);
        index.add(&"b", 1);
        index.clear();
        assert_eq!(index.num_values(), 0);
        assert!(!index.contains(&"a"));
        assert_eq!(index.iter().count(), 0);
    }
}
