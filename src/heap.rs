//! Navigation in a complete binary tree stored densely in an array.
//! Position `0` is the root.

pub fn left(parent: usize) -> usize {
    parent * 2 + 1
}

pub fn right(parent: usize) -> usize {
    parent * 2 + 2
}

/// `child` must not be the root.
pub fn parent(child: usize) -> usize {
    debug_assert_ne!(child, 0);
    (child - 1) / 2
}

/// Returns the position of the last node that has at least one child, or `None`
/// if a tree of `len` nodes has no internal nodes.
pub fn last_parent(len: usize) -> Option<usize> {
    if len < 2 {
        None
    } else {
        Some(len / 2 - 1)
    }
}
