//! Run boundary detection
//!
//! A *run* is a maximal stretch of consecutive equal values. A *move* is the
//! first element of a run: a position where the value differs from its
//! predecessor. Both encoding and decoding of flip-flop paths are built on the
//! move mask produced here.

use std::ops::Sub;

/// Marks the positions that start a new run.
///
/// `move[i]` is true when `x[i] != x[i - 1]`. The first element has no
/// predecessor so its value is taken from `first_move`.
///
/// An empty input yields an empty mask.
///
/// # Examples
///
/// ```
/// use flipflop::mark_moves;
///
/// let moves = mark_moves(&[0, 0, 1, 1, 1, 2], true);
/// assert_eq!(moves, vec![true, false, true, false, false, true]);
/// ```
pub fn mark_moves<T: PartialEq>(x: &[T], first_move: bool) -> Vec<bool> {
    let mut moves = Vec::with_capacity(x.len());
    if x.is_empty() {
        return moves;
    }
    moves.push(first_move);
    moves.extend(x.windows(2).map(|w| w[1] != w[0]));
    moves
}

/// Marks run starts where consecutive values may differ by up to `tol`.
///
/// `move[i]` is true when `|x[i] - x[i - 1]| > tol`. The absolute difference
/// is taken larger-minus-smaller so unsigned inputs never underflow.
pub fn mark_moves_within<T>(x: &[T], tol: T, first_move: bool) -> Vec<bool>
where
    T: Copy + PartialOrd + Sub<Output = T>,
{
    let mut moves = Vec::with_capacity(x.len());
    if x.is_empty() {
        return moves;
    }
    moves.push(first_move);
    moves.extend(x.windows(2).map(|w| {
        let delta = if w[1] > w[0] { w[1] - w[0] } else { w[0] - w[1] };
        delta > tol
    }));
    moves
}

/// Returns the 0-based offset of every element within its own run.
///
/// ```
/// use flipflop::run_offsets;
///
/// assert_eq!(run_offsets(&[5, 5, 5, 2, 5, 5]), vec![0, 1, 2, 0, 0, 1]);
/// ```
pub fn run_offsets<T: PartialEq>(x: &[T]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(x.len());
    let mut offset = 0;
    for (is_move, _) in mark_moves(x, true).into_iter().zip(x) {
        offset = if is_move { 0 } else { offset + 1 };
        offsets.push(offset);
    }
    offsets
}

/// Returns the values found at positions where `mask` is true, in order.
pub(crate) fn select<T: Copy>(x: &[T], mask: &[bool]) -> Vec<T> {
    x.iter()
        .zip(mask)
        .filter_map(|(&v, &keep)| keep.then_some(v))
        .collect()
}
