//! Projection of modified-base weights onto basecall positions
//!
//! Alongside the flip-flop transitions a network can emit, for each block, one
//! weight per canonical base and per modified variant of that base. The columns
//! are grouped in blocks, one per canonical base in alphabet order: the first
//! column of a block holds the canonical score, followed by one column per
//! modified variant.
//!
//! Row `t` of the weight matrix belongs to the transition from `path[t]` into
//! `path[t + 1]`, so a matrix for a path of `T` blocks has `T - 1` rows.

use ndarray::{Array2, ArrayBase, Data, Ix2};

use crate::{
    decode::check_path,
    error::ShapeError,
    runs::mark_moves,
    Result,
};

/// Column layout of a modification weight matrix
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModLayout {
    can_nmods: Vec<usize>,
    /// Column of the canonical score for each base
    offsets: Vec<usize>,
}
impl ModLayout {
    /// Creates a layout from the number of modified variants of each canonical base
    #[must_use]
    pub fn new(can_nmods: Vec<usize>) -> Self {
        let mut offsets = Vec::with_capacity(can_nmods.len());
        let mut offset = 0;
        for &nmod in &can_nmods {
            offsets.push(offset);
            offset += 1 + nmod;
        }
        Self { can_nmods, offsets }
    }

    #[must_use]
    pub fn can_nmods(&self) -> &[usize] {
        &self.can_nmods
    }

    /// Number of canonical bases covered by the layout
    #[must_use]
    pub fn n_bases(&self) -> usize {
        self.can_nmods.len()
    }

    /// Total number of modified variants, i.e. columns of projected scores
    #[must_use]
    pub fn n_mods(&self) -> usize {
        self.can_nmods.iter().sum()
    }

    /// Number of columns the network emits: one canonical plus one per variant, per base
    #[must_use]
    pub fn n_weight_columns(&self) -> usize {
        self.n_bases() + self.n_mods()
    }

    #[must_use]
    pub fn has_mods(&self) -> bool {
        self.n_mods() > 0
    }

    /// Checks a weight matrix has one row per transition of a path of `path_len` blocks
    pub fn check_weights<S>(&self, mod_weights: &ArrayBase<S, Ix2>, path_len: usize) -> Result<()>
    where
        S: Data<Elem = f32>,
    {
        let (nrows, ncols) = mod_weights.dim();
        let expected_rows = path_len.saturating_sub(1);
        if nrows != expected_rows {
            return Err(ShapeError::ModWeightRows {
                expected: expected_rows,
                got: nrows,
            }
            .into());
        }
        if ncols != self.n_weight_columns() {
            return Err(ShapeError::ModWeightColumns {
                expected: self.n_weight_columns(),
                got: ncols,
            }
            .into());
        }
        Ok(())
    }

    /// Projects modification weights onto the symbols decoded from `path`
    ///
    /// The output has one row per decoded symbol, counting the state the path
    /// starts in, and one column per modified variant in (base, variant) order.
    /// A cell holds the weight of the transition that emitted the symbol when the
    /// symbol's canonical base owns that variant, and NaN otherwise. The first
    /// row is always NaN since no transition moves into the first symbol.
    pub fn project<S>(&self, mod_weights: &ArrayBase<S, Ix2>, path: &[u8]) -> Result<Array2<f32>>
    where
        S: Data<Elem = f32>,
    {
        let nbase = self.n_bases();
        check_path(path, nbase)?;
        self.check_weights(mod_weights, path.len())?;
        if path.is_empty() {
            return Ok(Array2::from_elem((0, self.n_mods()), f32::NAN));
        }

        // (weight row, emitted state) for every transition that changes state
        let calls: Vec<(usize, usize)> = mark_moves(path, false)
            .into_iter()
            .enumerate()
            .filter(|&(_, is_move)| is_move)
            .map(|(t, _)| (t - 1, path[t] as usize))
            .collect();

        let mut scores = Array2::from_elem((calls.len() + 1, self.n_mods()), f32::NAN);
        let mut column = 0;
        for (base, (&nmod, &offset)) in self.can_nmods.iter().zip(&self.offsets).enumerate() {
            if nmod == 0 {
                continue;
            }
            for (pos, &(row, state)) in calls.iter().enumerate() {
                if state % nbase != base {
                    continue;
                }
                for variant in 0..nmod {
                    scores[[pos + 1, column + variant]] = mod_weights[[row, offset + 1 + variant]];
                }
            }
            column += nmod;
        }
        Ok(scores)
    }
}

/// Projects per-transition modification weights onto basecall positions
///
/// `can_nmods[b]` is the number of modified variants of canonical base `b`; its
/// length is the alphabet size. See [`ModLayout::project`] for the output layout.
///
/// ```
/// use flipflop::extract_mod_weights;
/// use ndarray::array;
///
/// // A, C with one variant (5mC), G, T
/// let can_nmods = [0, 1, 0, 0];
/// let path = [0, 1, 1, 2, 1];
/// let weights = array![
///     [0.0, 0.9, 0.1, 0.0, 0.0],
///     [0.0, 0.8, 0.2, 0.0, 0.0],
///     [0.0, 0.0, 0.0, 1.0, 0.0],
///     [0.0, 0.3, 0.7, 0.0, 0.0],
/// ];
/// let scores = extract_mod_weights(&weights, &path, &can_nmods).unwrap();
/// assert_eq!(scores.dim(), (4, 1));
/// assert!(scores[[0, 0]].is_nan());
/// assert_eq!(scores[[1, 0]], 0.1);
/// assert!(scores[[2, 0]].is_nan());
/// assert_eq!(scores[[3, 0]], 0.7);
/// ```
pub fn extract_mod_weights<S>(
    mod_weights: &ArrayBase<S, Ix2>,
    path: &[u8],
    can_nmods: &[usize],
) -> Result<Array2<f32>>
where
    S: Data<Elem = f32>,
{
    ModLayout::new(can_nmods.to_vec()).project(mod_weights, path)
}
