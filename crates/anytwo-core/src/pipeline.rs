//! All-pairs comparison over a set of evaluations.

use rayon::prelude::*;

use crate::any_two::AnyTwo;
use crate::evaluation::Evaluation;

/// Computes any-two results for every unordered pair of evaluations.
///
/// Pairs are independent, so they are computed in parallel; the output keeps
/// the input order, `(0, 1), (0, 2), …, (1, 2), …`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline;

impl Pipeline {
    pub const fn new() -> Self {
        Self
    }

    /// Index pairs `(i, j)` with `i < j` over `len` evaluations.
    pub fn pair_indices(len: usize) -> Vec<(usize, usize)> {
        (0..len)
            .flat_map(|i| ((i + 1)..len).map(move |j| (i, j)))
            .collect()
    }

    pub fn run(&self, evaluations: &[Evaluation]) -> Vec<AnyTwo> {
        let pairs = Self::pair_indices(evaluations.len());
        tracing::info!(
            evaluations = evaluations.len(),
            pairs = pairs.len(),
            "comparing evaluations"
        );

        pairs
            .par_iter()
            .map(|&(i, j)| AnyTwo::compute(&evaluations[i], &evaluations[j]))
            .collect()
    }
}
