//! Parallel implementation of batch evaluation

use crate::evaluator::traits::EvalOps;
use rayon::prelude::*;

/// Fans slots out over the rayon thread pool.
///
/// Each task receives a contiguous index range of at least `min_len` slots
/// and writes only inside it, so no locking is needed.
#[derive(Debug, Clone, Copy)]
pub struct ParallelEvalOps {
    min_len: usize,
}

impl ParallelEvalOps {
    pub const fn new() -> Self {
        Self { min_len: 64 }
    }

    /// Minimum number of consecutive slots handed to one task (at least 1).
    pub const fn with_min_len(min_len: usize) -> Self {
        Self {
            min_len: if min_len == 0 { 1 } else { min_len },
        }
    }

    pub const fn min_len(&self) -> usize {
        self.min_len
    }
}

impl Default for ParallelEvalOps {
    fn default() -> Self {
        Self::new()
    }
}

impl EvalOps for ParallelEvalOps {
    fn fill<T, G>(&self, out: &mut [T], value: G)
    where
        T: Send,
        G: Fn(usize) -> T + Sync + Send,
    {
        out.par_iter_mut()
            .enumerate()
            .with_min_len(self.min_len)
            .for_each(|(i, slot)| *slot = value(i));
    }
}
