//! Serial implementation of batch evaluation

use crate::evaluator::traits::EvalOps;

/// Evaluates slots one after another on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialEvalOps;

impl SerialEvalOps {
    pub const fn new() -> Self {
        Self
    }
}

impl EvalOps for SerialEvalOps {
    fn fill<T, G>(&self, out: &mut [T], value: G)
    where
        T: Send,
        G: Fn(usize) -> T + Sync + Send,
    {
        out.iter_mut()
            .enumerate()
            .for_each(|(i, slot)| *slot = value(i));
    }
}
