//! Result aggregator for ordering parallel solver results
//!
//! Results arrive in whatever order the workers finish. They wait in a
//! min-heap until every key before them in (year, day, part) order has
//! been emitted.

use crate::executor::SolverResult;
use aoc_solutions::utils::MinHeap;
use std::collections::VecDeque;

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    /// Keys still owed, smallest first
    expected: VecDeque<ResultKey>,
    /// Received results waiting for their turn
    pending: MinHeap<SolverResult, ResultKey>,
}

impl ResultAggregator {
    /// Create aggregator from list of expected keys
    pub fn new(mut expected_keys: Vec<ResultKey>) -> Self {
        expected_keys.sort_unstable();
        Self {
            expected: expected_keys.into(),
            pending: MinHeap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        let key = ResultKey::from(&result);
        self.pending.push(result, key);

        let mut ready = Vec::new();
        while let (Some(next_expected), Some((_, top_key))) = (self.expected.front(), self.pending.peek()) {
            if top_key != next_expected {
                break;
            }
            self.expected.pop_front();
            ready.extend(self.pending.pop_item());
        }
        ready
    }

    /// Drain remaining results in order (for final output)
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::iter::from_fn(|| self.pending.pop_item()).collect()
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}
