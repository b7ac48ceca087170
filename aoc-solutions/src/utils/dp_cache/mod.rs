//! Memoized evaluation over a dependency DAG
//!
//! A [`DpProblem`] names, for every index, the indices it depends on and how
//! to combine their values. [`DpCache`] resolves dependencies recursively and
//! computes each index exactly once.
//!
//! # Backends
//!
//! - [`VecBackend`]: dense `usize` indices, grows on demand
//! - [`HashMapBackend`]: any `Hash + Eq` index (grid points, node names)
//!
//! # Warning: Cycle Behavior
//!
//! There is no cycle detection. A cyclic dependency graph overflows the stack.
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
//!
//! /// Monotone lattice paths from (0, 0) to (r, c)
//! struct LatticePaths;
//!
//! impl DpProblem<(usize, usize), u64> for LatticePaths {
//!     fn deps(&self, &(r, c): &(usize, usize)) -> Vec<(usize, usize)> {
//!         let mut deps = Vec::new();
//!         if r > 0 { deps.push((r - 1, c)); }
//!         if c > 0 { deps.push((r, c - 1)); }
//!         deps
//!     }
//!     fn compute(&self, _pos: &(usize, usize), deps: Vec<u64>) -> u64 {
//!         if deps.is_empty() { 1 } else { deps.iter().sum() }
//!     }
//! }
//!
//! let cache = DpCache::builder()
//!     .backend(HashMapBackend::new())
//!     .problem(LatticePaths)
//!     .build();
//! assert_eq!(cache.get(&(4, 4)), 70);
//! ```
//!
//! Closures work too:
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{ClosureProblem, DpCache, VecBackend};
//!
//! let fib = ClosureProblem::new(
//!     |n: &usize| if *n <= 1 { vec![] } else { vec![n - 1, n - 2] },
//!     |n: &usize, deps: Vec<u64>| if *n <= 1 { *n as u64 } else { deps[0] + deps[1] },
//! );
//! let cache = DpCache::new(VecBackend::new(), fib);
//! assert_eq!(cache.get(&50), 12_586_269_025);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::{DpCache, DpCacheBuilder};
pub use problem::{ClosureProblem, DpProblem};

#[cfg(test)]
mod tests;
