//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions live under `my_solutions`, one module per year and day. Each
//! day derives `AutoRegisterSolver`, so linking this crate is enough for
//! `SolverRegistryBuilder::register_all_plugins` to find it.
//!
//! `utils` holds the reusable pieces: character grids, BFS/Dijkstra/A*,
//! priority queues, a memoizing DP cache and an integer-program bridge.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
