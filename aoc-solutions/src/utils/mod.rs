//! Building blocks shared by the daily solutions

pub mod dp_cache;
pub mod graph;
pub mod grid;
pub mod heap;
pub mod lp;
pub mod parse;
pub mod point;
pub mod search;

pub use grid::{DenseGrid, Grid, SparseGrid};
pub use heap::{MaxHeap, MinHeap};
pub use point::{Directions, Point};
pub use search::{PathResult, Pather, WeightedPather};
