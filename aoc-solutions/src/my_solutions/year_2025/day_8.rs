use anyhow::ensure;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::MinHeap;
use crate::utils::graph::UnionFind;
use crate::utils::parse::{lines_with_context, number};

/// Pairs joined for part 1 on a real input.
const CONNECTIONS: usize = 1000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 8, tags = ["heap", "union-find"])]
pub struct Solver;

type Point3 = [i64; 3];

impl AocParser for Solver {
    type SharedData<'a> = Vec<Point3>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let boxes = lines_with_context(input, |line| {
            let coords = line.split(',').map(number).collect::<anyhow::Result<Vec<i64>>>()?;
            ensure!(coords.len() == 3, "expected x,y,z, got {} values", coords.len());
            Ok([coords[0], coords[1], coords[2]])
        })?;
        if boxes.len() < 2 {
            return Err(ParseError::MissingData("need at least two junction boxes".to_string()));
        }
        Ok(boxes)
    }
}

fn squared_distance(a: &Point3, b: &Point3) -> i64 {
    a.iter().zip(b).map(|(p, q)| (p - q) * (p - q)).sum()
}

/// Every pair `(i, j)` with `i < j`, closest first. Equal distances pop in
/// index order.
fn closest_pairs(boxes: &[Point3]) -> MinHeap<(usize, usize)> {
    (0..boxes.len())
        .tuple_combinations()
        .map(|(i, j)| ((i, j), squared_distance(&boxes[i], &boxes[j])))
        .collect()
}

/// Join the `connections` closest pairs, then multiply the three largest
/// circuit sizes (or however many circuits there are, if fewer).
fn largest_circuits_product(boxes: &[Point3], connections: usize) -> usize {
    let mut pairs = closest_pairs(boxes);
    let mut circuits = UnionFind::new(boxes.len());
    for _ in 0..connections {
        let Some((i, j)) = pairs.pop_item() else {
            break;
        };
        circuits.union(i, j);
    }
    circuits.set_sizes().into_iter().take(3).product()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(largest_circuits_product(shared, CONNECTIONS).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut pairs = closest_pairs(shared);
        let mut circuits = UnionFind::new(shared.len());
        let mut joined = 0;
        while let Some((i, j)) = pairs.pop_item() {
            joined += 1;
            if circuits.union(i, j) && circuits.components() == 1 {
                log::debug!("single circuit after {joined} connections");
                return Ok((shared[i][0] * shared[j][0]).to_string());
            }
        }
        Err(SolveError::failed("junction boxes never form a single circuit"))
    }
}
