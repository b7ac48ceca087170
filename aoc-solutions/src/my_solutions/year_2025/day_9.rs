use anyhow::{anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::Point;
use crate::utils::parse::{lines_with_context, number};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 9, tags = ["geometry"])]
pub struct Solver;

impl AocParser for Solver {
    /// Red tiles in loop order; consecutive tiles share a row or column
    type SharedData<'a> = Vec<Point>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let tiles = lines_with_context(input, |line| {
            let (x, y) = line.split_once(',').ok_or_else(|| anyhow!("expected 'x,y'"))?;
            Ok(Point::new(number(x)?, number(y)?))
        })?;
        if tiles.len() < 2 {
            return Err(ParseError::MissingData("need at least two red tiles".to_string()));
        }

        tiles
            .iter()
            .circular_tuple_windows()
            .try_for_each(|(a, b)| {
                ensure!(a.x == b.x || a.y == b.y, "tiles {} and {} are not aligned", a, b);
                Ok(())
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        Ok(tiles)
    }
}

/// Tiles covered by the rectangle with opposite corners `a` and `b`.
fn area(a: Point, b: Point) -> u64 {
    (a.x.abs_diff(b.x) + 1) * (a.y.abs_diff(b.y) + 1)
}

/// Whether the segment `p..=q` has a lattice point strictly inside the
/// rectangle spanned by `a` and `b`.
fn crosses_interior(p: Point, q: Point, a: Point, b: Point) -> bool {
    let overlap = |s0: i64, s1: i64, r0: i64, r1: i64| {
        let lo = s0.min(s1).max(r0.min(r1) + 1);
        let hi = s0.max(s1).min(r0.max(r1) - 1);
        lo <= hi
    };
    overlap(p.x, q.x, a.x, b.x) && overlap(p.y, q.y, a.y, b.y)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| area(a, b))
            .max()
            .unwrap_or(0);
        Ok(best.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let edges: Vec<(Point, Point)> = shared.iter().copied().circular_tuple_windows().collect();

        let mut best = 0;
        for (&a, &b) in shared.iter().tuple_combinations() {
            let candidate = area(a, b);
            if candidate <= best {
                continue;
            }
            if edges.iter().all(|&(p, q)| !crosses_interior(p, q, a, b)) {
                best = candidate;
            }
        }
        Ok(best.to_string())
    }
}
