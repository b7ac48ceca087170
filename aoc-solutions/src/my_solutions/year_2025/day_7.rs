use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{ClosureProblem, DpCache, HashMapBackend};
use crate::utils::search::{Pather, flood_fill};
use crate::utils::{DenseGrid, Grid, Point};

const START: u8 = b'S';
const SPLITTER: u8 = b'^';

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 7, tags = ["grid", "dp"])]
pub struct Solver;

#[derive(Debug)]
pub struct Manifold {
    grid: DenseGrid,
    start: Point,
}

/// Beam movement: straight down, or sideways out of a splitter.
impl Pather for Manifold {
    type Node = Point;

    fn successors(&self, node: Point, buf: &mut Vec<Point>) {
        let next: &[Point] = if self.grid.at(node) == Some(SPLITTER) {
            &[Point::WEST, Point::EAST]
        } else {
            &[Point::SOUTH]
        };
        buf.extend(next.iter().map(|&d| node + d).filter(|&p| self.grid.in_bounds(p)));
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Manifold;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = DenseGrid::from_text(input)?;
        let start = match grid.find_all(START).as_slice() {
            [start] => *start,
            [] => return Err(ParseError::MissingData("no beam entry 'S'".to_string())),
            many => {
                return Err(ParseError::InvalidFormat(format!(
                    "expected one 'S', found {}",
                    many.len()
                )));
            }
        };
        Ok(Manifold { grid, start })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let manifold = &*shared;
        let splits = flood_fill(manifold, manifold.start)
            .into_keys()
            .filter(|&p| manifold.grid.at(p) == Some(SPLITTER))
            .count();
        Ok(splits.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let last_row = shared.grid.height() as i64 - 1;
        let manifold = &*shared;

        // Timelines from a cell: 1 on the last row, else the sum over successors
        let timelines = DpCache::new(
            HashMapBackend::new(),
            ClosureProblem::new(
                |&pos: &Point| {
                    let mut next = Vec::new();
                    if pos.y < last_row {
                        manifold.successors(pos, &mut next);
                    }
                    next
                },
                |pos: &Point, deps: Vec<u64>| if pos.y == last_row { 1 } else { deps.iter().sum() },
            ),
        );

        Ok(timelines.get(&manifold.start).to_string())
    }
}
