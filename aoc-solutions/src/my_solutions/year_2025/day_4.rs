use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::{DenseGrid, Directions, Grid, Point};

const ROLL: u8 = b'@';
const REMOVED: u8 = b'x';
const MAX_CROWD: usize = 4;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 4, tags = ["grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = DenseGrid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(DenseGrid::from_text(input)?.with_directions(Directions::Eight))
    }
}

/// Rolls with fewer than four rolls among their eight neighbors.
fn accessible(grid: &DenseGrid) -> Vec<Point> {
    grid.find_all(ROLL)
        .into_iter()
        .filter(|&p| {
            grid.neighbors(p)
                .into_iter()
                .filter(|&n| grid.at(n) == Some(ROLL))
                .take(MAX_CROWD)
                .count()
                < MAX_CROWD
        })
        .collect()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(accessible(shared).len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Work on a copy so part 1 still sees the original floor
        let mut grid = DenseGrid::new(shared.width(), shared.height(), b'.').with_directions(Directions::Eight);
        for p in shared.find_all(ROLL) {
            grid.set_cell(p, ROLL);
        }

        let mut removed = 0;
        let mut rounds = 0;
        loop {
            let batch = accessible(&grid);
            if batch.is_empty() {
                break;
            }
            removed += batch.len();
            rounds += 1;
            for p in batch {
                grid.set_cell(p, REMOVED);
            }
        }
        log::debug!("removed {removed} rolls in {rounds} rounds");

        Ok(removed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
..@@.@@@@.
@@@.@.@.@@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@@
.@@@@@@@@.
@.@.@@@.@.
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "13");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "43");
        // Part 2 leaves the parsed floor untouched
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "13");
    }

    #[test]
    fn test_dense_block() {
        // Every roll in a 3x3 block except the corners has 4+ neighbors
        let mut shared = Solver::parse("@@@\n@@@\n@@@\n").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "4");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "9");
    }
}
