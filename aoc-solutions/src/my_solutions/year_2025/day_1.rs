use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{lines_with_context, number};

const DIAL_SIZE: i64 = 100;
const DIAL_START: i64 = 50;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 1, tags = ["simulation"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    rotations: Vec<i64>,
    common_result: Option<CommonResult>,
}

#[derive(Debug)]
pub struct CommonResult {
    zero_counts: u64,
    pass_zero_counts: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rotations = lines_with_context(input, |line| {
            let line = line.trim();
            let negative = match line.as_bytes().first() {
                Some(b'L') => true,
                Some(b'R') => false,
                _ => return Err(anyhow!("first character need to be 'L' or 'R'")),
            };
            let clicks: i64 = number(&line[1..])?;
            if clicks < 0 {
                return Err(anyhow!("rotate value must be non negative"));
            }
            Ok(if negative { -clicks } else { clicks })
        })?;

        Ok(SharedData {
            rotations,
            common_result: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(solve_once_for_both(shared).zero_counts.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(solve_once_for_both(shared).pass_zero_counts.to_string())
    }
}

/// Clicks that land on 0 while turning `rotation` from `dial`.
fn zero_clicks(dial: i64, rotation: i64) -> u64 {
    let clicks = rotation.unsigned_abs();
    // Distance to the first 0 in the turning direction
    let first = match (dial, rotation.signum()) {
        (0, _) => DIAL_SIZE as u64,
        (d, 1) => (DIAL_SIZE - d) as u64,
        (d, _) => d as u64,
    };
    if clicks < first {
        0
    } else {
        1 + (clicks - first) / DIAL_SIZE as u64
    }
}

fn solve_once_for_both(shared: &mut SharedData) -> &CommonResult {
    shared.common_result.get_or_insert_with(|| {
        let (_, zero_counts, pass_zero_counts) = shared.rotations.iter().fold(
            (DIAL_START, 0u64, 0u64),
            |(dial, zero_counts, pass_zero_counts), &rotation| {
                let next = (dial + rotation).rem_euclid(DIAL_SIZE);
                (
                    next,
                    zero_counts + u64::from(next == 0),
                    pass_zero_counts + zero_clicks(dial, rotation),
                )
            },
        );
        log::debug!("dial hit zero {zero_counts} times, clicked past it {pass_zero_counts} times");

        CommonResult {
            zero_counts,
            pass_zero_counts,
        }
    })
}
