use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::range;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 2, tags = ["math"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<(u64, u64)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let ranges = input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                range(s)
                    .and_then(|(lo, hi)| {
                        anyhow::ensure!(lo <= hi, "range {s:?} is reversed");
                        Ok((lo, hi))
                    })
                    .map_err(|e| ParseError::InvalidFormat(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if ranges.is_empty() {
            return Err(ParseError::MissingData("no ID ranges".to_string()));
        }
        Ok(ranges)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_repeated(shared, |k| k == 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_repeated(shared, |k| k >= 2).to_string())
    }
}

fn digit_count(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |d| d + 1)
}

/// Every number in `lo..=hi` whose digits are one block repeated `k` times,
/// for each `k` accepted by `repeats`.
fn repeated_ids(lo: u64, hi: u64, repeats: impl Fn(u32) -> bool) -> impl Iterator<Item = u64> {
    (digit_count(lo)..=digit_count(hi))
        .flat_map(move |len| (2..=len).filter(move |&k| len % k == 0).map(move |k| (len, k)))
        .filter(move |&(_, k)| repeats(k))
        .flat_map(move |(len, k)| {
            let block_len = len / k;
            // 1001 for two blocks of length 3, 10101 for three of length 2
            let multiplier: u64 = (0..k).map(|i| 10u64.pow(i * block_len)).sum();
            let smallest = 10u64.pow(block_len - 1);
            let largest = 10u64.pow(block_len) - 1;
            let first = lo.div_ceil(multiplier).max(smallest);
            let last = (hi / multiplier).min(largest);
            (first..=last).map(move |block| block * multiplier)
        })
        .unique()
}

fn sum_repeated(ranges: &[(u64, u64)], repeats: impl Fn(u32) -> bool + Copy) -> u64 {
    ranges
        .iter()
        .map(|&(lo, hi)| repeated_ids(lo, hi, repeats).sum::<u64>())
        .sum()
}
