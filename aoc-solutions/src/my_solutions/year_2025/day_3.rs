use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::lines_with_context;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 3, tags = ["greedy"])]
pub struct Solver;

impl AocParser for Solver {
    /// One digit slice per battery bank
    type SharedData<'a> = Vec<&'a [u8]>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines_with_context(input, |line| {
            let bank = line.trim().as_bytes();
            match bank.iter().find(|b| !b.is_ascii_digit()) {
                Some(&bad) => Err(anyhow!("unexpected battery {:?}", bad as char)),
                None => Ok(bank),
            }
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 2)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_joltage(shared, 12)
    }
}

fn total_joltage(banks: &[&[u8]], batteries: usize) -> Result<String, SolveError> {
    banks
        .iter()
        .enumerate()
        .map(|(idx, bank)| {
            max_joltage(bank, batteries).ok_or_else(|| {
                SolveError::failed(format!(
                    "bank {} has {} batteries, need {}",
                    idx + 1,
                    bank.len(),
                    batteries
                ))
            })
        })
        .sum::<Result<u64, _>>()
        .map(|total| total.to_string())
}

/// Largest number formed by picking `n` digits of `bank` in order.
fn max_joltage(bank: &[u8], n: usize) -> Option<u64> {
    if bank.len() < n {
        return None;
    }

    // Keep the stack decreasing while there are digits left to drop
    let mut drops = bank.len() - n;
    let mut stack: Vec<u8> = Vec::with_capacity(bank.len());
    for &digit in bank {
        while drops > 0 && stack.last().is_some_and(|&top| top < digit) {
            stack.pop();
            drops -= 1;
        }
        stack.push(digit);
    }

    Some(
        stack[..n]
            .iter()
            .fold(0u64, |acc, &d| acc * 10 + u64::from(d - b'0')),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const EXAMPLE: &str = "\
987654321111111
811111111111119
234234234234278
818181911112111
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "357");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "3121910778619");
    }

    #[test]
    fn test_single_banks() {
        assert_eq!(max_joltage(b"811111111111119", 2), Some(89));
        assert_eq!(max_joltage(b"234234234234278", 12), Some(434234234278));
        assert_eq!(max_joltage(b"12", 3), None);
    }

    #[test]
    fn test_short_bank_fails_part() {
        let mut shared = Solver::parse("12345\n").unwrap();
        assert!(matches!(Solver::solve_part(&mut shared, 2), Err(SolveError::SolveFailed(_))));
        assert!(Solver::parse("12a4\n").is_err());
    }

    proptest! {
        #[test]
        fn prop_two_digit_matches_pairs(bank in "[1-9]{2,20}") {
            let bytes = bank.as_bytes();
            let mut best = 0;
            for i in 0..bytes.len() {
                for j in i + 1..bytes.len() {
                    best = best.max(u64::from(bytes[i] - b'0') * 10 + u64::from(bytes[j] - b'0'));
                }
            }
            prop_assert_eq!(max_joltage(bytes, 2), Some(best));
        }
    }
}
