use anyhow::ensure;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{lines_with_context, number, range};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 5, tags = ["intervals"])]
pub struct Solver;

#[derive(Debug)]
pub struct Inventory {
    /// Sorted, non-overlapping and non-adjacent
    fresh: Vec<(u64, u64)>,
    available: Vec<u64>,
}

impl Inventory {
    fn is_fresh(&self, id: u64) -> bool {
        let idx = self.fresh.partition_point(|&(_, hi)| hi < id);
        self.fresh.get(idx).is_some_and(|&(lo, _)| lo <= id)
    }
}

/// Merge overlapping or touching inclusive ranges.
fn merge(mut ranges: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    ranges.sort_unstable();
    let mut merged: Vec<(u64, u64)> = Vec::with_capacity(ranges.len());
    for (lo, hi) in ranges {
        match merged.last_mut() {
            Some(last) if lo <= last.1.saturating_add(1) => last.1 = last.1.max(hi),
            _ => merged.push((lo, hi)),
        }
    }
    merged
}

impl AocParser for Solver {
    type SharedData<'a> = Inventory;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let input = input.replace("\r\n", "\n");
        let (ranges, ids) = input
            .split_once("\n\n")
            .ok_or_else(|| ParseError::MissingData("expected a blank line between ranges and IDs".to_string()))?;

        let fresh = lines_with_context(ranges, |line| {
            let (lo, hi) = range(line)?;
            ensure!(lo <= hi, "range {line:?} is reversed");
            Ok((lo, hi))
        })?;
        let available = lines_with_context(ids, number::<u64>)?;

        Ok(Inventory {
            fresh: merge(fresh),
            available,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared.available.iter().filter(|&&id| shared.is_fresh(id)).count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.fresh.iter().map(|&(lo, hi)| hi - lo + 1).sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const EXAMPLE: &str = "\
3-5
10-14
16-20
12-18

1
5
8
11
17
32
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "3");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "14");
    }

    #[test]
    fn test_merge_touching() {
        assert_eq!(merge(vec![(5, 7), (1, 4), (9, 9), (8, 8)]), vec![(1, 9)]);
        assert_eq!(merge(vec![(1, 2), (4, 5)]), vec![(1, 2), (4, 5)]);
    }

    #[test]
    fn test_missing_separator() {
        assert!(matches!(Solver::parse("3-5\n1\n"), Err(ParseError::MissingData(_))));
    }

    proptest! {
        #[test]
        fn prop_merged_union_matches_membership(
            ranges in prop::collection::vec((0u64..200, 0u64..20), 1..12)
        ) {
            let ranges: Vec<(u64, u64)> = ranges.into_iter().map(|(lo, len)| (lo, lo + len)).collect();
            let inventory = Inventory { fresh: merge(ranges.clone()), available: vec![] };

            let mut size = 0;
            for id in 0..230 {
                let inside = ranges.iter().any(|&(lo, hi)| lo <= id && id <= hi);
                prop_assert_eq!(inventory.is_fresh(id), inside);
                size += u64::from(inside);
            }
            prop_assert_eq!(inventory.fresh.iter().map(|&(lo, hi)| hi - lo + 1).sum::<u64>(), size);
        }
    }
}
