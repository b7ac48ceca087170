use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(Debug)]
struct Ranges {
    ranges: Vec<(u64, u64)>,
    merged: Option<Vec<(u64, u64)>>,
}

/// Part 1 merges the ranges and leaves them behind for part 2
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct RangeSolver;

impl AocParser for RangeSolver {
    type SharedData<'a> = Ranges;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let ranges = input
            .lines()
            .map(|line| {
                let (a, b) = line
                    .split_once('-')
                    .ok_or_else(|| ParseError::InvalidFormat(line.to_string()))?;
                let a = a.parse().map_err(|_| ParseError::InvalidFormat(a.to_string()))?;
                let b = b.parse().map_err(|_| ParseError::InvalidFormat(b.to_string()))?;
                Ok((a, b))
            })
            .collect::<Result<Vec<_>, ParseError>>()?;
        Ok(Ranges {
            ranges,
            merged: None,
        })
    }
}

fn merged(shared: &mut Ranges) -> &[(u64, u64)] {
    shared.merged.get_or_insert_with(|| {
        let mut sorted = shared.ranges.clone();
        sorted.sort_unstable();
        let mut out: Vec<(u64, u64)> = Vec::new();
        for (a, b) in sorted {
            match out.last_mut() {
                Some(last) if a <= last.1 + 1 => last.1 = last.1.max(b),
                _ => out.push((a, b)),
            }
        }
        out
    })
}

impl PartSolver<1> for RangeSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(merged(shared).len().to_string())
    }
}

impl PartSolver<2> for RangeSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let covered: u64 = merged(shared).iter().map(|(a, b)| b - a + 1).sum();
        Ok(covered.to_string())
    }
}

const INPUT: &str = "3-5\n10-14\n16-20\n12-18";

#[test]
fn test_part1_leaves_state_for_part2() {
    let mut shared = RangeSolver::parse(INPUT).unwrap();
    assert!(shared.merged.is_none());

    assert_eq!(RangeSolver::solve_part(&mut shared, 1).unwrap(), "2");
    assert_eq!(shared.merged.as_deref(), Some(&[(3, 5), (10, 20)][..]));

    assert_eq!(RangeSolver::solve_part(&mut shared, 2).unwrap(), "14");
}

#[test]
fn test_part2_runs_alone() {
    let mut shared = RangeSolver::parse(INPUT).unwrap();
    assert_eq!(RangeSolver::solve_part(&mut shared, 2).unwrap(), "14");
}
