//! Property tests for part dispatch, bounds checking and instance timing

use aoc_solver::{
    AocParser, AocSolver, DynSolver, ParseError, PartSolver, SolveError, Solver, SolverExt,
    SolverInstance,
};
use proptest::prelude::*;

/// Part 1: farthest Manhattan distance from the origin; part 2: total distance walked
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Walk;

impl AocParser for Walk {
    type SharedData<'a> = Vec<(i64, i64)>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| {
                let (x, y) = l
                    .split_once(',')
                    .ok_or_else(|| ParseError::InvalidFormat(l.to_string()))?;
                let x = x.parse().map_err(|_| ParseError::InvalidFormat(x.to_string()))?;
                let y = y.parse().map_err(|_| ParseError::InvalidFormat(y.to_string()))?;
                Ok((x, y))
            })
            .collect()
    }
}

impl PartSolver<1> for Walk {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let farthest = shared.iter().map(|(x, y)| x.abs() + y.abs()).max().unwrap_or(0);
        Ok(farthest.to_string())
    }
}

impl PartSolver<2> for Walk {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: i64 = shared
            .windows(2)
            .map(|w| (w[0].0 - w[1].0).abs() + (w[0].1 - w[1].1).abs())
            .sum();
        Ok(total.to_string())
    }
}

fn render(points: &[(i64, i64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{},{}", x, y))
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_solve_part_matches_part_solver(
        points in prop::collection::vec((-50i64..50, -50i64..50), 1..12),
        part in 1u8..=2
    ) {
        let input = render(&points);
        let mut via_dispatch = Walk::parse(&input).unwrap();
        let mut direct = Walk::parse(&input).unwrap();

        let dispatched = Walk::solve_part(&mut via_dispatch, part).unwrap();
        let expected = match part {
            1 => <Walk as PartSolver<1>>::solve(&mut direct).unwrap(),
            _ => <Walk as PartSolver<2>>::solve(&mut direct).unwrap(),
        };
        prop_assert_eq!(dispatched, expected);
    }

    #[test]
    fn prop_out_of_range_parts_rejected(part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = Walk::parse("1,2").unwrap();

        match Walk::solve_part_checked_range(&mut shared, part) {
            Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "expected PartOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn prop_instance_reports_non_negative_timing(
        points in prop::collection::vec((-5i64..5, -5i64..5), 1..6)
    ) {
        let input = render(&points);
        let mut instance = SolverInstance::<Walk>::new(2025, 2, &input).unwrap();

        prop_assert!(instance.parse_duration() >= chrono::TimeDelta::zero());
        let result = instance.solve(2).unwrap();
        prop_assert!(result.duration() >= chrono::TimeDelta::zero());
        prop_assert_eq!(instance.year(), 2025);
        prop_assert_eq!(instance.day(), 2);
        prop_assert_eq!(instance.parts(), 2);
    }
}

#[test]
fn test_instance_exposes_shared_data() {
    let instance = SolverInstance::<Walk>::new(2025, 2, "3,4\n-1,0").unwrap();
    assert_eq!(instance.shared(), &vec![(3, 4), (-1, 0)]);
}

#[test]
fn test_parse_failure_surfaces() {
    assert!(matches!(
        SolverInstance::<Walk>::new(2025, 2, "3;4"),
        Err(ParseError::InvalidFormat(_))
    ));
}
