use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

/// Counts open and blocked cells of a character grid
#[derive(AocSolver)]
#[aoc_solver(max_parts = 3)]
struct CellCounter;

impl AocParser for CellCounter {
    type SharedData<'a> = Vec<&'a [u8]>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let rows: Vec<_> = input.lines().map(str::as_bytes).collect();
        if rows.is_empty() {
            return Err(ParseError::MissingData("no rows".into()));
        }
        Ok(rows)
    }
}

impl PartSolver<1> for CellCounter {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let open = shared.iter().flat_map(|r| r.iter()).filter(|&&b| b == b'.').count();
        Ok(open.to_string())
    }
}

impl PartSolver<2> for CellCounter {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let walls = shared.iter().flat_map(|r| r.iter()).filter(|&&b| b == b'#').count();
        Ok(walls.to_string())
    }
}

impl PartSolver<3> for CellCounter {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let width = shared[0].len();
        if shared.iter().any(|r| r.len() != width) {
            return Err(SolveError::SolveFailed("ragged grid".into()));
        }
        Ok(format!("{}x{}", width, shared.len()))
    }
}

#[test]
fn test_parts_dispatch_to_part_solvers() {
    let mut shared = CellCounter::parse("#..\n.##").unwrap();

    assert_eq!(CellCounter::PARTS, 3);
    assert_eq!(CellCounter::solve_part(&mut shared, 1).unwrap(), "3");
    assert_eq!(CellCounter::solve_part(&mut shared, 2).unwrap(), "3");
    assert_eq!(CellCounter::solve_part(&mut shared, 3).unwrap(), "3x2");
}

#[test]
fn test_part_out_of_range() {
    let mut shared = CellCounter::parse("#").unwrap();

    assert!(matches!(
        CellCounter::solve_part(&mut shared, 0),
        Err(SolveError::PartOutOfRange(0))
    ));
    assert!(matches!(
        CellCounter::solve_part(&mut shared, 4),
        Err(SolveError::PartOutOfRange(4))
    ));
}

#[test]
fn test_part_errors_are_propagated() {
    let mut shared = CellCounter::parse("##\n#").unwrap();

    let err = CellCounter::solve_part(&mut shared, 3).unwrap_err();
    assert!(matches!(err, SolveError::SolveFailed(_)));
    assert_eq!(err.to_string(), "Solve failed: ragged grid");
}

#[test]
fn test_parse_error() {
    assert!(matches!(
        CellCounter::parse(""),
        Err(ParseError::MissingData(_))
    ));
}
