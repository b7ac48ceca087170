//! Parser and part traits that every puzzle solver implements

use crate::error::{ParseError, SolveError};

/// Turns raw puzzle input into the data shared by all parts of a day.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Walls;
///
/// impl AocParser for Walls {
///     type SharedData<'a> = Vec<&'a [u8]>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         let rows: Vec<_> = input.lines().map(str::as_bytes).collect();
///         if rows.is_empty() {
///             return Err(ParseError::MissingData("empty grid".into()));
///         }
///         Ok(rows)
///     }
/// }
///
/// assert_eq!(Walls::parse("#.\n.#").unwrap().len(), 2);
/// ```
pub trait AocParser {
    /// Parsed input plus any intermediate results a later part may reuse.
    ///
    /// Borrow from the input (`&'a str`, `&'a [u8]`) when no transformation
    /// is needed; own the data when parts mutate it.
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Parts receive the shared data mutably, so part 1 can leave behind state
/// that part 2 picks up. A part must still work when run on its own.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Walls;
///
/// impl AocParser for Walls {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input)
///     }
/// }
///
/// impl PartSolver<1> for Walls {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.bytes().filter(|&b| b == b'#').count().to_string())
///     }
/// }
///
/// let mut shared = Walls::parse("#.#\n..#").unwrap();
/// assert_eq!(<Walls as PartSolver<1>>::solve(&mut shared).unwrap(), "3");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part, returning the answer as it would be submitted.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Runtime part dispatch for a solver.
///
/// Usually generated by `#[derive(AocSolver)]`, which forwards part `k` to
/// `PartSolver<k>` for every `k` up to `max_parts`.
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part of the problem
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - The part is not implemented
    /// * `Err(SolveError::SolveFailed)` - An error occurred while solving
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Bounds-checked entry point layered over [`Solver`].
pub trait SolverExt: Solver {
    /// Reject parts outside `1..=PARTS` before dispatching.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
