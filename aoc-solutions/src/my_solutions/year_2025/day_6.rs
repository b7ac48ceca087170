use std::ops::Range;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 6, tags = ["parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Mul,
}

impl Op {
    fn apply(self, nums: impl Iterator<Item = u64>) -> u64 {
        match self {
            Op::Add => nums.sum(),
            Op::Mul => nums.product(),
        }
    }
}

#[derive(Debug)]
struct Problem {
    columns: Range<usize>,
    op: Op,
}

#[derive(Debug)]
pub struct Worksheet {
    /// Number rows, all padded to the same width
    rows: Vec<Vec<u8>>,
    problems: Vec<Problem>,
}

impl AocParser for Solver {
    type SharedData<'a> = Worksheet;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines: Vec<&[u8]> = input
            .lines()
            .map(|l| l.trim_end_matches('\r').as_bytes())
            .filter(|l| l.iter().any(|b| !b.is_ascii_whitespace()))
            .collect();
        let ops_line = lines
            .pop()
            .ok_or_else(|| ParseError::MissingData("empty worksheet".to_string()))?;
        if lines.is_empty() {
            return Err(ParseError::MissingData("worksheet has no number rows".to_string()));
        }

        let width = lines.iter().map(|l| l.len()).max().unwrap_or(0).max(ops_line.len());
        let pad = |line: &[u8]| -> Vec<u8> {
            let mut row = line.to_vec();
            row.resize(width, b' ');
            row
        };
        let rows: Vec<Vec<u8>> = lines.iter().copied().map(pad).collect();
        let ops_row = pad(ops_line);

        if let Some((idx, bad)) = rows
            .iter()
            .enumerate()
            .find_map(|(i, r)| r.iter().find(|b| !b.is_ascii_digit() && **b != b' ').map(|b| (i, *b)))
        {
            return Err(ParseError::InvalidFormat(format!(
                "(line {}) unexpected {:?} in number row",
                idx + 1,
                bad as char
            )));
        }

        // Problems are separated by columns that are blank in every row
        let blank = |c: usize| rows.iter().all(|r| r[c] == b' ') && ops_row[c] == b' ';
        let mut problems = Vec::new();
        let mut start = None;
        for c in 0..=width {
            match (start, c < width && !blank(c)) {
                (None, true) => start = Some(c),
                (Some(s), false) => {
                    let op = match ops_row[s..c].iter().find(|b| **b != b' ') {
                        Some(b'+') => Op::Add,
                        Some(b'*') => Op::Mul,
                        other => {
                            return Err(ParseError::InvalidFormat(format!(
                                "columns {}..{}: expected '+' or '*', got {:?}",
                                s,
                                c,
                                other.map(|b| *b as char)
                            )));
                        }
                    };
                    problems.push(Problem { columns: s..c, op });
                    start = None;
                }
                _ => {}
            }
        }

        Ok(Worksheet { rows, problems })
    }
}

fn digits_to_number(digits: impl Iterator<Item = u8>) -> Option<u64> {
    digits
        .filter(u8::is_ascii_digit)
        .fold(None, |acc, d| Some(acc.unwrap_or(0) * 10 + u64::from(d - b'0')))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .problems
            .iter()
            .map(|p| {
                p.op.apply(
                    shared
                        .rows
                        .iter()
                        .filter_map(|row| digits_to_number(row[p.columns.clone()].iter().copied())),
                )
            })
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Each column, read top to bottom, is one number
        let total: u64 = shared
            .problems
            .iter()
            .map(|p| {
                p.op.apply(
                    p.columns
                        .clone()
                        .rev()
                        .filter_map(|c| digits_to_number(shared.rows.iter().map(|row| row[c]))),
                )
            })
            .sum();
        Ok(total.to_string())
    }
}
