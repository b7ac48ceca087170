use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

use crate::utils::lp::IntegerProgram;
use crate::utils::parse::{lines_with_context, number};
use crate::utils::search::{Pather, bfs};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 10, tags = ["bfs", "ilp"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// Bit `i` set when light `i` must end up on
    lights: u64,
    /// Counter indices wired to each button
    buttons: Vec<Vec<usize>>,
    joltage: Vec<i64>,
}

impl Machine {
    fn button_masks(&self) -> Vec<u64> {
        self.buttons
            .iter()
            .map(|wires| wires.iter().fold(0u64, |mask, &i| mask | (1 << i)))
            .collect()
    }

    /// `A[j][i]` is how often button `i` bumps counter `j`.
    fn joltage_program(&self) -> IntegerProgram {
        let mut coefficients = vec![vec![0i64; self.buttons.len()]; self.joltage.len()];
        for (i, wires) in self.buttons.iter().enumerate() {
            for &j in wires {
                coefficients[j][i] += 1;
            }
        }
        IntegerProgram::new(coefficients, self.joltage.clone())
    }
}

/// Light states as bitmasks; each press toggles one button's lights.
struct LightPanel {
    masks: Vec<u64>,
}

impl Pather for LightPanel {
    type Node = u64;

    fn successors(&self, state: u64, buf: &mut Vec<u64>) {
        buf.extend(self.masks.iter().map(|m| state ^ m));
    }
}

fn parse_list(text: &str) -> anyhow::Result<Vec<i64>> {
    text.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(number)
        .collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let line_re = Regex::new(r"^\[([.#]+)\]\s*((?:\([\d,\s]*\)\s*)*)\{([\d,\s]+)\}$")
            .map_err(|e| ParseError::Other(e.to_string()))?;
        let button_re = Regex::new(r"\(([\d,\s]*)\)").map_err(|e| ParseError::Other(e.to_string()))?;

        lines_with_context(input, |line| {
            let caps = line_re
                .captures(line.trim())
                .ok_or_else(|| anyhow!("expected '[lights] (buttons)... {{joltage}}'"))?;

            let pattern = caps[1].as_bytes();
            ensure!(pattern.len() <= 64, "at most 64 lights are supported");
            let lights = pattern
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c == b'#')
                .fold(0u64, |mask, (i, _)| mask | (1 << i));

            let joltage = parse_list(&caps[3]).context("joltage")?;

            let buttons = button_re
                .captures_iter(&caps[2])
                .map(|b| {
                    let wires = parse_list(&b[1])?
                        .into_iter()
                        .map(|i| usize::try_from(i).map_err(anyhow::Error::from))
                        .collect::<anyhow::Result<Vec<usize>>>()?;
                    match wires.iter().find(|&&i| i >= pattern.len() || i >= joltage.len()) {
                        Some(bad) => Err(anyhow!("button wired to missing counter {bad}")),
                        None => Ok(wires),
                    }
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            Ok(Machine {
                lights,
                buttons,
                joltage,
            })
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0;
        for (idx, machine) in shared.iter().enumerate() {
            let panel = LightPanel {
                masks: machine.button_masks(),
            };
            let result = bfs(&panel, 0, machine.lights);
            if !result.found() {
                return Err(SolveError::failed(format!(
                    "machine {} cannot reach its light pattern",
                    idx + 1
                )));
            }
            total += result.cost;
        }
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0;
        for (idx, machine) in shared.iter().enumerate() {
            let presses = machine
                .joltage_program()
                .solve_with_cbc()
                .map_err(SolveError::failed)?;
            log::debug!("machine {} needs {} presses", idx + 1, presses);
            total += presses;
        }
        Ok(total.to_string())
    }
}
