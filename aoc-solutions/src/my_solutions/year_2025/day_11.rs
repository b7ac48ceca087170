use std::collections::HashMap;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::graph::count_paths;
use crate::utils::parse::lines_with_context;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 11, tags = ["graph", "dp"])]
pub struct Solver;

impl AocParser for Solver {
    /// Device name to the devices its outputs feed
    type SharedData<'a> = HashMap<&'a str, Vec<&'a str>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let entries = lines_with_context(input, |line| {
            let (device, outputs) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("expected 'device: outputs'"))?;
            let device = device.trim();
            if device.is_empty() {
                return Err(anyhow!("empty device name"));
            }
            Ok((device, outputs.split_whitespace().collect::<Vec<_>>()))
        })?;

        let mut graph = HashMap::with_capacity(entries.len());
        for (device, outputs) in entries {
            if graph.insert(device, outputs).is_some() {
                return Err(ParseError::InvalidFormat(format!("device {device:?} listed twice")));
            }
        }
        Ok(graph)
    }
}

fn paths_from(graph: &HashMap<&str, Vec<&str>>, from: &str, to: &str) -> Result<u64, SolveError> {
    if !graph.contains_key(from) {
        return Err(SolveError::failed(format!("no device named {from:?}")));
    }
    Ok(count_paths(graph, from, to))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(paths_from(shared, "you", "out")?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let graph = &*shared;
        if !graph.contains_key("svr") {
            return Err(SolveError::failed("no device named \"svr\""));
        }

        // The graph is acyclic, so only one of the two orders can have paths
        let via = |a: &str, b: &str| {
            count_paths(graph, "svr", a) * count_paths(graph, a, b) * count_paths(graph, b, "out")
        };
        let (fft_first, dac_first) = (via("fft", "dac"), via("dac", "fft"));
        log::debug!("{fft_first} paths visit fft first, {dac_first} visit dac first");
        Ok((fft_first + dac_first).to_string())
    }
}
