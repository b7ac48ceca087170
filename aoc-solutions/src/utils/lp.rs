//! Integer programs solved by the external `cbc` binary
//!
//! Only one shape is supported: minimise the sum of non-negative integer
//! variables subject to equality constraints `A x = b`.

use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LpError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cbc exited with {status}: {output}")]
    SolverFailed { status: String, output: String },

    #[error("no objective value or variable assignment in solution")]
    NoSolution,

    #[error("program is infeasible")]
    Infeasible,
}

/// `minimise sum(x)` subject to `coefficients * x = targets`, `x >= 0` integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerProgram {
    /// One row per constraint, one column per variable
    pub coefficients: Vec<Vec<i64>>,
    pub targets: Vec<i64>,
}

impl IntegerProgram {
    pub fn new(coefficients: Vec<Vec<i64>>, targets: Vec<i64>) -> Self {
        Self {
            coefficients,
            targets,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.coefficients.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Constraints with no variables: `Err` if one demands a nonzero target.
    fn check_empty_rows(&self) -> Result<(), LpError> {
        let impossible = self
            .coefficients
            .iter()
            .zip(&self.targets)
            .any(|(row, &t)| row.iter().all(|&c| c == 0) && t != 0);
        if impossible { Err(LpError::Infeasible) } else { Ok(()) }
    }

    /// Render in CPLEX LP format. All-zero constraint rows are omitted.
    pub fn to_lp(&self) -> String {
        self.to_string()
    }

    /// Minimal objective value, as found by `cbc` on `PATH`.
    pub fn solve_with_cbc(&self) -> Result<u64, LpError> {
        self.solve_with(Command::new("cbc"))
    }

    /// Solve with a cbc-compatible `solver`, which gets the arguments
    /// `<problem.lp> solve solution <solution.txt>` appended.
    pub fn solve_with(&self, mut solver: Command) -> Result<u64, LpError> {
        self.check_empty_rows()?;
        if self.num_vars() == 0 {
            return Ok(0);
        }

        let dir = tempfile::tempdir()?;
        let lp_path = dir.path().join("problem.lp");
        let sol_path = dir.path().join("solution.txt");
        std::fs::write(&lp_path, self.to_lp())?;
        log::debug!(
            "running {:?} on {} ({} vars, {} constraints)",
            solver.get_program(),
            lp_path.display(),
            self.num_vars(),
            self.targets.len()
        );

        let output = solver
            .arg(&lp_path)
            .arg("solve")
            .arg("solution")
            .arg(&sol_path)
            .output()?;
        if !output.status.success() {
            return Err(LpError::SolverFailed {
                status: output.status.to_string(),
                output: String::from_utf8_lossy(&output.stdout).into_owned(),
            });
        }

        read_cbc_solution(&sol_path)
    }
}

impl fmt::Display for IntegerProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vars: Vec<String> = (0..self.num_vars()).map(|i| format!("x{i}")).collect();

        write!(f, "Minimize\nobj: {}\n\n", vars.join(" + "))?;

        f.write_str("Subject To\n")?;
        for (i, (row, target)) in self.coefficients.iter().zip(&self.targets).enumerate() {
            if row.iter().all(|&c| c == 0) {
                continue;
            }
            write!(f, "c{i}: ")?;
            let mut first = true;
            for (j, &c) in row.iter().enumerate().filter(|&(_, &c)| c != 0) {
                if c < 0 {
                    f.write_str(if first { "- " } else { " - " })?;
                } else if !first {
                    f.write_str(" + ")?;
                }
                match c.unsigned_abs() {
                    1 => write!(f, "x{j}")?,
                    k => write!(f, "{k} x{j}")?,
                }
                first = false;
            }
            writeln!(f, " = {target}")?;
        }
        f.write_str("\n")?;

        f.write_str("Bounds\n")?;
        for v in &vars {
            writeln!(f, "{v} >= 0")?;
        }
        f.write_str("\n")?;

        write!(f, "Integer\n{}\n\n", vars.join(" "))?;
        f.write_str("End\n")
    }
}

fn read_cbc_solution(path: &Path) -> Result<u64, LpError> {
    let text = std::fs::read_to_string(path)?;
    parse_cbc_solution(&text)
}

/// Objective value from a cbc solution file.
///
/// Uses the `objective value` on the status line when present, otherwise sums
/// the activity column of every `x*` variable row. Values are rounded.
pub fn parse_cbc_solution(text: &str) -> Result<u64, LpError> {
    let status = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    if status.starts_with("Infeasible") || status.contains("infeasible") {
        return Err(LpError::Infeasible);
    }

    let objective = text.lines().find(|l| l.contains("objective value")).and_then(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let at = fields.iter().position(|&f| f == "value")?;
        fields.get(at + 1)?.parse::<f64>().ok()
    });
    if let Some(value) = objective {
        return Ok(value.round().max(0.0) as u64);
    }

    let mut total = 0u64;
    let mut any = false;
    for line in text.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() >= 3 && fields[1].starts_with('x') {
            if let Ok(v) = fields[2].parse::<f64>() {
                total += v.round().max(0.0) as u64;
                any = true;
            }
        }
    }
    if any { Ok(total) } else { Err(LpError::NoSolution) }
}
