//! Input parsing helpers

use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, anyhow};
use aoc_solver::ParseError;

/// Parse a trimmed number, naming the offending text on failure.
pub fn number<T>(text: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let text = text.trim();
    text.parse::<T>().map_err(|e| anyhow!("invalid number {text:?}: {e}"))
}

/// Parse `lo-hi` into an inclusive pair.
pub fn range(text: &str) -> anyhow::Result<(u64, u64)> {
    let (lo, hi) = text
        .trim()
        .split_once('-')
        .with_context(|| format!("expected 'lo-hi', got {text:?}"))?;
    Ok((number(lo)?, number(hi)?))
}

/// Map every non-empty line through `f`; the first failure becomes an
/// [`ParseError::InvalidFormat`] prefixed with its 1-based line number.
pub fn lines_with_context<'a, T, F>(input: &'a str, mut f: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&'a str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| f(line).map_err(|e| anyhow!("(line {}) {}", idx + 1, e)))
        .collect::<anyhow::Result<Vec<T>>>()
        .map_err(|e| ParseError::InvalidFormat(e.to_string()))
}
