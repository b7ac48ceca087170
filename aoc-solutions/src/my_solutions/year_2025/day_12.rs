use std::collections::{BTreeSet, HashSet};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

use crate::utils::parse::number;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2025, day = 12, tags = ["packing", "backtracking"])]
pub struct Solver;

/// A present in every distinct rotation and reflection.
#[derive(Debug, Clone)]
pub struct Shape {
    area: usize,
    /// Longest side of the unrotated bounding box
    span: usize,
    /// Cell offsets from the first cell in row-major order
    orientations: Vec<Vec<(i64, i64)>>,
}

impl Shape {
    fn from_rows(rows: &[Vec<bool>]) -> Self {
        let cells: Vec<(i64, i64)> = rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &filled)| filled)
                    .map(move |(c, _)| (r as i64, c as i64))
            })
            .collect();
        let height = cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0);
        let width = cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0);

        let mut seen = BTreeSet::new();
        let mut current = cells.clone();
        for _ in 0..4 {
            // Rotate a quarter turn, then also take the mirror image
            current = current.iter().map(|&(r, c)| (c, -r)).collect();
            let mirrored: Vec<(i64, i64)> = current.iter().map(|&(r, c)| (r, -c)).collect();
            seen.insert(normalize(&current));
            seen.insert(normalize(&mirrored));
        }

        Self {
            area: cells.len(),
            span: height.max(width) as usize,
            orientations: seen.into_iter().collect(),
        }
    }
}

/// Sort cells and shift them so the first one sits at the origin.
fn normalize(cells: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let mut sorted = cells.to_vec();
    sorted.sort_unstable();
    let Some(&(r0, c0)) = sorted.first() else {
        return sorted;
    };
    sorted.iter().map(|&(r, c)| (r - r0, c - c0)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    width: usize,
    height: usize,
    counts: Vec<usize>,
}

#[derive(Debug)]
pub struct Farm {
    shapes: Vec<Shape>,
    regions: Vec<Region>,
}

impl AocParser for Solver {
    type SharedData<'a> = Farm;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let region_re = Regex::new(r"^(\d+)x(\d+):(.*)$").map_err(|e| ParseError::Other(e.to_string()))?;
        let header_re = Regex::new(r"^(\d+):$").map_err(|e| ParseError::Other(e.to_string()))?;
        let invalid = |idx: usize, msg: String| ParseError::InvalidFormat(format!("(line {}) {}", idx + 1, msg));

        let mut shapes: Vec<Shape> = Vec::new();
        let mut regions = Vec::new();
        let mut current: Option<Vec<Vec<bool>>> = None;

        fn finish(rows: Option<Vec<Vec<bool>>>, shapes: &mut Vec<Shape>) {
            if let Some(rows) = rows {
                shapes.push(Shape::from_rows(&rows));
            }
        }

        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                finish(current.take(), &mut shapes);
            } else if let Some(caps) = region_re.captures(line) {
                finish(current.take(), &mut shapes);
                let dims = |i: usize| number::<usize>(&caps[i]).map_err(|e| invalid(idx, e.to_string()));
                let counts = caps[3]
                    .split_whitespace()
                    .map(number::<usize>)
                    .collect::<anyhow::Result<Vec<_>>>()
                    .map_err(|e| invalid(idx, e.to_string()))?;
                regions.push(Region {
                    width: dims(1)?,
                    height: dims(2)?,
                    counts,
                });
            } else if let Some(caps) = header_re.captures(line) {
                finish(current.take(), &mut shapes);
                let id = number::<usize>(&caps[1]).map_err(|e| invalid(idx, e.to_string()))?;
                if id != shapes.len() {
                    return Err(invalid(idx, format!("expected present {}, got {}", shapes.len(), id)));
                }
                current = Some(Vec::new());
            } else if let Some(rows) = current.as_mut() {
                let row = line
                    .bytes()
                    .map(|b| match b {
                        b'#' => Ok(true),
                        b'.' => Ok(false),
                        other => Err(invalid(idx, format!("unexpected {:?} in present", other as char))),
                    })
                    .collect::<Result<Vec<bool>, _>>()?;
                rows.push(row);
            } else {
                return Err(invalid(idx, format!("unexpected line {line:?}")));
            }
        }
        finish(current.take(), &mut shapes);

        if regions.is_empty() {
            return Err(ParseError::MissingData("no regions under the trees".to_string()));
        }
        for region in &regions {
            if let Some(id) = (shapes.len()..region.counts.len()).find(|&i| region.counts[i] > 0) {
                return Err(ParseError::InvalidFormat(format!(
                    "region {}x{} needs unknown present {}",
                    region.width, region.height, id
                )));
            }
        }

        Ok(Farm { shapes, regions })
    }
}

/// Row-major occupancy bitmap.
#[derive(Clone, PartialEq, Eq, Hash)]
struct Board {
    width: usize,
    height: usize,
    bits: Vec<u64>,
}

impl Board {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![0; (width * height).div_ceil(64)],
        }
    }

    fn get(&self, i: usize) -> bool {
        self.bits[i / 64] & (1 << (i % 64)) != 0
    }

    fn toggle(&mut self, i: usize) {
        self.bits[i / 64] ^= 1 << (i % 64);
    }

    /// Board indices covered by `cells` anchored at `pos`, if all are free.
    fn cover(&self, pos: usize, cells: &[(i64, i64)]) -> Option<Vec<usize>> {
        let (r0, c0) = ((pos / self.width) as i64, (pos % self.width) as i64);
        cells
            .iter()
            .map(|&(dr, dc)| {
                let (r, c) = (r0 + dr, c0 + dc);
                let inside = (0..self.height as i64).contains(&r) && (0..self.width as i64).contains(&c);
                let idx = (r * self.width as i64 + c) as usize;
                (inside && !self.get(idx)).then_some(idx)
            })
            .collect()
    }
}

struct Packer<'s> {
    shapes: &'s [Shape],
    /// States already shown to be dead ends
    failed: HashSet<(Board, Vec<usize>)>,
    steps: u64,
}

impl Packer<'_> {
    /// Fill the first free cell at or after `pos`: either with the anchor of a
    /// remaining present, or leave it empty while slack remains.
    fn solve(&mut self, board: &mut Board, pos: usize, counts: &mut [usize], slack: usize) -> bool {
        if counts.iter().all(|&c| c == 0) {
            return true;
        }
        let total = board.width * board.height;
        let Some(pos) = (pos..total).find(|&i| !board.get(i)) else {
            return false;
        };

        let key = (board.clone(), counts.to_vec());
        if self.failed.contains(&key) {
            return false;
        }
        self.steps += 1;

        for id in 0..counts.len() {
            if counts[id] == 0 {
                continue;
            }
            for orientation in &self.shapes[id].orientations {
                let Some(cells) = board.cover(pos, orientation) else {
                    continue;
                };
                cells.iter().for_each(|&i| board.toggle(i));
                counts[id] -= 1;
                let done = self.solve(board, pos + 1, counts, slack);
                counts[id] += 1;
                cells.iter().for_each(|&i| board.toggle(i));
                if done {
                    return true;
                }
            }
        }

        if slack > 0 {
            board.toggle(pos);
            let done = self.solve(board, pos + 1, counts, slack - 1);
            board.toggle(pos);
            if done {
                return true;
            }
        }

        self.failed.insert(key);
        false
    }
}

/// Whether every present listed for `region` fits without overlap.
fn fits(shapes: &[Shape], region: &Region) -> bool {
    let cells = region.width * region.height;
    let needed: usize = region
        .counts
        .iter()
        .enumerate()
        .filter(|&(_, &n)| n > 0)
        .map(|(id, &n)| shapes[id].area * n)
        .sum();
    if needed > cells {
        return false;
    }

    // Enough whole boxes to give each present its own
    let presents: usize = region.counts.iter().sum();
    let span = region
        .counts
        .iter()
        .enumerate()
        .filter(|&(_, &n)| n > 0)
        .map(|(id, _)| shapes[id].span)
        .max()
        .unwrap_or(1)
        .max(1);
    if (region.width / span) * (region.height / span) >= presents {
        return true;
    }

    let mut packer = Packer {
        shapes,
        failed: HashSet::new(),
        steps: 0,
    };
    let mut counts = region.counts.clone();
    let found = packer.solve(&mut Board::new(region.width, region.height), 0, &mut counts, cells - needed);
    log::debug!(
        "{}x{} region: packing search took {} steps, fits = {}",
        region.width,
        region.height,
        packer.steps,
        found
    );
    found
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared
            .regions
            .iter()
            .filter(|region| fits(&shared.shapes, region))
            .count();
        Ok(count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
0:
###
##.
##.

1:
###
##.
.##

2:
.##
###
##.

3:
##.
###
##.

4:
###
#..
###

5:
###
.#.
###

4x4: 0 0 0 0 2 0
12x5: 1 0 1 0 2 2
12x5: 1 0 1 0 3 2
";

    #[test]
    fn test_parse() {
        let farm = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(farm.shapes.len(), 6);
        assert_eq!(farm.shapes[0].area, 7);
        assert_eq!(farm.shapes[5].span, 3);
        assert_eq!(
            farm.regions[1],
            Region {
                width: 12,
                height: 5,
                counts: vec![1, 0, 1, 0, 2, 2]
            }
        );
    }

    #[test]
    fn test_orientation_counts() {
        let farm = Solver::parse(EXAMPLE).unwrap();
        // Present 5 only has two distinct orientations
        assert_eq!(farm.shapes[5].orientations.len(), 2);
        assert_eq!(farm.shapes[0].orientations.len(), 8);

        let square = Shape::from_rows(&[vec![true, true], vec![true, true]]);
        assert_eq!(square.orientations, vec![vec![(0, 0), (0, 1), (1, 0), (1, 1)]]);
    }

    #[test]
    fn test_example() {
        let farm = Solver::parse(EXAMPLE).unwrap();
        let verdicts: Vec<bool> = farm.regions.iter().map(|r| fits(&farm.shapes, r)).collect();
        assert_eq!(verdicts, vec![true, true, false]);

        let mut shared = farm;
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "2");
    }

    #[test]
    fn test_quick_decisions() {
        let farm = Solver::parse(EXAMPLE).unwrap();
        let too_small = Region {
            width: 3,
            height: 3,
            counts: vec![2, 0, 0, 0, 0, 0],
        };
        assert!(!fits(&farm.shapes, &too_small));
        let roomy = Region {
            width: 9,
            height: 6,
            counts: vec![1, 1, 1, 1, 1, 1],
        };
        assert!(fits(&farm.shapes, &roomy));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Solver::parse("0:\n#\n"), Err(ParseError::MissingData(_))));
        assert!(matches!(
            Solver::parse("0:\n#x\n\n1x1: 1\n"),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("line 2")
        ));
        assert!(matches!(Solver::parse("0:\n#\n\n2x2: 0 1\n"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(Solver::parse("1:\n#\n\n2x2: 1\n"), Err(ParseError::InvalidFormat(_))));
    }
}
