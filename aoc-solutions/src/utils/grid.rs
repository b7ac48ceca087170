//! Dense and sparse character grids behind one [`Grid`] interface
//!
//! Cells hold one byte. By default a cell is walkable unless it is
//! [`BLOCKED`], and every step costs 1. Either rule can be replaced at
//! construction with a validity predicate or a cost function; the search
//! algorithms in [`crate::utils::search`] work on both backings unchanged.

use std::collections::HashMap;
use std::fmt;

use aoc_solver::ParseError;

use super::point::{Directions, Point};

/// Symbol treated as a wall by the default validity rule
pub const BLOCKED: u8 = b'#';

/// Edge cost strategy: `None` means there is no edge.
pub type CostFn = Box<dyn Fn(&dyn Grid, Point, Point) -> Option<u32>>;

/// Validity strategy; replaces the default "not `#`" rule entirely.
pub type ValidFn = Box<dyn Fn(&dyn Grid, Point) -> bool>;

/// Capabilities shared by every grid backing.
pub trait Grid {
    /// Whether `pos` may be entered.
    fn is_valid(&self, pos: Point) -> bool;

    /// Cost of stepping from `from` to `to`, `None` when `to` is not valid.
    fn cost(&self, from: Point, to: Point) -> Option<u32>;

    /// Direction set used by [`Grid::neighbors`].
    fn directions(&self) -> Directions;

    /// Every coordinate whose cell holds `symbol`.
    fn find_all(&self, symbol: u8) -> Vec<Point>;

    /// The symbol at `pos`, or `None` if out of bounds or unset.
    fn at(&self, pos: Point) -> Option<u8>;

    fn set_cell(&mut self, pos: Point, symbol: u8);

    /// Valid cells one step away from `pos`.
    fn neighbors(&self, pos: Point) -> Vec<Point> {
        pos.around(self.directions())
            .filter(|&n| self.is_valid(n))
            .collect()
    }
}

/// Fixed-size rectangular grid stored row-major.
pub struct DenseGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
    directions: Directions,
    cost_fn: Option<CostFn>,
    valid_fn: Option<ValidFn>,
}

impl DenseGrid {
    /// A `width` x `height` grid filled with `fill`.
    pub fn new(width: usize, height: usize, fill: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
            directions: Directions::Four,
            cost_fn: None,
            valid_fn: None,
        }
    }

    /// Parse one row per non-empty line. All rows must have the same width.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        let rows: Vec<&[u8]> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .map(str::as_bytes)
            .collect();

        let width = rows
            .first()
            .map(|r| r.len())
            .ok_or_else(|| ParseError::MissingData("grid has no rows".to_string()))?;

        let mut cells = Vec::with_capacity(width * rows.len());
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ParseError::InvalidFormat(format!(
                    "(line {}) row has width {}, expected {}",
                    idx + 1,
                    row.len(),
                    width
                )));
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
            directions: Directions::Four,
            cost_fn: None,
            valid_fn: None,
        })
    }

    pub fn with_directions(mut self, directions: Directions) -> Self {
        self.directions = directions;
        self
    }

    pub fn with_cost<F>(mut self, cost: F) -> Self
    where
        F: Fn(&dyn Grid, Point, Point) -> Option<u32> + 'static,
    {
        self.cost_fn = Some(Box::new(cost));
        self
    }

    pub fn with_validity<F>(mut self, valid: F) -> Self
    where
        F: Fn(&dyn Grid, Point) -> bool + 'static,
    {
        self.valid_fn = Some(Box::new(valid));
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Point) -> bool {
        self.index(pos).is_some()
    }

    fn index(&self, pos: Point) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// All coordinates in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height as i64).flat_map(move |y| (0..self.width as i64).map(move |x| Point::new(x, y)))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Number of cells holding `symbol`.
    pub fn count(&self, symbol: u8) -> usize {
        self.cells.iter().filter(|&&c| c == symbol).count()
    }
}

impl Grid for DenseGrid {
    fn is_valid(&self, pos: Point) -> bool {
        let Some(idx) = self.index(pos) else {
            return false;
        };
        match &self.valid_fn {
            Some(valid) => valid(self, pos),
            None => self.cells[idx] != BLOCKED,
        }
    }

    fn cost(&self, from: Point, to: Point) -> Option<u32> {
        if !self.is_valid(to) {
            return None;
        }
        match &self.cost_fn {
            Some(cost) => cost(self, from, to),
            None => Some(1),
        }
    }

    fn directions(&self) -> Directions {
        self.directions
    }

    fn find_all(&self, symbol: u8) -> Vec<Point> {
        self.points().filter(|&p| self.at(p) == Some(symbol)).collect()
    }

    fn at(&self, pos: Point) -> Option<u8> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    fn set_cell(&mut self, pos: Point, symbol: u8) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = symbol;
        }
    }
}

impl fmt::Debug for DenseGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DenseGrid {}x{} {:?}", self.width, self.height, self.directions)?;
        for row in self.rows() {
            writeln!(f, "{}", String::from_utf8_lossy(row))?;
        }
        Ok(())
    }
}

/// Unbounded grid keyed by coordinate. Absent cells are open.
pub struct SparseGrid {
    cells: HashMap<Point, u8>,
    extent: Option<(Point, Point)>,
    directions: Directions,
    cost_fn: Option<CostFn>,
    valid_fn: Option<ValidFn>,
}

impl SparseGrid {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
            extent: None,
            directions: Directions::Four,
            cost_fn: None,
            valid_fn: None,
        }
    }

    /// Record every cell of `text` except those equal to `background`.
    pub fn from_text(text: &str, background: u8) -> Self {
        let mut grid = Self::new();
        for (y, line) in text.lines().enumerate() {
            for (x, &symbol) in line.as_bytes().iter().enumerate() {
                if symbol != background && symbol != b'\r' {
                    grid.set_cell(Point::new(x as i64, y as i64), symbol);
                }
            }
        }
        grid
    }

    pub fn with_directions(mut self, directions: Directions) -> Self {
        self.directions = directions;
        self
    }

    pub fn with_cost<F>(mut self, cost: F) -> Self
    where
        F: Fn(&dyn Grid, Point, Point) -> Option<u32> + 'static,
    {
        self.cost_fn = Some(Box::new(cost));
        self
    }

    pub fn with_validity<F>(mut self, valid: F) -> Self
    where
        F: Fn(&dyn Grid, Point) -> bool + 'static,
    {
        self.valid_fn = Some(Box::new(valid));
        self
    }

    /// Smallest and largest coordinate ever written, or `None` if empty.
    pub fn extent(&self) -> Option<(Point, Point)> {
        self.extent
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn remove(&mut self, pos: Point) -> Option<u8> {
        self.cells.remove(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, u8)> + '_ {
        self.cells.iter().map(|(&p, &s)| (p, s))
    }
}

impl Default for SparseGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid for SparseGrid {
    fn is_valid(&self, pos: Point) -> bool {
        match &self.valid_fn {
            Some(valid) => valid(self, pos),
            None => self.cells.get(&pos).is_none_or(|&c| c != BLOCKED),
        }
    }

    fn cost(&self, from: Point, to: Point) -> Option<u32> {
        if !self.is_valid(to) {
            return None;
        }
        match &self.cost_fn {
            Some(cost) => cost(self, from, to),
            None => Some(1),
        }
    }

    fn directions(&self) -> Directions {
        self.directions
    }

    fn find_all(&self, symbol: u8) -> Vec<Point> {
        let mut found: Vec<Point> = self
            .cells
            .iter()
            .filter(|&(_, &s)| s == symbol)
            .map(|(&p, _)| p)
            .collect();
        found.sort_unstable_by_key(|p| (p.y, p.x));
        found
    }

    fn at(&self, pos: Point) -> Option<u8> {
        self.cells.get(&pos).copied()
    }

    fn set_cell(&mut self, pos: Point, symbol: u8) {
        self.cells.insert(pos, symbol);
        self.extent = Some(match self.extent {
            None => (pos, pos),
            Some((min, max)) => (
                Point::new(min.x.min(pos.x), min.y.min(pos.y)),
                Point::new(max.x.max(pos.x), max.y.max(pos.y)),
            ),
        });
    }
}

impl fmt::Debug for SparseGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseGrid")
            .field("cells", &self.cells.len())
            .field("extent", &self.extent)
            .field("directions", &self.directions)
            .finish()
    }
}

/// Per-symbol step costs; symbols missing from `costs` cost 1.
pub fn terrain_cost(costs: HashMap<u8, u32>) -> impl Fn(&dyn Grid, Point, Point) -> Option<u32> {
    move |grid: &dyn Grid, _from: Point, to: Point| {
        Some(grid.at(to).and_then(|c| costs.get(&c).copied()).unwrap_or(1))
    }
}

/// Scale `base` when moving north (`uphill`) or south (`downhill`).
/// Scaled costs are truncated and never drop below 1.
pub fn directional_cost<F>(
    base: F,
    uphill: f64,
    downhill: f64,
) -> impl Fn(&dyn Grid, Point, Point) -> Option<u32>
where
    F: Fn(&dyn Grid, Point, Point) -> Option<u32>,
{
    move |grid: &dyn Grid, from: Point, to: Point| {
        let modifier = match to.y.cmp(&from.y) {
            std::cmp::Ordering::Greater => downhill,
            std::cmp::Ordering::Less => uphill,
            std::cmp::Ordering::Equal => 1.0,
        };
        base(grid, from, to).map(|c| ((c as f64 * modifier) as u32).max(1))
    }
}

/// Every step costs 1.
pub fn unit_cost(_grid: &dyn Grid, _from: Point, _to: Point) -> Option<u32> {
    Some(1)
}
