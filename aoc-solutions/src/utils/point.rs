//! 2D integer coordinates and direction sets

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A grid coordinate. `y` grows downwards, matching the row order of puzzle input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ZERO: Point = Point::new(0, 0);
    pub const NORTH: Point = Point::new(0, -1);
    pub const SOUTH: Point = Point::new(0, 1);
    pub const WEST: Point = Point::new(-1, 0);
    pub const EAST: Point = Point::new(1, 0);

    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Taxicab distance.
    #[inline]
    pub fn manhattan(self, other: Point) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Straight-line distance.
    #[inline]
    pub fn euclidean(self, other: Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }

    /// King-move distance.
    #[inline]
    pub fn chebyshev(self, other: Point) -> u64 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Neighbors of this point in the given direction set, without any validity check.
    pub fn around(self, directions: Directions) -> impl Iterator<Item = Point> {
        directions.offsets().iter().map(move |&d| self + d)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<i64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: i64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Movement model of a grid, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Directions {
    /// North, east, south, west
    #[default]
    Four,
    /// The four cardinals plus diagonals
    Eight,
}

const FOUR: [Point; 4] = [Point::NORTH, Point::EAST, Point::SOUTH, Point::WEST];

const EIGHT: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
];

impl Directions {
    pub fn offsets(self) -> &'static [Point] {
        match self {
            Directions::Four => &FOUR,
            Directions::Eight => &EIGHT,
        }
    }
}
