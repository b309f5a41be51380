//! Geometry primitives: [`Point3`] and [`Extent3`].
//!
//! Coordinates are integer voxel indices. X and Z span the horizontal plane,
//! Y grows upwards.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// Point3
// ---------------------------------------------------------------------------

/// A 3D integer point addressing one voxel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3 {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a point shifted by (dx, dy, dz).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// The point directly below (y - 1).
    #[inline]
    pub const fn below(self) -> Self {
        self.shift(0, -1, 0)
    }

    /// The point directly above (y + 1).
    #[inline]
    pub const fn above(self) -> Self {
        self.shift(0, 1, 0)
    }

    /// Component-wise absolute value.
    #[inline]
    pub const fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Whether `other` is a horizontal diagonal of `self`, i.e. both the X
    /// and Z offsets have magnitude 1 (Y is ignored).
    #[inline]
    pub const fn is_horizontal_diagonal(self, other: Self) -> bool {
        (other.x - self.x).abs() == 1 && (other.z - self.z).abs() == 1
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for Point3 {
    #[inline]
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for Point3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Point3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Point3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

// ---------------------------------------------------------------------------
// Extent3
// ---------------------------------------------------------------------------

/// Dimensions of a grid anchored at the origin: the half-open box
/// \[0, x) × \[0, y) × \[0, z).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Extent3 {
    /// Create a new extent.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Whether any dimension is zero or negative.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.x <= 0 || self.y <= 0 || self.z <= 0
    }

    /// Total number of cells.
    #[inline]
    pub const fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.x as usize * self.y as usize * self.z as usize
    }

    /// Whether `p` lies inside the extent.
    #[inline]
    pub const fn contains(self, p: Point3) -> bool {
        p.x >= 0 && p.x < self.x && p.y >= 0 && p.y < self.y && p.z >= 0 && p.z < self.z
    }

    /// Flat storage index of `p` (Y outermost, then Z, then X), or `None`
    /// if `p` lies outside.
    #[inline]
    pub const fn index(self, p: Point3) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let (w, d) = (self.x as usize, self.z as usize);
        Some((p.y as usize * d + p.z as usize) * w + p.x as usize)
    }

    /// Inverse of [`index`](Self::index). `idx` must be below [`len`](Self::len).
    #[inline]
    pub const fn point(self, idx: usize) -> Point3 {
        let (w, d) = (self.x as usize, self.z as usize);
        Point3::new(
            (idx % w) as i32,
            (idx / (w * d)) as i32,
            ((idx / w) % d) as i32,
        )
    }

    /// Iterate over every point, X fastest, then Z, then Y (layer by layer).
    #[inline]
    pub fn iter(self) -> ExtentIter {
        ExtentIter {
            extent: self,
            cur: Point3::ZERO,
        }
    }
}

impl IntoIterator for Extent3 {
    type Item = Point3;
    type IntoIter = ExtentIter;
    #[inline]
    fn into_iter(self) -> ExtentIter {
        self.iter()
    }
}

impl fmt::Display for Extent3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

/// Layer-major iterator over the points of an [`Extent3`].
#[derive(Clone, Debug)]
pub struct ExtentIter {
    extent: Extent3,
    cur: Point3,
}

impl Iterator for ExtentIter {
    type Item = Point3;

    #[inline]
    fn next(&mut self) -> Option<Point3> {
        if self.extent.is_empty() || self.cur.y >= self.extent.y {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.extent.x {
            self.cur.x = 0;
            self.cur.z += 1;
            if self.cur.z >= self.extent.z {
                self.cur.z = 0;
                self.cur.y += 1;
            }
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.extent.is_empty() || self.cur.y >= self.extent.y {
            return (0, Some(0));
        }
        let layer = (self.extent.x * self.extent.z) as usize;
        let done_in_layer = (self.cur.z * self.extent.x + self.cur.x) as usize;
        let layers_left = (self.extent.y - self.cur.y) as usize;
        let total = layers_left * layer - done_in_layer;
        (total, Some(total))
    }
}

impl ExactSizeIterator for ExtentIter {}
