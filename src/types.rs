//! Strongly-typed primitives shared by the resolver and the renderers.
//!
//! Data-unit coordinates use `glam::DVec2`; stroke quantities are kept apart
//! as `Points` and pixel measurements as `Px` so the heuristic cannot mix
//! them up.

use std::fmt;
use std::ops::{Div, Mul};
use std::str::FromStr;

use glam::{DVec2, dvec2};

use crate::errors::{BarError, ContractViolationError};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Points per inch; stroke widths and dash lengths are measured in points.
pub const POINTS_PER_INCH: f64 = 72.0;

/// A stroke quantity in typographic points (1/72 inch)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Points(pub f64);

impl Points {
    pub const ZERO: Points = Points(0.0);

    /// Create a non-negative, finite stroke width
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Points, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Points(val))
        }
    }

    #[inline]
    pub fn min(self, other: Points) -> Points {
        Points(self.0.min(other.0))
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Mul<f64> for Points {
    type Output = Points;
    fn mul(self, rhs: f64) -> Points { Points(self.0 * rhs) }
}
impl Div<f64> for Points {
    type Output = Points;
    fn div(self, rhs: f64) -> Points { Points(self.0 / rhs) }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

/// A distance measured in device pixels on one surface
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Px(pub f64);

impl Px {
    /// Convert to points at the given resolution: `72 / dpi * px`.
    pub fn to_points(self, dpi: f64) -> Points {
        Points(POINTS_PER_INCH / dpi * self.0)
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// A screen axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Read this axis' component of a vector
    pub fn of(self, v: DVec2) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

/// Which screen axis carries the categories.
///
/// Geometry is written once in (category, value) space and mirrored into
/// screen space by [`Orientation::to_xy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Categories along x, values along y
    Vertical,
    /// Categories along y, values along x
    Horizontal,
}

impl Orientation {
    pub fn category_axis(self) -> Axis {
        match self {
            Orientation::Vertical => Axis::X,
            Orientation::Horizontal => Axis::Y,
        }
    }

    pub fn value_axis(self) -> Axis {
        match self {
            Orientation::Vertical => Axis::Y,
            Orientation::Horizontal => Axis::X,
        }
    }

    /// Map a (category, value) pair into screen (x, y)
    pub fn to_xy(self, category: f64, value: f64) -> DVec2 {
        match self {
            Orientation::Vertical => dvec2(category, value),
            Orientation::Horizontal => dvec2(value, category),
        }
    }

    /// Name of the column holding category positions
    pub fn position_column(self) -> &'static str {
        match self.category_axis() {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }

    /// Name of the column holding bar values
    pub fn value_column(self) -> &'static str {
        match self.value_axis() {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }
}

impl FromStr for Orientation {
    type Err = BarError;

    /// Accepts the axis-based names (`x`, `y`) as well as spelled-out ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "v" | "vertical" => Ok(Orientation::Vertical),
            "y" | "h" | "horizontal" => Ok(Orientation::Horizontal),
            other => Err(ContractViolationError::new(format!("unknown orientation `{other}`"))
                .with_help("use one of `x`, `y`, `vertical`, `horizontal`")
                .into()),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis-aligned bounding box in data units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: DVec2::splat(f64::INFINITY),
            max: DVec2::splat(f64::NEG_INFINITY),
        }
    }

    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        BBox { min: a.min(b), max: a.max(b) }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point; non-finite points are ignored
    pub fn expand_point(&mut self, p: DVec2) {
        if !p.is_finite() {
            return;
        }
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// `(min, max)` along one axis
    pub fn interval(&self, axis: Axis) -> (f64, f64) {
        (axis.of(self.min), axis.of(self.max))
    }
}
