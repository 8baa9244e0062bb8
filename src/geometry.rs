//! Exact segment geometry.
//!
//! A circle cut by an axis-aligned line splits into two complementary
//! segments. [`segment_area`] returns the area of the larger one in closed
//! form; [`CutLine::larger_side`] names the side that segment lies on, and is
//! the single source of truth the Monte Carlo estimator and the display
//! scatter classify against.
//!
//! # Governing equation
//!
//! ```text
//! d = offset − center           (signed, along the cut axis)
//! h = √(r² − d²)
//! s = r²·acos(d/r) − d·h        (area of the "coordinate ≥ offset" side)
//! larger = max(s, πr² − s)
//! ```

use serde::{Deserialize, Serialize};

/// A circle given by center and radius.
///
/// `r > 0` is a caller-enforced precondition; the input boundary
/// ([`crate::recorder`]) rejects non-positive radii before any geometry runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center x coordinate.
    pub x0: f64,
    /// Center y coordinate.
    pub y0: f64,
    /// Radius.
    pub r: f64,
}

impl Circle {
    /// Create a circle from center and radius.
    #[must_use]
    pub const fn new(x0: f64, y0: f64, r: f64) -> Self {
        Self { x0, y0, r }
    }

    /// Full circle area `πr²`.
    #[must_use]
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.r * self.r
    }

    /// Whether the point lies inside or on the circle.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.x0;
        let dy = y - self.y0;
        dx * dx + dy * dy <= self.r * self.r
    }

    /// Area of the axis-aligned bounding square of side `2r`.
    #[must_use]
    pub fn bounding_square_area(&self) -> f64 {
        4.0 * self.r * self.r
    }
}

/// Orientation of the cutting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Line `x = offset`.
    Vertical,
    /// Line `y = offset`.
    Horizontal,
}

impl Orientation {
    /// Parse the caller-facing human label, case-insensitively.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "vertical" => Some(Self::Vertical),
            "horizontal" => Some(Self::Horizontal),
            _ => None,
        }
    }

    /// The persisted text form of the label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which side of the cut a point must be on to count toward the larger
/// segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Points with `coordinate >= offset`.
    GreaterEq,
    /// Points with `coordinate <= offset`.
    LessEq,
}

impl Side {
    /// Whether a coordinate along the cut axis falls on this side.
    #[must_use]
    pub fn admits(self, coordinate: f64, offset: f64) -> bool {
        match self {
            Self::GreaterEq => coordinate >= offset,
            Self::LessEq => coordinate <= offset,
        }
    }
}

/// An axis-aligned cutting line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutLine {
    /// Vertical (`x = offset`) or horizontal (`y = offset`).
    pub orientation: Orientation,
    /// Coordinate at which the line crosses its axis.
    pub offset: f64,
}

impl CutLine {
    /// Vertical cut `x = offset`.
    #[must_use]
    pub const fn vertical(offset: f64) -> Self {
        Self {
            orientation: Orientation::Vertical,
            offset,
        }
    }

    /// Horizontal cut `y = offset`.
    #[must_use]
    pub const fn horizontal(offset: f64) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            offset,
        }
    }

    /// Signed distance from the circle center to the line, along the cut
    /// axis. Positive means the line sits on the high-coordinate side of
    /// the center.
    #[must_use]
    pub fn signed_distance(&self, circle: &Circle) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.offset - circle.x0,
            Orientation::Horizontal => self.offset - circle.y0,
        }
    }

    /// The coordinate of a point along the cut axis.
    #[must_use]
    pub const fn coordinate_of(&self, x: f64, y: f64) -> f64 {
        match self.orientation {
            Orientation::Vertical => x,
            Orientation::Horizontal => y,
        }
    }

    /// The side [`segment_area`] reports the area of.
    ///
    /// The closed form measures the `coordinate >= offset` side except when
    /// `0 < d < r`, where the larger segment lies on the
    /// `coordinate <= offset` side. Deriving the side from the sign of `d`
    /// here (instead of a fixed `>=` per orientation) keeps the estimator
    /// measuring the same region the formula reports, for every parameter
    /// combination including the non-intersecting branches.
    #[must_use]
    pub fn larger_side(&self, circle: &Circle) -> Side {
        let d = self.signed_distance(circle);
        if d > 0.0 && d < circle.r {
            Side::LessEq
        } else {
            Side::GreaterEq
        }
    }

    /// Whether a point lies on the larger-segment side of the cut.
    #[must_use]
    pub fn on_larger_side(&self, circle: &Circle, x: f64, y: f64) -> bool {
        self.larger_side(circle)
            .admits(self.coordinate_of(x, y), self.offset)
    }
}

/// Exact area of the larger segment cut off by the line.
///
/// When the line misses the circle entirely the result collapses to the
/// whole circle (`d <= -r`, circle entirely on the reported side) or zero
/// (`d >= r`, reported side empty). Otherwise the result is the larger of
/// the two complementary segments and lies in `[πr²/2, πr²]`.
///
/// Pure and deterministic; `r > 0` is a precondition validated upstream.
#[must_use]
pub fn segment_area(circle: &Circle, cut: &CutLine) -> f64 {
    let r = circle.r;
    let circle_area = circle.area();
    let d = cut.signed_distance(circle);

    if d.abs() >= r {
        return if d <= -r { circle_area } else { 0.0 };
    }

    let h = (r * r - d * d).sqrt();
    let s = r * r * (d / r).acos() - d * h;
    s.max(circle_area - s)
}
