//! Display scatter support.
//!
//! A renderer drawing the circle, the cut line, and a colored point cloud
//! needs each sampled point classified into one of three visual classes.
//! This module produces that classification; it carries no numeric authority
//! and re-samples independently of the estimator's own draws, with its own
//! cap on point count.

use serde::{Deserialize, Serialize};

use crate::engine::rng::RandomSource;
use crate::geometry::{Circle, CutLine};

/// Display cap on scatter points, independent of the computation sample
/// count.
pub const MAX_VISUAL_POINTS: u64 = 100_000;

/// Visual class of one scatter point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointClass {
    /// Inside the circle, on the larger-segment side.
    LargerSegment,
    /// Inside the circle, on the other side.
    SmallerSegment,
    /// Outside the circle.
    Outside,
}

/// One classified scatter point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    /// Point x.
    pub x: f64,
    /// Point y.
    pub y: f64,
    /// Visual class.
    pub class: PointClass,
}

/// Sample a classified point cloud over the circle's bounding square.
///
/// `requested` is capped at [`MAX_VISUAL_POINTS`] regardless of the
/// computation sample count. Classification uses the same larger-side rule
/// as the estimator, so the colored classes match what the formula reports.
#[must_use]
pub fn scatter<R: RandomSource>(
    circle: &Circle,
    cut: &CutLine,
    requested: u64,
    rng: &mut R,
) -> Vec<ScatterPoint> {
    let count = requested.min(MAX_VISUAL_POINTS);
    let r = circle.r;
    let mut points = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let x = rng.next_in(circle.x0 - r, circle.x0 + r);
        let y = rng.next_in(circle.y0 - r, circle.y0 + r);

        let class = if !circle.contains(x, y) {
            PointClass::Outside
        } else if cut.on_larger_side(circle, x, y) {
            PointClass::LargerSegment
        } else {
            PointClass::SmallerSegment
        };

        points.push(ScatterPoint { x, y, class });
    }

    points
}
