//! 2-D geometry for schematic traces.
//!
//! Coordinates come straight from the routing solver, so everything here is
//! plain `f64` schematic units. Comparisons use a small tolerance because the
//! solver snaps to a grid but overlap correction can introduce float noise.

use serde::{Deserialize, Serialize};

/// Tolerance for treating two coordinates as the same point.
pub const GEOM_EPS: f64 = 1e-6;

/// A 2-D point in schematic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether this point coincides with `other` within [`GEOM_EPS`].
    pub fn coincides(&self, other: &Point) -> bool {
        (self.x - other.x).abs() <= GEOM_EPS && (self.y - other.y).abs() <= GEOM_EPS
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One straight trace segment, directed from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: Point,
    pub to: Point,
}

impl Edge {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Whether `p` coincides with either endpoint of this edge.
    pub fn has_endpoint(&self, p: &Point) -> bool {
        self.from.coincides(p) || self.to.coincides(p)
    }

    /// Parametric position of `p` along this edge, if `p` lies on it.
    ///
    /// Returns `t` in `[0, 1]` with `from` at 0 and `to` at 1. `None` when
    /// `p` is farther than [`GEOM_EPS`] from the segment.
    pub fn locate(&self, p: &Point) -> Option<f64> {
        let rx = self.to.x - self.from.x;
        let ry = self.to.y - self.from.y;
        let len2 = rx * rx + ry * ry;
        if len2 <= GEOM_EPS * GEOM_EPS {
            return self.from.coincides(p).then_some(0.0);
        }
        let t = ((p.x - self.from.x) * rx + (p.y - self.from.y) * ry) / len2;
        let t = t.clamp(0.0, 1.0);
        let nearest = Point::new(self.from.x + t * rx, self.from.y + t * ry);
        (nearest.distance_to(p) <= GEOM_EPS).then_some(t)
    }
}

/// Point intersection of two segments, if any.
///
/// Standard parametric segment intersection: solves `a.from + t*(a.to-a.from)
/// == b.from + u*(b.to-b.from)` and accepts `t, u` in `[0, 1]` (with
/// [`GEOM_EPS`] slack at the ends).
///
/// Tie-breaks, since traces routinely meet end to end:
/// - An intersection coinciding with a shared endpoint of the two segments is
///   degenerate and returns `None`, so natural path-to-path joins are not
///   reported as crossings.
/// - Collinear overlapping segments have no single intersection point and
///   return `None`.
pub fn segment_intersection(a: &Edge, b: &Edge) -> Option<Point> {
    let rx = a.to.x - a.from.x;
    let ry = a.to.y - a.from.y;
    let sx = b.to.x - b.from.x;
    let sy = b.to.y - b.from.y;

    let denom = rx * sy - ry * sx;
    if denom.abs() <= GEOM_EPS {
        // Parallel or collinear; overlaps carry no point intersection.
        return None;
    }

    let qx = b.from.x - a.from.x;
    let qy = b.from.y - a.from.y;
    let t = (qx * sy - qy * sx) / denom;
    let u = (qx * ry - qy * rx) / denom;

    let on_a = (-GEOM_EPS..=1.0 + GEOM_EPS).contains(&t);
    let on_b = (-GEOM_EPS..=1.0 + GEOM_EPS).contains(&u);
    if !on_a || !on_b {
        return None;
    }

    let p = Point::new(a.from.x + t * rx, a.from.y + t * ry);
    if a.has_endpoint(&p) && b.has_endpoint(&p) {
        // Shared endpoint: the segments join rather than cross.
        return None;
    }
    Some(p)
}

/// Build consecutive-point edges from an ordered path.
///
/// A path with N points yields exactly N-1 edges; fewer than two points
/// yields none. Validity of the path (length >= 2) is the caller's concern.
pub fn edges_from_points(points: &[Point]) -> Vec<Edge> {
    points
        .windows(2)
        .map(|w| Edge::new(w[0], w[1]))
        .collect()
}
