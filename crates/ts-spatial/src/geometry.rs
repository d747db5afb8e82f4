//! Edge geometry and arc-length interpolation.
//!
//! Road edges may carry a polyline describing the physical path between
//! their endpoints.  Edges without one are treated as the straight segment
//! from source to destination node.  Either way, a position is resolved by
//! walking a normalized fraction of the total arc length.

use ts_core::GeoPoint;

/// Borrowed view of one edge's shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EdgeShape<'a> {
    /// No recorded geometry: the segment between the two endpoint nodes.
    Straight(GeoPoint, GeoPoint),
    /// Recorded polyline, at least two points, source first.
    Polyline(&'a [GeoPoint]),
}

impl EdgeShape<'_> {
    /// Point at `fraction ∈ [0, 1]` of the shape's arc length.
    ///
    /// Out-of-range fractions are clamped; a shape of zero length resolves
    /// to its first point.
    pub fn point_at(&self, fraction: f64) -> GeoPoint {
        match *self {
            EdgeShape::Straight(a, b) => a.lerp(b, fraction),
            EdgeShape::Polyline(points) => {
                point_along(points, fraction).unwrap_or_default()
            }
        }
    }

    /// First point of the shape.
    pub fn start(&self) -> GeoPoint {
        match *self {
            EdgeShape::Straight(a, _) => a,
            EdgeShape::Polyline(points) => points.first().copied().unwrap_or_default(),
        }
    }

    /// Haversine length of the shape in metres.
    pub fn arc_length_m(&self) -> f64 {
        match *self {
            EdgeShape::Straight(a, b) => a.distance_m(b),
            EdgeShape::Polyline(points) => arc_length_m(points),
        }
    }
}

/// Sum of haversine segment lengths along `points`.
pub fn arc_length_m(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|w| w[0].distance_m(w[1])).sum()
}

/// Interpolate `fraction` of the way along `points` by arc length.
///
/// Returns `None` for an empty slice.
pub fn point_along(points: &[GeoPoint], fraction: f64) -> Option<GeoPoint> {
    let (&first, rest) = points.split_first()?;
    if rest.is_empty() {
        return Some(first);
    }

    let total = arc_length_m(points);
    if total <= 0.0 {
        return Some(first);
    }

    let f = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    if f >= 1.0 {
        return points.last().copied();
    }
    let mut remaining = f * total;
    for w in points.windows(2) {
        let seg = w[0].distance_m(w[1]);
        if remaining <= seg {
            let local = if seg > 0.0 { remaining / seg } else { 0.0 };
            return Some(w[0].lerp(w[1], local));
        }
        remaining -= seg;
    }
    points.last().copied()
}
