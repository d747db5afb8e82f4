//! Synthetic street grid.
//!
//! A `ROWS × COLS` lattice of intersections roughly 110 m apart around
//! Mission Dolores, San Francisco.  Every road is two-way; the diagonal
//! boulevard across the first block carries a bent shape so walkers exercise
//! polyline interpolation as well as straight edges.

use ts_core::{GeoPoint, NodeId};
use ts_spatial::{RoadNetwork, RoadNetworkBuilder};

const ORIGIN:   GeoPoint = GeoPoint { lat: 37.7590, lon: -122.4270 };
const STEP_DEG: f64      = 0.001;

/// Build a `rows × cols` grid.  Returns the network and its node ids in
/// row-major order.
pub fn build_grid(rows: usize, cols: usize) -> (RoadNetwork, Vec<NodeId>) {
    let mut b = RoadNetworkBuilder::with_capacity(rows * cols, 4 * rows * cols);

    let mut nodes = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            nodes.push(b.add_node(GeoPoint::new(
                ORIGIN.lat + r as f64 * STEP_DEG,
                ORIGIN.lon + c as f64 * STEP_DEG,
            )));
        }
    }

    let at = |r: usize, c: usize| nodes[r * cols + c];
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                b.add_measured_road(at(r, c), at(r, c + 1));
            }
            if r + 1 < rows {
                b.add_measured_road(at(r, c), at(r + 1, c));
            }
        }
    }

    if rows > 1 && cols > 1 {
        let (a, z) = (at(0, 0), at(1, 1));
        let (pa, pz) = (b.node_pos(a), b.node_pos(z));
        let bend = GeoPoint::new(pa.lat + 0.0002, pz.lon - 0.0002);
        let shape = vec![pa, bend, pz];
        let length = pa.distance_m(bend) + bend.distance_m(pz);
        b.add_road_with_shape(a, z, length, shape);
    }

    (b.build(), nodes)
}
