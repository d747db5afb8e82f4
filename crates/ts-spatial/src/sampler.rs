//! Random origin/destination route sampling.

use log::debug;

use ts_core::{GeoPoint, NodeId, SimRng};

use crate::network::RoadNetwork;
use crate::router::{Route, Router};
use crate::{SpatialError, SpatialResult};

/// Draws random distinct node pairs until the router connects one.
///
/// Unreachable pairs are recovered locally by drawing again.  The number of
/// draws is bounded by `max_attempts`, so a graph without any connected pair
/// fails with [`SpatialError::SamplingExhausted`] instead of hanging.
#[derive(Debug, Clone, Copy)]
pub struct RouteSampler {
    pub max_attempts: u32,
}

impl RouteSampler {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts: max_attempts.max(1) }
    }

    /// Sample one route of at least one edge (two nodes).
    pub fn sample<R: Router + ?Sized>(
        &self,
        network: &RoadNetwork,
        router:  &R,
        rng:     &mut SimRng,
    ) -> SpatialResult<Route> {
        let n = network.node_count();
        if n < 2 {
            return Err(SpatialError::TooFewNodes { count: n });
        }

        for attempt in 1..=self.max_attempts {
            let Some((a, b)) = rng.distinct_pair(n) else {
                break;
            };
            let (from, to) = (NodeId(a as u32), NodeId(b as u32));
            match router.route(network, from, to) {
                Ok(route) if route.nodes.len() >= 2 => {
                    debug!(
                        "sampled route {from} -> {to}: {} edges, {:.1} m (attempt {attempt})",
                        route.edge_count(),
                        route.length_m,
                    );
                    return Ok(route);
                }
                Ok(_) | Err(SpatialError::NoRoute { .. }) => {
                    debug!("no usable route {from} -> {to}; resampling");
                }
                Err(e) => return Err(e),
            }
        }

        Err(SpatialError::SamplingExhausted { attempts: self.max_attempts })
    }

    /// Sample a route that starts at the node nearest to `depot`.
    ///
    /// Only the destination is random; it is drawn from the other nodes.
    pub fn sample_from<R: Router + ?Sized>(
        &self,
        network: &RoadNetwork,
        router:  &R,
        depot:   GeoPoint,
        rng:     &mut SimRng,
    ) -> SpatialResult<Route> {
        let n = network.node_count();
        if n < 2 {
            return Err(SpatialError::TooFewNodes { count: n });
        }
        let from = network
            .snap_to_node(depot)
            .ok_or(SpatialError::TooFewNodes { count: n })?;

        for attempt in 1..=self.max_attempts {
            let mut b = rng.gen_range(0..n - 1);
            if b >= from.index() {
                b += 1;
            }
            let to = NodeId(b as u32);
            match router.route(network, from, to) {
                Ok(route) if route.nodes.len() >= 2 => {
                    debug!(
                        "sampled depot route {from} -> {to}: {} edges (attempt {attempt})",
                        route.edge_count(),
                    );
                    return Ok(route);
                }
                Ok(_) | Err(SpatialError::NoRoute { .. }) => {
                    debug!("no usable route {from} -> {to}; resampling");
                }
                Err(e) => return Err(e),
            }
        }

        Err(SpatialError::SamplingExhausted { attempts: self.max_attempts })
    }
}

impl Default for RouteSampler {
    fn default() -> Self {
        Self { max_attempts: Self::DEFAULT_MAX_ATTEMPTS }
    }
}
