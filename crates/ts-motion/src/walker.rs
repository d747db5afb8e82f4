//! Per-vehicle edge-walking state machine.
//!
//! A walker consumes distance along the edges of a fixed route at a constant
//! speed.  What happens past the last edge is decided by an [`EndOfRoute`]
//! policy supplied on every call, so one advance loop serves every policy.

use log::debug;

use ts_core::{EndOfRoute, GeoPoint, NodeId, SimTime};
use ts_spatial::{RoadNetwork, Route};

use crate::{MotionError, MotionResult};

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Lifecycle phase of a walker.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum WalkPhase {
    /// Travelling along the route.
    Moving,
    /// Finished the route; restarts when the countdown reaches zero.
    Waiting { remaining_secs: f64 },
    /// Wrapped to the route start but not shown before `until`.
    Hidden { until: SimTime },
}

/// Outcome of one [`EdgeWalker::advance`] call.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WalkStatus {
    Visible,
    Waiting,
    Hidden,
}

impl WalkStatus {
    #[inline]
    pub fn is_visible(self) -> bool {
        self == WalkStatus::Visible
    }
}

// ── EdgeWalker ────────────────────────────────────────────────────────────────

/// One vehicle walking a fixed route.
///
/// `distance_on_edge` stays in `[0, edge_length_m)` between calls, except on
/// a route whose edges all have zero length, where progress is pinned at the
/// start.
#[derive(Clone, Debug)]
pub struct EdgeWalker {
    route:            Route,
    edge_index:       usize,
    distance_on_edge: f64,
    edge_length_m:    f64,
    speed_mps:        f64,
    position:         GeoPoint,
    phase:            WalkPhase,
    /// Render identity token; bumped on each wait restart or hidden wrap.
    restarts:         u32,
    /// Completed passes over the route.
    laps:             u64,
    travelled_m:      f64,
}

impl EdgeWalker {
    /// Place a walker at the start of `route`.
    ///
    /// The route must have at least one edge and every edge must exist in
    /// `network`.
    pub fn new(network: &RoadNetwork, route: Route, speed_mps: f64) -> MotionResult<Self> {
        if route.edges.is_empty() || route.nodes.len() < 2 {
            return Err(MotionError::RouteTooShort { nodes: route.nodes.len() });
        }
        if let Some(&bad) = route.edges.iter().find(|e| e.index() >= network.edge_count()) {
            return Err(MotionError::UnknownEdge(bad));
        }

        let first = route.edges[0];
        let mut walker = Self {
            edge_length_m:    network.edge_length_m(first),
            position:         network.edge_shape(first).start(),
            route,
            edge_index:       0,
            distance_on_edge: 0.0,
            speed_mps:        speed_mps.max(0.0),
            phase:            WalkPhase::Moving,
            restarts:         0,
            laps:             0,
            travelled_m:      0.0,
        };
        walker.route.length_m = walker.route.edges.iter().map(|e| network.edge_length_m(*e)).sum();
        Ok(walker)
    }

    /// Build a walker from a bare node sequence, resolving each consecutive
    /// pair to its network edge.
    pub fn from_nodes(network: &RoadNetwork, nodes: &[NodeId], speed_mps: f64) -> MotionResult<Self> {
        if nodes.len() < 2 {
            return Err(MotionError::RouteTooShort { nodes: nodes.len() });
        }
        let edges = nodes
            .windows(2)
            .enumerate()
            .map(|(step, w)| {
                network
                    .find_edge(w[0], w[1])
                    .ok_or(MotionError::MissingEdge { from: w[0], to: w[1], step })
            })
            .collect::<MotionResult<Vec<_>>>()?;
        let length_m = edges.iter().map(|e| network.edge_length_m(*e)).sum();
        let route = Route { nodes: nodes.to_vec(), edges, length_m };
        Self::new(network, route, speed_mps)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn route(&self) -> &Route { &self.route }
    pub fn edge_index(&self) -> usize { self.edge_index }
    pub fn distance_on_edge(&self) -> f64 { self.distance_on_edge }
    pub fn edge_length_m(&self) -> f64 { self.edge_length_m }
    pub fn speed_mps(&self) -> f64 { self.speed_mps }
    pub fn position(&self) -> GeoPoint { self.position }
    pub fn phase(&self) -> WalkPhase { self.phase }
    pub fn laps(&self) -> u64 { self.laps }

    /// Total distance credited to this walker, excluding leftover distance
    /// discarded at route end.
    pub fn travelled_m(&self) -> f64 { self.travelled_m }

    /// Opaque token distinguishing successive appearances of this vehicle.
    #[inline]
    pub fn render_token(&self) -> u32 {
        self.restarts
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.phase == WalkPhase::Moving
    }

    /// Distance covered since the start of the current pass over the route.
    pub fn route_progress_m(&self, network: &RoadNetwork) -> f64 {
        let done: f64 = self.route.edges[..self.edge_index]
            .iter()
            .map(|e| network.edge_length_m(*e))
            .sum();
        done + self.distance_on_edge
    }

    // ── Advance ───────────────────────────────────────────────────────────

    /// Move the walker by `dt_secs` of simulated time ending at `now`.
    ///
    /// Non-finite or negative `dt_secs` is treated as zero.  Any number of
    /// edge crossings is resolved within a single call.
    pub fn advance(
        &mut self,
        network: &RoadNetwork,
        dt_secs: f64,
        now:     SimTime,
        policy:  EndOfRoute,
    ) -> WalkStatus {
        let dt = if dt_secs.is_finite() && dt_secs > 0.0 { dt_secs } else { 0.0 };

        match self.phase {
            WalkPhase::Waiting { remaining_secs } => {
                let remaining_secs = remaining_secs - dt;
                if remaining_secs > 0.0 {
                    self.phase = WalkPhase::Waiting { remaining_secs };
                    return WalkStatus::Waiting;
                }
                self.restart(network);
                debug!("wait expired at {now}; restart #{}", self.restarts);
                return WalkStatus::Visible;
            }
            WalkPhase::Hidden { mut until } => {
                // A backward seek never stretches the hide past one full gap.
                if let EndOfRoute::HideThenLoop { hide_secs } = policy {
                    if until - now > hide_secs {
                        until = now + hide_secs;
                        self.phase = WalkPhase::Hidden { until };
                    }
                }
                if now < until {
                    return WalkStatus::Hidden;
                }
                self.phase = WalkPhase::Moving;
                debug!("reappeared at {now} with token {}", self.restarts);
            }
            WalkPhase::Moving => {}
        }

        let step = self.speed_mps * dt;
        self.distance_on_edge += step;
        self.travelled_m += step;

        while self.distance_on_edge >= self.edge_length_m {
            self.distance_on_edge -= self.edge_length_m;
            self.edge_index += 1;

            if self.edge_index >= self.route.edges.len() {
                self.laps += 1;
                debug!("route completed (lap {}) at {now}", self.laps);
                match policy {
                    EndOfRoute::Loop => {
                        self.edge_index = 0;
                        if self.route.length_m <= 0.0 {
                            self.travelled_m -= self.distance_on_edge;
                            self.distance_on_edge = 0.0;
                            self.edge_length_m = network.edge_length_m(self.route.edges[0]);
                            break;
                        }
                        // Whole extra passes are folded in one step.
                        if self.distance_on_edge >= self.route.length_m {
                            let extra = (self.distance_on_edge / self.route.length_m).floor();
                            self.laps += extra as u64;
                            // The product can round above the true multiple.
                            self.distance_on_edge =
                                (self.distance_on_edge - extra * self.route.length_m).max(0.0);
                        }
                    }
                    EndOfRoute::WaitThenRestart { wait_secs } => {
                        self.position = self.end_point(network);
                        self.discard_leftover(network);
                        self.phase = WalkPhase::Waiting { remaining_secs: wait_secs };
                        return WalkStatus::Waiting;
                    }
                    EndOfRoute::HideThenLoop { hide_secs } => {
                        self.discard_leftover(network);
                        self.restarts = self.restarts.wrapping_add(1);
                        self.position = network.edge_shape(self.route.edges[0]).start();
                        self.phase = WalkPhase::Hidden { until: now + hide_secs };
                        return WalkStatus::Hidden;
                    }
                }
            }

            self.edge_length_m = network.edge_length_m(self.route.edges[self.edge_index]);
        }

        self.position = self.interpolate(network);
        WalkStatus::Visible
    }

    /// Put the walker back at the start of its route, visible and moving.
    pub fn restart(&mut self, network: &RoadNetwork) {
        self.discard_leftover(network);
        self.restarts = self.restarts.wrapping_add(1);
        self.phase = WalkPhase::Moving;
        self.position = network.edge_shape(self.route.edges[0]).start();
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn discard_leftover(&mut self, network: &RoadNetwork) {
        self.travelled_m -= self.distance_on_edge;
        self.edge_index = 0;
        self.distance_on_edge = 0.0;
        self.edge_length_m = network.edge_length_m(self.route.edges[0]);
    }

    fn end_point(&self, network: &RoadNetwork) -> GeoPoint {
        match self.route.edges.last() {
            Some(&e) => network.edge_shape(e).point_at(1.0),
            None => self.position,
        }
    }

    fn interpolate(&self, network: &RoadNetwork) -> GeoPoint {
        let fraction = if self.edge_length_m > 0.0 {
            self.distance_on_edge / self.edge_length_m
        } else {
            0.0
        };
        network
            .edge_shape(self.route.edges[self.edge_index])
            .point_at(fraction)
    }
}
