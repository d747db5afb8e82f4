//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Vehicles obtain their route through the [`Router`] trait, so
//! applications can swap in custom implementations (A*, contraction
//! hierarchies, a precomputed route table) without touching the motion
//! models.
//!
//! # Cost units
//!
//! Costs are edge lengths.  Internally they are summed as integer
//! millimetres (`u64`) so the priority queue has a total order and ties are
//! broken deterministically by `NodeId`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ts_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
///
/// `nodes` and `edges` describe the same path: `edges[i]` runs from
/// `nodes[i]` to `nodes[i + 1]`, so `nodes.len() == edges.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes visited in order, source first.
    pub nodes: Vec<NodeId>,
    /// Edges to traverse in order.
    pub edges: Vec<EdgeId>,
    /// Sum of edge lengths in metres.
    pub length_m: f64,
}

impl Route {
    /// Build a route from an edge sequence, deriving the node sequence and
    /// total length from `network`.
    ///
    /// Returns `None` if `edges` is empty or the edges are not consecutive.
    pub fn from_edges(network: &RoadNetwork, edges: Vec<EdgeId>) -> Option<Route> {
        let first = *edges.first()?;
        let mut nodes = Vec::with_capacity(edges.len() + 1);
        nodes.push(network.edge_from[first.index()]);
        for e in &edges {
            if network.edge_from[e.index()] != *nodes.last()? {
                return None;
            }
            nodes.push(network.edge_to[e.index()]);
        }
        let length_m = edges.iter().map(|e| network.edge_length_m(*e)).sum();
        Some(Route { nodes, edges, length_m })
    }

    /// Number of edges on the route.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// First node of the route.
    pub fn origin(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Last node of the route.
    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// Implementations must be `Send + Sync` so a single router can serve the
/// whole fleet.
pub trait Router: Send + Sync {
    /// Compute the shortest route by length from `from` to `to`.
    ///
    /// `from == to` yields a trivial route (one node, no edges).  Returns
    /// [`SpatialError::NoRoute`] if the destination is unreachable.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR road graph, weighted by
/// `edge_length_m`.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Edge cost in millimetres.
#[inline]
fn edge_cost_mm(network: &RoadNetwork, edge: EdgeId) -> u64 {
    (network.edge_length_m[edge.index()] * 1_000.0).round() as u64
}

fn dijkstra(network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
    for node in [from, to] {
        if !network.contains(node) {
            return Err(SpatialError::NodeNotFound(node));
        }
    }
    if from == to {
        return Ok(Route { nodes: vec![from], edges: vec![], length_m: 0.0 });
    }

    let n = network.node_count();
    // dist[v] = best known cost (mm) to reach v.
    let mut dist      = vec![u64::MAX; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as min-heap.
    // Secondary key NodeId ensures deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, from, to));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost.saturating_add(edge_cost_mm(network, edge));

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], from: NodeId, to: NodeId) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = network.edge_from[e.index()];
    }
    edges.reverse();

    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(from);
    nodes.extend(edges.iter().map(|e| network.edge_to[e.index()]));
    let length_m = edges.iter().map(|e| network.edge_length_m(*e)).sum();

    Route { nodes, edges, length_m }
}
