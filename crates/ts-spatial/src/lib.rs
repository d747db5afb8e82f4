//! `ts-spatial`: road network, edge geometry, routing, and route sampling.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`network`]  | `RoadNetwork` (CSR + R-tree + shapes), `RoadNetworkBuilder` |
//! | [`geometry`] | `EdgeShape`, arc-length interpolation along polylines       |
//! | [`router`]   | `Router` trait, `Route`, `DijkstraRouter`                   |
//! | [`sampler`]  | `RouteSampler`: random origin/destination routes           |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                          |
//!
//! The network is built once and is read-only afterwards; every vehicle
//! borrows it without synchronisation.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod geometry;
pub mod network;
pub mod router;
pub mod sampler;


pub use error::{SpatialError, SpatialResult};
pub use geometry::{point_along, EdgeShape};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use router::{DijkstraRouter, Route, Router};
pub use sampler::RouteSampler;
