//! Index-addressable walker arena.

use log::info;

use ts_core::{EndOfRoute, SimConfig, SimRng, SimTime, VehicleId, VehicleRng};
use ts_spatial::{RoadNetwork, RouteSampler, Router};

use crate::walker::{EdgeWalker, WalkStatus};
use crate::MotionResult;

/// All edge walkers of a run, indexed by `VehicleId`.
///
/// Walkers are never removed; a vehicle that is waiting or hidden keeps its
/// slot and is merely skipped when positions are collected.
#[derive(Clone, Debug, Default)]
pub struct WalkerFleet {
    walkers: Vec<EdgeWalker>,
}

impl WalkerFleet {
    /// Sample one route per vehicle and draw each vehicle's speed.
    ///
    /// Routes come from `rng` in vehicle order; speeds come from a
    /// per-vehicle RNG seeded from `config.seed`, so both are reproducible.
    pub fn spawn<R: Router + ?Sized>(
        network: &RoadNetwork,
        router:  &R,
        sampler: &RouteSampler,
        config:  &SimConfig,
        rng:     &mut SimRng,
    ) -> MotionResult<Self> {
        config.validate()?;

        let mut walkers = Vec::with_capacity(config.vehicle_count);
        for i in 0..config.vehicle_count {
            let vehicle = VehicleId(i as u32);
            let route = match config.depot {
                Some(depot) => sampler.sample_from(network, router, depot, rng)?,
                None => sampler.sample(network, router, rng)?,
            };
            let speed = VehicleRng::new(config.seed, vehicle)
                .uniform(config.min_speed_mps, config.max_speed_mps);
            walkers.push(EdgeWalker::new(network, route, speed)?);
        }

        info!(
            "spawned {} walkers on {} nodes / {} edges ({} policy)",
            walkers.len(),
            network.node_count(),
            network.edge_count(),
            config.end_of_route,
        );
        Ok(Self { walkers })
    }

    /// Wrap pre-built walkers; vehicle ids follow vector order.
    pub fn from_walkers(walkers: Vec<EdgeWalker>) -> Self {
        Self { walkers }
    }

    pub fn len(&self) -> usize {
        self.walkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walkers.is_empty()
    }

    #[inline]
    pub fn get(&self, vehicle: VehicleId) -> Option<&EdgeWalker> {
        self.walkers.get(vehicle.index())
    }

    #[inline]
    pub fn get_mut(&mut self, vehicle: VehicleId) -> Option<&mut EdgeWalker> {
        self.walkers.get_mut(vehicle.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (VehicleId, &EdgeWalker)> + '_ {
        self.walkers
            .iter()
            .enumerate()
            .map(|(i, w)| (VehicleId(i as u32), w))
    }

    /// Mutable slice for callers that drive walkers themselves (e.g. in
    /// parallel).
    pub fn as_mut_slice(&mut self) -> &mut [EdgeWalker] {
        &mut self.walkers
    }

    /// Advance every walker by `dt_secs`.  Returns the number now visible.
    pub fn advance_all(
        &mut self,
        network: &RoadNetwork,
        dt_secs: f64,
        now:     SimTime,
        policy:  EndOfRoute,
    ) -> usize {
        self.walkers
            .iter_mut()
            .map(|w| w.advance(network, dt_secs, now, policy))
            .filter(|s| *s == WalkStatus::Visible)
            .count()
    }

    /// Visible walkers with their ids, in id order.
    pub fn visible(&self) -> impl Iterator<Item = (VehicleId, &EdgeWalker)> + '_ {
        self.iter().filter(|(_, w)| w.is_visible())
    }
}
