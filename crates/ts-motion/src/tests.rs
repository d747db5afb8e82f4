//! Unit tests for ts-motion.

#[cfg(test)]
mod helpers {
    use ts_core::{GeoPoint, NodeId};
    use ts_spatial::{RoadNetwork, RoadNetworkBuilder};

    /// Straight line of three nodes joined by two 100 m roads.
    ///
    ///   0 ── 1 ── 2
    pub fn line_network() -> (RoadNetwork, [NodeId; 3]) {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node(GeoPoint::new(0.0, 0.000));
        let n1 = b.add_node(GeoPoint::new(0.0, 0.001));
        let n2 = b.add_node(GeoPoint::new(0.0, 0.002));
        b.add_road(n0, n1, 100.0);
        b.add_road(n1, n2, 100.0);
        (b.build(), [n0, n1, n2])
    }

    /// 3×3 grid of 100 m roads for fleet tests.
    pub fn grid_network() -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new();
        let mut ids = Vec::new();
        for r in 0..3 {
            for c in 0..3 {
                ids.push(b.add_node(GeoPoint::new(r as f64 * 0.001, c as f64 * 0.001)));
            }
        }
        for r in 0..3 {
            for c in 0..3 {
                let i = r * 3 + c;
                if c < 2 { b.add_road(ids[i], ids[i + 1], 100.0); }
                if r < 2 { b.add_road(ids[i], ids[i + 3], 100.0); }
            }
        }
        b.build()
    }
}

// ── EdgeWalker ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod walker {
    use ts_core::{EndOfRoute, GeoPoint, SimRng, SimTime};
    use ts_spatial::RoadNetworkBuilder;

    use crate::{EdgeWalker, MotionError, WalkPhase, WalkStatus};

    const EPS: f64 = 1e-9;
    const LOOP: EndOfRoute = EndOfRoute::Loop;

    /// Advance once per simulated second from `start` for `ticks` ticks.
    fn run(
        w: &mut EdgeWalker,
        net: &ts_spatial::RoadNetwork,
        start: f64,
        ticks: u32,
        policy: EndOfRoute,
    ) -> WalkStatus {
        let mut status = WalkStatus::Visible;
        for i in 1..=ticks {
            status = w.advance(net, 1.0, SimTime(start + i as f64), policy);
        }
        status
    }

    #[test]
    fn starts_at_route_origin() {
        let (net, [n0, n1, n2]) = super::helpers::line_network();
        let w = EdgeWalker::from_nodes(&net, &[n0, n1, n2], 20.0).unwrap();
        assert_eq!(w.edge_index(), 0);
        assert_eq!(w.distance_on_edge(), 0.0);
        assert_eq!(w.position(), net.node_pos(n0).unwrap());
        assert_eq!(w.phase(), WalkPhase::Moving);
        assert_eq!(w.route().length_m, 200.0);
    }

    #[test]
    fn five_ticks_reach_boundary_node() {
        let (net, [n0, n1, n2]) = super::helpers::line_network();
        let mut w = EdgeWalker::from_nodes(&net, &[n0, n1, n2], 20.0).unwrap();
        let status = run(&mut w, &net, 0.0, 5, EndOfRoute::Loop);
        assert_eq!(status, WalkStatus::Visible);
        assert_eq!(w.edge_index(), 1);
        assert_eq!(w.distance_on_edge(), 0.0);
        assert_eq!(w.position(), net.node_pos(n1).unwrap());
    }

    #[test]
    fn several_edges_crossed_in_one_tick() {
        let (net, [n0, n1, n2]) = super::helpers::line_network();
        let mut w = EdgeWalker::from_nodes(&net, &[n0, n1, n2], 20.0).unwrap();
        w.advance(&net, 7.0, SimTime(7.0), EndOfRoute::Loop);
        assert_eq!(w.edge_index(), 1);
        assert!((w.distance_on_edge() - 40.0).abs() < EPS);
        let p = w.position();
        assert!((p.lon - 0.0014).abs() < 1e-9, "got {p}");
    }

    #[test]
    fn loop_wraps_with_leftover_distance() {
        let (net, [n0, n1, n2]) = super::helpers::line_network();
        let mut w = EdgeWalker::from_nodes(&net, &[n0, n1, n2], 20.0).unwrap();
        let status = w.advance(&net, 11.0, SimTime(11.0), EndOfRoute::Loop);
        assert_eq!(status, WalkStatus::Visible);
        assert_eq!(w.edge_index(), 0);
        assert!((w.distance_on_edge() - 20.0).abs() < EPS);
        assert_eq!(w.laps(), 1);
        assert_eq!(w.render_token(), 0);
    }

    #[test]
    fn huge_step_folds_whole_laps() {
        let (net, [n0, n1, n2]) = super::helpers::line_network();
        let mut w = EdgeWalker::from_nodes(&net, &[n0, n1, n2], 20.0).unwrap();
        // 20 m/s × 1000 s = 20 000 m = 100 laps exactly.
        w.advance(&net, 1_000.0, SimTime(1_000.0), EndOfRoute::Loop);
        assert_eq!(w.laps(), 100);
        assert_eq!(w.edge_index(), 0);
        assert!(w.distance_on_edge() < EPS);
    }

    #[test]
    fn loop_distance_matches_elapsed_time() {
        let (net, [n0, n1, n2]) = super::helpers::line_network();
        let speed = 13.7;
        let dt = 0.37;
        let mut w = EdgeWalker::from_nodes(&net, &[n0, n1, n2], speed).unwrap();
        for i in 1..=1_000 {
            w.advance(&net, dt, SimTime(i as f64 * dt), EndOfRoute::Loop);
        }
        let expected = speed * dt * 1_000.0;
        let walked = w.laps() as f64 * w.route().length_m + w.route_progress_m(&net);
        assert!((walked - expected).abs() < 1e-6, "walked {walked}, expected {expected}");
        assert!((w.travelled_m() - expected).abs() < 1e-6);
        assert!(w.laps() >= 25);
    }

    #[test]
    fn distance_stays_within_current_edge() {
        let (net, [n0, n1, n2]) = super::helpers::line_network();
        let mut rng = SimRng::new(11);
        for policy in [
            EndOfRoute::Loop,
            EndOfRoute::WaitThenRestart { wait_secs: 3.0 },
            EndOfRoute::HideThenLoop { hide_secs: 3.0 },
        ] {
            let mut w = EdgeWalker::from_nodes(&net, &[n0, n1, n2, n1, n0], 35.0).unwrap();
            let mut now = 0.0;
            for _ in 0..2_000 {
                let dt: f64 = rng.gen_range(0.0..12.0);
                now += dt;
                w.advance(&net, dt, SimTime(now), policy);
                assert!(w.distance_on_edge() >= 0.0);
                assert!(
                    w.distance_on_edge() < w.edge_length_m(),
                    "{policy}: {} on edge of {}",
                    w.distance_on_edge(),
                    w.edge_length_m(),
                );
            }
        }
    }

    #[test]
    fn lap_fold_rounding_is_clamped() {
        // 13.86 m over a 0.21 m loop: `floor(d / L) × L` rounds past `d`.
        let mut b = RoadNetworkBuilder::new();
        let n: Vec<_> = (0..4).map(|i| b.add_node(GeoPoint::new(0.0, i as f64 * 0.001))).collect();
        b.add_road(n[0], n[1], 0.1);
        b.add_road(n[1], n[2], 0.01);
        b.add_road(n[2], n[3], 0.1);
        let net = b.build();

        let mut w = EdgeWalker::from_nodes(&net, &n, 13.86).unwrap();
        w.advance(&net, 1.0, SimTime(1.0), EndOfRoute::Loop);
        assert_eq!(w.edge_index(), 0);
        assert!(w.distance_on_edge() >= 0.0, "{}", w.distance_on_edge());
        assert!(w.distance_on_edge() < w.edge_length_m());
        assert_eq!(w.position(), net.node_pos(n[0]).unwrap());
    }

    #[test]
    fn lap_folding_never_goes_negative() {
        // Decimal lengths make `laps × route length` round above the true
        // multiple for some distances.
        const LENGTHS: [f64; 8] = [0.1, 0.2, 0.3, 0.7, 1.1, 3.3, 0.01, 13.37];
        let mut rng = SimRng::new(5);
        for &a in &LENGTHS {
            for &b in &LENGTHS {
                for &c in &LENGTHS {
                    let mut builder = RoadNetworkBuilder::new();
                    let n: Vec<_> = (0..4)
                        .map(|i| builder.add_node(GeoPoint::new(0.0, i as f64 * 0.001)))
                        .collect();
                    builder.add_road(n[0], n[1], a);
                    builder.add_road(n[1], n[2], b);
                    builder.add_road(n[2], n[3], c);
                    let net = builder.build();

                    for speed in [0.37, 3.1, 31.833, 97.0] {
                        let mut w = EdgeWalker::from_nodes(&net, &n, speed).unwrap();
                        let mut now = 0.0;
                        for _ in 0..40 {
                            let dt: f64 = rng.gen_range(0.0..7.0);
                            now += dt;
                            w.advance(&net, dt, SimTime(now), EndOfRoute::Loop);
                            assert!(
                                w.distance_on_edge() >= 0.0,
                                "({a}, {b}, {c}) at {speed} m/s: {}",
                                w.distance_on_edge(),
                            );
                            assert!(w.distance_on_edge() < w.edge_length_m());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn wait_then_restart_scenario() {
        let (net, [n0, n1, n2]) = super::helpers::line_network();
        let policy = EndOfRoute::WaitThenRestart { wait_secs: 10.0 };
        let mut w = EdgeWalker::from_nodes(&net, &[n0, n1, n2], 20.0).unwrap();

        // 200 m at 20 m/s: the route is completed at T = 10.
        let status = run(&mut w, &net, 0.0, 10, policy);
        assert_eq!(status, WalkStatus::Waiting);
        assert!(!w.is_visible());

        // T + 5: still waiting.
        assert_eq!(w.advance(&net, 5.0, SimTime(15.0), policy), WalkStatus::Waiting);
        assert_eq!(w.phase(), WalkPhase::Waiting { remaining_secs: 5.0 });

        // T + 11: back at the start and moving.
        assert_eq!(w.advance(&net, 6.0, SimTime(21.0), policy), WalkStatus::Visible);
        assert_eq!(w.phase(), WalkPhase::Moving);
        assert_eq!(w.edge_index(), 0);
        assert_eq!(w.distance_on_edge(), 0.0);
        assert_eq!(w.position(), net.node_pos(n0).unwrap());
        assert_eq!(w.render_token(), 1);

        // The next tick moves again.
        w.advance(&net, 1.0, SimTime(22.0), policy);
        assert!((w.distance_on_edge() - 20.0).abs() < EPS);
    }

    #[test]
    fn wait_discards_leftover_distance() {
        let (net, [n0, n1, n2]) = super::helpers::line_network();
        let policy = EndOfRoute::WaitThenRestart { wait_secs: 10.0 };
        let mut w = EdgeWalker::from_nodes(&net, &[n0, n1, n2], 20.0).unwrap();
        w.advance(&net, 10.5, SimTime(10.5), policy);
        assert!(matches!(w.phase(), WalkPhase::Waiting { .. }));
        assert!((w.travelled_m() - 200.0).abs() < EPS);
    }

    #[test]
    fn hide_then_loop_scenario() {
        let (net, [n0, n1, n2]) = super::helpers::line_network();
        let policy = EndOfRoute::HideThenLoop { hide_secs: 10.0 };
        let mut w = EdgeWalker::from_nodes(&net, &[n0, n1, n2], 20.0).unwrap();

        assert_eq!(run(&mut w, &net, 0.0, 10, policy), WalkStatus::Hidden);
        assert_eq!(w.phase(), WalkPhase::Hidden { until: SimTime(20.0) });
        assert_eq!(w.render_token(), 1);
        assert_eq!(w.edge_index(), 0);

        for t in 11..20 {
            assert_eq!(w.advance(&net, 1.0, SimTime(t as f64), policy), WalkStatus::Hidden);
        }
        assert_eq!(w.advance(&net, 1.0, SimTime(20.0), policy), WalkStatus::Visible);
        assert!((w.distance_on_edge() - 20.0).abs() < EPS);
        assert_eq!(w.render_token(), 1);
    }

    #[test]
    fn backward_seek_rebases_hide_deadline() {
        let (net, [n0, n1, n2]) = super::helpers::line_network();
        let policy = EndOfRoute::HideThenLoop { hide_secs: 10.0 };
        let mut w = EdgeWalker::from_nodes(&net, &[n0, n1, n2], 20.0).unwrap();

        assert_eq!(run(&mut w, &net, 0.0, 10, policy), WalkStatus::Hidden);
        assert_eq!(w.phase(), WalkPhase::Hidden { until: SimTime(20.0) });

        // Clock jumps back to t=2; the hide restarts from there.
        assert_eq!(w.advance(&net, -8.0, SimTime(2.0), policy), WalkStatus::Hidden);
        assert_eq!(w.phase(), WalkPhase::Hidden { until: SimTime(12.0) });
        for t in 3..12 {
            assert_eq!(w.advance(&net, 1.0, SimTime(t as f64), policy), WalkStatus::Hidden);
        }
        assert_eq!(w.advance(&net, 1.0, SimTime(12.0), policy), WalkStatus::Visible);
        assert_eq!(w.render_token(), 1);

        // A small step back inside the window keeps the original deadline.
        let mut w = EdgeWalker::from_nodes(&net, &[n0, n1, n2], 20.0).unwrap();
        run(&mut w, &net, 0.0, 10, policy);
        assert_eq!(w.advance(&net, 0.0, SimTime(15.0), policy), WalkStatus::Hidden);
        assert_eq!(w.advance(&net, 0.0, SimTime(14.0), policy), WalkStatus::Hidden);
        assert_eq!(w.phase(), WalkPhase::Hidden { until: SimTime(20.0) });
    }

    #[test]
    fn zero_length_loop_does_not_spin() {
        let mut b = RoadNetworkBuilder::new();
        let p = GeoPoint::new(1.0, 1.0);
        let a = b.add_node(p);
        let c = b.add_node(p);
        b.add_road(a, c, 0.0);
        let net = b.build();

        let mut w = EdgeWalker::from_nodes(&net, &[a, c], 10.0).unwrap();
        assert_eq!(w.advance(&net, 5.0, SimTime(5.0), LOOP), WalkStatus::Visible);
        assert_eq!(w.edge_index(), 0);
        assert_eq!(w.distance_on_edge(), 0.0);
        assert_eq!(w.position(), p);
    }

    #[test]
    fn invalid_dt_is_ignored() {
        let (net, [n0, n1, n2]) = super::helpers::line_network();
        let mut w = EdgeWalker::from_nodes(&net, &[n0, n1, n2], 20.0).unwrap();
        w.advance(&net, -3.0, SimTime(0.0), LOOP);
        w.advance(&net, f64::NAN, SimTime(0.0), LOOP);
        assert_eq!(w.distance_on_edge(), 0.0);
        assert_eq!(w.travelled_m(), 0.0);
    }

    #[test]
    fn follows_edge_shape_by_arc_length() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.01, 0.01));
        let corner = GeoPoint::new(0.0, 0.01);
        let shape = vec![b.node_pos(a), corner, b.node_pos(c)];
        b.add_road_with_shape(a, c, 100.0, shape);
        let net = b.build();

        let mut w = EdgeWalker::from_nodes(&net, &[a, c], 10.0).unwrap();
        w.advance(&net, 5.0, SimTime(5.0), LOOP);
        let p = w.position();
        assert!((p.lat - corner.lat).abs() < 1e-6 && (p.lon - corner.lon).abs() < 1e-6, "got {p}");
    }

    #[test]
    fn short_or_broken_routes_rejected() {
        let (net, [n0, _, n2]) = super::helpers::line_network();
        assert!(matches!(
            EdgeWalker::from_nodes(&net, &[n0], 1.0),
            Err(MotionError::RouteTooShort { nodes: 1 })
        ));
        assert!(matches!(
            EdgeWalker::from_nodes(&net, &[n0, n2], 1.0),
            Err(MotionError::MissingEdge { step: 0, .. })
        ));
    }
}

// ── WalkerFleet ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod fleet {
    use ts_core::{EndOfRoute, GeoPoint, NodeId, SimConfig, SimRng, SimTime, VehicleId};
    use ts_spatial::{DijkstraRouter, RouteSampler};

    use crate::{MotionError, WalkerFleet};

    fn config() -> SimConfig {
        SimConfig { vehicle_count: 6, seed: 5, ..SimConfig::default() }
    }

    #[test]
    fn spawn_is_deterministic() {
        let net = super::helpers::grid_network();
        let cfg = config();
        let sampler = RouteSampler::default();
        let f1 = WalkerFleet::spawn(&net, &DijkstraRouter, &sampler, &cfg, &mut SimRng::new(cfg.seed)).unwrap();
        let f2 = WalkerFleet::spawn(&net, &DijkstraRouter, &sampler, &cfg, &mut SimRng::new(cfg.seed)).unwrap();
        assert_eq!(f1.len(), 6);
        for ((_, a), (_, b)) in f1.iter().zip(f2.iter()) {
            assert_eq!(a.route(), b.route());
            assert_eq!(a.speed_mps(), b.speed_mps());
            assert!((cfg.min_speed_mps..=cfg.max_speed_mps).contains(&a.speed_mps()));
            assert!(a.route().nodes.len() >= 2);
        }
    }

    #[test]
    fn depot_fleet_leaves_from_nearest_node() {
        let net = super::helpers::grid_network();
        // Just off the centre intersection (node 4 at 0.001, 0.001).
        let depot = GeoPoint::new(0.00105, 0.00093);
        let cfg = SimConfig { depot: Some(depot), ..config() };
        let fleet = WalkerFleet::spawn(&net, &DijkstraRouter, &RouteSampler::default(), &cfg, &mut SimRng::new(2))
            .unwrap();
        assert_eq!(fleet.len(), 6);
        for (_, w) in fleet.iter() {
            assert_eq!(w.route().origin(), Some(NodeId(4)));
            assert_eq!(w.position(), net.node_pos(NodeId(4)).unwrap());
        }
    }

    #[test]
    fn invalid_config_rejected() {
        let net = super::helpers::grid_network();
        let cfg = SimConfig { min_speed_mps: 9.0, max_speed_mps: 3.0, ..config() };
        let err = WalkerFleet::spawn(&net, &DijkstraRouter, &RouteSampler::default(), &cfg, &mut SimRng::new(1))
            .unwrap_err();
        assert!(matches!(err, MotionError::Core(_)));
    }

    #[test]
    fn waiting_walkers_keep_their_slot() {
        let net = super::helpers::grid_network();
        let cfg = SimConfig { min_speed_mps: 10.0, max_speed_mps: 10.0, ..config() };
        let mut fleet =
            WalkerFleet::spawn(&net, &DijkstraRouter, &RouteSampler::default(), &cfg, &mut SimRng::new(2)).unwrap();
        let policy = EndOfRoute::WaitThenRestart { wait_secs: 1_000.0 };

        // Longest grid route is 400 m: everyone finishes within 40 s.
        let mut visible = fleet.len();
        for t in 1..=40 {
            visible = fleet.advance_all(&net, 1.0, SimTime(t as f64), policy);
        }
        assert_eq!(visible, 0);
        assert_eq!(fleet.visible().count(), 0);
        assert_eq!(fleet.len(), 6);
        assert!(fleet.get(VehicleId(5)).is_some());
    }
}

// ── GPS interpolation ─────────────────────────────────────────────────────────

#[cfg(test)]
mod gps {
    use ts_core::{GeoPoint, SimTime, VehicleId};

    use crate::{GpsSample, GpsTrace};

    const EPS: f64 = 1e-9;

    fn trace() -> GpsTrace {
        GpsTrace::new(
            VehicleId(0),
            "cab",
            vec![
                GpsSample::new(SimTime(0.0), 10.0, 20.0),
                GpsSample::new(SimTime(10.0), 10.01, 20.01),
            ],
        )
    }

    #[test]
    fn midpoint_between_fixes() {
        let p = trace().position_at(SimTime(5.0), 600.0).unwrap();
        assert!((p.lat - 10.005).abs() < EPS);
        assert!((p.lon - 20.005).abs() < EPS);
    }

    #[test]
    fn exact_timestamp_returns_fix() {
        let tr = trace();
        assert_eq!(tr.position_at(SimTime(0.0), 600.0), Some(GeoPoint::new(10.0, 20.0)));
        assert_eq!(tr.position_at(SimTime(10.0), 600.0), Some(GeoPoint::new(10.01, 20.01)));
    }

    #[test]
    fn idempotent() {
        let tr = trace();
        assert_eq!(tr.position_at(SimTime(3.3), 600.0), tr.position_at(SimTime(3.3), 600.0));
    }

    #[test]
    fn inactive_before_first_fix() {
        assert_eq!(trace().position_at(SimTime(-0.5), 600.0), None);
    }

    #[test]
    fn holds_last_fix_until_threshold() {
        let tr = trace();
        assert_eq!(tr.position_at(SimTime(610.0), 600.0), Some(GeoPoint::new(10.01, 20.01)));
        assert_eq!(tr.position_at(SimTime(610.5), 600.0), None);
    }

    #[test]
    fn construction_sorts_and_dedups() {
        let tr = GpsTrace::new(
            VehicleId(1),
            "x",
            vec![
                GpsSample::new(SimTime(30.0), 3.0, 3.0),
                GpsSample::new(SimTime(10.0), 1.0, 1.0),
                GpsSample::new(SimTime(30.0), 9.0, 9.0),
                GpsSample::new(SimTime(f64::NAN), 0.0, 0.0),
                GpsSample::new(SimTime(20.0), 2.0, 2.0),
            ],
        );
        let times: Vec<f64> = tr.samples().iter().map(|s| s.time.0).collect();
        assert_eq!(times, vec![10.0, 20.0, 30.0]);
        assert_eq!(tr.samples()[2].position, GeoPoint::new(3.0, 3.0));
        assert_eq!(tr.time_range(), Some((SimTime(10.0), SimTime(30.0))));
    }

    #[test]
    fn windowed_query_matches_unwindowed_inside_window() {
        let tr = GpsTrace::new(
            VehicleId(0),
            "w",
            vec![
                GpsSample::new(SimTime(0.0), 0.0, 0.0),
                GpsSample::new(SimTime(10.0), 1.0, 1.0),
                GpsSample::new(SimTime(100.0), 2.0, 2.0),
            ],
        );
        assert_eq!(tr.position_within(SimTime(4.0), 10.0), tr.position_at(SimTime(4.0), 600.0));
        // No fix in [30, 70]: inactive in the window, interpolated without it.
        assert_eq!(tr.position_within(SimTime(50.0), 20.0), None);
        assert!(tr.position_at(SimTime(50.0), 600.0).is_some());
        // Last fix in the window is held for the radius.
        assert_eq!(tr.position_within(SimTime(105.0), 10.0), Some(GeoPoint::new(2.0, 2.0)));
    }

    #[test]
    fn empty_trace_is_inactive() {
        let tr = GpsTrace::new(VehicleId(0), "e", vec![]);
        assert!(tr.is_empty());
        assert_eq!(tr.position_at(SimTime(0.0), 600.0), None);
        assert_eq!(tr.time_range(), None);
    }
}

// ── TraceSet ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod traces {
    use chrono::NaiveDate;
    use ts_core::{SimTime, VehicleId};

    use crate::{GpsSample, TraceSet};

    // 2008-05-17 00:00:00 UTC
    const DAY: f64 = 1_210_982_400.0;

    fn set() -> TraceSet {
        let mut s = TraceSet::new();
        s.push("abboip", vec![
            GpsSample::new(SimTime(DAY + 100.0), 37.75, -122.39),
            GpsSample::new(SimTime(DAY + 200.0), 37.76, -122.40),
        ]);
        s.push("udwadla", vec![
            GpsSample::new(SimTime(DAY + 90_000.0), 37.70, -122.41),
        ]);
        s
    }

    #[test]
    fn ids_and_labels() {
        let s = set();
        assert_eq!(s.len(), 2);
        assert_eq!(s.by_label("udwadla").unwrap().vehicle, VehicleId(1));
        assert!(s.by_label("missing").is_none());
        assert_eq!(s.get(VehicleId(0)).unwrap().label, "abboip");
        assert_eq!(s.sample_count(), 3);
    }

    #[test]
    fn time_and_date_ranges() {
        let s = set();
        assert_eq!(s.time_range(), Some((SimTime(DAY + 100.0), SimTime(DAY + 90_000.0))));
        assert_eq!(
            s.date_range(),
            Some((
                NaiveDate::from_ymd_opt(2008, 5, 17).unwrap(),
                NaiveDate::from_ymd_opt(2008, 5, 18).unwrap(),
            ))
        );
        assert_eq!(TraceSet::new().time_range(), None);
    }

    #[test]
    fn positions_at_filters_inactive() {
        let s = set();
        let active: Vec<_> = s.positions_at(SimTime(DAY + 150.0), 600.0).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].0, VehicleId(0));

        let none: Vec<_> = s.positions_at(SimTime(DAY + 5_000.0), 600.0).collect();
        assert!(none.is_empty());

        let windowed: Vec<_> = s.positions_within(SimTime(DAY + 150.0), 60.0).collect();
        assert_eq!(windowed.len(), 1);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use ts_core::SimTime;

    use crate::{load_trace_dir, load_trace_reader, MotionError};

    const ROWS: &str = "\
37.75134 -122.39488 0 1213084687
37.75136 -122.39527 0 1213084659
not a row
37.75199 -122.3946 1 1213084540
";

    #[test]
    fn reader_skips_bad_rows() {
        let samples = load_trace_reader(Cursor::new(ROWS), "cab");
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].time, SimTime(1_213_084_687.0));
        assert!((samples[2].position.lat - 37.75199).abs() < 1e-9);
    }

    #[test]
    fn directory_load() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, body: &str| {
            let mut f = std::fs::File::create(dir.path().join(name)).unwrap();
            f.write_all(body.as_bytes()).unwrap();
        };
        write("new_b.txt", ROWS);
        write("new_a.txt", "37.7 -122.4 0 1213000000\n");
        write("junk.txt", "garbage\n");
        write("notes.md", ROWS);

        let set = load_trace_dir(dir.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next().unwrap().label, "new_a");
        // Rows were out of order in the file.
        let b = set.by_label("new_b").unwrap();
        assert_eq!(b.samples()[0].time, SimTime(1_213_084_540.0));
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_trace_dir(dir.path()), Err(MotionError::NoTraces(_))));
    }
}
