//! Board integration tests — graph construction and the steering tick loop.

use couzin_runtime::prelude::*;

fn fixed(points: &[(f64, f64)]) -> impl FnOnce(&mut Board) -> Vec<Agent> + '_ {
    move |_| {
        points
            .iter()
            .map(|&(x, y)| Agent::generic(Vector2D::new(x, y)))
            .collect()
    }
}

fn random_generic(n: usize, m: f64, seed: u64) -> Board {
    BoardBuilder::new()
        .agent_count(n)
        .half_extent(m)
        .seed(seed)
        .build(|b| Population::Generic.spawn(b))
        .unwrap()
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn random_points_stay_inside_the_box() {
    let mut board = random_generic(200, 3.0, 11);
    for p in board.positions() {
        assert!(p.x.abs() <= 3.0 && p.y.abs() <= 3.0, "{:?} escaped", p);
    }
    for _ in 0..500 {
        let p = board.random_point();
        assert!(p.x.abs() <= 3.0 && p.y.abs() <= 3.0);
        let o = board.random_orientation();
        assert!((o.length() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn factory_count_mismatch_fails_fast() {
    let err = BoardBuilder::new()
        .agent_count(3)
        .build(fixed(&[(0.0, 0.0), (1.0, 0.0)]))
        .unwrap_err();
    assert_eq!(
        err,
        CouzinError::Construction(ConstructionError::AgentCountMismatch {
            expected: 3,
            found: 2
        })
    );
}

#[test]
fn invalid_steering_geometry_is_rejected() {
    let err = BoardBuilder::new()
        .agent_count(2)
        .with_steering(SteeringConfig::new(3.0, 2.0, 16.0, 1))
        .build(fixed(&[(0.0, 0.0), (1.0, 0.0)]))
        .unwrap_err();
    assert!(matches!(err, CouzinError::Config(_)));
}

// ── Adjacency and Laplacian properties ──────────────────────────────

#[test]
fn radius_adjacency_is_symmetric_with_zero_diagonal() {
    let board = random_generic(40, 5.0, 2);
    for (max_r, min_r) in [(2.0, 0.0), (4.0, 1.0), (20.0, 3.0)] {
        let a = board.radius_adjacency(max_r, min_r);
        for i in 0..board.n() {
            assert!(!a.get(i, i));
            for j in 0..board.n() {
                assert_eq!(a.get(i, j), a.get(j, i), "asymmetric at ({}, {})", i, j);
            }
        }
    }
}

#[test]
fn radius_adjacency_is_idempotent() {
    let board = random_generic(30, 5.0, 8);
    assert_eq!(board.radius_adjacency(3.0, 0.5), board.radius_adjacency(3.0, 0.5));
}

#[test]
fn nearest_adjacency_has_k_ones_per_row() {
    let board = random_generic(12, 5.0, 4);
    for k in 1..board.n() {
        let nn = board.nearest_adjacency(k);
        for i in 0..board.n() {
            assert_eq!(nn.adjacency.out_degree(i), k, "row {} with k = {}", i, k);
            assert_eq!(nn.neighbors_of(i).len(), k);
            assert!(!nn.adjacency.get(i, i));
        }
    }
}

#[test]
fn nearest_adjacency_clamps_large_k() {
    let board = random_generic(4, 5.0, 4);
    let nn = board.nearest_adjacency(10);
    for i in 0..4 {
        assert_eq!(nn.adjacency.out_degree(i), 3);
    }
}

#[test]
fn symmetric_laplacian_rows_sum_to_zero() {
    let board = random_generic(25, 4.0, 6);
    let l = Board::laplacian(&board.radius_adjacency(3.0, 0.0));
    for (i, s) in l.row_sums().into_iter().enumerate() {
        assert!(s.abs() < 1e-12, "row {} sums to {}", i, s);
    }
}

#[test]
fn full_radius_graph_is_connected_and_empty_graph_is_not() {
    let board = random_generic(15, 2.0, 3);
    // Diameter of [-2, 2]² is below 6.
    let full = Board::laplacian(&board.radius_adjacency(6.0, 0.0));
    assert!(Board::is_connected(&full, DEFAULT_TOLERANCE));

    let empty = Board::laplacian(&AdjacencyMatrix::zeros(15, true));
    assert!(!Board::is_connected(&empty, DEFAULT_TOLERANCE));
}

#[test]
fn two_agent_scenario() {
    let board = BoardBuilder::new()
        .agent_count(2)
        .build(fixed(&[(0.0, 0.0), (3.0, 0.0)]))
        .unwrap();
    let a = board.radius_adjacency(5.0, 0.0);
    assert_eq!(a.to_rows(), vec![vec![0, 1], vec![1, 0]]);

    let l = Board::laplacian(&a);
    assert_eq!(l.get(0, 0), 1.0);
    assert_eq!(l.get(0, 1), -1.0);
    let ev = l.eigenvalues();
    assert!(ev[0].abs() < 1e-9 && (ev[1] - 2.0).abs() < 1e-9, "eigenvalues {:?}", ev);
    assert!(Board::is_connected(&l, DEFAULT_TOLERANCE));
}

#[test]
fn three_agents_in_a_line_are_disconnected() {
    let board = BoardBuilder::new()
        .agent_count(3)
        .build(fixed(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]))
        .unwrap();
    let a = board.radius_adjacency(5.0, 0.0);
    assert_eq!(a.nonzero_count(), 0);
    let l = Board::laplacian(&a);
    assert!((0..3).all(|i| (0..3).all(|j| l.get(i, j) == 0.0)));
    assert!(!Board::is_connected(&l, DEFAULT_TOLERANCE));

    let metrics = Board::connectivity(&a, DEFAULT_TOLERANCE);
    assert_eq!(metrics.components, 3);
    assert!(!metrics.connected);
}

// ── Tick loop ───────────────────────────────────────────────────────

#[test]
fn prey_dies_in_place_on_the_same_tick() {
    let mut board = BoardBuilder::new()
        .agent_count(3)
        .build(|_| {
            vec![
                Agent::prey(Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 0.0)),
                Agent::predator(Vector2D::new(0.5, 0.0), Vector2D::new(1.0, 0.0)),
                Agent::prey(Vector2D::new(30.0, 0.0), Vector2D::new(1.0, 0.0)),
            ]
        })
        .unwrap();

    let report = board.step().unwrap();
    assert_eq!(report.tick, 0);
    assert_eq!(report.deaths, vec![0]);
    assert_eq!(board.n(), 3);
    assert_eq!(board.agents().len(), 3);

    let dead = board.agent(0).unwrap();
    assert_eq!(dead.kind(), Kind::Dead);
    assert_eq!(dead.index(), 0);
    assert_eq!(dead.speed(), 0.0);
    assert_eq!(dead.position(), Vector2D::new(0.0, 0.0));
    assert_eq!(board.total_died(), 1);
    assert_eq!(board.tick(), 1);
}

#[test]
fn generic_agents_fail_the_tick_without_side_effects() {
    let mut board = random_generic(5, 2.0, 0);
    let before = board.positions();
    let err = board.step().unwrap_err();
    assert!(matches!(err, CouzinError::Agent(AgentError::NotImplemented { .. })));
    assert_eq!(board.tick(), 0);
    assert_eq!(board.positions(), before);
}

#[test]
fn run_stops_at_the_first_failing_tick() {
    let mut board = random_generic(3, 2.0, 0);
    let err = board.run(u64::MAX).unwrap_err();
    assert!(matches!(err, CouzinError::Agent(AgentError::NotImplemented { .. })));
    assert_eq!(board.tick(), 0);
    assert!(board.run(0).unwrap().is_empty());
}

#[test]
fn identical_seeds_give_identical_trajectories() {
    let build = || {
        BoardBuilder::new()
            .agent_count(30)
            .half_extent(4.0)
            .seed(99)
            .build(|b| Population::Topological.spawn(b))
            .unwrap()
    };
    let mut a = build();
    let mut b = build();
    a.run(25).unwrap();
    b.run(25).unwrap();
    assert_eq!(a.positions(), b.positions());
}

#[test]
fn predator_prey_run_preserves_population_size() {
    let mut board = BoardBuilder::new()
        .agent_count(50)
        .half_extent(5.0)
        .seed(3)
        .build(|b| Population::pred_prey().spawn(b))
        .unwrap();
    let predators = board.count(Kind::Predator);
    let reports = board.run(60).unwrap();

    assert_eq!(reports.len(), 60);
    assert_eq!(board.agents().len(), 50);
    assert_eq!(board.count(Kind::Predator), predators);
    assert_eq!(board.count(Kind::Prey) + board.count(Kind::Dead), 50 - predators);

    let reported: usize = reports.iter().map(|r| r.deaths.len()).sum();
    assert_eq!(reported, board.count(Kind::Dead));
    for (i, agent) in board.agents().iter().enumerate() {
        assert_eq!(agent.index(), i);
    }
}

#[test]
fn nearest_swarm_runs_and_reports_zone_edges() {
    let mut board = BoardBuilder::new()
        .agent_count(20)
        .half_extent(3.0)
        .seed(12)
        .with_steering(SteeringConfig::new(1.0, 2.0, 16.0, 4))
        .build(|b| Population::Nearest.spawn(b))
        .unwrap();
    let report = board.step().unwrap();
    assert_eq!(report.zones.nearest_edges, 20 * 4);

    let metrics = SwarmMetrics::measure(&board, DEFAULT_TOLERANCE);
    assert_eq!(metrics.tick, 1);
    assert!(metrics.polarization >= 0.0 && metrics.polarization <= 1.0 + 1e-12);
}

#[test]
fn snapshot_serializes_for_external_renderers() {
    let board = BoardBuilder::new()
        .agent_count(2)
        .build(|_| {
            vec![
                Agent::topological(Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 0.0)),
                Agent::predator(Vector2D::new(1.0, 0.0), Vector2D::new(0.0, 1.0)),
            ]
        })
        .unwrap();
    let json = serde_json::to_value(board.snapshot()).unwrap();
    assert_eq!(json["tick"], 0);
    assert_eq!(json["agents"][1]["kind"], "predator");
    assert_eq!(json["agents"][0]["position"]["x"], 0.0);
}
