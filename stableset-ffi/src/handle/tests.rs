//! Tests for the `StableSolver` handle.

use super::*;
use crate::ledger::Resource;
use rstest::{fixture, rstest};
use stableset_core::ErrorKind;

fn id(index: usize) -> VertexId {
    VertexId::new(index)
}

#[fixture]
fn four_cycle() -> StableSolver {
    let mut solver = StableSolver::new().expect("handle should be created");
    for weight in [10, 20, 15, 25] {
        solver.add_vertex(weight).expect("vertex should be added");
    }
    solver
        .add_edge(id(0), id(1))
        .and_then(|s| s.add_edge(id(1), id(3)))
        .and_then(|s| s.add_edge(id(3), id(2)))
        .and_then(|s| s.add_edge(id(2), id(0)))
        .expect("edges should be added");
    solver
}

#[rstest]
fn phases_advance_with_the_lifecycle(mut four_cycle: StableSolver) {
    assert_eq!(four_cycle.phase(), Phase::Building);
    four_cycle.build().expect("build should succeed");
    assert_eq!(four_cycle.phase(), Phase::Built);

    let result = four_cycle.solve().expect("solve should succeed");
    assert_eq!(four_cycle.phase(), Phase::Solved);
    assert!(result.is_feasible());
    assert_eq!(result.len(), 2);

    four_cycle.dispose();
    assert_eq!(four_cycle.phase(), Phase::Released);
}

#[rstest]
#[case(Strategy::GREEDY_GWMIN)]
#[case(Strategy::GREEDY_GWMAX)]
#[case(Strategy::GREEDY_GWMIN2)]
#[case(Strategy::GREEDY_STRONG)]
#[case(Strategy::EXACT)]
fn every_strategy_reaches_weight_35(mut four_cycle: StableSolver, #[case] strategy: Strategy) {
    four_cycle.build().expect("build should succeed");
    let result = four_cycle.solve_with(strategy).expect("solve should succeed");
    let weights = [10, 20, 15, 25];
    let total: i64 = result
        .vertices()
        .iter()
        .filter_map(|v| weights.get(v.get()))
        .sum();
    assert_eq!(total, 35);
}

#[rstest]
fn solving_before_build_is_invalid_state(mut four_cycle: StableSolver) {
    let err = four_cycle.solve().expect_err("solve should fail");
    assert_eq!(
        err,
        StableSetError::InvalidState {
            operation: "solve",
            phase: Phase::Building
        }
    );
}

#[rstest]
fn mutation_after_build_matches_the_builder(mut four_cycle: StableSolver) {
    four_cycle.build().expect("build should succeed");
    let err = four_cycle
        .add_edge(id(0), id(3))
        .map(|_| ())
        .expect_err("mutation should fail");
    assert_eq!(
        err,
        StableSetError::InvalidState {
            operation: "add an edge",
            phase: Phase::Built
        }
    );
    let result = four_cycle
        .solve_with(Strategy::EXACT)
        .expect("solve should succeed");
    assert_eq!(result.len(), 2);
}

#[rstest]
fn calls_after_dispose_fail_cleanly(mut four_cycle: StableSolver) {
    four_cycle.build().expect("build should succeed");
    four_cycle.dispose();
    four_cycle.dispose();

    let add = four_cycle
        .add_vertices(1)
        .map(|_| ())
        .expect_err("add should fail");
    assert_eq!(add.kind(), ErrorKind::InvalidState);
    let solve = four_cycle.solve().expect_err("solve should fail");
    assert_eq!(solve.kind(), ErrorKind::InvalidState);
}

#[rstest]
fn configured_policy_applies_to_add_edge() {
    let config = SolverConfig::default().with_duplicate_policy(DuplicatePolicy::Reject);
    let mut solver = StableSolver::with_config(config).expect("handle should be created");
    solver.add_vertices(2).expect("vertices should be added");
    solver.add_edge(id(0), id(1)).expect("first edge should be added");
    let err = solver
        .add_edge(id(1), id(0))
        .map(|_| ())
        .expect_err("duplicate should be rejected");
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    solver
        .add_edge_with(id(1), id(0), DuplicatePolicy::Skip)
        .expect("skip should succeed");
}

#[rstest]
fn unknown_strategy_is_an_engine_failure_not_infeasibility(mut four_cycle: StableSolver) {
    four_cycle.build().expect("build should succeed");
    let err = four_cycle
        .solve_with(Strategy::from_raw(0))
        .expect_err("strategy should be rejected");
    assert_eq!(err.kind(), ErrorKind::ExternalSolverFailure);
    assert_eq!(four_cycle.phase(), Phase::Built);
}

#[rstest]
fn resolving_releases_the_previous_buffer(mut four_cycle: StableSolver) {
    four_cycle.build().expect("build should succeed");
    four_cycle.solve().expect("solve should succeed");
    four_cycle
        .solve_with(Strategy::EXACT)
        .expect("solve should succeed");
    assert_eq!(
        four_cycle.ledger.release_all(),
        vec![Resource::ResultBuffer, Resource::Instance, Resource::Builder]
    );
}
