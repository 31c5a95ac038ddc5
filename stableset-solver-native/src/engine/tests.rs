//! Tests for the `NativeEngine`.

use super::*;
use rstest::rstest;
use stableset_core::test_support::{four_cycle, triangle, weighted_graph};
use stableset_core::{SolveResult, StableSetError, VertexId, Weight, solve};

fn solve_with(instance: &Instance, strategy: Strategy) -> SolveResult {
    solve(&NativeEngine::new(), instance, strategy).expect("solve should succeed")
}

#[rstest]
#[case(Strategy::GREEDY_GWMIN)]
#[case(Strategy::GREEDY_GWMAX)]
#[case(Strategy::GREEDY_GWMIN2)]
#[case(Strategy::GREEDY_STRONG)]
#[case(Strategy::EXACT)]
fn every_strategy_solves_the_four_cycle(#[case] strategy: Strategy) {
    let instance = four_cycle().build().expect("build should succeed");
    let result = solve_with(&instance, strategy);
    assert!(result.is_feasible());
    assert_eq!(result.weight(&instance), 35);
}

#[rstest]
#[case(Strategy::GREEDY_GWMIN)]
#[case(Strategy::GREEDY_GWMAX)]
#[case(Strategy::GREEDY_GWMIN2)]
#[case(Strategy::GREEDY_STRONG)]
#[case(Strategy::EXACT)]
fn every_strategy_picks_the_heaviest_triangle_vertex(#[case] strategy: Strategy) {
    let instance = triangle().build().expect("build should succeed");
    assert_eq!(solve_with(&instance, strategy).vertices(), &[VertexId::new(2)]);
}

#[rstest]
fn empty_instance_is_feasible_and_empty() {
    let instance = weighted_graph(&[], &[]).build().expect("build should succeed");
    let result = solve_with(&instance, Strategy::EXACT);
    assert!(result.is_feasible());
    assert!(result.is_empty());
}

#[rstest]
fn unweighted_builder_maximises_cardinality() {
    // With weights honoured the centre wins; unweighted, the three leaves do.
    let mut builder = weighted_graph(&[100, 1, 1, 1], &[(0, 1), (0, 2), (0, 3)]);
    builder.set_unweighted().expect("builder accepts mutations");
    let instance = builder.build().expect("build should succeed");
    assert_eq!(solve_with(&instance, Strategy::EXACT).len(), 3);
}

#[rstest]
#[case(0)]
#[case(6)]
#[case(-1)]
fn unknown_strategies_are_engine_failures(#[case] raw: i32) {
    let instance = triangle().build().expect("build should succeed");
    let err = solve(&NativeEngine::new(), &instance, Strategy::from_raw(raw))
        .expect_err("strategy should be rejected");
    assert_eq!(
        err,
        StableSetError::ExternalSolverFailure(EngineError::UnsupportedStrategy(
            Strategy::from_raw(raw)
        ))
    );
}

#[rstest]
fn node_limit_still_returns_a_stable_set() {
    let engine = NativeEngine::with_config(NativeEngineConfig {
        node_limit: Some(1),
        ..NativeEngineConfig::default()
    });
    let instance = weighted_graph(&[5, 2, 2, 2], &[(0, 1), (0, 2), (0, 3)])
        .build()
        .expect("build should succeed");
    let result = solve(&engine, &instance, Strategy::EXACT).expect("solve should succeed");
    assert!(instance.is_stable_set(result.vertices()));
    assert!(result.weight(&instance) >= 5);
}

#[rstest]
fn node_limit_bounds_the_search_on_a_long_path() {
    let weights: Vec<Weight> = [3, 1, 4, 1, 5, 9, 2, 6]
        .into_iter()
        .cycle()
        .take(500)
        .collect();
    let edges: Vec<(usize, usize)> = (1..weights.len()).map(|v| (v - 1, v)).collect();
    let instance = weighted_graph(&weights, &edges)
        .build()
        .expect("build should succeed");
    let engine = NativeEngine::with_config(NativeEngineConfig {
        node_limit: Some(5_000),
        ..NativeEngineConfig::default()
    });
    let result = solve(&engine, &instance, Strategy::EXACT).expect("solve should succeed");
    assert!(result.is_feasible());
    assert!(instance.is_stable_set(result.vertices()));
    assert!(result.weight(&instance) > 0);
}

#[cfg(feature = "serde")]
#[rstest]
fn config_deserialises_with_defaults() {
    let config: NativeEngineConfig =
        serde_json::from_str(r#"{ "node_limit": 500 }"#).expect("valid config");
    assert_eq!(config.node_limit, Some(500));
    assert_eq!(config.local_search_rounds, 100);
}
