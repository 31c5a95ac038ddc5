//! Behavioural tests for `NativeEngine` strategies using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use stableset_core::test_support::{four_cycle, triangle, weighted_graph};
use stableset_core::{ErrorKind, Instance, SolveResult, StableSetError, Strategy, VertexId, solve};
use stableset_solver_native::NativeEngine;

#[derive(Debug, Default)]
struct EngineWorld {
    engine: NativeEngine,
    instance: RefCell<Option<Instance>>,
    outcome: RefCell<Option<Result<SolveResult, StableSetError>>>,
}

impl EngineWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn result(&self) -> SolveResult {
        self.outcome
            .borrow()
            .clone()
            .expect("a solve should be recorded before assertions")
            .expect("solve should succeed")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn install(&self, builder: &mut stableset_core::GraphBuilder) {
        let instance = builder.build().expect("fixture should build");
        self.instance.replace(Some(instance));
    }
}

#[fixture]
fn world() -> EngineWorld {
    EngineWorld::default()
}

#[given("the weighted 4-cycle")]
fn given_four_cycle(world: &EngineWorld) {
    world.install(&mut four_cycle());
}

#[given("the weighted triangle")]
fn given_triangle(world: &EngineWorld) {
    world.install(&mut triangle());
}

#[given("an empty graph")]
fn given_empty(world: &EngineWorld) {
    world.install(&mut weighted_graph(&[], &[]));
}

#[when("it is solved with strategy {raw}")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_solved(world: &EngineWorld, raw: i32) {
    let instance = world.instance.borrow();
    let graph = instance.as_ref().expect("an instance should be installed");
    let outcome = solve(&world.engine, graph, Strategy::from_raw(raw));
    world.outcome.replace(Some(outcome));
}

#[then("the result is feasible with weight {weight}")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_feasible_with_weight(world: &EngineWorld, weight: i64) {
    let result = world.result();
    let instance = world.instance.borrow();
    let graph = instance.as_ref().expect("an instance should be installed");
    assert!(result.is_feasible());
    assert_eq!(result.weight(graph), i128::from(weight));
}

#[then("the result selects exactly vertex {vertex}")]
fn then_selects_vertex(world: &EngineWorld, vertex: usize) {
    assert_eq!(world.result().vertices(), &[VertexId::new(vertex)]);
}

#[then("the result selects no vertices")]
fn then_selects_nothing(world: &EngineWorld) {
    assert!(world.result().is_empty());
}

#[then("the solve fails with ExternalSolverFailure")]
fn then_engine_failure(world: &EngineWorld) {
    let outcome = world.outcome.borrow();
    assert!(matches!(
        outcome.as_ref(),
        Some(Err(err)) if err.kind() == ErrorKind::ExternalSolverFailure
    ));
}

#[scenario(path = "tests/features/native_engine.feature", index = 0)]
fn greedy_strategies_on_the_four_cycle(world: EngineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/native_engine.feature", index = 1)]
fn exact_strategy_on_the_triangle(world: EngineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/native_engine.feature", index = 2)]
fn empty_graph(world: EngineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/native_engine.feature", index = 3)]
fn unknown_strategy(world: EngineWorld) {
    let _ = world;
}
