//! Behavioural tests for the `GraphBuilder` lifecycle using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use stableset_core::{DuplicatePolicy, ErrorKind, GraphBuilder, Instance, StableSetError, VertexId};

#[derive(Debug, Default)]
struct BuilderWorld {
    builder: RefCell<GraphBuilder>,
    instance: RefCell<Option<Instance>>,
    last: RefCell<Option<Result<(), StableSetError>>>,
}

impl BuilderWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn last_outcome(&self) -> Result<(), StableSetError> {
        self.last
            .borrow()
            .clone()
            .expect("a call should be recorded before assertions")
    }
}

#[fixture]
fn world() -> BuilderWorld {
    BuilderWorld::default()
}

fn parse_policy(name: &str) -> DuplicatePolicy {
    match name {
        "skip" => DuplicatePolicy::Skip,
        "reject" => DuplicatePolicy::Reject,
        _ => DuplicatePolicy::Ignore,
    }
}

#[given("a builder with {count} vertices")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn given_builder(world: &BuilderWorld, count: usize) {
    world
        .builder
        .borrow_mut()
        .add_vertices(count)
        .expect("vertices should be added");
}

#[when("an edge from {u} to {v} is added with policy {policy}")]
fn when_edge_added(world: &BuilderWorld, u: usize, v: usize, policy: String) {
    let outcome = world
        .builder
        .borrow_mut()
        .add_edge(VertexId::new(u), VertexId::new(v), parse_policy(&policy))
        .map(|_| ());
    world.last.replace(Some(outcome));
}

#[when("the builder is built")]
fn when_built(world: &BuilderWorld) {
    let outcome = world.builder.borrow_mut().build();
    let recorded = outcome.map(|instance| {
        world.instance.replace(Some(instance));
    });
    world.last.replace(Some(recorded));
}

#[then("the last call succeeds")]
fn then_succeeds(world: &BuilderWorld) {
    assert!(world.last_outcome().is_ok());
}

#[then("the last call fails with AlreadyExists")]
fn then_already_exists(world: &BuilderWorld) {
    let outcome = world.last_outcome();
    assert!(matches!(outcome, Err(ref err) if err.kind() == ErrorKind::AlreadyExists));
}

#[then("the last call fails with InvalidState")]
fn then_invalid_state(world: &BuilderWorld) {
    let outcome = world.last_outcome();
    assert!(matches!(outcome, Err(ref err) if err.kind() == ErrorKind::InvalidState));
}

#[then("the builder holds {count} edges")]
fn then_builder_edges(world: &BuilderWorld, count: usize) {
    assert_eq!(world.builder.borrow().number_of_edges(), count);
}

#[then("the instance holds {count} edges")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_instance_edges(world: &BuilderWorld, count: usize) {
    let instance = world.instance.borrow();
    let built = instance.as_ref().expect("instance should have been built");
    assert_eq!(built.number_of_edges(), count);
}

#[scenario(path = "tests/features/graph_builder.feature", index = 0)]
fn rejected_duplicates(world: BuilderWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/graph_builder.feature", index = 1)]
fn skipped_duplicates(world: BuilderWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/graph_builder.feature", index = 2)]
fn double_build(world: BuilderWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/graph_builder.feature", index = 3)]
fn mutation_after_build(world: BuilderWorld) {
    let _ = world;
}
