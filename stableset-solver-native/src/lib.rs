//! Native, in-process stable set engine.
//!
//! This crate provides [`NativeEngine`], the default implementation of the
//! [`StableSetEngine`](stableset_core::StableSetEngine) trait. It understands
//! the strategy selectors named on [`Strategy`](stableset_core::Strategy):
//! three greedy rules, a "strong" greedy that polishes the best greedy
//! solution with weighted swap local search, and an exact branch-and-bound
//! search for instances small enough to prove optimality.
//!
//! Every ratio used for greedy selection is compared by integer
//! cross-multiplication, so results are deterministic across platforms.
//! Any other selector is reported as
//! [`EngineError::UnsupportedStrategy`](stableset_core::EngineError::UnsupportedStrategy).

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod engine;
mod exact;
mod greedy;
mod residual;

pub use engine::{NativeEngine, NativeEngineConfig};
