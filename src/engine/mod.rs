//! Deterministic sampling engine.
//!
//! Holds the random-source abstraction the Monte Carlo estimator and the
//! display scatter consume. Every stochastic operation in this crate takes an
//! explicitly injected source, never a freshly seeded ambient generator, so
//! runs are reproducible and tests can substitute scripted sources.

pub mod rng;

pub use rng::{RandomSource, SegRng};
