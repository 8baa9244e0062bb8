//! # segmental
//!
//! Computes the area of the larger segment formed when a circle is cut by an
//! axis-aligned line, using two independent methods:
//! - a closed-form analytic formula ([`geometry`])
//! - a Monte Carlo rejection-sampling estimator ([`montecarlo`])
//!
//! The two results are assembled into a comparison record and handed to a
//! pluggable [`storage::Storage`] backend, so accuracy and convergence of the
//! stochastic method can be analyzed against the exact value.
//!
//! ## Example
//!
//! ```rust
//! use segmental::prelude::*;
//!
//! let circle = Circle::new(0.0, 0.0, 3.0);
//! let cut = CutLine::vertical(1.0);
//!
//! let exact = segment_area(&circle, &cut);
//! let mut rng = SegRng::new(42);
//! let outcome = MonteCarloEstimator::new(1_000_000).estimate(&circle, &cut, &mut rng);
//! assert!((outcome.estimate - exact).abs() < 0.01 * exact);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Numerical code choices are intentional
    clippy::imprecise_flops,
    clippy::missing_const_for_fn
)]

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod montecarlo;
pub mod recorder;
pub mod render;
pub mod storage;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::engine::rng::{RandomSource, SegRng};
    pub use crate::error::{SegError, SegResult};
    pub use crate::geometry::{segment_area, Circle, CutLine, Orientation, Side};
    pub use crate::montecarlo::{EstimateOutcome, MonteCarloEstimator};
    pub use crate::recorder::{ComputationResult, RawInputs, RecordOutcome, ResultRecorder};
    pub use crate::storage::{MemoryStorage, Storage};
}

/// Re-export for public API
pub use error::{SegError, SegResult};
