//! Input validation and result recording.
//!
//! The recorder is the numeric boundary of the system: raw text fields come
//! in, both engines run on one validated snapshot, and the assembled
//! [`ComputationResult`] goes to the storage collaborator. Two error tiers
//! apply, matching the contract:
//! - geometry fields and orientation fail hard ([`SegError::Validation`],
//!   nothing computed);
//! - a missing or unparsable sample count silently recovers to the default
//!   and proceeds.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::engine::rng::RandomSource;
use crate::error::{SegError, SegResult};
use crate::geometry::{segment_area, Circle, CutLine, Orientation};
use crate::montecarlo::MonteCarloEstimator;
use crate::storage::{RecordId, Storage};

/// Sample count substituted when the raw field is missing or unparsable.
pub const DEFAULT_SAMPLES: u64 = 20_000;

/// Upper bound on the sample count; larger requests clamp here.
pub const MAX_SAMPLES: u64 = 10_000_000;

/// Raw text fields as supplied by a caller.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    /// Center x coordinate.
    pub x0: String,
    /// Center y coordinate.
    pub y0: String,
    /// Radius, must parse to a finite value > 0.
    pub r: String,
    /// Cut offset along the cut axis.
    pub offset: String,
    /// One of the two human labels, "vertical" or "horizontal".
    pub orientation: String,
    /// Sample count; empty or garbage recovers to [`DEFAULT_SAMPLES`].
    pub samples: String,
}

/// A fully validated parameter snapshot, ready for both engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInputs {
    /// The circle.
    pub circle: Circle,
    /// The cutting line.
    pub cut: CutLine,
    /// Clamped sample count, `1 ..= MAX_SAMPLES`.
    pub samples: u64,
}

/// One comparison record: both areas from the same snapshot.
///
/// Immutable once created; durable retention belongs to the storage
/// collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationResult {
    /// The validated circle.
    pub circle: Circle,
    /// The validated cut.
    pub cut: CutLine,
    /// Sample count the estimator consumed.
    pub samples: u64,
    /// Closed-form larger-segment area.
    pub formula_area: f64,
    /// Monte Carlo larger-segment estimate.
    pub monte_carlo_area: f64,
    /// Capture timestamp, `yyyy-MM-dd HH:mm:ss`.
    pub recorded_at: String,
}

impl ComputationResult {
    /// Absolute difference between the two methods.
    #[must_use]
    pub fn difference(&self) -> f64 {
        (self.formula_area - self.monte_carlo_area).abs()
    }
}

/// Outcome of a successful computation, with the persistence step reported
/// separately: a storage failure never discards the computed result.
#[derive(Debug)]
pub struct RecordOutcome {
    /// The computed comparison record.
    pub result: ComputationResult,
    /// Id assigned by storage, or the persistence error (no retry).
    pub stored: Result<RecordId, SegError>,
}

/// Validates raw inputs, runs both engines, and forwards the result to the
/// storage collaborator.
#[derive(Debug)]
pub struct ResultRecorder<S: Storage> {
    storage: S,
}

impl<S: Storage> ResultRecorder<S> {
    /// Create a recorder over the given storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Borrow the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the recorder, returning the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Validate, compute both areas from the one snapshot, and append the
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`SegError::Validation`] when any geometry field or the
    /// orientation is unparsable or out of domain; in that case nothing is
    /// computed or persisted. A storage failure is *not* an `Err`: it is
    /// reported in [`RecordOutcome::stored`] alongside the surviving result.
    pub fn compute_and_record<R: RandomSource>(
        &mut self,
        raw: &RawInputs,
        rng: &mut R,
    ) -> SegResult<RecordOutcome> {
        let inputs = validate(raw)?;

        let formula_area = segment_area(&inputs.circle, &inputs.cut);
        let monte_carlo_area = MonteCarloEstimator::new(inputs.samples)
            .estimate(&inputs.circle, &inputs.cut, rng)
            .estimate;

        let result = ComputationResult {
            circle: inputs.circle,
            cut: inputs.cut,
            samples: inputs.samples,
            formula_area,
            monte_carlo_area,
            recorded_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        // Exactly one append per successful invocation; no retry.
        let stored = self.storage.append(&result);

        Ok(RecordOutcome { result, stored })
    }
}

/// Parse and validate raw inputs into a snapshot.
///
/// # Errors
///
/// Returns [`SegError::Validation`] naming the first offending field.
pub fn validate(raw: &RawInputs) -> SegResult<ValidatedInputs> {
    let x0 = parse_finite("x0", &raw.x0)?;
    let y0 = parse_finite("y0", &raw.y0)?;
    let r = parse_finite("r", &raw.r)?;
    if r <= 0.0 {
        return Err(SegError::validation("r", raw.r.trim()));
    }
    let offset = parse_finite("offset", &raw.offset)?;

    let orientation = Orientation::parse(&raw.orientation)
        .ok_or_else(|| SegError::validation("orientation", raw.orientation.trim()))?;

    Ok(ValidatedInputs {
        circle: Circle::new(x0, y0, r),
        cut: CutLine { orientation, offset },
        samples: recover_samples(&raw.samples),
    })
}

/// Recovered-default tier: unparsable counts fall back to the default,
/// parsed counts clamp into `[1, MAX_SAMPLES]`. Never an error.
#[must_use]
pub fn recover_samples(text: &str) -> u64 {
    text.trim()
        .parse::<u64>()
        .map_or(DEFAULT_SAMPLES, |n| n.clamp(1, MAX_SAMPLES))
}

fn parse_finite(field: &'static str, text: &str) -> SegResult<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SegError::validation(field, text.trim()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Falsification test: any numeric triple with r > 0 validates, and
        /// the snapshot round-trips the parsed values.
        #[test]
        fn prop_numeric_inputs_validate(
            x0 in -1e6f64..1e6,
            y0 in -1e6f64..1e6,
            r in 0.001f64..1e4,
            offset in -1e6f64..1e6,
        ) {
            let raw = RawInputs {
                x0: x0.to_string(),
                y0: y0.to_string(),
                r: r.to_string(),
                offset: offset.to_string(),
                orientation: "horizontal".into(),
                samples: String::new(),
            };
            let inputs = validate(&raw)
                .map_err(|e| proptest::test_runner::TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(inputs.circle.r, r);
            prop_assert_eq!(inputs.samples, DEFAULT_SAMPLES);
        }

        /// Falsification test: recovered sample counts always land in
        /// [1, MAX_SAMPLES].
        #[test]
        fn prop_samples_in_range(n in proptest::arbitrary::any::<u64>()) {
            let recovered = recover_samples(&n.to_string());
            prop_assert!((1..=MAX_SAMPLES).contains(&recovered));
        }
    }
}
