//! Run configuration with YAML schema and validation.
//!
//! A scenario file holds the circle, the cut, and the sampling settings the
//! CLI feeds through the recorder. Parsing is schema-checked by serde,
//! range-checked by `validator`, then semantically validated; the numeric
//! fields still pass through the recorder's own boundary validation before
//! anything computes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::{SegError, SegResult};
use crate::geometry::Orientation;
use crate::recorder::RawInputs;

/// Top-level scenario configuration, loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// The circle to cut.
    #[validate(nested)]
    pub circle: CircleConfig,

    /// The cutting line.
    #[validate(nested)]
    pub cut: CutConfig,

    /// Monte Carlo sample count.
    #[serde(default = "default_samples")]
    #[validate(range(min = 1))]
    pub samples: u64,

    /// Master seed for the random source.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Worker threads for parallel estimation.
    #[serde(default = "default_workers")]
    #[validate(range(min = 1, max = 1024))]
    pub workers: usize,

    /// Optional JSON-lines results file; omitted means in-memory only.
    #[serde(default)]
    pub results_path: Option<PathBuf>,
}

/// Circle parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CircleConfig {
    /// Center x coordinate.
    #[serde(default)]
    pub x0: f64,
    /// Center y coordinate.
    #[serde(default)]
    pub y0: f64,
    /// Radius, must be > 0.
    pub r: f64,
}

/// Cutting-line parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CutConfig {
    /// Human label, "vertical" or "horizontal".
    #[validate(length(min = 1))]
    pub orientation: String,
    /// Coordinate at which the line crosses its axis.
    pub offset: f64,
}

fn default_samples() -> u64 {
    crate::recorder::DEFAULT_SAMPLES
}

fn default_seed() -> u64 {
    42
}

fn default_workers() -> usize {
    1
}

impl RunConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, YAML parsing fails, or
    /// validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> SegResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SegResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        config.validate()?;
        config.validate_semantic()?;

        Ok(config)
    }

    /// Validate semantic constraints beyond the schema.
    fn validate_semantic(&self) -> SegResult<()> {
        if !(self.circle.r.is_finite() && self.circle.r > 0.0) {
            return Err(SegError::config(format!(
                "Radius must be a finite value > 0, got {}",
                self.circle.r
            )));
        }
        if Orientation::parse(&self.cut.orientation).is_none() {
            return Err(SegError::config(format!(
                "Unknown orientation '{}', expected 'vertical' or 'horizontal'",
                self.cut.orientation
            )));
        }
        Ok(())
    }

    /// The raw text fields this scenario feeds the recorder's boundary.
    #[must_use]
    pub fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            x0: self.circle.x0.to_string(),
            y0: self.circle.y0.to_string(),
            r: self.circle.r.to_string(),
            offset: self.cut.offset.to_string(),
            orientation: self.cut.orientation.clone(),
            samples: self.samples.to_string(),
        }
    }
}
