//! # easydiffraction-core: Diffraction Experiment Entities
//!
//! **Version**: 0.1.0
//!
//! Core data model for diffraction analysis: an [`Experiment`] wraps a
//! labeled multi-dimensional [`Dataset`] together with the measurement mode
//! flags (time-of-flight, polarized, single-crystal).
//!
//! ## Design Principles
//!
//! - **Composition**: `Experiment` holds an `ExperimentBase` instead of
//!   extending it
//! - **Typed configuration**: `ExperimentConfig` replaces open-ended
//!   keyword forwarding
//! - **Owned data**: each experiment owns its dataset; defaults are fresh
//!   per construction
//!
//! ## Example Usage
//!
//! ```rust
//! use easydiffraction_core::{Dataset, Experiment};
//!
//! let mut dataset = Dataset::new();
//! dataset.add_coord("two_theta", vec![10.0, 10.05, 10.1])?;
//! dataset.add_variable("intensity", &["two_theta"], vec![312.0, 340.5, 298.1])?;
//!
//! let experiment = Experiment::with_dataset("hrpt", dataset);
//! assert_eq!(experiment.to_string(), "Experiment: hrpt");
//! assert!(!experiment.is_tof());
//! # Ok::<(), easydiffraction_core::Error>(())
//! ```
//!
//! CIF loading ([`Experiment::from_cif`], [`Experiment::from_cif_string`])
//! is not implemented yet; both return a default experiment.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod dataset;
pub mod error;
pub mod experiment;
pub mod telemetry;

pub use dataset::{Dataset, Variable};
pub use error::{Error, Result};
pub use experiment::{AsDict, Experiment, ExperimentConfig, ExperimentStore};
