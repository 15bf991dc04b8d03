//! Diffraction experiments
//!
//! An [`Experiment`] composes a generic [`ExperimentBase`] (name and typed
//! [`ExperimentConfig`]) with an owned [`Dataset`](crate::dataset::Dataset)
//! and the measurement mode flags.
//!
//! ## Structure
//!
//! ```text
//! ExperimentStore (1) ──< Experiment (N)
//!                             │
//!                             ├── ExperimentBase ── ExperimentConfig
//!                             └── Dataset        [measured + "sim_" channels]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use easydiffraction_core::experiment::{AsDict, Experiment, ExperimentStore};
//!
//! let mut experiment = Experiment::new("hrpt");
//! experiment.set_tof(true);
//! assert_eq!(experiment.to_string(), "Experiment: hrpt");
//!
//! let dict = experiment.as_dict(&["@version"]);
//! assert_eq!(dict["name"], "hrpt");
//!
//! let mut store = ExperimentStore::new();
//! store.add(experiment);
//! assert!(store.get("hrpt").is_some());
//! ```

mod base;
mod config;
mod diffraction;
mod store;

pub use base::{AsDict, ExperimentBase, EXPORT_MODULE};
pub use config::ExperimentConfig;
pub use diffraction::{Experiment, ExperimentBuilder, DEFAULT_EXPERIMENT_NAME, SIMULATION_PREFIX};
pub use store::ExperimentStore;
