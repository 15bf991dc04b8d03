//! Diffraction Experiment - dataset + measurement mode flags

use std::fmt;
use std::path::Path;

use serde_json::{Map, Value};

use super::{AsDict, ExperimentBase, ExperimentConfig};
use crate::dataset::Dataset;
use crate::{Error, Result};

/// Prefix marking simulation-derived data variables in the dataset.
pub const SIMULATION_PREFIX: &str = "sim_";

/// Name given to experiments produced by the CIF loaders.
pub const DEFAULT_EXPERIMENT_NAME: &str = "Experiment";

/// Value of `@class` in an `Experiment` export.
const EXPORT_CLASS: &str = "Experiment";

/// Diffraction-specific experiment.
///
/// Holds a generic [`ExperimentBase`] (name + configuration), an owned
/// [`Dataset`], and three independent measurement mode flags. The flags
/// all start `false` and do not constrain each other.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    base: ExperimentBase,
    dataset: Dataset,
    is_tof: bool,
    is_polarized: bool,
    is_single_crystal: bool,
}

impl Experiment {
    /// Create an experiment with an empty dataset and default configuration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::builder(name).build()
    }

    /// Create an experiment that takes ownership of `dataset`.
    #[must_use]
    pub fn with_dataset(name: impl Into<String>, dataset: Dataset) -> Self {
        Self::builder(name).dataset(dataset).build()
    }

    /// Create an experiment, rejecting a blank name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `name` is empty or whitespace only.
    pub fn try_new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidInput(
                "experiment name must not be empty".to_string(),
            ));
        }
        Ok(Self::new(name))
    }

    /// Create a builder for an experiment with optional dataset and configuration.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ExperimentBuilder {
        ExperimentBuilder::new(name)
    }

    /// Load an experiment from a CIF file.
    ///
    /// CIF loading is not implemented: the path is not opened and the
    /// result is always `Experiment::new("Experiment")`.
    #[must_use]
    pub fn from_cif<P: AsRef<Path>>(path: P) -> Self {
        tracing::warn!(
            path = %path.as_ref().display(),
            "CIF file loading not implemented, returning default experiment"
        );
        Self::new(DEFAULT_EXPERIMENT_NAME)
    }

    /// Load an experiment from CIF text.
    ///
    /// CIF loading is not implemented: the text is ignored and the result
    /// is always `Experiment::new("Experiment")`.
    #[must_use]
    pub fn from_cif_string(cif: &str) -> Self {
        tracing::warn!(
            bytes = cif.len(),
            "CIF string loading not implemented, returning default experiment"
        );
        Self::new(DEFAULT_EXPERIMENT_NAME)
    }

    /// Rebuild an experiment from its dictionary export.
    ///
    /// The export carries only base fields, so the dataset starts empty and
    /// every mode flag is `false`. A missing `@class` is accepted; a present
    /// one must be `"Experiment"`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if `@class` names another type
    /// - [`ExperimentBase::from_dict`] errors
    pub fn from_dict(dict: &Map<String, Value>) -> Result<Self> {
        match dict.get("@class") {
            None => {}
            Some(Value::String(class)) if class == EXPORT_CLASS => {}
            Some(other) => {
                return Err(Error::InvalidInput(format!(
                    "expected @class \"{EXPORT_CLASS}\", got {other}"
                )))
            }
        }
        let base = ExperimentBase::from_dict(dict)?;
        Ok(Self::from_parts(base, Dataset::new()))
    }

    /// Serialize the dictionary export to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if encoding fails.
    pub fn to_json(&self, skip: &[&str]) -> Result<String> {
        Ok(serde_json::to_string(&self.as_dict(skip))?)
    }

    /// Parse a JSON object produced by [`Experiment::to_json`].
    ///
    /// # Errors
    ///
    /// - [`Error::Serialization`] if `json` is not a JSON object
    /// - see [`Experiment::from_dict`]
    pub fn from_json(json: &str) -> Result<Self> {
        let dict: Map<String, Value> = serde_json::from_str(json)?;
        Self::from_dict(&dict)
    }

    fn from_parts(base: ExperimentBase, dataset: Dataset) -> Self {
        tracing::debug!(name = base.name(), "created experiment");
        Self {
            base,
            dataset,
            is_tof: false,
            is_polarized: false,
            is_single_crystal: false,
        }
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.base.name()
    }

    /// Get the configuration passed at construction.
    #[must_use]
    pub const fn config(&self) -> &ExperimentConfig {
        self.base.config()
    }

    /// Get the generic experiment base.
    #[must_use]
    pub const fn base(&self) -> &ExperimentBase {
        &self.base
    }

    /// Get the dataset.
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Get the dataset for modification.
    pub fn dataset_mut(&mut self) -> &mut Dataset {
        &mut self.dataset
    }

    /// Consume the experiment, returning its dataset.
    #[must_use]
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    /// Prefix used for simulated channels (`"sim_"`).
    #[must_use]
    pub const fn simulation_prefix(&self) -> &'static str {
        SIMULATION_PREFIX
    }

    /// True for a time-of-flight measurement.
    #[must_use]
    pub const fn is_tof(&self) -> bool {
        self.is_tof
    }

    /// True for a polarized-neutron measurement.
    #[must_use]
    pub const fn is_polarized(&self) -> bool {
        self.is_polarized
    }

    /// True for a single-crystal measurement.
    #[must_use]
    pub const fn is_single_crystal(&self) -> bool {
        self.is_single_crystal
    }

    /// Set the time-of-flight flag.
    pub fn set_tof(&mut self, is_tof: bool) {
        self.is_tof = is_tof;
    }

    /// Set the polarized flag.
    pub fn set_polarized(&mut self, is_polarized: bool) {
        self.is_polarized = is_polarized;
    }

    /// Set the single-crystal flag.
    pub fn set_single_crystal(&mut self, is_single_crystal: bool) {
        self.is_single_crystal = is_single_crystal;
    }

    /// Store a simulated channel as `sim_<name>` in the dataset.
    ///
    /// # Errors
    ///
    /// Propagates [`Dataset::add_variable`] shape errors.
    pub fn add_simulated_channel(
        &mut self,
        name: &str,
        dims: &[&str],
        values: Vec<f64>,
    ) -> Result<()> {
        self.dataset
            .add_variable(format!("{SIMULATION_PREFIX}{name}"), dims, values)
    }

    /// Names of data variables carrying the simulation prefix.
    #[must_use]
    pub fn simulated_channels(&self) -> Vec<&str> {
        self.dataset
            .variable_names()
            .filter(|name| name.starts_with(SIMULATION_PREFIX))
            .collect()
    }

    /// Names of data variables without the simulation prefix.
    #[must_use]
    pub fn measured_channels(&self) -> Vec<&str> {
        self.dataset
            .variable_names()
            .filter(|name| !name.starts_with(SIMULATION_PREFIX))
            .collect()
    }
}

impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Experiment: {}", self.name())
    }
}

impl AsDict for Experiment {
    fn as_dict(&self, skip: &[&str]) -> Map<String, Value> {
        self.base.export(EXPORT_CLASS, skip)
    }
}

/// Builder for `Experiment`.
#[derive(Debug)]
pub struct ExperimentBuilder {
    name: String,
    dataset: Option<Dataset>,
    config: ExperimentConfig,
}

impl ExperimentBuilder {
    /// Create a new builder with the required name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dataset: None,
            config: ExperimentConfig::default(),
        }
    }

    /// Use `dataset` instead of a fresh empty one.
    #[must_use]
    pub fn dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = Some(dataset);
        self
    }

    /// Set the base configuration.
    #[must_use]
    pub fn config(mut self, config: ExperimentConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the `Experiment`.
    #[must_use]
    pub fn build(self) -> Experiment {
        let base = ExperimentBase::new(self.name, self.config);
        Experiment::from_parts(base, self.dataset.unwrap_or_default())
    }
}
