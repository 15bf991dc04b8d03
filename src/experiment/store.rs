//! Experiment Store - in-memory collection of experiments keyed by name

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::{AsDict, Experiment};

/// In-memory store for the experiments of one analysis job.
///
/// Experiments are keyed by name; adding an experiment whose name is
/// already present replaces the stored one.
#[derive(Debug, Default)]
pub struct ExperimentStore {
    experiments: BTreeMap<String, Experiment>,
}

impl ExperimentStore {
    /// Create a new empty experiment store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the store holds no experiments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    /// Get the number of experiments in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    /// Add an experiment, returning the one it replaced, if any.
    pub fn add(&mut self, experiment: Experiment) -> Option<Experiment> {
        let replaced = self
            .experiments
            .insert(experiment.name().to_string(), experiment);
        if let Some(previous) = &replaced {
            tracing::debug!(name = previous.name(), "replaced experiment in store");
        }
        replaced
    }

    /// Get an experiment by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Experiment> {
        self.experiments.get(name)
    }

    /// Get an experiment by name for modification.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Experiment> {
        self.experiments.get_mut(name)
    }

    /// Remove an experiment by name.
    pub fn remove(&mut self, name: &str) -> Option<Experiment> {
        self.experiments.remove(name)
    }

    /// Experiment names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.experiments.keys().map(String::as_str)
    }

    /// Export every experiment, in name order.
    #[must_use]
    pub fn as_dicts(&self, skip: &[&str]) -> Vec<Map<String, Value>> {
        self.experiments
            .values()
            .map(|experiment| experiment.as_dict(skip))
            .collect()
    }
}
