//! Experiment Config - typed construction options for the experiment base

use serde::{Deserialize, Serialize};

/// Options forwarded to [`ExperimentBase`](super::ExperimentBase) at construction.
///
/// All fields are optional; `Default` yields an unconfigured experiment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExperimentConfig {
    interface: Option<String>,
    unique_name: Option<String>,
}

impl ExperimentConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the calculator interface name (e.g. "CrysPy").
    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    /// Set a globally unique name distinct from the display name.
    #[must_use]
    pub fn with_unique_name(mut self, unique_name: impl Into<String>) -> Self {
        self.unique_name = Some(unique_name.into());
        self
    }

    /// Get the calculator interface name, if set.
    #[must_use]
    pub fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    /// Get the unique name, if set.
    #[must_use]
    pub fn unique_name(&self) -> Option<&str> {
        self.unique_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ExperimentConfig::new();
        assert!(config.interface().is_none());
        assert!(config.unique_name().is_none());
    }

    #[test]
    fn test_config_setters() {
        let config = ExperimentConfig::new()
            .with_interface("CrysPy")
            .with_unique_name("exp_0001");
        assert_eq!(config.interface(), Some("CrysPy"));
        assert_eq!(config.unique_name(), Some("exp_0001"));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: ExperimentConfig =
            serde_json::from_str(r#"{"interface": "CrysFML"}"#).expect("valid config");
        assert_eq!(config.interface(), Some("CrysFML"));
        assert!(config.unique_name().is_none());
    }
}
