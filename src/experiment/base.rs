//! Experiment Base - generic name + configuration holder with dictionary export

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ExperimentConfig;
use crate::{Error, Result};

/// Value of the `@module` key in every export.
pub const EXPORT_MODULE: &str = "easydiffraction_core";

/// Dictionary export contract shared by experiment types.
///
/// Keys listed in `skip` are omitted from the result.
pub trait AsDict {
    /// Export to a JSON object, leaving out the keys named in `skip`.
    fn as_dict(&self, skip: &[&str]) -> Map<String, Value>;
}

/// Generic experiment: a name plus typed configuration.
///
/// Concrete experiments hold one of these and delegate their export to
/// [`ExperimentBase::export`], passing their own class name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExperimentBase {
    name: String,
    #[serde(default)]
    config: ExperimentConfig,
}

impl ExperimentBase {
    /// Create a base with the given name and configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, config: ExperimentConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Export the base fields, tagging the object with `class`.
    ///
    /// Keys: `@module`, `@class`, `@version`, `name`, `interface`,
    /// `unique_name`. Unset options export as `null`.
    #[must_use]
    pub fn export(&self, class: &str, skip: &[&str]) -> Map<String, Value> {
        let optional = |value: Option<&str>| value.map_or(Value::Null, Value::from);

        let mut dict = Map::new();
        dict.insert("@module".to_string(), Value::from(EXPORT_MODULE));
        dict.insert("@class".to_string(), Value::from(class));
        dict.insert(
            "@version".to_string(),
            Value::from(env!("CARGO_PKG_VERSION")),
        );
        dict.insert("name".to_string(), Value::from(self.name.as_str()));
        dict.insert("interface".to_string(), optional(self.config.interface()));
        dict.insert(
            "unique_name".to_string(),
            optional(self.config.unique_name()),
        );

        dict.retain(|key, _| !skip.contains(&key.as_str()));
        dict
    }

    /// Rebuild a base from an export.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingField`] if `name` is absent
    /// - [`Error::InvalidInput`] if `name`, `interface`, or `unique_name`
    ///   hold a non-string value
    pub fn from_dict(dict: &Map<String, Value>) -> Result<Self> {
        let name = match dict.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(Error::InvalidInput(format!(
                    "field 'name' must be a string, got {other}"
                )))
            }
            None => return Err(Error::MissingField("name".to_string())),
        };

        let mut config = ExperimentConfig::new();
        if let Some(interface) = optional_string(dict, "interface")? {
            config = config.with_interface(interface);
        }
        if let Some(unique_name) = optional_string(dict, "unique_name")? {
            config = config.with_unique_name(unique_name);
        }

        Ok(Self::new(name, config))
    }
}

impl AsDict for ExperimentBase {
    fn as_dict(&self, skip: &[&str]) -> Map<String, Value> {
        self.export("ExperimentBase", skip)
    }
}

fn optional_string(dict: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match dict.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(Error::InvalidInput(format!(
            "field '{key}' must be a string or null, got {other}"
        ))),
    }
}
