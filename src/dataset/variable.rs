//! Variable - a named-dimension array of measured or simulated values

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A flat `f64` buffer laid out row-major over a list of named dimensions.
///
/// The dimension sizes live in the owning [`Dataset`](super::Dataset);
/// the variable only records which dimensions it spans, in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variable {
    dims: Vec<String>,
    values: Vec<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attrs: BTreeMap<String, String>,
}

impl Variable {
    /// Create a variable spanning `dims` with the given values.
    #[must_use]
    pub fn new<I, S>(dims: I, values: Vec<f64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dims: dims.into_iter().map(Into::into).collect(),
            values,
            attrs: BTreeMap::new(),
        }
    }

    /// Dimension names, outermost first.
    #[must_use]
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Number of dimensions (0 for a scalar).
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// True if the variable spans exactly the single dimension `dim`.
    #[must_use]
    pub fn is_along(&self, dim: &str) -> bool {
        matches!(self.dims.as_slice(), [only] if only == dim)
    }

    /// Raw values in row-major order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no values are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get an attribute, if set.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Set an attribute (units, long name, ...), replacing any previous value.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// All attributes, ordered by key.
    #[must_use]
    pub const fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }
}
