//! Labeled multi-dimensional dataset container
//!
//! A [`Dataset`] groups named dimensions, coordinates along those
//! dimensions, and data variables (measured or simulated channels).
//!
//! ## Layout
//!
//! ```text
//! Dataset
//!   ├── dims        name -> size
//!   ├── coords      1-D Variable per dimension (e.g. "two_theta")
//!   ├── data_vars   Variable over any dims (e.g. "intensity", "sim_intensity")
//!   └── attrs       free-form metadata
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use easydiffraction_core::dataset::Dataset;
//!
//! let mut dataset = Dataset::new();
//! dataset.add_coord("two_theta", vec![10.0, 10.1, 10.2])?;
//! dataset.add_variable("intensity", &["two_theta"], vec![120.0, 135.5, 98.2])?;
//!
//! let batch = dataset.to_record_batch("two_theta")?;
//! assert_eq!(batch.num_rows(), 3);
//! assert_eq!(batch.num_columns(), 2);
//! # Ok::<(), easydiffraction_core::Error>(())
//! ```

mod variable;

use std::collections::BTreeMap;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub use variable::Variable;

/// Labeled multi-dimensional dataset.
///
/// Dimensions are registered by the first coordinate or variable that uses
/// them and keep their size afterwards. Removing a variable does not drop
/// its dimensions. Coordinates and data variables share one name space.
///
/// Deserialization checks the same shape rules as the insert methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    #[serde(default)]
    dims: BTreeMap<String, usize>,
    #[serde(default)]
    coords: BTreeMap<String, Variable>,
    #[serde(default)]
    data_vars: BTreeMap<String, Variable>,
    #[serde(default)]
    attrs: BTreeMap<String, String>,
}

impl Dataset {
    /// Create a new empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the dataset has no dimensions, coordinates, or data variables.
    ///
    /// A dataset holding only coordinates is not empty even though
    /// [`num_variables`](Self::num_variables) is 0.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty() && self.coords.is_empty() && self.data_vars.is_empty()
    }

    /// Number of data variables (coordinates not counted).
    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.data_vars.len()
    }

    /// Dimension sizes keyed by dimension name.
    #[must_use]
    pub const fn dims(&self) -> &BTreeMap<String, usize> {
        &self.dims
    }

    /// Add a 1-D coordinate that defines the dimension of the same name.
    ///
    /// Re-adding a coordinate of the same length replaces its values.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if a data variable already uses the name
    /// - [`Error::DimensionConflict`] if the dimension is already registered
    ///   with a different size
    pub fn add_coord(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if self.data_vars.contains_key(&name) {
            return Err(Error::InvalidInput(format!(
                "'{name}' is already a data variable, cannot add it as a coordinate"
            )));
        }
        self.register_dim(&name, values.len())?;
        tracing::trace!(coord = %name, len = values.len(), "added coordinate");
        self.coords
            .insert(name.clone(), Variable::new([name], values));
        Ok(())
    }

    /// Add a data variable spanning `dims`, replacing any variable of the same name.
    ///
    /// Known dimensions contribute their registered size. A single
    /// dimension not yet registered has its size inferred from the value
    /// count and is registered on success.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if a coordinate already uses the name, a
    ///   dimension is listed twice, more than one dimension is unknown, or
    ///   the dimension sizes overflow `usize`
    /// - [`Error::ShapeMismatch`] if the value count does not fit the dimensions
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        dims: &[&str],
        values: Vec<f64>,
    ) -> Result<()> {
        let name = name.into();

        if self.coords.contains_key(&name) {
            return Err(Error::InvalidInput(format!(
                "'{name}' is already a coordinate, cannot add it as a data variable"
            )));
        }
        ensure_distinct_dims(&name, dims)?;

        let unknown: Vec<&str> = dims
            .iter()
            .copied()
            .filter(|dim| !self.dims.contains_key(*dim))
            .collect();
        let known = checked_size(
            &name,
            dims.iter().filter_map(|dim| self.dims.get(*dim).copied()),
        )?;

        match unknown.as_slice() {
            [] => {
                if values.len() != known {
                    return Err(Error::ShapeMismatch {
                        name,
                        expected: known,
                        actual: values.len(),
                    });
                }
            }
            [dim] => {
                if known == 0 || values.len() % known != 0 {
                    return Err(Error::ShapeMismatch {
                        name,
                        expected: known,
                        actual: values.len(),
                    });
                }
                self.dims.insert((*dim).to_string(), values.len() / known);
            }
            _ => {
                return Err(Error::InvalidInput(format!(
                    "cannot infer sizes of dimensions {unknown:?} for variable '{name}'"
                )));
            }
        }

        tracing::trace!(variable = %name, ?dims, len = values.len(), "added data variable");
        self.data_vars.insert(name, Variable::new(dims.iter().copied(), values));
        Ok(())
    }

    /// Get a data variable by name.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.data_vars.get(name)
    }

    /// Get a mutable data variable by name (attributes only; values are fixed-shape).
    pub fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.data_vars.get_mut(name)
    }

    /// Get a coordinate by name.
    #[must_use]
    pub fn coord(&self, name: &str) -> Option<&Variable> {
        self.coords.get(name)
    }

    /// True if a data variable or coordinate with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.data_vars.contains_key(name) || self.coords.contains_key(name)
    }

    /// Remove a data variable, returning it if present.
    pub fn remove_variable(&mut self, name: &str) -> Option<Variable> {
        self.data_vars.remove(name)
    }

    /// Data variable names in sorted order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.data_vars.keys().map(String::as_str)
    }

    /// Coordinate names in sorted order.
    pub fn coord_names(&self) -> impl Iterator<Item = &str> {
        self.coords.keys().map(String::as_str)
    }

    /// Get a dataset attribute, if set.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Set a dataset attribute, replacing any previous value.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Build an Arrow `RecordBatch` of every channel along `dim`.
    ///
    /// The coordinate of `dim` comes first (when present), followed by each
    /// 1-D data variable along `dim` in name order. All columns are
    /// non-nullable `Float64`. Multi-dimensional variables are skipped.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownDimension`] if `dim` is not registered
    /// - [`Error::Arrow`] if the batch cannot be assembled
    pub fn to_record_batch(&self, dim: &str) -> Result<RecordBatch> {
        let rows = *self
            .dims
            .get(dim)
            .ok_or_else(|| Error::UnknownDimension(dim.to_string()))?;

        let channels = self
            .coords
            .get(dim)
            .map(|coord| (dim, coord))
            .into_iter()
            .chain(
                self.data_vars
                    .iter()
                    .filter(|(_, var)| var.is_along(dim))
                    .map(|(name, var)| (name.as_str(), var)),
            );

        let mut fields = Vec::new();
        let mut columns: Vec<ArrayRef> = Vec::new();
        for (name, var) in channels {
            fields.push(Field::new(name, DataType::Float64, false));
            columns.push(Arc::new(Float64Array::from(var.values().to_vec())));
        }

        let options = RecordBatchOptions::new().with_row_count(Some(rows));
        let batch =
            RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), columns, &options)?;
        Ok(batch)
    }

    fn register_dim(&mut self, dim: &str, size: usize) -> Result<()> {
        match self.dims.get(dim) {
            Some(&existing) if existing != size => Err(Error::DimensionConflict {
                dim: dim.to_string(),
                existing,
                requested: size,
            }),
            Some(_) => Ok(()),
            None => {
                self.dims.insert(dim.to_string(), size);
                Ok(())
            }
        }
    }
}

/// Unchecked wire form of [`Dataset`].
#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    dims: BTreeMap<String, usize>,
    #[serde(default)]
    coords: BTreeMap<String, Variable>,
    #[serde(default)]
    data_vars: BTreeMap<String, Variable>,
    #[serde(default)]
    attrs: BTreeMap<String, String>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = Error;

    fn try_from(raw: RawDataset) -> Result<Self> {
        for (name, coord) in &raw.coords {
            if !coord.is_along(name) {
                return Err(Error::InvalidInput(format!(
                    "coordinate '{name}' must span only dimension '{name}'"
                )));
            }
            if raw.data_vars.contains_key(name) {
                return Err(Error::InvalidInput(format!(
                    "'{name}' is both a coordinate and a data variable"
                )));
            }
        }

        for (name, var) in raw.coords.iter().chain(&raw.data_vars) {
            ensure_distinct_dims(name, var.dims())?;
            let sizes = var
                .dims()
                .iter()
                .map(|dim| {
                    raw.dims
                        .get(dim)
                        .copied()
                        .ok_or_else(|| Error::UnknownDimension(dim.clone()))
                })
                .collect::<Result<Vec<usize>>>()?;
            let expected = checked_size(name, sizes)?;
            if var.len() != expected {
                return Err(Error::ShapeMismatch {
                    name: name.clone(),
                    expected,
                    actual: var.len(),
                });
            }
        }

        Ok(Self {
            dims: raw.dims,
            coords: raw.coords,
            data_vars: raw.data_vars,
            attrs: raw.attrs,
        })
    }
}

fn ensure_distinct_dims<S: PartialEq + std::fmt::Display>(name: &str, dims: &[S]) -> Result<()> {
    for (idx, dim) in dims.iter().enumerate() {
        if dims[..idx].contains(dim) {
            return Err(Error::InvalidInput(format!(
                "variable '{name}' lists dimension '{dim}' more than once"
            )));
        }
    }
    Ok(())
}

fn checked_size(name: &str, sizes: impl IntoIterator<Item = usize>) -> Result<usize> {
    sizes
        .into_iter()
        .try_fold(1usize, usize::checked_mul)
        .ok_or_else(|| {
            Error::InvalidInput(format!("dimension sizes of variable '{name}' overflow usize"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_default_is_empty() {
        let dataset = Dataset::new();
        assert!(dataset.is_empty());
        assert_eq!(dataset.num_variables(), 0);
        assert!(dataset.dims().is_empty());
    }

    #[test]
    fn test_add_coord_registers_dim() {
        let mut dataset = Dataset::new();
        dataset.add_coord("tof", vec![1000.0, 1001.0]).unwrap();
        assert_eq!(dataset.dims().get("tof"), Some(&2));
        assert!(dataset.contains("tof"));
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_add_coord_conflict() {
        let mut dataset = Dataset::new();
        dataset.add_coord("tof", vec![1.0, 2.0]).unwrap();
        let err = dataset.add_coord("tof", vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionConflict {
                existing: 2,
                requested: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_add_variable_infers_single_unknown_dim() {
        let mut dataset = Dataset::new();
        dataset.add_coord("two_theta", vec![1.0, 2.0, 3.0]).unwrap();
        dataset
            .add_variable("counts", &["run", "two_theta"], vec![0.0; 6])
            .unwrap();
        assert_eq!(dataset.dims().get("run"), Some(&2));
    }

    #[test]
    fn test_add_variable_rejects_two_unknown_dims() {
        let mut dataset = Dataset::new();
        let err = dataset
            .add_variable("counts", &["a", "b"], vec![0.0; 4])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_add_variable_rejects_size_overflow() {
        let mut dataset = Dataset::new();
        dataset.add_variable("a_axis", &["a"], vec![0.0; 2]).unwrap();
        dataset.dims.insert("b".to_string(), usize::MAX);
        let err = dataset
            .add_variable("grid", &["a", "b"], vec![])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(msg) if msg.contains("overflow")));
        assert!(!dataset.contains("grid"));
    }

    #[test]
    fn test_add_variable_rejects_duplicate_dim() {
        let mut dataset = Dataset::new();
        dataset.add_coord("x", vec![1.0, 2.0]).unwrap();
        let err = dataset
            .add_variable("v", &["x", "x"], vec![0.0; 4])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_scalar_variable_needs_one_value() {
        let mut dataset = Dataset::new();
        dataset.add_variable("temperature", &[], vec![300.0]).unwrap();
        let err = dataset.add_variable("pressure", &[], vec![]).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                expected: 1,
                actual: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_record_batch_without_channels_keeps_row_count() {
        let mut dataset = Dataset::new();
        dataset.add_variable("counts", &["x"], vec![1.0, 2.0]).unwrap();
        dataset.remove_variable("counts");
        let batch = dataset.to_record_batch("x").unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 0);
    }
}
