//! Experiment entity tests
//!
//! Covers construction, dataset ownership, the CIF loader stubs, and the
//! dictionary export contract.

use easydiffraction_core::experiment::{
    AsDict, Experiment, ExperimentConfig, ExperimentStore, DEFAULT_EXPERIMENT_NAME,
    EXPORT_MODULE, SIMULATION_PREFIX,
};
use easydiffraction_core::{Dataset, Error};

fn measured_dataset() -> Dataset {
    let mut dataset = Dataset::new();
    dataset
        .add_coord("two_theta", vec![10.0, 10.05, 10.1, 10.15])
        .unwrap();
    dataset
        .add_variable("intensity", &["two_theta"], vec![312.0, 340.5, 298.1, 287.9])
        .unwrap();
    dataset.set_attr("instrument", "HRPT");
    dataset
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_display_format() {
    let experiment = Experiment::new("X");
    assert_eq!(experiment.to_string(), "Experiment: X");
    assert_eq!(format!("{experiment}"), "Experiment: X");
}

#[test]
fn test_default_dataset_is_empty() {
    let experiment = Experiment::new("X");
    assert!(experiment.dataset().is_empty());
    assert_eq!(experiment.dataset(), &Dataset::new());
}

#[test]
fn test_supplied_dataset_is_kept() {
    let dataset = measured_dataset();
    let expected = dataset.clone();

    let experiment = Experiment::with_dataset("X", dataset);

    assert_eq!(experiment.dataset(), &expected);
    assert_eq!(experiment.dataset().attr("instrument"), Some("HRPT"));
    assert_eq!(experiment.into_dataset(), expected);
}

#[test]
fn test_supplied_dataset_moves_buffer() {
    let dataset = measured_dataset();
    let values_ptr = dataset.variable("intensity").unwrap().values().as_ptr();

    let experiment = Experiment::with_dataset("X", dataset);

    let stored_ptr = experiment
        .dataset()
        .variable("intensity")
        .unwrap()
        .values()
        .as_ptr();
    assert_eq!(values_ptr, stored_ptr);
}

#[test]
fn test_default_datasets_are_not_shared() {
    let mut first = Experiment::new("a");
    let second = Experiment::new("b");

    first.dataset_mut().add_coord("tof", vec![1.0, 2.0]).unwrap();

    assert!(!first.dataset().is_empty());
    assert!(second.dataset().is_empty());
}

#[test]
fn test_flags_false_after_construction() {
    let experiments = [
        Experiment::new("X"),
        Experiment::new(""),
        Experiment::with_dataset("X", measured_dataset()),
        Experiment::builder("Y")
            .config(ExperimentConfig::new().with_interface("CrysPy"))
            .build(),
    ];

    for experiment in &experiments {
        assert!(!experiment.is_tof());
        assert!(!experiment.is_polarized());
        assert!(!experiment.is_single_crystal());
    }
}

#[test]
fn test_builder_with_config() {
    let config = ExperimentConfig::new()
        .with_interface("CrysPy")
        .with_unique_name("exp_hrpt_01");
    let experiment = Experiment::builder("hrpt")
        .dataset(measured_dataset())
        .config(config.clone())
        .build();

    assert_eq!(experiment.config(), &config);
    assert_eq!(experiment.base().name(), "hrpt");
    assert_eq!(experiment.dataset().num_variables(), 1);
}

#[test]
fn test_simulation_prefix() {
    let experiment = Experiment::new("X");
    assert_eq!(experiment.simulation_prefix(), "sim_");
    assert_eq!(SIMULATION_PREFIX, "sim_");
}

#[test]
fn test_try_new_empty_name() {
    let err = Experiment::try_new("").unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

// =============================================================================
// CIF loader stubs
// =============================================================================

#[test]
fn test_from_cif_returns_default() {
    let default = Experiment::new(DEFAULT_EXPERIMENT_NAME);

    for path in ["hrpt.cif", "", "/definitely/not/here.cif", "../../etc"] {
        let experiment = Experiment::from_cif(path);
        assert_eq!(experiment, default);
        assert_eq!(experiment.to_string(), "Experiment: Experiment");
    }
}

#[test]
fn test_from_cif_string_returns_default() {
    let default = Experiment::new("Experiment");
    let cif = "data_hrpt\n_diffrn_radiation_probe neutron\n_pd_meas_2theta_range_min 10.0\n";

    for text in [cif, "", "not a cif at all {{{"] {
        let experiment = Experiment::from_cif_string(text);
        assert_eq!(experiment, default);
        assert!(experiment.dataset().is_empty());
        assert!(!experiment.is_tof());
    }
}

// =============================================================================
// Dictionary export
// =============================================================================

#[test]
fn test_as_dict_contains_base_fields() {
    let dict = Experiment::new("hrpt").as_dict(&[]);

    assert_eq!(dict.len(), 6);
    assert_eq!(dict["@module"], EXPORT_MODULE);
    assert_eq!(dict["@class"], "Experiment");
    assert_eq!(dict["@version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(dict["name"], "hrpt");
    assert!(dict["interface"].is_null());
    assert!(dict["unique_name"].is_null());
}

#[test]
fn test_as_dict_skip_name() {
    let dict = Experiment::new("hrpt").as_dict(&["name"]);
    assert!(!dict.contains_key("name"));
    assert_eq!(dict.len(), 5);
}

#[test]
fn test_as_dict_skip_unknown_key_is_ignored() {
    let experiment = Experiment::new("hrpt");
    assert_eq!(experiment.as_dict(&["no_such_field"]), experiment.as_dict(&[]));
}

#[test]
fn test_as_dict_omits_flags_and_dataset() {
    let mut experiment = Experiment::with_dataset("hrpt", measured_dataset());
    experiment.set_tof(true);
    let dict = experiment.as_dict(&[]);

    assert!(!dict.contains_key("is_tof"));
    assert!(!dict.contains_key("dataset"));
}

#[test]
fn test_json_round_trip_restores_base() {
    let config = ExperimentConfig::new().with_interface("CrysPy");
    let mut experiment = Experiment::builder("d20").config(config).build();
    experiment.set_polarized(true);

    let json = experiment.to_json(&[]).unwrap();
    let restored = Experiment::from_json(&json).unwrap();

    assert_eq!(restored.name(), "d20");
    assert_eq!(restored.config().interface(), Some("CrysPy"));
    assert!(!restored.is_polarized());
    assert!(restored.dataset().is_empty());
}

#[test]
fn test_from_json_without_name_fails() {
    let json = Experiment::new("d20").to_json(&["name"]).unwrap();
    let err = Experiment::from_json(&json).unwrap_err();
    assert!(matches!(err, Error::MissingField(_)));
}

#[test]
fn test_from_json_rejects_non_object() {
    let err = Experiment::from_json("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

// =============================================================================
// ExperimentStore
// =============================================================================

#[test]
fn test_store_exports_in_name_order() {
    let mut store = ExperimentStore::new();
    store.add(Experiment::new("wish"));
    store.add(Experiment::new("d20"));
    store.add(Experiment::new("hrpt"));

    let names: Vec<_> = store
        .as_dicts(&[])
        .into_iter()
        .map(|dict| dict["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["d20", "hrpt", "wish"]);
}

#[test]
fn test_store_exports_respect_skip() {
    let mut store = ExperimentStore::new();
    store.add(Experiment::new("hrpt"));

    let dicts = store.as_dicts(&["@module", "@version"]);
    assert_eq!(dicts.len(), 1);
    assert!(!dicts[0].contains_key("@module"));
    assert!(dicts[0].contains_key("name"));
}
