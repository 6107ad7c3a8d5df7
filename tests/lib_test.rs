//! Tests for top-level AutoModel API

use bids_automodel::dataset::{MemoryDataset, RunNode};
use bids_automodel::{build_models, AutoModel};

fn dataset() -> MemoryDataset {
    MemoryDataset::new("ds")
        .with_run(
            RunNode::builder("rest")
                .subject("01")
                .trial_types(&["a", "b"])
                .build()
                .unwrap(),
        )
}

#[test]
fn test_auto_model_builder_chain() {
    let config = AutoModel::builder().scan_length(120.0).one_vs_rest(true).build();
    assert_eq!(config.scan_length(), Some(120.0));
    assert!(config.one_vs_rest());
}

#[test]
fn test_auto_model_matches_free_function() {
    let config = AutoModel::builder().scan_length(120.0).one_vs_rest(true).build();
    let from_config = config.build_models(&dataset()).unwrap();
    let from_fn = build_models(&dataset(), Some(120.0), true).unwrap();
    assert_eq!(from_config, from_fn);
}

#[test]
fn test_auto_model_config_roundtrip() {
    let config = AutoModel::builder().scan_length(90.0).build();
    let json = serde_json::to_string(&config).unwrap();
    let back: AutoModel = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
}

#[test]
fn test_repeated_builds_are_identical() {
    let config = AutoModel::builder().scan_length(120.0).one_vs_rest(true).build();
    let first = config.build_models(&dataset()).unwrap();
    let second = config.build_models(&dataset()).unwrap();
    assert_eq!(first, second);
}
