//! Publish flow against a directory-backed store.

use adapter_store::csv_codec::{read_table_path, ReadOptions, INDEX_HEADER};
use adapter_store::{
    publish, Credentials, DatasetCatalog, DatasetMetadata, LocalStore, PublishRequest, StoreError,
};
use synth_core::types::{Column, ColumnType, RowIndex, Table};
use synth_sampler::sampler::{SamplerConfig, SynthesisError};

fn credentials() -> Credentials {
    Credentials::new("file:///store", "alice", "secret", "lake").unwrap()
}

fn config(samples: usize) -> SamplerConfig {
    SamplerConfig::builder()
        .sample_count(samples)
        .seed(2024)
        .build()
        .unwrap()
}

fn prices() -> Table {
    let open: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
    let close: Vec<f64> = open
        .iter()
        .enumerate()
        .map(|(i, o)| o + (i as f64 * 1.3).cos())
        .collect();
    let volume: Vec<i64> = (0..40).map(|i| 1_000 + (i * 37 % 101) as i64).collect();
    Table::from_columns(vec![
        Column::float("open", open),
        Column::float("close", close),
        Column::integer("volume", volume),
    ])
    .unwrap()
}

#[test]
fn test_publish_table_creates_default_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LocalStore::open(dir.path()).unwrap();

    let outcome = publish(
        &mut store,
        &credentials(),
        PublishRequest::from_table(prices(), config(25)),
    )
    .unwrap();

    assert_eq!(outcome.destination.to_string(), "s3://lake/synth_synthetic_data.csv");
    assert_eq!(outcome.table.shape(), (25, 3));
    assert!(outcome.report.max_abs_deviation.is_finite());
    assert_eq!(outcome.report.seed, 2024);

    let record = store.dataset("synthetic_data").unwrap();
    assert_eq!(record.metadata, DatasetMetadata::synthetic("synthetic_data", "alice"));
    assert_eq!(record.resources.len(), 1);
    assert_eq!(record.resources[0].name, "synth_synthetic_data");
    assert_eq!(record.resources[0].location, outcome.destination.to_string());

    let object = store.object_path(&outcome.destination);
    assert_eq!(object, dir.path().join("objects/lake/synth_synthetic_data.csv"));
    let back = read_table_path(&object, &ReadOptions::with_index_column(INDEX_HEADER)).unwrap();
    assert_eq!(back.columns(), outcome.table.columns());
    assert_eq!(
        back.column_types(),
        vec![ColumnType::Float, ColumnType::Float, ColumnType::Integer]
    );
}

#[test]
fn test_publish_resource_writes_back_into_source_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LocalStore::open(dir.path()).unwrap();
    store
        .ensure_dataset("stocks", &DatasetMetadata::synthetic("stocks", "bob"))
        .unwrap();
    store.put_resource("stocks", "prices", "lake", &prices()).unwrap();

    let outcome = publish(
        &mut store,
        &credentials(),
        PublishRequest::from_resource("stocks", "prices", config(40)),
    )
    .unwrap();

    assert_eq!(outcome.destination.to_string(), "s3://lake/synth_stocks.csv");
    // Same row count, so the source labels are kept
    let expected: Vec<String> = (0..40).map(|i| i.to_string()).collect();
    assert_eq!(outcome.table.index(), &RowIndex::Labels(expected));

    let record = store.dataset("stocks").unwrap();
    assert_eq!(record.metadata.author, "bob");
    let names: Vec<&str> = record.resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["prices", "synth_stocks"]);
}

#[test]
fn test_republish_replaces_resource() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LocalStore::open(dir.path()).unwrap();

    for _ in 0..2 {
        publish(
            &mut store,
            &credentials(),
            PublishRequest::from_table(prices(), config(5)).with_target("runs"),
        )
        .unwrap();
    }

    let record = store.dataset("runs").unwrap();
    assert_eq!(record.resources.len(), 1);
}

#[test]
fn test_missing_resource_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LocalStore::open(dir.path()).unwrap();
    store
        .ensure_dataset("stocks", &DatasetMetadata::synthetic("stocks", "bob"))
        .unwrap();

    let err = publish(
        &mut store,
        &credentials(),
        PublishRequest::from_resource("stocks", "prices", config(5)),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Resource 'prices' not found in dataset 'stocks'");

    let err = publish(
        &mut store,
        &credentials(),
        PublishRequest::from_resource("bonds", "prices", config(5)),
    )
    .unwrap_err();
    assert!(matches!(err, StoreError::DatasetNotFound(ref d) if d == "bonds"));
}

#[test]
fn test_rejected_input_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LocalStore::open(dir.path()).unwrap();

    let table = Table::from_columns(vec![
        Column::float("x", vec![1.0, 2.0, 3.0]),
        Column::text("label", vec!["a".into(), "b".into(), "c".into()]),
    ])
    .unwrap();

    let err = publish(
        &mut store,
        &credentials(),
        PublishRequest::from_table(table, config(5)),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Synthesis(SynthesisError::NonNumericColumn { .. })
    ));
    assert!(store.find_dataset("synthetic_data").unwrap().is_none());
}

#[test]
fn test_path_like_bucket_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("store");
    let mut store = LocalStore::open(&root).unwrap();

    for bucket in ["..", "lake/../../outside"] {
        let credentials = Credentials::new("file:///store", "alice", "secret", bucket).unwrap();
        let err = publish(
            &mut store,
            &credentials,
            PublishRequest::from_table(prices(), config(5)),
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::InvalidDestination(_)), "{:?}", err);
    }

    assert!(store.find_dataset("synthetic_data").unwrap().is_none());
    assert!(!dir.path().join("synth_synthetic_data.csv").exists());
    assert!(!root.join("synth_synthetic_data.csv").exists());
}
