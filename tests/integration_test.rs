//! Integration tests for renorm expansion and decomposition

use std::io::Write;

use renorm::{
    decompose, join_values, load_document, reconstruct, split_values, verify_lossless,
    AtomicRecord, Document, Expander, FlatOrderRow, FlatRelation, NdjsonWriter, PackedDataset,
};

const DATASET_YAML: &str = r#"
dataset:
  delimiter: ","
  records:
    - id: 101
      label: "John Doe"
      items: "Laptop,Mouse"
    - id: 102
      label: "Jane Smith"
      items: ",Phone,"
    - id: 103
      label: "Bob Johnson"
      items: "A,,B"
"#;

const RELATION_YAML: &str = r#"
relation:
  rows:
    - order_id: 101
      customer_name: "John Doe"
      item: "Laptop"
      quantity: 1
    - order_id: 101
      customer_name: "John Doe"
      item: "Mouse"
      quantity: 2
    - order_id: 102
      customer_name: "Jane Smith"
      item: "Phone"
      quantity: 1
"#;

#[test]
fn test_expand_dataset_end_to_end() {
    let dataset = PackedDataset::from_yaml_str(DATASET_YAML).unwrap();
    let expander = Expander::new(dataset.delimiter);

    let atomic = expander.expand_all(&dataset.records);

    let items: Vec<&str> = atomic.iter().map(|r| r.item.as_str()).collect();
    assert_eq!(items, vec!["Laptop", "Mouse", "Phone", "A", "B"]);

    // leading/trailing/consecutive delimiters never produce records
    assert!(atomic.iter().all(|r| !r.item.is_empty()));

    // id and label travel with every derived record
    let phone = atomic.iter().find(|r| r.item == "Phone").unwrap();
    assert_eq!(phone.id, 102);
    assert_eq!(phone.label, "Jane Smith");
}

#[test]
fn test_expanded_records_serialize_as_ndjson() {
    let dataset = PackedDataset::from_yaml_str(DATASET_YAML).unwrap();
    let expander = Expander::new(dataset.delimiter);
    let atomic = expander.expand_all(&dataset.records);

    let mut buf = Vec::new();
    let mut writer = NdjsonWriter::new(&mut buf);
    writer.write_all(&atomic).unwrap();
    writer.flush().unwrap();

    let output = String::from_utf8(buf).unwrap();
    let parsed: Vec<AtomicRecord<i64>> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(parsed, atomic);
}

#[test]
fn test_join_back_reproduces_non_empty_tokens() {
    let dataset = PackedDataset::from_yaml_str(DATASET_YAML).unwrap();
    let expander = Expander::new(dataset.delimiter);

    for record in &dataset.records {
        let items: Vec<String> = expander
            .expand(record)
            .into_iter()
            .map(|r| r.item)
            .collect();

        let tokens = split_values(&record.items, dataset.delimiter);

        assert_eq!(
            join_values(&items, dataset.delimiter),
            join_values(&tokens, dataset.delimiter)
        );
    }
}

#[test]
fn test_decompose_relation_end_to_end() {
    let relation = FlatRelation::from_yaml_str(RELATION_YAML).unwrap();

    let decomposition = decompose(&relation.rows).unwrap();

    assert_eq!(decomposition.orders.len(), 2);
    assert_eq!(decomposition.order_items.len(), 3);

    let reconstructed = reconstruct(&decomposition).unwrap();
    assert_eq!(reconstructed, relation.rows);

    assert!(verify_lossless(&relation.rows).unwrap());
}

#[test]
fn test_decompose_rejects_partial_dependency_violation() {
    let rows = vec![
        FlatOrderRow {
            order_id: 101,
            customer_name: "John Doe".to_string(),
            item: "Laptop".to_string(),
            quantity: 1,
        },
        FlatOrderRow {
            order_id: 101,
            customer_name: "Someone Else".to_string(),
            item: "Mouse".to_string(),
            quantity: 1,
        },
    ];

    assert!(decompose(&rows).is_err());
}

#[test]
fn test_load_document_from_files() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let dataset_path = temp_dir.path().join("dataset.yaml");
    std::fs::File::create(&dataset_path)
        .unwrap()
        .write_all(DATASET_YAML.as_bytes())
        .unwrap();

    let relation_path = temp_dir.path().join("relation.yaml");
    std::fs::File::create(&relation_path)
        .unwrap()
        .write_all(RELATION_YAML.as_bytes())
        .unwrap();

    match load_document(&dataset_path).unwrap() {
        Document::Packed(dataset) => assert_eq!(dataset.records.len(), 3),
        Document::Flat(_) => panic!("expected a packed dataset"),
    }

    match load_document(&relation_path).unwrap() {
        Document::Flat(relation) => assert_eq!(relation.rows.len(), 3),
        Document::Packed(_) => panic!("expected a flat relation"),
    }
}

#[test]
fn test_expansion_then_decomposition_roundtrip() {
    // expand a packed dataset, rebuild a flat relation from it, and verify
    // the relation decomposes losslessly
    let dataset = PackedDataset::from_yaml_str(DATASET_YAML).unwrap();
    let expander = Expander::new(dataset.delimiter);

    let rows: Vec<FlatOrderRow> = expander
        .expand_all(&dataset.records)
        .into_iter()
        .map(|r| FlatOrderRow {
            order_id: r.id,
            customer_name: r.label,
            item: r.item,
            quantity: 1,
        })
        .collect();

    assert!(verify_lossless(&rows).unwrap());
}
