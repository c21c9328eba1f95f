//! # Renorm: Record Normalization Toolkit
//!
//! Renorm provides two normalization operations over small, fully
//! materialized, in-memory datasets:
//!
//! - **1NF expansion**: expand a record whose field packs several values
//!   into one delimited string (`"Laptop,Mouse"`) into one atomic record
//!   per value, so every attribute holds a single, indivisible value
//! - **2NF decomposition**: split a flat order relation whose
//!   `customer_name` depends on only part of its composite key into
//!   `Orders` and `OrderItems`, with a lossless equi-join back to the
//!   original relation
//!
//! Both operations are pure, synchronous transformations: input is supplied
//! wholesale, output is derived, and nothing is mutated in place.
//!
//! ## Example: expanding a packed dataset
//!
//! ```yaml
//! dataset:
//!   delimiter: ","
//!   records:
//!     - id: 101
//!       label: "John Doe"
//!       items: "Laptop,Mouse"
//! ```
//!
//! ```
//! use renorm::{Expander, PackedDataset};
//!
//! let yaml = r#"
//! dataset:
//!   delimiter: ","
//!   records:
//!     - id: 101
//!       label: "John Doe"
//!       items: "Laptop,Mouse"
//! "#;
//!
//! let dataset = PackedDataset::from_yaml_str(yaml).unwrap();
//! let expander = Expander::new(dataset.delimiter);
//! let atomic = expander.expand_all(&dataset.records);
//!
//! assert_eq!(atomic.len(), 2);
//! assert_eq!(atomic[0].item, "Laptop");
//! ```
//!
//! ## Example: decomposing a flat relation
//!
//! ```yaml
//! relation:
//!   rows:
//!     - order_id: 101
//!       customer_name: "John Doe"
//!       item: "Laptop"
//!       quantity: 1
//! ```
//!
//! Decomposition verifies the functional dependency
//! `order_id -> customer_name` and rejects duplicate `{order_id, item}`
//! keys, since the lossless-join guarantee only holds under those
//! preconditions.

// Core modules
pub mod record;
pub mod expand;
pub mod decompose;

// Dataset loading and output sinks
pub mod dataset;
pub mod output;

// Re-export key types
pub use record::{AtomicRecord, PackedRecord, RecordError};
pub use expand::{join_values, split_values, Expander};
pub use decompose::{
    decompose, reconstruct, verify_lossless, Decomposition, FlatOrderRow, Order, OrderItem,
};
pub use dataset::{load_document, Document, FlatRelation, PackedDataset};
pub use output::{write_decomposition, NdjsonWriter, OutputError};
