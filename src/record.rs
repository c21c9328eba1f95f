//! Core record types for normalization.
//!
//! This module provides the record shapes the rest of the crate operates on:
//! a packed record whose `items` field holds several values in one delimited
//! string, and the atomic record produced for each of those values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A record carrying a multi-value field packed into a single string.
///
/// `items` holds zero or more values separated by a fixed single-character
/// delimiter (e.g. `"Laptop,Mouse"`). `id` and `label` are scalar and
/// immutable per record; the key type `K` is generic so callers can use
/// integer or string identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedRecord<K> {
    /// Record identifier, carried unchanged onto every derived record
    pub id: K,

    /// Scalar attribute carried unchanged onto every derived record
    pub label: String,

    /// Delimited multi-value field
    pub items: String,
}

/// A single-value record derived from a [`PackedRecord`].
///
/// One atomic record is produced per non-empty element of the source
/// record's `items` field, in left-to-right order of appearance. `item` is
/// never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicRecord<K> {
    /// Identifier of the source record
    pub id: K,

    /// Label of the source record
    pub label: String,

    /// One element of the source record's packed field
    pub item: String,
}

/// Error type for record validation and decomposition operations
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    /// Delimiter string was empty or longer than one character
    InvalidDelimiter(String),
    /// Same order id seen with two different customer names
    DependencyViolation {
        order_id: i64,
        existing: String,
        conflicting: String,
    },
    /// Same {order_id, item} pair seen twice
    DuplicateKey { order_id: i64, item: String },
    /// An order item references an order id that does not exist
    MissingOrder { order_id: i64, item: String },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::InvalidDelimiter(raw) => {
                write!(f, "Delimiter must be exactly one character, got '{}'", raw)
            }
            RecordError::DependencyViolation {
                order_id,
                existing,
                conflicting,
            } => write!(
                f,
                "Order {} has conflicting customer names '{}' and '{}'",
                order_id, existing, conflicting
            ),
            RecordError::DuplicateKey { order_id, item } => {
                write!(f, "Duplicate order item ({}, '{}')", order_id, item)
            }
            RecordError::MissingOrder { order_id, item } => write!(
                f,
                "Order item ({}, '{}') references an order that does not exist",
                order_id, item
            ),
        }
    }
}

impl std::error::Error for RecordError {}
