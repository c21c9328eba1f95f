//! Second-normal-form decomposition of a flat order relation.
//!
//! A flat relation `{order_id, customer_name, item, quantity}` keyed by
//! `{order_id, item}` carries a partial dependency: `customer_name` depends
//! on `order_id` alone. Decomposition splits it into `Orders` and
//! `OrderItems` so that every non-key attribute depends on its relation's
//! whole key, and an equi-join on `order_id` reproduces the original
//! relation exactly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::record::RecordError;

/// One row of the flat, denormalized order relation.
///
/// Key: `{order_id, item}`. `customer_name` is functionally dependent on
/// `order_id` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatOrderRow {
    pub order_id: i64,
    pub customer_name: String,
    pub item: String,
    pub quantity: i64,
}

/// One row of the decomposed `Orders` relation. Key: `order_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    pub customer_name: String,
}

/// One row of the decomposed `OrderItems` relation. Key: `{order_id, item}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: i64,
    pub item: String,
    pub quantity: i64,
}

/// Result of decomposing a flat relation: the two projected relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    /// One row per distinct `order_id`, in first-seen order
    pub orders: Vec<Order>,

    /// Every input row projected onto `{order_id, item, quantity}`
    pub order_items: Vec<OrderItem>,
}

/// Decompose a flat order relation into `Orders` and `OrderItems`.
///
/// Orders are deduplicated on `order_id` with first-seen order preserved;
/// every input row is projected into `order_items` unchanged.
///
/// The decomposition is only lossless when the input actually satisfies the
/// functional dependency `order_id -> customer_name` and carries no
/// duplicate `{order_id, item}` key, so both preconditions are verified
/// here rather than assumed.
///
/// # Errors
/// * [`RecordError::DependencyViolation`] - same `order_id` with two
///   different customer names
/// * [`RecordError::DuplicateKey`] - same `{order_id, item}` pair twice
///
/// # Example
/// ```
/// use renorm::{decompose, FlatOrderRow};
///
/// let rows = vec![
///     FlatOrderRow { order_id: 101, customer_name: "John Doe".into(), item: "Laptop".into(), quantity: 1 },
///     FlatOrderRow { order_id: 101, customer_name: "John Doe".into(), item: "Mouse".into(), quantity: 2 },
/// ];
///
/// let d = decompose(&rows).unwrap();
/// assert_eq!(d.orders.len(), 1);
/// assert_eq!(d.order_items.len(), 2);
/// ```
pub fn decompose(rows: &[FlatOrderRow]) -> Result<Decomposition, RecordError> {
    let mut orders: IndexMap<i64, String> = IndexMap::new();
    let mut seen_keys: HashSet<(i64, String)> = HashSet::new();
    let mut order_items = Vec::with_capacity(rows.len());

    for row in rows {
        match orders.get(&row.order_id) {
            Some(existing) if existing != &row.customer_name => {
                return Err(RecordError::DependencyViolation {
                    order_id: row.order_id,
                    existing: existing.clone(),
                    conflicting: row.customer_name.clone(),
                });
            }
            Some(_) => {}
            None => {
                orders.insert(row.order_id, row.customer_name.clone());
            }
        }

        if !seen_keys.insert((row.order_id, row.item.clone())) {
            return Err(RecordError::DuplicateKey {
                order_id: row.order_id,
                item: row.item.clone(),
            });
        }

        order_items.push(OrderItem {
            order_id: row.order_id,
            item: row.item.clone(),
            quantity: row.quantity,
        });
    }

    tracing::debug!(
        rows = rows.len(),
        orders = orders.len(),
        "decomposed flat relation"
    );

    Ok(Decomposition {
        orders: orders
            .into_iter()
            .map(|(order_id, customer_name)| Order {
                order_id,
                customer_name,
            })
            .collect(),
        order_items,
    })
}

/// Reconstruct the flat relation by joining `Orders` and `OrderItems`.
///
/// Equi-join on `order_id`: each order item picks up its order's customer
/// name. Orders with no items contribute no rows. For a decomposition
/// produced by [`decompose`], the result equals the original relation
/// row-for-row, in the original row order.
///
/// # Errors
/// * [`RecordError::MissingOrder`] - an order item references an `order_id`
///   with no matching order
pub fn reconstruct(decomposition: &Decomposition) -> Result<Vec<FlatOrderRow>, RecordError> {
    let names: IndexMap<i64, &str> = decomposition
        .orders
        .iter()
        .map(|o| (o.order_id, o.customer_name.as_str()))
        .collect();

    decomposition
        .order_items
        .iter()
        .map(|item| {
            let customer_name = names.get(&item.order_id).ok_or_else(|| {
                RecordError::MissingOrder {
                    order_id: item.order_id,
                    item: item.item.clone(),
                }
            })?;

            Ok(FlatOrderRow {
                order_id: item.order_id,
                customer_name: customer_name.to_string(),
                item: item.item.clone(),
                quantity: item.quantity,
            })
        })
        .collect()
}

/// Check the lossless-join property for a flat relation.
///
/// Decomposes, reconstructs, and compares against the input up to row
/// reordering. Propagates precondition violations as errors; a `false`
/// return would indicate a defect in the decomposition itself.
pub fn verify_lossless(rows: &[FlatOrderRow]) -> Result<bool, RecordError> {
    let reconstructed = reconstruct(&decompose(rows)?)?;

    let mut expected = rows.to_vec();
    let mut actual = reconstructed;

    let key = |r: &FlatOrderRow| (r.order_id, r.item.clone());
    expected.sort_by_key(key);
    actual.sort_by_key(key);

    Ok(expected == actual)
}
