//! Delimited field expansion.
//!
//! Expands a packed multi-value field into one atomic record per element,
//! restoring first normal form: every attribute of the output holds a
//! single, indivisible value.

use crate::record::{AtomicRecord, PackedRecord};

/// Split a delimited field into its non-empty values.
///
/// Values appear in the output in left-to-right order of appearance in the
/// field. Empty tokens produced by leading, trailing, or consecutive
/// delimiters are dropped, never emitted. Splitting happens on character
/// boundaries, so multi-byte content is safe.
///
/// A delimiter character embedded in a value is indistinguishable from a
/// separator; ambiguous data of that kind is not detected.
///
/// # Arguments
/// * `field` - Raw delimited string (may be empty)
/// * `delimiter` - Separator character
///
/// # Example
/// ```
/// use renorm::split_values;
///
/// assert_eq!(split_values("Laptop,Mouse", ','), vec!["Laptop", "Mouse"]);
/// assert_eq!(split_values(",Phone,", ','), vec!["Phone"]);
/// assert!(split_values(",,,", ',').is_empty());
/// ```
pub fn split_values(field: &str, delimiter: char) -> Vec<String> {
    field
        .split(delimiter)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Join values back into a delimited field.
///
/// Inverse of [`split_values`] up to dropped empty tokens: joining the
/// split of a field reproduces its non-empty value sequence.
pub fn join_values(values: &[String], delimiter: char) -> String {
    values.join(&delimiter.to_string())
}

/// Expands packed records into atomic records.
///
/// Holds the delimiter so a whole dataset can be expanded with one
/// configuration. Expansion is a pure function of its input: no state is
/// mutated and no record is written back.
///
/// # Example
/// ```
/// use renorm::{Expander, PackedRecord};
///
/// let expander = Expander::new(',');
/// let record = PackedRecord {
///     id: 101,
///     label: "John Doe".to_string(),
///     items: "Laptop,Mouse".to_string(),
/// };
///
/// let atomic = expander.expand(&record);
/// assert_eq!(atomic.len(), 2);
/// assert_eq!(atomic[0].item, "Laptop");
/// assert_eq!(atomic[1].item, "Mouse");
/// ```
#[derive(Debug, Clone)]
pub struct Expander {
    delimiter: char,
}

impl Expander {
    /// Create an expander for the given delimiter character.
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Get the configured delimiter.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Expand one packed record into atomic records.
    ///
    /// Produces one [`AtomicRecord`] per non-empty value of the packed
    /// field, carrying `id` and `label` unchanged. An empty field, or a
    /// field consisting only of delimiters, yields no records.
    pub fn expand<K: Clone>(&self, record: &PackedRecord<K>) -> Vec<AtomicRecord<K>> {
        split_values(&record.items, self.delimiter)
            .into_iter()
            .map(|item| AtomicRecord {
                id: record.id.clone(),
                label: record.label.clone(),
                item,
            })
            .collect()
    }

    /// Expand a batch of packed records.
    ///
    /// Records are processed in input order and each record's outputs keep
    /// their left-to-right value order, so the result is stable across
    /// invocations.
    pub fn expand_all<K: Clone>(&self, records: &[PackedRecord<K>]) -> Vec<AtomicRecord<K>> {
        let mut output = Vec::new();

        for record in records {
            output.extend(self.expand(record));
        }

        tracing::debug!(
            input_records = records.len(),
            output_records = output.len(),
            "expanded packed records"
        );

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed(id: i64, label: &str, items: &str) -> PackedRecord<i64> {
        PackedRecord {
            id,
            label: label.to_string(),
            items: items.to_string(),
        }
    }

    #[test]
    fn test_split_two_values_in_order() {
        assert_eq!(split_values("Laptop,Mouse", ','), vec!["Laptop", "Mouse"]);
    }

    #[test]
    fn test_split_empty_field_yields_nothing() {
        assert!(split_values("", ',').is_empty());
    }

    #[test]
    fn test_split_without_delimiter_yields_whole_field() {
        assert_eq!(split_values("Keyboard", ','), vec!["Keyboard"]);
    }

    #[test]
    fn test_split_drops_leading_and_trailing_empties() {
        assert_eq!(split_values(",Phone,", ','), vec!["Phone"]);
    }

    #[test]
    fn test_split_collapses_consecutive_delimiters() {
        assert_eq!(split_values("A,,B", ','), vec!["A", "B"]);
    }

    #[test]
    fn test_split_only_delimiters_yields_nothing() {
        assert!(split_values(",,,", ',').is_empty());
    }

    #[test]
    fn test_split_multibyte_values() {
        assert_eq!(
            split_values("Käse,Brötchen,小説", ','),
            vec!["Käse", "Brötchen", "小説"]
        );
    }

    #[test]
    fn test_split_multibyte_delimiter() {
        assert_eq!(split_values("A·B·C", '·'), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_join_inverts_split_up_to_dropped_empties() {
        let field = ",Laptop,,Mouse,";
        let values = split_values(field, ',');

        assert_eq!(join_values(&values, ','), "Laptop,Mouse");
    }

    #[test]
    fn test_expand_carries_id_and_label() {
        let expander = Expander::new(',');
        let atomic = expander.expand(&packed(101, "John Doe", "Laptop,Mouse"));

        assert_eq!(atomic.len(), 2);
        assert!(atomic.iter().all(|r| r.id == 101 && r.label == "John Doe"));
        assert_eq!(atomic[0].item, "Laptop");
        assert_eq!(atomic[1].item, "Mouse");
    }

    #[test]
    fn test_expand_empty_field_yields_no_records() {
        let expander = Expander::new(',');
        assert!(expander.expand(&packed(102, "Jane Smith", "")).is_empty());
    }

    #[test]
    fn test_expand_never_emits_empty_item() {
        let expander = Expander::new(',');
        let atomic = expander.expand(&packed(103, "Bob Johnson", ",Monitor,,"));

        assert_eq!(atomic.len(), 1);
        assert!(atomic.iter().all(|r| !r.item.is_empty()));
    }

    #[test]
    fn test_expand_all_preserves_record_order() {
        let expander = Expander::new(',');
        let records = vec![
            packed(101, "John Doe", "Laptop,Mouse"),
            packed(102, "Jane Smith", "Phone"),
            packed(103, "Bob Johnson", ""),
        ];

        let atomic = expander.expand_all(&records);

        assert_eq!(atomic.len(), 3);
        assert_eq!(atomic[0].item, "Laptop");
        assert_eq!(atomic[1].item, "Mouse");
        assert_eq!(atomic[2].item, "Phone");
        assert_eq!(atomic[2].id, 102);
    }

    #[test]
    fn test_expand_with_string_keys() {
        let expander = Expander::new(';');
        let record = PackedRecord {
            id: "ORD-9".to_string(),
            label: "Acme".to_string(),
            items: "Desk;Chair".to_string(),
        };

        let atomic = expander.expand(&record);

        assert_eq!(atomic.len(), 2);
        assert_eq!(atomic[1].id, "ORD-9");
        assert_eq!(atomic[1].item, "Chair");
    }
}
