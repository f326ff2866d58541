use std::collections::{BTreeMap, HashMap};
use std::collections::hash_map::Entry;

use tracing::warn;

use crate::models::{CardholderRecord, CategorizedTransaction, EnrichedTransaction, OUTPUT_COLUMNS};
use crate::types::CardholderId;

/// Immutable lookup of cardholders keyed by identifier, built once per batch.
///
/// When the reference data repeats an identifier the first occurrence wins and later
/// ones are ignored. Every stored record carries exactly the index's attribute columns.
#[derive(Debug, Default)]
pub struct CardholderIndex {
    cardholders: HashMap<CardholderId, CardholderRecord>,
    attribute_columns: Vec<String>
}

impl CardholderIndex {
    /// Builds the index from the full reference dataset.
    ///
    /// Attribute columns that would shadow an output column are dropped.
    pub fn from_records<I>(attribute_columns: Vec<String>, records: I) -> Self
    where
        I: IntoIterator<Item = CardholderRecord>,
    {
        let attribute_columns: Vec<String> = attribute_columns.into_iter()
            .filter(|column| {
                let reserved = OUTPUT_COLUMNS.contains(&column.as_str());

                if reserved {
                    warn!("Cardholder attribute column [{column}] collides with an output column and is dropped");
                }

                !reserved
            })
            .collect();

        let mut cardholders = HashMap::new();

        for mut record in records {
            let mut raw_attributes = std::mem::take(&mut record.attributes);

            record.attributes = attribute_columns.iter()
                .map(|column| (column.clone(), raw_attributes.remove(column).flatten()))
                .collect();

            match cardholders.entry(record.cardholder_id.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(record);
                }
                Entry::Occupied(entry) => {
                    warn!("Duplicate cardholder [{}] in reference data, keeping the first occurrence", entry.key());
                }
            }
        }

        Self {
            cardholders,
            attribute_columns
        }
    }

    pub fn get(&self, cardholder_id: &str) -> Option<&CardholderRecord> {
        self.cardholders.get(cardholder_id)
    }

    pub fn len(&self) -> usize {
        self.cardholders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cardholders.is_empty()
    }

    pub fn attribute_columns(&self) -> &[String] {
        &self.attribute_columns
    }

    fn null_attributes(&self) -> BTreeMap<String, Option<String>> {
        self.attribute_columns.iter()
            .map(|column| (column.clone(), None))
            .collect()
    }
}

/// Left outer join of a categorized transaction against the cardholder index.
///
/// A miss is not an error: the record keeps every cardholder column, each set to `None`.
pub fn enrich(categorized: CategorizedTransaction, index: &CardholderIndex) -> EnrichedTransaction {
    match index.get(&categorized.transaction.cardholder_id) {
        Some(cardholder) => EnrichedTransaction {
            cardholder_matched: true,
            reward_points: cardholder.reward_points,
            cardholder_attributes: cardholder.attributes.clone(),
            categorized
        },
        None => EnrichedTransaction {
            cardholder_matched: false,
            reward_points: None,
            cardholder_attributes: index.null_attributes(),
            categorized
        }
    }
}
