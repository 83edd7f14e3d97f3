//! The stored document: a JSON object mapping question keys to records.
//!
//! Serde's map collections would either reorder keys or need an extra
//! dependency, and the ranking queries break ties by store order, so the
//! document keeps its entries as an explicit ordered list and speaks
//! JSON-object on the wire through a custom (de)serializer.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use exam_core::model::RecordSet;

use super::mapping::{MappingError, StoredRecord};

/// Ordered key → record entries, exactly as they appear in the file.
#[derive(Debug, Default)]
pub struct StatsDocument(pub Vec<(String, StoredRecord)>);

impl StatsDocument {
    /// Snapshots a record set into its persisted shape, in store order.
    #[must_use]
    pub fn from_set(set: &RecordSet) -> Self {
        Self(
            set.iter()
                .map(|record| (record.key().to_owned(), StoredRecord::from_record(record)))
                .collect(),
        )
    }

    /// Rebuilds the record set, preserving document order.
    ///
    /// # Errors
    ///
    /// Returns `MappingError` if any entry fails validation.
    pub fn into_set(self) -> Result<RecordSet, MappingError> {
        let mut set = RecordSet::new();
        for (key, stored) in self.0 {
            set.insert(stored.into_record(&key)?);
        }
        Ok(set)
    }
}

impl Serialize for StatsDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(key, record)| (key, record)))
    }
}

impl<'de> Deserialize<'de> for StatsDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = StatsDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of question keys to record objects")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, StoredRecord>()? {
                    entries.push(entry);
                }
                Ok(StatsDocument(entries))
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}
