//! In-process table backend.
//!
//! Rows live in a `DashMap` keyed by (partition, row). Used by tests and by
//! `memory:` deployments where durability does not matter.

use async_trait::async_trait;
use dashmap::DashMap;

use tally_core::error::{Result, TallyError};
use tally_core::record::CounterRecord;

use super::{Lookup, TableStore};

#[derive(Debug)]
pub struct MemoryStore {
    table_name: String,
    rows: DashMap<(String, String), CounterRecord>,
}

impl MemoryStore {
    pub fn new(table_name: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            rows: DashMap::new(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn get_entity(&self, partition_key: &str, row_key: &str) -> Result<Lookup> {
        let key = (partition_key.to_string(), row_key.to_string());
        Ok(match self.rows.get(&key) {
            Some(rec) => Lookup::Found(rec.clone()),
            None => Lookup::NotFound,
        })
    }

    async fn update_entity(&self, record: &CounterRecord) -> Result<()> {
        let key = (record.partition_key.clone(), record.row_key.clone());
        match self.rows.get_mut(&key) {
            // Unconditional replace: whatever is there now loses.
            Some(mut row) => {
                *row = record.clone();
                Ok(())
            }
            None => Err(TallyError::Store(format!(
                "update of missing row ({}, {}) in table {}",
                record.partition_key, record.row_key, self.table_name
            ))),
        }
    }

    async fn create_entity(&self, record: &CounterRecord) -> Result<()> {
        let key = (record.partition_key.clone(), record.row_key.clone());
        match self.rows.entry(key) {
            dashmap::mapref::entry::Entry::Vacant(v) => {
                v.insert(record.clone());
                Ok(())
            }
            dashmap::mapref::entry::Entry::Occupied(_) => Err(TallyError::Store(format!(
                "row ({}, {}) already exists in table {}",
                record.partition_key, record.row_key, self.table_name
            ))),
        }
    }
}
