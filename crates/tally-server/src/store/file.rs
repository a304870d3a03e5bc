//! File-backed table backend.
//!
//! All tables live in a single JSON document: table name -> ("pk/rk" -> row).
//! Every operation reads and rewrites the whole document under one async
//! mutex, which is plenty for a single counter row and keeps the on-disk
//! shape trivially inspectable.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tally_core::error::{Result, TallyError};
use tally_core::record::CounterRecord;

use super::{Lookup, TableStore};

type Document = BTreeMap<String, BTreeMap<String, CounterRecord>>;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    table_name: String,
    // Serializes read-modify-write cycles within this process. Two processes
    // on the same file still race, same as two handlers on one table row.
    lock: Mutex<()>,
}

fn row_id(partition_key: &str, row_key: &str) -> String {
    format!("{partition_key}/{row_key}")
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, table_name: &str) -> Self {
        Self {
            path: path.into(),
            table_name: table_name.to_string(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Document> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s)
                .map_err(|e| TallyError::Serialize(format!("corrupt store file: {e}"))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(TallyError::Store(format!("read store file failed: {e}"))),
        }
    }

    async fn save(&self, doc: &Document) -> Result<()> {
        let s = serde_json::to_string_pretty(doc)
            .map_err(|e| TallyError::Serialize(format!("encode store file: {e}")))?;
        tokio::fs::write(&self.path, s)
            .await
            .map_err(|e| TallyError::Store(format!("write store file failed: {e}")))
    }
}

#[async_trait]
impl TableStore for FileStore {
    async fn get_entity(&self, partition_key: &str, row_key: &str) -> Result<Lookup> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        let row = doc
            .get(&self.table_name)
            .and_then(|table| table.get(&row_id(partition_key, row_key)));
        Ok(match row {
            Some(rec) => Lookup::Found(rec.clone()),
            None => Lookup::NotFound,
        })
    }

    async fn update_entity(&self, record: &CounterRecord) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        let id = row_id(&record.partition_key, &record.row_key);
        let table = doc.entry(self.table_name.clone()).or_default();
        match table.get_mut(&id) {
            Some(row) => {
                *row = record.clone();
            }
            None => {
                return Err(TallyError::Store(format!(
                    "update of missing row {id} in table {}",
                    self.table_name
                )))
            }
        }
        self.save(&doc).await
    }

    async fn create_entity(&self, record: &CounterRecord) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        let id = row_id(&record.partition_key, &record.row_key);
        let table = doc.entry(self.table_name.clone()).or_default();
        if table.contains_key(&id) {
            return Err(TallyError::Store(format!(
                "row {id} already exists in table {}",
                self.table_name
            )));
        }
        table.insert(id, record.clone());
        self.save(&doc).await
    }
}
