use crate::model::{generate_id, Id};
use crate::store::traits::{CollectionStore, Document, FileRecord, FileStore, NewFile};
use anyhow::{bail, Result};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// In-memory implementation of the store traits, used for dry runs and tests.
/// Documents are kept per (database, collection) in insertion order, mirroring
/// the remote store's listing semantics.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<(Id, Id), Vec<Document>>>,
    buckets: RwLock<HashMap<Id, Vec<FileRecord>>>,
    // Failure injection for tests.
    fail_document_names: RwLock<HashSet<String>>,
    fail_file_uploads: RwLock<bool>,
    fail_deletes: RwLock<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_document` fail for any payload whose `name` field matches.
    pub fn fail_creates_named(&self, name: &str) {
        self.fail_document_names.write().insert(name.to_string());
    }

    /// Make every `create_file` call fail.
    pub fn fail_file_uploads(&self, fail: bool) {
        *self.fail_file_uploads.write() = fail;
    }

    /// Make every delete (document or file) fail.
    pub fn fail_deletes(&self, fail: bool) {
        *self.fail_deletes.write() = fail;
    }

    /// Snapshot of the documents currently in one collection.
    pub fn documents_in(&self, database_id: &Id, collection_id: &Id) -> Vec<Document> {
        self.collections
            .read()
            .get(&(database_id.clone(), collection_id.clone()))
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of the files currently in one bucket.
    pub fn files_in(&self, bucket_id: &Id) -> Vec<FileRecord> {
        self.buckets.read().get(bucket_id).cloned().unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl CollectionStore for MemoryStore {
    async fn list_documents(&self, database_id: &Id, collection_id: &Id) -> Result<Vec<Document>> {
        Ok(self.documents_in(database_id, collection_id))
    }

    async fn create_document(
        &self,
        database_id: &Id,
        collection_id: &Id,
        payload: Value,
    ) -> Result<Document> {
        if let Some(name) = payload.get("name").and_then(Value::as_str) {
            if self.fail_document_names.read().contains(name) {
                bail!("injected create failure for document '{}'", name);
            }
        }

        let doc = Document {
            id: generate_id(),
            created_at: chrono::Utc::now().to_rfc3339(),
            data: payload,
        };
        self.collections
            .write()
            .entry((database_id.clone(), collection_id.clone()))
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn delete_document(
        &self,
        database_id: &Id,
        collection_id: &Id,
        document_id: &Id,
    ) -> Result<()> {
        if *self.fail_deletes.read() {
            bail!("injected delete failure for document '{}'", document_id);
        }

        let mut collections = self.collections.write();
        let docs = collections
            .get_mut(&(database_id.clone(), collection_id.clone()))
            .filter(|docs| docs.iter().any(|d| &d.id == document_id));
        match docs {
            Some(docs) => {
                docs.retain(|d| &d.id != document_id);
                Ok(())
            }
            None => bail!("document '{}' not found", document_id),
        }
    }
}

#[async_trait::async_trait]
impl FileStore for MemoryStore {
    async fn list_files(&self, bucket_id: &Id) -> Result<Vec<FileRecord>> {
        Ok(self.files_in(bucket_id))
    }

    async fn create_file(&self, bucket_id: &Id, file: NewFile) -> Result<FileRecord> {
        if *self.fail_file_uploads.read() {
            bail!("injected upload failure for file '{}'", file.name);
        }

        let record = FileRecord {
            id: generate_id(),
            name: file.name,
            content_type: file.content_type,
            size: file.size,
        };
        self.buckets
            .write()
            .entry(bucket_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn delete_file(&self, bucket_id: &Id, file_id: &Id) -> Result<()> {
        if *self.fail_deletes.read() {
            bail!("injected delete failure for file '{}'", file_id);
        }

        let mut buckets = self.buckets.write();
        let files = buckets
            .get_mut(bucket_id)
            .filter(|files| files.iter().any(|f| &f.id == file_id));
        match files {
            Some(files) => {
                files.retain(|f| &f.id != file_id);
                Ok(())
            }
            None => bail!("file '{}' not found", file_id),
        }
    }

    fn file_view_url(&self, bucket_id: &Id, file_id: &Id) -> String {
        format!("memory://buckets/{}/files/{}/view", bucket_id, file_id)
    }
}
