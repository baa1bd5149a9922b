use crate::model::Id;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored document as returned by the remote store. `data` carries the
/// collection-specific payload; `id` and `created_at` are store-generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Id,
    pub created_at: String, // ISO 8601 timestamp
    pub data: Value,
}

/// A stored file record in the blob store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Id,
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

/// Descriptor for a file to upload. The store fetches the bytes from `uri`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFile {
    pub uri: String,
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

/// Document operations against one database of the remote store. The store
/// mints document ids; callers never supply one.
#[async_trait::async_trait]
pub trait CollectionStore: Send + Sync {
    async fn list_documents(&self, database_id: &Id, collection_id: &Id) -> Result<Vec<Document>>;
    async fn create_document(
        &self,
        database_id: &Id,
        collection_id: &Id,
        payload: Value,
    ) -> Result<Document>;
    async fn delete_document(
        &self,
        database_id: &Id,
        collection_id: &Id,
        document_id: &Id,
    ) -> Result<()>;
}

/// File operations against the blob store.
#[async_trait::async_trait]
pub trait FileStore: Send + Sync {
    async fn list_files(&self, bucket_id: &Id) -> Result<Vec<FileRecord>>;
    async fn create_file(&self, bucket_id: &Id, file: NewFile) -> Result<FileRecord>;
    async fn delete_file(&self, bucket_id: &Id, file_id: &Id) -> Result<()>;
    /// Publicly resolvable URL for viewing an uploaded file.
    fn file_view_url(&self, bucket_id: &Id, file_id: &Id) -> String;
}

pub trait Store: CollectionStore + FileStore + Send + Sync {}
impl<T: CollectionStore + FileStore + Send + Sync> Store for T {}
