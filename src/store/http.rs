use crate::model::Id;
use crate::store::traits::{CollectionStore, Document, FileRecord, FileStore, NewFile};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{Map, Value};

/// Sentinel telling the remote store to mint the id itself.
const UNIQUE_ID: &str = "unique()";

/// REST adapter for an Appwrite-compatible document/file store. Thin client:
/// every call maps to one HTTP request, errors carry the operation context.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    endpoint: String,
    project_id: String,
}

impl HttpStore {
    pub fn new(endpoint: &str, project_id: &str, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Appwrite-Project",
            HeaderValue::from_str(project_id).context("Invalid project id header value")?,
        );
        headers.insert(
            "X-Appwrite-Key",
            HeaderValue::from_str(api_key).context("Invalid API key header value")?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
        })
    }

    fn documents_url(&self, database_id: &Id, collection_id: &Id) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, database_id, collection_id
        )
    }

    fn files_url(&self, bucket_id: &Id) -> String {
        format!("{}/storage/buckets/{}/files", self.endpoint, bucket_id)
    }
}

/// Split a raw store document into its generated metadata (`$`-prefixed keys)
/// and the collection payload proper.
fn parse_document(raw: Value) -> Result<Document> {
    let obj = raw
        .as_object()
        .context("Store returned a non-object document")?;
    let id = obj
        .get("$id")
        .and_then(Value::as_str)
        .context("Store document is missing $id")?
        .to_string();
    let created_at = obj
        .get("$createdAt")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let data: Map<String, Value> = obj
        .iter()
        .filter(|(k, _)| !k.starts_with('$'))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(Document {
        id,
        created_at,
        data: Value::Object(data),
    })
}

fn parse_file(raw: &Value) -> Result<FileRecord> {
    Ok(FileRecord {
        id: raw
            .get("$id")
            .and_then(Value::as_str)
            .context("Store file is missing $id")?
            .to_string(),
        name: raw
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        content_type: raw
            .get("mimeType")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        size: raw.get("sizeOriginal").and_then(Value::as_u64).unwrap_or(0),
    })
}

#[async_trait::async_trait]
impl CollectionStore for HttpStore {
    async fn list_documents(&self, database_id: &Id, collection_id: &Id) -> Result<Vec<Document>> {
        let body: Value = self
            .client
            .get(self.documents_url(database_id, collection_id))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("Failed to list documents in '{}'", collection_id))?
            .json()
            .await
            .context("Failed to decode document listing")?;

        body.get("documents")
            .and_then(Value::as_array)
            .context("Document listing is missing 'documents'")?
            .iter()
            .cloned()
            .map(parse_document)
            .collect()
    }

    async fn create_document(
        &self,
        database_id: &Id,
        collection_id: &Id,
        payload: Value,
    ) -> Result<Document> {
        let body: Value = self
            .client
            .post(self.documents_url(database_id, collection_id))
            .json(&serde_json::json!({
                "documentId": UNIQUE_ID,
                "data": payload,
            }))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("Failed to create document in '{}'", collection_id))?
            .json()
            .await
            .context("Failed to decode created document")?;

        parse_document(body)
    }

    async fn delete_document(
        &self,
        database_id: &Id,
        collection_id: &Id,
        document_id: &Id,
    ) -> Result<()> {
        self.client
            .delete(format!(
                "{}/{}",
                self.documents_url(database_id, collection_id),
                document_id
            ))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| {
                format!(
                    "Failed to delete document '{}' from '{}'",
                    document_id, collection_id
                )
            })?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl FileStore for HttpStore {
    async fn list_files(&self, bucket_id: &Id) -> Result<Vec<FileRecord>> {
        let body: Value = self
            .client
            .get(self.files_url(bucket_id))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("Failed to list files in bucket '{}'", bucket_id))?
            .json()
            .await
            .context("Failed to decode file listing")?;

        body.get("files")
            .and_then(Value::as_array)
            .context("File listing is missing 'files'")?
            .iter()
            .map(parse_file)
            .collect()
    }

    async fn create_file(&self, bucket_id: &Id, file: NewFile) -> Result<FileRecord> {
        // The descriptor points at the source bytes; fetch them first, then
        // upload as multipart form data.
        let bytes = self
            .client
            .get(&file.uri)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("Failed to fetch file bytes from '{}'", file.uri))?
            .bytes()
            .await
            .context("Failed to read file bytes")?;

        let part = reqwest::multipart::Part::bytes(bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .context("Invalid file content type")?;
        let form = reqwest::multipart::Form::new()
            .text("fileId", UNIQUE_ID)
            .part("file", part);

        let body: Value = self
            .client
            .post(self.files_url(bucket_id))
            .multipart(form)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("Failed to upload file '{}'", file.name))?
            .json()
            .await
            .context("Failed to decode uploaded file record")?;

        parse_file(&body)
    }

    async fn delete_file(&self, bucket_id: &Id, file_id: &Id) -> Result<()> {
        self.client
            .delete(format!("{}/{}", self.files_url(bucket_id), file_id))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("Failed to delete file '{}'", file_id))?;
        Ok(())
    }

    fn file_view_url(&self, bucket_id: &Id, file_id: &Id) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/view?project={}",
            self.endpoint, bucket_id, file_id, self.project_id
        )
    }
}
