use crate::model::{generate_id, Id};
use crate::store::{FileStore, NewFile};
use anyhow::Result;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const PLACEHOLDER_WIDTH: u32 = 300;
const PLACEHOLDER_HEIGHT: u32 = 200;
// Estimated size of a placeholder asset (10 KiB).
const PLACEHOLDER_SIZE: u64 = 10_240;
const FALLBACK_LABEL: &str = "food";

// Escape set matching JavaScript's encodeURIComponent: everything but
// alphanumerics and - _ . ! ~ * ' ( ) is percent-encoded.
const QUERY_TEXT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Outcome of materializing one source image. Either path yields a usable
/// URL; the variant records whether the upload succeeded or the deterministic
/// placeholder URL was returned directly.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterializedImage {
    Uploaded { url: String, file_id: Id },
    Placeholder { url: String },
}

impl MaterializedImage {
    pub fn url(&self) -> &str {
        match self {
            MaterializedImage::Uploaded { url, .. } => url,
            MaterializedImage::Placeholder { url } => url,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, MaterializedImage::Placeholder { .. })
    }
}

/// Turns a source image reference into a durable, externally retrievable URL.
/// Uploads a synthetic placeholder asset to the blob store; on any failure it
/// degrades to the placeholder URL itself. Never fails, and every call
/// uploads a fresh object (no caching or dedup).
pub struct ImageMaterializer<'a, S: FileStore> {
    store: &'a S,
    bucket_id: &'a Id,
}

impl<'a, S: FileStore> ImageMaterializer<'a, S> {
    pub fn new(store: &'a S, bucket_id: &'a Id) -> Self {
        Self { store, bucket_id }
    }

    pub async fn materialize(&self, source_ref: &str) -> MaterializedImage {
        let placeholder = placeholder_url(source_ref);
        log::info!("Using placeholder image: {}", placeholder);

        match self.upload(&placeholder).await {
            Ok((file_id, url)) => {
                log::info!("Placeholder uploaded as file '{}'", file_id);
                MaterializedImage::Uploaded { url, file_id }
            }
            Err(e) => {
                log::warn!("Placeholder upload failed, falling back to direct URL: {:#}", e);
                MaterializedImage::Placeholder { url: placeholder }
            }
        }
    }

    async fn upload(&self, placeholder_url: &str) -> Result<(Id, String)> {
        let file = NewFile {
            uri: placeholder_url.to_string(),
            name: format!("food-{}.png", generate_id()),
            content_type: "image/png".to_string(),
            size: PLACEHOLDER_SIZE,
        };

        let uploaded = self.store.create_file(self.bucket_id, file).await?;
        let url = self.store.file_view_url(self.bucket_id, &uploaded.id);
        Ok((uploaded.id, url))
    }
}

/// Filename component of the source reference without its extension, falling
/// back to a generic label when there is nothing usable.
fn derive_label(source_ref: &str) -> &str {
    source_ref
        .rsplit('/')
        .next()
        .and_then(|file| file.split('.').next())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(FALLBACK_LABEL)
}

/// Deterministic placeholder URL encoding the fixed dimensions and the
/// derived label as query text.
pub fn placeholder_url(source_ref: &str) -> String {
    let label = utf8_percent_encode(derive_label(source_ref), QUERY_TEXT);
    format!(
        "https://via.placeholder.com/{}x{}.png?text={}",
        PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, label
    )
}
