//! Binary asset store for product images.
//!
//! The catalog only ever stores the names handed out here.

use async_trait::async_trait;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Image content types accepted on upload, paired with the stored extension
const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpeg"),
    ("image/jpg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/bmp", "bmp"),
    ("image/svg+xml", "svg"),
];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Make sure that the file is an image, got {0}")]
    UnsupportedMediaType(String),

    #[error("No product image found with name {0}")]
    NotFound(String),

    #[error("Invalid image name {0}")]
    InvalidName(String),

    #[error("Asset storage error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AssetResult<T> = Result<T, AssetError>;

impl From<AssetError> for AppError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::UnsupportedMediaType(_) => AppError::UnsupportedMediaType(err.to_string()),
            AssetError::NotFound(_) => AppError::NotFound(err.to_string()),
            AssetError::InvalidName(_) => AppError::BadRequest(err.to_string()),
            AssetError::Io(e) => AppError::Io(e),
        }
    }
}

impl IntoResponse for AssetError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Stored bytes with the content type they were uploaded with
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAsset {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store an upload and return its generated name
    async fn save(&self, content_type: &str, bytes: Vec<u8>) -> AssetResult<String>;

    async fn load(&self, name: &str) -> AssetResult<StoredAsset>;
}

/// File-system store writing `<uuid>.<ext>` files under a single directory
#[derive(Debug, Clone)]
pub struct DiskAssetStore {
    root: PathBuf,
}

impl DiskAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn extension_for(content_type: &str) -> Option<&'static str> {
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        ALLOWED_IMAGE_TYPES
            .iter()
            .find(|(mime, _)| mime.eq_ignore_ascii_case(essence))
            .map(|(_, ext)| *ext)
    }

    fn content_type_for(name: &str) -> &'static str {
        let ext = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
        ALLOWED_IMAGE_TYPES
            .iter()
            .find(|(_, known)| known.eq_ignore_ascii_case(ext))
            .map(|(mime, _)| *mime)
            .unwrap_or("application/octet-stream")
    }

    fn validate_name(name: &str) -> AssetResult<()> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(AssetError::InvalidName(name.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AssetStore for DiskAssetStore {
    async fn save(&self, content_type: &str, bytes: Vec<u8>) -> AssetResult<String> {
        let ext = Self::extension_for(content_type)
            .ok_or_else(|| AssetError::UnsupportedMediaType(content_type.to_string()))?;
        let name = format!("{}.{}", Uuid::new_v4(), ext);

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&name), &bytes).await?;

        tracing::info!(%name, size = bytes.len(), "Stored product image");
        Ok(name)
    }

    async fn load(&self, name: &str) -> AssetResult<StoredAsset> {
        Self::validate_name(name)?;

        match tokio::fs::read(self.root.join(name)).await {
            Ok(bytes) => Ok(StoredAsset {
                content_type: Self::content_type_for(name).to_string(),
                bytes,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AssetError::NotFound(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
