use std::path::{Path, PathBuf};

use axum::body::Bytes;
use chrono::Utc;
use tokio::fs;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A file received in a multipart request, held in memory until it is stored.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Lowercased extension from the client filename, falling back to the content type.
    pub fn extension(&self) -> Option<String> {
        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        from_name.or_else(|| {
            let subtype = self.content_type.as_deref()?.strip_prefix("image/")?;
            let ext = subtype.split('+').next().unwrap_or(subtype);
            Some(ext.to_ascii_lowercase())
        })
    }

    pub fn is_image(&self) -> bool {
        match self.content_type.as_deref() {
            Some(content_type) => content_type.starts_with("image/"),
            None => self
                .extension()
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str())),
        }
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif", "bmp", "svg", "webp"];

/// What a store accepts for one kind of upload.
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    pub allowed: &'static [&'static str],
    pub max_kilobytes: u64,
}

impl UploadPolicy {
    fn check(&self, file: &UploadedFile) -> AppResult<String> {
        let ext = file
            .extension()
            .filter(|ext| self.allowed.iter().any(|allowed| *allowed == ext.as_str()))
            .ok_or_else(|| AppError::BadRequest("unsupported file type".into()))?;
        if file.bytes.len() as u64 > self.max_kilobytes * 1024 {
            return Err(AppError::BadRequest("file too large".into()));
        }
        Ok(ext)
    }
}

/// Directory-scoped image storage. Callers only ever see generated filenames;
/// paths are resolved here and nowhere else.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `file` under a fresh timestamp-based name and return that name.
    pub async fn store(&self, file: &UploadedFile, policy: &UploadPolicy) -> AppResult<String> {
        let ext = policy.check(file)?;
        fs::create_dir_all(&self.root).await?;

        let suffix = Uuid::new_v4().simple().to_string();
        let name = format!("{}_{}.{ext}", Utc::now().timestamp_millis(), &suffix[..8]);
        fs::write(self.root.join(&name), &file.bytes).await?;

        tracing::debug!(file = %name, bytes = file.bytes.len(), "image stored");
        Ok(name)
    }

    /// Remove a previously stored file. Returns `false` when it was already gone.
    pub async fn remove(&self, name: &str) -> AppResult<bool> {
        let path = self.resolve(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(file = %name, "image removed");
                Ok(true)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn exists(&self, name: &str) -> AppResult<bool> {
        let path = self.resolve(name)?;
        Ok(fs::try_exists(path).await?)
    }

    fn resolve(&self, name: &str) -> AppResult<PathBuf> {
        let plain = Path::new(name)
            .file_name()
            .is_some_and(|file_name| file_name == name);
        if !plain {
            return Err(AppError::BadRequest(format!("invalid stored file name {name}")));
        }
        Ok(self.root.join(name))
    }
}
