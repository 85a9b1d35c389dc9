// Media store for uploaded images
// Validates size/MIME, persists under generated names, best-effort removal

use axum::body::Bytes;
use axum::extract::Multipart;
use rand::Rng;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Malformed multipart body: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Media store configuration
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub upload_dir: PathBuf,
    pub max_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl MediaConfig {
    pub fn from_env() -> Self {
        let settings = &crate::app_config::config().media;
        Self {
            upload_dir: PathBuf::from(&settings.upload_dir),
            max_bytes: settings.max_bytes,
            allowed_types: settings.allowed_types.clone(),
        }
    }

    /// Deterministic config for tests, no environment involved
    pub fn for_test(upload_dir: PathBuf) -> Self {
        Self {
            upload_dir,
            max_bytes: 2 * 1024 * 1024,
            allowed_types: vec![
                "image/png".to_string(),
                "image/jpg".to_string(),
                "image/jpeg".to_string(),
                "image/svg+xml".to_string(),
                "image/webp".to_string(),
                "image/gif".to_string(),
            ],
        }
    }
}

/// One uploaded file pulled out of a multipart body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename, used only for its extension
    pub name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// A fully-read multipart form: text fields plus named file parts
#[derive(Debug, Default)]
pub struct UploadForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
}

/// Read an entire multipart body into memory.
/// Parts with a filename land in `files`, everything else in `fields`.
pub async fn collect_form(multipart: &mut Multipart) -> Result<UploadForm, MediaError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MediaError::Malformed(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name.is_empty() {
            continue;
        }

        // Clone metadata out before bytes()/text() consume the field
        let file_name = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().map(String::from);

        match file_name {
            Some(file_name) => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| MediaError::Malformed(e.to_string()))?;
                form.files.insert(
                    name,
                    UploadedFile {
                        name: file_name,
                        content_type,
                        data,
                    },
                );
            },
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| MediaError::Malformed(e.to_string()))?;
                form.fields.insert(name, value);
            },
        }
    }

    Ok(form)
}

/// Media store service
pub struct MediaService {
    config: MediaConfig,
}

impl MediaService {
    pub fn new(config: MediaConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(MediaConfig::from_env())
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_upload_dir(&self) -> Result<(), MediaError> {
        tokio::fs::create_dir_all(&self.config.upload_dir).await?;
        Ok(())
    }

    pub fn upload_dir(&self) -> &Path {
        &self.config.upload_dir
    }

    /// Check an upload against the configured size and MIME rules.
    /// Returns a human-readable violation message, or None when acceptable.
    pub fn validate_image(&self, size: u64, content_type: Option<&str>) -> Option<String> {
        if size > self.config.max_bytes {
            return Some(format!(
                "Image Size Must Be Less Than {} MB",
                self.config.max_bytes / (1024 * 1024)
            ));
        }

        let allowed = content_type
            .map(|ct| {
                self.config
                    .allowed_types
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(ct))
            })
            .unwrap_or(false);

        if !allowed {
            return Some(format!(
                "Image Must Be One Of {}",
                self.allowed_type_names().join(", ")
            ));
        }

        None
    }

    fn allowed_type_names(&self) -> Vec<String> {
        self.config
            .allowed_types
            .iter()
            .map(|t| {
                t.rsplit('/')
                    .next()
                    .unwrap_or(t)
                    .trim_end_matches("+xml")
                    .to_string()
            })
            .collect()
    }

    /// Persist an uploaded file under a freshly generated name.
    /// Returns the stored filename.
    pub async fn store(&self, file: &UploadedFile) -> Result<String, MediaError> {
        self.ensure_upload_dir().await?;

        let filename = generate_image_name(&file.name);
        let path = self.config.upload_dir.join(&filename);

        let mut out = File::create(&path).await?;
        out.write_all(&file.data).await?;
        out.flush().await?;

        tracing::info!("Stored uploaded image {:?} ({} bytes)", path, file.data.len());
        Ok(filename)
    }

    /// Best-effort removal of a stored image.
    /// Missing files are a no-op; failures are logged, never surfaced.
    /// Returns whether a file was actually deleted.
    pub async fn remove(&self, filename: &str) -> bool {
        // Stored names are generated by us; anything path-like is not ours
        if filename.is_empty() || filename.contains(['/', '\\']) || filename.contains("..") {
            tracing::warn!("Refusing to remove suspicious image name: {}", filename);
            return false;
        }

        let path = self.config.upload_dir.join(filename);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                tracing::warn!("Failed to remove image {:?}: {}", path, e);
                false
            },
        }
    }
}

/// Collision-resistant stored name: random numeric basename preserving the
/// original extension
fn generate_image_name(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            e.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .take(8)
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "img".to_string());

    let stamp: u64 = rand::thread_rng().gen_range(1_000_000_000_000..=9_999_999_999_999);
    format!("{}.{}", stamp, ext)
}
