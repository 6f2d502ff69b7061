//! # Delivery
//!
//! The last hop of an export: the encoded file either lands in the user's
//! downloads or goes out through the platform share sheet.
//!
//! ```text
//! ExportFile ──┬──► Downloader::download ──► Downloads/12_2024-01-05.png
//!              │
//!              └──► Sharer::share(SharePayload { file, title, text })
//! ```

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::encode::ExportFile;
use crate::error::{DeliveryError, ShareError};

/// Copies tried before giving up on a free file name.
const MAX_NAME_ATTEMPTS: u32 = 100;

// =============================================================================
// Capabilities
// =============================================================================

/// Hands a file to the user as a download.
#[allow(async_fn_in_trait)]
pub trait Downloader {
    async fn download(&self, file: &ExportFile) -> Result<(), DeliveryError>;
}

/// What goes into the share sheet.
#[derive(Debug, Clone)]
pub struct SharePayload {
    pub file: ExportFile,
    pub title: String,
    pub text: String,
}

/// The platform share sheet.
#[allow(async_fn_in_trait)]
pub trait Sharer {
    /// Whether the platform accepts this file for sharing at all.
    fn can_share(&self, file: &ExportFile) -> bool;

    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;
}

// =============================================================================
// Directory Downloader
// =============================================================================

/// Writes artefacts into a directory, never overwriting an existing file.
///
/// A clash gets a ` (n)` suffix before the extension, the way browsers
/// name repeated downloads.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the file and returns the path actually used.
    ///
    /// The name must be a single plain file name; anything that would
    /// leave the directory is refused.
    pub async fn write(&self, file: &ExportFile) -> Result<PathBuf, DeliveryError> {
        if !is_plain_file_name(&file.name) {
            return Err(DeliveryError::InvalidName(file.name.clone()));
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| DeliveryError::Io {
                path: self.dir.clone(),
                source,
            })?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = self.dir.join(numbered_name(&file.name, attempt));

            let mut handle = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(handle) => handle,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "Download name taken");
                    continue;
                }
                Err(source) => return Err(DeliveryError::Io { path, source }),
            };

            let written = async {
                handle.write_all(&file.bytes).await?;
                handle.flush().await
            }
            .await;
            written.map_err(|source| DeliveryError::Io {
                path: path.clone(),
                source,
            })?;

            info!(path = %path.display(), size = file.bytes.len(), "Saved report image");
            return Ok(path);
        }

        Err(DeliveryError::NameExhausted(file.name.clone()))
    }
}

impl Downloader for DirectoryDownloader {
    async fn download(&self, file: &ExportFile) -> Result<(), DeliveryError> {
        self.write(file).await.map(|_| ())
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

/// `report.png`, `report (1).png`, `report (2).png`, ...
fn numbered_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{} ({}).{}", stem, attempt, ext),
        _ => format!("{} ({})", name, attempt),
    }
}

// =============================================================================
// No Share
// =============================================================================

/// For hosts without a share sheet: every share falls back to a download.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoShare;

impl Sharer for NoShare {
    fn can_share(&self, _file: &ExportFile) -> bool {
        false
    }

    async fn share(&self, _payload: &SharePayload) -> Result<(), ShareError> {
        Err(ShareError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_name() {
        assert_eq!(numbered_name("12_2024-01-05.png", 0), "12_2024-01-05.png");
        assert_eq!(numbered_name("12_2024-01-05.png", 2), "12_2024-01-05 (2).png");
        assert_eq!(numbered_name("noext", 1), "noext (1)");
        assert_eq!(numbered_name(".png", 1), ".png (1)");
    }

    #[tokio::test]
    async fn test_directory_downloader_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = DirectoryDownloader::new(dir.path());

        let first = downloader
            .write(&ExportFile::png("a.png", b"one".to_vec()))
            .await
            .unwrap();
        let second = downloader
            .write(&ExportFile::png("a.png", b"two".to_vec()))
            .await
            .unwrap();

        assert_eq!(first, dir.path().join("a.png"));
        assert_eq!(second, dir.path().join("a (1).png"));
        assert_eq!(tokio::fs::read(&first).await.unwrap(), b"one");
        assert_eq!(tokio::fs::read(&second).await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_directory_downloader_creates_missing_dir() {
        let root = tempfile::tempdir().unwrap();
        let downloader = DirectoryDownloader::new(root.path().join("Invoices"));

        let path = downloader
            .write(&ExportFile::png("12_2024-01-05.png", vec![1]))
            .await
            .unwrap();
        assert_eq!(path, root.path().join("Invoices").join("12_2024-01-05.png"));
    }

    #[tokio::test]
    async fn test_directory_downloader_stays_inside_dir() {
        let root = tempfile::tempdir().unwrap();
        let downloader = DirectoryDownloader::new(root.path().join("inner"));

        for name in ["../escaped_2024-01-05.png", "Ali/Sons_2024-01-05.png", "..", ""] {
            let err = downloader
                .write(&ExportFile::png(name, vec![1]))
                .await
                .unwrap_err();
            assert!(matches!(err, DeliveryError::InvalidName(_)), "{}", name);
        }
        assert!(!root.path().join("escaped_2024-01-05.png").exists());
    }

    #[tokio::test]
    async fn test_no_share_refuses() {
        let file = ExportFile::png("a.png", vec![]);
        assert!(!NoShare.can_share(&file));

        let payload = SharePayload {
            file,
            title: String::new(),
            text: String::new(),
        };
        assert_eq!(NoShare.share(&payload).await, Err(ShareError::Unsupported));
    }
}
