use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

/// Reasons an uploaded filename is rejected.
#[derive(Debug)]
pub enum InvalidFilename {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Filename contains path separators (`/` or `\`).
    ContainsPathSeparator,
    /// Filename contains path traversal patterns (`..`).
    PathTraversal,
    /// Filename contains control characters (NUL, CR, LF, etc.).
    ControlCharacter,
    /// Filename starts with a dot (hidden file).
    Hidden,
}

impl InvalidFilename {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::PathTraversal => "Invalid filename: '..' is not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
            Self::Hidden => "Invalid filename: hidden files (starting with '.') are not allowed",
        }
    }
}

/// Validates a flat filename (no directory components allowed).
pub fn sanitize_filename(filename: &str) -> Result<&str, InvalidFilename> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(InvalidFilename::Empty);
    }

    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(InvalidFilename::ControlCharacter);
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(InvalidFilename::ContainsPathSeparator);
    }

    if trimmed == ".." {
        return Err(InvalidFilename::PathTraversal);
    }

    if trimmed.starts_with('.') {
        return Err(InvalidFilename::Hidden);
    }

    Ok(trimmed)
}

/// Derive the collision-resistant name an upload is stored under.
///
/// A random v4 prefix means the original filename never determines the
/// storage path and identical originals never collide.
pub fn stored_filename(original: &str) -> Result<String, InvalidFilename> {
    let clean = sanitize_filename(original)?;
    Ok(format!("{}_{}", Uuid::new_v4().simple(), clean))
}

/// Flat directory of uploaded files under the public static path.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, std::io::Error> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// Absolute path of a stored file.
    pub fn path_of(&self, stored: &str) -> PathBuf {
        self.dir.join(stored)
    }

    /// Write `data` under the already-generated `stored` name.
    ///
    /// Writes go through a temp file and a rename so a failed write never
    /// leaves a partial file at the final path.
    pub async fn save(&self, stored: &str, data: &[u8]) -> Result<(), std::io::Error> {
        let temp_path = self.dir.join(format!(".tmp-{}", Uuid::new_v4().simple()));
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        let final_path = self.path_of(stored);
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        Ok(())
    }

    /// Remove a stored file. Returns `false` if it was already gone.
    pub async fn remove(&self, stored: &str) -> Result<bool, std::io::Error> {
        match fs::remove_file(self.path_of(stored)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}
