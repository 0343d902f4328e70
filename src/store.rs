use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use mime::Mime;
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use crate::entities::{Media, MediaKind};
use crate::error::StoreError;

/// A file received from a client, decoupled from any transport details.
#[derive(Debug)]
pub struct IncomingFile {
    pub original_filename: String,
    pub data: Vec<u8>,
}

/// A flat directory of media files. The directory itself is the metadata
/// store: listings are derived from filesystem state on every scan.
#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scans the store directory and derives a listing, newest first.
    /// Creates the directory on first use; subdirectories and files
    /// without a recognized media extension are skipped.
    pub async fn list(&self) -> Result<Vec<Media>, StoreError> {
        fs::create_dir_all(&self.root).await?;

        let mut media_vec = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let filename = match entry.file_name().into_string() {
                Ok(x) => x,
                Err(_) => continue,
            };
            let kind = get_extension(&filename).and_then(|x| MediaKind::from_extension(&x));
            let Some(kind) = kind else {
                continue;
            };

            let uploaded_at: DateTime<Utc> = metadata.modified()?.into();
            media_vec.push(Media {
                url: format!("/media/{filename}"),
                id: filename,
                kind,
                uploaded_at,
                size: metadata.len() as i64,
            });
        }

        media_vec.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(media_vec)
    }

    /// Persists a batch of uploads. The whole batch is validated before
    /// any write happens, so a rejected file leaves no partial state
    /// behind. Each accepted file is stored under a fresh random name
    /// with the original extension; the client-supplied name never
    /// touches the filesystem.
    pub async fn save(&self, files: Vec<IncomingFile>) -> Result<Vec<String>, StoreError> {
        let files: Vec<IncomingFile> = files
            .into_iter()
            .filter(|x| !x.original_filename.is_empty())
            .collect();
        if files.is_empty() {
            return Err(StoreError::NoFilesProvided);
        }

        let mut validated = Vec::with_capacity(files.len());
        for file in files {
            let extension = get_extension(&file.original_filename)
                .filter(|x| MediaKind::from_extension(x).is_some())
                .ok_or_else(|| StoreError::UnsupportedType(file.original_filename.clone()))?;
            validated.push((extension, file.data));
        }

        fs::create_dir_all(&self.root).await?;
        let mut stored = Vec::with_capacity(validated.len());
        for (extension, data) in validated {
            let new_filename = self.fresh_filename(&extension).await?;
            fs::write(self.root.join(&new_filename), &data).await?;
            stored.push(new_filename);
        }
        Ok(stored)
    }

    /// Opens a stored file for streaming, returning its length and the
    /// MIME type guessed from the stored name.
    pub async fn open(&self, filename: &str) -> Result<(fs::File, u64, Mime), StoreError> {
        let path = self.resolve(filename)?;
        let file = match fs::File::open(&path).await {
            Ok(x) => x,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound)
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(StoreError::NotFound);
        }
        let mime = mime_guess::from_path(&path).first_or_octet_stream();
        Ok((file, metadata.len(), mime))
    }

    /// Removes a stored file. Deleting a name that does not exist fails
    /// with `NotFound`, including repeat deletion of the same name.
    pub async fn delete(&self, filename: &str) -> Result<(), StoreError> {
        let path = self.resolve(filename)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    // A name with a separator or parent component can never match a
    // stored file, so it resolves to NotFound without touching the
    // filesystem.
    fn resolve(&self, filename: &str) -> Result<PathBuf, StoreError> {
        if filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(StoreError::NotFound);
        }
        Ok(self.root.join(filename))
    }

    async fn fresh_filename(&self, extension: &str) -> Result<String, StoreError> {
        loop {
            let candidate = format!("{}.{}", Uuid::new_v4(), extension);
            if !fs::try_exists(self.root.join(&candidate)).await? {
                return Ok(candidate);
            }
            warn!("filename collision on {}, retrying", candidate);
        }
    }
}

fn get_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(OsStr::to_str)
        .map(|x| x.to_string())
}
