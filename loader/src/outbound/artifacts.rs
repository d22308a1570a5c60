//! Capability-scoped JSON artifact store.
//!
//! Each record is written to `{DocumentID}.json` (path-unsafe characters
//! replaced by `_`) inside one output directory using a temporary file and
//! rename, so a crash never leaves a partially written artifact behind.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Component, Utf8Path};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use document_data::DocumentRecord;
use tracing::{debug, info};

use crate::domain::ports::{ArtifactStoreError, DocumentArtifactStore};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Artifact store rooted at one output directory.
#[derive(Debug)]
pub struct CapStdArtifactStore {
    root: Dir,
    root_path: PathBuf,
}

impl CapStdArtifactStore {
    /// Open `output_dir`, creating it (and any parents) when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactStoreError::Directory`] when the directory cannot be
    /// created or opened.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use content_loader::outbound::artifacts::CapStdArtifactStore;
    ///
    /// let store = CapStdArtifactStore::open("pump_house_data").expect("open output dir");
    /// assert!(store.root_path().ends_with("pump_house_data"));
    /// ```
    pub fn open(output_dir: impl AsRef<Path>) -> Result<Self, ArtifactStoreError> {
        let root_path = output_dir.as_ref().to_path_buf();
        let directory_error = |err: &io::Error| {
            ArtifactStoreError::directory(root_path.display().to_string(), err.to_string())
        };

        if !root_path.is_dir() {
            Dir::create_ambient_dir_all(&root_path, ambient_authority())
                .map_err(|err| directory_error(&err))?;
            info!(path = %root_path.display(), "created output directory");
        }
        let root = Dir::open_ambient_dir(&root_path, ambient_authority())
            .map_err(|err| directory_error(&err))?;

        Ok(Self { root, root_path })
    }

    /// Return the output directory path.
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

impl DocumentArtifactStore for CapStdArtifactStore {
    fn store(&self, record: &DocumentRecord) -> Result<PathBuf, ArtifactStoreError> {
        let document_id = record
            .document_id()
            .ok_or_else(ArtifactStoreError::unidentified)?;
        let file_name = artifact_file_name(document_id)?;
        let contents = record
            .to_indented_json()
            .map_err(|err| ArtifactStoreError::serialize(err.to_string()))?;

        write_atomic(&self.root, &file_name, &contents).map_err(|err| {
            ArtifactStoreError::write(
                self.root_path.join(&file_name).display().to_string(),
                err.to_string(),
            )
        })?;

        let path = self.root_path.join(&file_name);
        debug!(document_id, path = %path.display(), "artifact written");
        Ok(path)
    }
}

/// Return the artifact file name for `document_id`.
///
/// Path separators, drive colons, and control characters become `_` so that
/// identifiers such as `folder/42` still map to one file inside the output
/// directory. The record itself keeps the unmodified identifier.
fn artifact_file_name(document_id: &str) -> Result<String, ArtifactStoreError> {
    if document_id.trim().is_empty() {
        return Err(ArtifactStoreError::invalid_file_name(document_id));
    }
    let stem: String = document_id
        .chars()
        .map(|ch| {
            if matches!(ch, '/' | '\\' | ':') || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();
    let file_name = format!("{stem}.json");

    let mut components = Utf8Path::new(&file_name).components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(name)), None) if name == file_name => Ok(file_name),
        _ => Err(ArtifactStoreError::invalid_file_name(document_id)),
    }
}

/// Write `contents` to `file_name` via a uniquely named temp file and rename.
fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> io::Result<()> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(".{file_name}.tmp.{}.{counter}", std::process::id());

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let written = dir.open_with(&tmp_name, &options).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });
    if let Err(err) = written.and_then(|()| replace_target(dir, &tmp_name, file_name)) {
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }
    // Directory sync is best-effort.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
    Ok(())
}

#[cfg(windows)]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}
