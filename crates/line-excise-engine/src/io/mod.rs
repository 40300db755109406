use crate::document::Document;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl IoError {
    fn write(path: &Path, source: std::io::Error) -> Self {
        IoError::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a whole file into a document
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => IoError::NotFound(path.to_path_buf()),
        _ => IoError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(Document::from_bytes(&bytes))
}

/// Replace the file at `path` with the document's bytes.
///
/// The bytes go to a temporary file next to the destination which is then
/// renamed over it, so readers see either the old content or the new content
/// and never a partial write. A symlinked `path` is followed and the file it
/// points to is replaced. An existing destination must be writable, and its
/// permissions (and, where allowed, owner and group) carry over to the
/// replacement. The temporary file is deleted if anything fails.
pub fn write_document(path: &Path, document: &Document) -> Result<(), IoError> {
    let target = resolve_target(path);
    let existing = fs::metadata(&target).ok();
    if let Some(metadata) = &existing {
        ensure_writable(&target, metadata).map_err(|e| IoError::write(path, e))?;
    }

    let mut temp =
        NamedTempFile::new_in(temp_dir_for(&target)).map_err(|e| IoError::write(path, e))?;
    temp.write_all(&document.to_bytes())
        .map_err(|e| IoError::write(path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| IoError::write(path, e))?;

    if let Some(metadata) = &existing {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| IoError::write(path, e))?;
        copy_owner(&temp, metadata);
    }

    temp.persist(&target)
        .map_err(|e| IoError::write(path, e.error))?;
    log::info!("wrote {} lines to {}", document.len(), target.display());
    Ok(())
}

/// Follow a symlink to the file it names; anything else is used as given
fn resolve_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

fn temp_dir_for(target: &Path) -> &Path {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// The rename only needs a writable directory, so check the file itself
fn ensure_writable(target: &Path, metadata: &fs::Metadata) -> std::io::Result<()> {
    if metadata.permissions().readonly() {
        return Err(std::io::Error::new(
            ErrorKind::PermissionDenied,
            "file is read-only",
        ));
    }
    OpenOptions::new().write(true).open(target)?;
    Ok(())
}

#[cfg(unix)]
fn copy_owner(temp: &NamedTempFile, metadata: &fs::Metadata) {
    use std::os::unix::fs::{MetadataExt, fchown};

    if let Err(e) = fchown(temp.as_file(), Some(metadata.uid()), Some(metadata.gid())) {
        log::debug!("could not copy owner to replacement file: {e}");
    }
}

#[cfg(not(unix))]
fn copy_owner(_temp: &NamedTempFile, _metadata: &fs::Metadata) {}
