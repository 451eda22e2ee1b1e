//! Local filesystem adapter using std::fs.

use std::io::{self, Write};
use std::path::Path;

use ormforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ForgeError, ForgeResult},
};
use tempfile::NamedTempFile;

/// Production filesystem implementation using `std::fs`.
///
/// Whole-file writes go through a temporary file in the target directory
/// followed by a rename, so readers never observe a partially written file.
/// Create-if-absent writes stage the same way and only move the file into
/// place when nothing exists at the target yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        staged(path, content)?
            .persist(path)
            .map_err(|e| map_io_error(path, e.error, "replace file"))?;
        Ok(())
    }

    fn read_file(&self, path: &Path) -> ForgeResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write_if_absent(&self, path: &Path, content: &str) -> ForgeResult<bool> {
        match staged(path, content)?.persist_noclobber(path) {
            Ok(_) => Ok(true),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(map_io_error(path, e.error, "create file")),
        }
    }
}

/// Fully written temporary file next to `path`, ready to be moved into place.
fn staged(path: &Path, content: &str) -> ForgeResult<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp =
        NamedTempFile::new_in(dir).map_err(|e| map_io_error(path, e, "create temporary file"))?;
    temp.write_all(content.as_bytes())
        .and_then(|()| temp.flush())
        .map_err(|e| map_io_error(path, e, "write file"))?;
    Ok(temp)
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ForgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_replaces_whole_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.ts");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, "first version, longer").unwrap();
        fs.write_file(&path, "second").unwrap();

        assert_eq!(fs.read_file(&path).unwrap(), "second");
        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn exclusive_create_never_clobbers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "{\"name\":\"mine\"}").unwrap();

        let created = LocalFilesystem::new()
            .write_if_absent(&path, "{\"dependencies\":{}}")
            .unwrap();

        assert!(!created);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"name\":\"mine\"}");
    }

    #[test]
    fn create_if_absent_writes_complete_file_and_no_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tsconfig.json");
        let fs = LocalFilesystem::new();

        assert!(fs.write_if_absent(&path, "{\"compilerOptions\":{}}").unwrap());
        assert!(!fs.write_if_absent(&path, "{}").unwrap());

        assert_eq!(fs.read_file(&path).unwrap(), "{\"compilerOptions\":{}}");
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn create_if_absent_into_missing_dir_leaves_nothing_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("src").join("sintaxis.d.ts");

        let err = LocalFilesystem::new().write_if_absent(&path, "declare").unwrap_err();

        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::FilesystemError { .. })
        ));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_file_is_a_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_file(&dir.path().join("absent"))
            .unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
