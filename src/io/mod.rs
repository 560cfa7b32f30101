use crate::errors::{Error, Result};
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::file_system(format!("cannot read {}", path.display()), path, e))
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path)
        .map_err(|e| Error::file_system(format!("cannot read {}", path.display()), path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::file_system(format!("cannot write {}", path.display()), path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artifact.toml");
        write_file(&path, "[provenance]\n").unwrap();
        assert_eq!(read_file(&path).unwrap(), "[provenance]\n");
        assert_eq!(read_bytes(&path).unwrap(), b"[provenance]\n");
    }

    #[test]
    fn test_missing_file_carries_path() {
        let error = read_file(Path::new("/nonexistent/dwf.h")).unwrap_err();
        match error {
            Error::FileSystem { path, source, .. } => {
                assert_eq!(path.as_deref(), Some(Path::new("/nonexistent/dwf.h")));
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
