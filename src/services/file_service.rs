use std::path::PathBuf;

use log::debug;

use crate::errors::BrowserError;
use crate::utils::normalize_path;

/// A client path resolved against a base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Normalized `/`-separated path, empty for the base itself
    pub relative: String,
    pub absolute: PathBuf,
}

/// What a resolved path points at, checked fresh on every request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Directory,
    File,
}

/// Resolves client paths under a base directory
#[derive(Clone)]
pub struct FileService {
    base_dir: PathBuf,
}

impl FileService {
    pub fn new(base_dir: PathBuf) -> Self {
        debug!("Creating FileService with base directory: {:?}", base_dir);
        Self { base_dir }
    }

    /// Resolve a request path, refusing anything that would leave the base directory
    pub fn resolve(&self, request_path: &str) -> Result<ResolvedPath, BrowserError> {
        let relative = normalize_path(request_path).inspect_err(|_| {
            log::warn!("Rejected path outside root: '{}'", request_path);
        })?;
        let absolute = if relative.is_empty() {
            self.base_dir.clone()
        } else {
            self.base_dir.join(&relative)
        };
        debug!("Resolved '{}' to {:?}", request_path, absolute);
        Ok(ResolvedPath { relative, absolute })
    }

    /// Stat a resolved path
    pub async fn kind_of(&self, resolved: &ResolvedPath) -> Result<PathKind, BrowserError> {
        let metadata = tokio::fs::metadata(&resolved.absolute).await.map_err(|e| {
            debug!("Stat failed for {:?}: {}", resolved.absolute, e);
            BrowserError::NotFound
        })?;
        Ok(if metadata.is_dir() { PathKind::Directory } else { PathKind::File })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolves_under_base() {
        let service = FileService::new(PathBuf::from("/srv/media"));
        let resolved = service.resolve("/photos/2024/").unwrap();
        assert_eq!(resolved.relative, "photos/2024");
        assert_eq!(resolved.absolute, PathBuf::from("/srv/media/photos/2024"));
        assert_eq!(service.resolve("/").unwrap().absolute, PathBuf::from("/srv/media"));
    }

    #[test]
    fn refuses_traversal() {
        let service = FileService::new(PathBuf::from("/srv/media"));
        assert!(matches!(service.resolve("/../../etc/passwd"), Err(BrowserError::InvalidPath)));
    }

    #[tokio::test]
    async fn kind_reflects_the_filesystem() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("album")).unwrap();
        std::fs::write(tmp.path().join("a.txt"), b"hi").unwrap();
        let service = FileService::new(tmp.path().to_path_buf());

        let dir = service.resolve("album").unwrap();
        let file = service.resolve("a.txt").unwrap();
        let missing = service.resolve("nope").unwrap();
        assert_eq!(service.kind_of(&dir).await.unwrap(), PathKind::Directory);
        assert_eq!(service.kind_of(&file).await.unwrap(), PathKind::File);
        assert!(matches!(service.kind_of(&missing).await, Err(BrowserError::NotFound)));
    }
}
