//! Memoized outcome of resolving a request.

use std::path::{Path, PathBuf};

use bytes::Bytes;

/// Outcome of mapping a request to a file on disk.
///
/// A resolution either carries the file's bytes (the file existed and was
/// read) or it does not (no candidate path, or the candidate was not a
/// regular file). The bytes are captured at resolution time and are not
/// affected by later changes to the file or by byte cache eviction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    path: Option<PathBuf>,
    data: Option<Bytes>,
}

impl Resolution {
    /// An existing file and the bytes read from it.
    pub fn found(path: impl Into<PathBuf>, data: Bytes) -> Self {
        Self {
            path: Some(path.into()),
            data: Some(data),
        }
    }

    /// No servable file. `path` is the candidate the resolver produced, if
    /// any, which turned out not to be a regular file.
    pub fn not_found(path: Option<PathBuf>) -> Self {
        Self { path, data: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn exists(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Option<&Bytes> {
        self.data.as_ref()
    }

    /// Basename of the resolved path, as reported to clients.
    pub fn file_id(&self) -> Option<String> {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_resolution() {
        let res = Resolution::found("/fonts/cmr10.pk", Bytes::from_static(b"\x01\x02\x03"));
        assert!(res.exists());
        assert_eq!(res.path(), Some(Path::new("/fonts/cmr10.pk")));
        assert_eq!(res.data().unwrap().as_ref(), b"\x01\x02\x03");
        assert_eq!(res.file_id().as_deref(), Some("cmr10.pk"));
    }

    #[test]
    fn test_found_empty_file_still_exists() {
        let res = Resolution::found("empty.tex", Bytes::new());
        assert!(res.exists());
        assert!(res.data().unwrap().is_empty());
    }

    #[test]
    fn test_not_found_without_path() {
        let res = Resolution::not_found(None);
        assert!(!res.exists());
        assert!(res.path().is_none());
        assert!(res.data().is_none());
        assert!(res.file_id().is_none());
    }

    #[test]
    fn test_not_found_keeps_candidate_path() {
        let res = Resolution::not_found(Some(PathBuf::from("/texmf/tex/latex")));
        assert!(!res.exists());
        assert_eq!(res.path(), Some(Path::new("/texmf/tex/latex")));
        assert!(res.data().is_none());
    }

    #[test]
    fn test_structural_equality() {
        let a = Resolution::found("a.sty", Bytes::from_static(b"x"));
        let b = Resolution::found(PathBuf::from("a.sty"), Bytes::from(vec![b'x']));
        assert_eq!(a, b);
        assert_ne!(a, Resolution::not_found(Some(PathBuf::from("a.sty"))));
    }
}
