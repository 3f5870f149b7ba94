//! In-process resolver over a fixed list of directories.
//!
//! Directories are tried in order. A directory written with a trailing `//`
//! is also searched below, depth first with subdirectories in name order,
//! following the kpathsea path convention.

use std::path::{Path, PathBuf};

use texfetch_core::error::Result;
use texfetch_core::request::Category;

use super::format::KpseFormat;
use super::Resolver;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchRoot {
    dir: PathBuf,
    recursive: bool,
}

impl SearchRoot {
    fn parse(spec: &str) -> Self {
        match spec.strip_suffix("//") {
            Some(dir) => Self {
                dir: PathBuf::from(if dir.is_empty() { "/" } else { dir }),
                recursive: true,
            },
            None => Self {
                dir: PathBuf::from(spec),
                recursive: false,
            },
        }
    }
}

/// Directory-list resolver.
#[derive(Debug, Clone)]
pub struct SearchPathResolver {
    roots: Vec<SearchRoot>,
}

impl SearchPathResolver {
    pub fn new<S: AsRef<str>>(paths: &[S]) -> Self {
        Self {
            roots: paths.iter().map(|p| SearchRoot::parse(p.as_ref())).collect(),
        }
    }

    /// Relative names to probe in each directory.
    fn candidates(category: Category, selector: u32, filename: &str) -> Vec<PathBuf> {
        if category.is_bitmap() {
            return vec![
                PathBuf::from(format!("{filename}.{selector}pk")),
                PathBuf::from(format!("dpi{selector}")).join(format!("{filename}.pk")),
            ];
        }
        match KpseFormat::from_code(selector) {
            Some(format) => format.candidates(filename).into_iter().map(PathBuf::from).collect(),
            None => Vec::new(),
        }
    }

    fn find_in(dir: &Path, recursive: bool, candidates: &[PathBuf]) -> Option<PathBuf> {
        if let Some(found) = candidates.iter().map(|c| dir.join(c)).find(|p| p.is_file()) {
            return Some(found);
        }
        if !recursive {
            return None;
        }

        let mut subdirs: Vec<PathBuf> = match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_dir())
                .collect(),
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
                return None;
            }
        };
        subdirs.sort();

        subdirs
            .iter()
            .find_map(|sub| Self::find_in(sub, true, candidates))
    }
}

impl Resolver for SearchPathResolver {
    fn resolve(
        &self,
        category: Category,
        selector: u32,
        filename: &str,
    ) -> Result<Option<PathBuf>> {
        if filename.is_empty() {
            return Ok(None);
        }
        let candidates = Self::candidates(category, selector, filename);
        if candidates.is_empty() {
            return Ok(None);
        }

        Ok(self
            .roots
            .iter()
            .find_map(|root| Self::find_in(&root.dir, root.recursive, &candidates)))
    }
}
