//! Resolver that shells out to `kpsewhich`.
//!
//! One process per lookup. `kpsewhich` exits non-zero with empty output
//! when nothing matches, which maps to `Ok(None)`. Failing to start the
//! program at all is a backend error.

use std::path::{Path, PathBuf};
use std::process::Command;

use texfetch_core::error::{FetchError, Result};
use texfetch_core::request::Category;

use super::format::KpseFormat;
use super::Resolver;

/// kpathsea command-line resolver.
#[derive(Debug, Clone)]
pub struct KpsewhichResolver {
    program: PathBuf,
}

impl KpsewhichResolver {
    pub fn new(program: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
        }
    }

    /// Arguments for one lookup, or `None` when the selector names no
    /// known file format.
    pub fn command_args(category: Category, selector: u32, filename: &str) -> Option<Vec<String>> {
        let engine = category.engine();
        let mut args = vec![format!("-engine={engine}"), format!("-progname={engine}")];

        if category.is_bitmap() {
            args.push("-format=pk".to_string());
            args.push(format!("-dpi={selector}"));
        } else {
            let format = KpseFormat::from_code(selector)?;
            args.push(format!("-format={}", format.name));
        }

        args.push("--".to_string());
        args.push(filename.to_string());
        Some(args)
    }

    fn parse_output(stdout: &[u8]) -> std::result::Result<Option<PathBuf>, std::str::Utf8Error> {
        let text = std::str::from_utf8(stdout)?;
        Ok(text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(PathBuf::from))
    }
}

impl Resolver for KpsewhichResolver {
    fn resolve(
        &self,
        category: Category,
        selector: u32,
        filename: &str,
    ) -> Result<Option<PathBuf>> {
        let Some(args) = Self::command_args(category, selector, filename) else {
            tracing::debug!(
                category = %category,
                selector,
                filename,
                "Unknown kpathsea format code"
            );
            return Ok(None);
        };

        tracing::debug!(program = %self.program.display(), ?args, "Running kpsewhich");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| FetchError::ResolverError {
                category,
                filename: filename.to_string(),
                message: format!("Failed to run {}: {}", self.program.display(), e),
            })?;

        if !output.status.success() {
            return Ok(None);
        }

        let path = Self::parse_output(&output.stdout).map_err(|e| {
            tracing::warn!(category = %category, filename, "kpsewhich printed a non-UTF-8 path");
            FetchError::ResolverError {
                category,
                filename: filename.to_string(),
                message: format!("Unusable kpsewhich output: {}", e),
            }
        })?;

        if path.is_none() {
            tracing::warn!(
                category = %category,
                selector,
                filename,
                "kpsewhich exited successfully without printing a path"
            );
        }
        Ok(path)
    }
}
