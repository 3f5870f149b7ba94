//! Logical file requests.
//!
//! A request names a file the way a TeX engine asks for it: which engine,
//! a numeric selector (kpathsea format code, or DPI for bitmap fonts) and a
//! bare filename. The resolved path is not part of the identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which engine (and lookup flavour) a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// XeTeX file lookup, selector is a format code
    Xetex,
    /// pdfTeX file lookup, selector is a format code
    Pdftex,
    /// pdfTeX packed bitmap font lookup, selector is a DPI value
    PdftexBitmap,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Xetex => "xetex",
            Category::Pdftex => "pdftex",
            Category::PdftexBitmap => "pdftex-bitmap",
        }
    }

    /// Files served as-is from the preamble directory, never resolved.
    pub fn pass_through_files(&self) -> &'static [&'static str] {
        match self {
            Category::Xetex => &["swiftlatexxetex.fmt", "xetexfontlist.txt"],
            Category::Pdftex => &["swiftlatexpdftex.fmt"],
            Category::PdftexBitmap => &[],
        }
    }

    pub fn is_pass_through(&self, filename: &str) -> bool {
        self.pass_through_files().contains(&filename)
    }

    /// Engine/program name handed to kpathsea-style resolvers.
    pub fn engine(&self) -> &'static str {
        match self {
            Category::Xetex => "xetex",
            Category::Pdftex | Category::PdftexBitmap => "pdftex",
        }
    }

    /// Response header carrying the resolved file's basename.
    pub fn id_header(&self) -> &'static str {
        match self {
            Category::Xetex | Category::Pdftex => "fileid",
            Category::PdftexBitmap => "pkid",
        }
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, Category::PdftexBitmap)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full identity of a logical file request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestKey {
    category: Category,
    selector: u32,
    filename: String,
}

impl RequestKey {
    pub fn new(category: Category, selector: u32, filename: impl Into<String>) -> Self {
        Self {
            category,
            selector,
            filename: filename.into(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Format code, or DPI for bitmap requests.
    pub fn selector(&self) -> u32 {
        self.selector
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn is_pass_through(&self) -> bool {
        self.category.is_pass_through(&self.filename)
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.category, self.selector, self.filename)
    }
}

/// Strip every character outside `[A-Za-z0-9 _.-]`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '.' | '-'))
        .collect()
}
