//! texfetch server - HTTP front end for the TeX file cache.
//!
//! Serves files requested by the XeTeX and pdfTeX engines, resolving each
//! distinct request once and answering repeats from memory.

pub mod args;
pub mod routes;

pub use args::Args;
pub use routes::router;
