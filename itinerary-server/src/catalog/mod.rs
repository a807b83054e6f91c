//! Service catalog loading.
//!
//! The catalog is read once at start-up from a pipe-delimited text file
//! holding services, passengers and their past itineraries.

mod error;
mod import;

use std::path::Path;

pub use error::ImportError;
pub use import::{Catalog, parse};

/// Read and parse an import file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Catalog, ImportError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}
