//! Crop catalog ingestion.
//!
//! The catalog is a CSV table, one row per seed variety. Header problems and CSV syntax errors
//! fail the whole load; a row whose values don't validate is set aside as a [`RowError`] so the
//! caller can report it (or refuse to continue) instead of planning with a miscomputed row.

mod catalog;
mod load;

pub use catalog::Catalog;
pub use load::{
    CatalogError, CatalogSource, LoadedCatalog, REQUIRED_COLUMNS, RowError, load_bundled,
    load_catalog, parse_catalog,
};
