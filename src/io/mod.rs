//! Reading and writing geometry tables to tabular file formats.
//!
//! Both formats carry the same file-level `"geo"` metadata identifying the primary geometry
//! column, its encoding and its CRS; see [`metadata`].

pub mod feather;
pub mod metadata;
pub mod parquet;
