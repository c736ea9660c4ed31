//! File-level `"geo"` metadata identifying the geometry column of a table.

use std::collections::HashMap;

use arrow_schema::Schema;
use serde::{Deserialize, Serialize};

use crate::error::{GeoColumnError, Result};
use crate::metadata::ArrayMetadata;
use crate::table::GeoTable;

/// The key under which the file-level geometry metadata is stored.
pub const GEO_METADATA_KEY: &str = "geo";

/// JSON metadata stored at the file level, naming the primary geometry column and describing
/// each geometry column's encoding and CRS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoFileMetadata {
    pub version: String,
    pub primary_column: String,
    pub columns: HashMap<String, GeoColumnMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoColumnMetadata {
    /// The short encoding name, e.g. `"multipoint"` for `geoarrow.multipoint` storage.
    pub encoding: String,
    pub crs: Option<String>,
}

impl GeoFileMetadata {
    /// Describe the geometry column of a table.
    pub fn from_table(table: &GeoTable) -> Result<Self> {
        let field = table.schema().field(table.geometry_column_index());
        let extension_name = field
            .metadata()
            .get("ARROW:extension:name")
            .ok_or_else(|| {
                GeoColumnError::General(format!(
                    "geometry column '{}' carries no extension name",
                    field.name()
                ))
            })?;
        let encoding = extension_name
            .split('.')
            .nth(1)
            .unwrap_or(extension_name.as_str())
            .to_string();
        let crs = ArrayMetadata::try_from(field)?.crs().map(str::to_string);

        let name = field.name().clone();
        let mut columns = HashMap::with_capacity(1);
        columns.insert(name.clone(), GeoColumnMetadata { encoding, crs });

        Ok(Self {
            version: "0.1.0".to_string(),
            primary_column: name,
            columns,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(value: &str) -> Result<Self> {
        Ok(serde_json::from_str(value)?)
    }

    /// The index of the primary geometry column in a file's schema.
    pub fn primary_column_index(&self, schema: &Schema) -> Result<usize> {
        schema
            .fields()
            .iter()
            .position(|field| field.name() == &self.primary_column)
            .ok_or_else(|| {
                GeoColumnError::General(format!(
                    "primary geometry column '{}' not present in the file schema",
                    self.primary_column
                ))
            })
    }
}
