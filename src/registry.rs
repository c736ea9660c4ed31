//! An explicit registry of the geometry extension types.
//!
//! Constructed once at application startup and passed to the collaborators that need type
//! lookup; there is no process-global registration.

use std::collections::HashMap;

use arrow_schema::Schema;

use crate::datatypes::GeometryType;
use crate::error::{GeoColumnError, Result};
use crate::metadata::ArrayMetadata;

/// Maps extension names to geometry types and locates geometry columns in Arrow schemas.
#[derive(Debug, Clone)]
pub struct ExtensionRegistry {
    entries: HashMap<&'static str, GeometryType>,
}

impl ExtensionRegistry {
    /// Create a registry with the four supported geometry extension types registered.
    pub fn new() -> Self {
        let mut entries = HashMap::with_capacity(4);
        for geometry_type in [
            GeometryType::Point,
            GeometryType::MultiPoint,
            GeometryType::MultiLineString,
            GeometryType::MultiPolygon,
        ] {
            entries.insert(geometry_type.extension_name(), geometry_type);
        }
        Self { entries }
    }

    /// Look up the geometry type registered under an extension name.
    pub fn geometry_type(&self, extension_name: &str) -> Result<GeometryType> {
        self.entries
            .get(extension_name)
            .copied()
            .ok_or_else(|| GeoColumnError::UnknownTypeTag(extension_name.to_string()))
    }

    /// Find the first geometry column in a schema by its extension name.
    ///
    /// Returns the column index, its geometry type and its CRS metadata, or `None` when no
    /// field carries a registered extension name.
    pub fn geometry_column(
        &self,
        schema: &Schema,
    ) -> Result<Option<(usize, GeometryType, ArrayMetadata)>> {
        for (index, field) in schema.fields().iter().enumerate() {
            if let Some(extension_name) = field.metadata().get("ARROW:extension:name") {
                if let Some(geometry_type) = self.entries.get(extension_name.as_str()) {
                    let metadata = ArrayMetadata::try_from(field.as_ref())?;
                    return Ok(Some((index, *geometry_type, metadata)));
                }
            }
        }
        Ok(None)
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use arrow_schema::{DataType, Field};

    use super::*;

    #[test]
    fn lookup() {
        let registry = ExtensionRegistry::new();
        assert_eq!(
            registry.geometry_type("geoarrow.multipolygon").unwrap(),
            GeometryType::MultiPolygon
        );
        assert!(matches!(
            registry.geometry_type("geoarrow.polygon"),
            Err(GeoColumnError::UnknownTypeTag(_))
        ));
    }

    #[test]
    fn find_geometry_column() {
        let registry = ExtensionRegistry::new();
        let metadata = ArrayMetadata::new(Some("EPSG:3857".to_string()));
        let schema = Schema::new(vec![
            Arc::new(Field::new("id", DataType::Int32, false)),
            GeometryType::MultiPoint.to_field("geometry", &metadata),
        ]);

        let (index, geometry_type, found) = registry.geometry_column(&schema).unwrap().unwrap();
        assert_eq!(index, 1);
        assert_eq!(geometry_type, GeometryType::MultiPoint);
        assert_eq!(found, metadata);
    }

    #[test]
    fn no_geometry_column() {
        let registry = ExtensionRegistry::new();
        let schema = Schema::new(vec![Arc::new(Field::new("id", DataType::Int32, false))]);
        assert!(registry.geometry_column(&schema).unwrap().is_none());
    }
}
