//! Metadata contained within a geometry extension type.

use arrow_schema::Field;

use crate::error::{GeoColumnError, Result};

/// The extension metadata attached to a geometry column: a single optional CRS identifier.
///
/// The CRS is carried as an opaque token and never interpreted. Serialized as the text
/// `crs=<token>`; an absent CRS serializes as an empty token. Immutable after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayMetadata {
    crs: Option<String>,
}

impl ArrayMetadata {
    pub fn new(crs: Option<String>) -> Self {
        Self { crs }
    }

    pub fn crs(&self) -> Option<&str> {
        self.crs.as_deref()
    }

    /// Serialize to the `crs=<token>` text format.
    pub fn serialize(&self) -> String {
        format!("crs={}", self.crs.as_deref().unwrap_or(""))
    }

    /// Parse the `crs=<token>` text format. An empty token deserializes as no CRS.
    pub fn deserialize(value: &str) -> Result<Self> {
        let crs = value.strip_prefix("crs=").ok_or_else(|| {
            GeoColumnError::General(format!("malformed extension metadata: {value:?}"))
        })?;
        Ok(Self {
            crs: (!crs.is_empty()).then(|| crs.to_string()),
        })
    }
}

impl TryFrom<&Field> for ArrayMetadata {
    type Error = GeoColumnError;

    fn try_from(value: &Field) -> Result<Self> {
        if let Some(ext_meta) = value.metadata().get("ARROW:extension:metadata") {
            Self::deserialize(ext_meta)
        } else {
            Ok(Default::default())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serialize_crs() {
        let metadata = ArrayMetadata::new(Some("EPSG:4326".to_string()));
        assert_eq!(metadata.serialize(), "crs=EPSG:4326");
        assert_eq!(ArrayMetadata::deserialize("crs=EPSG:4326").unwrap(), metadata);
    }

    #[test]
    fn absent_crs_is_empty_token() {
        let metadata = ArrayMetadata::default();
        assert_eq!(metadata.serialize(), "crs=");
        assert_eq!(ArrayMetadata::deserialize("crs=").unwrap(), metadata);
    }

    #[test]
    fn malformed_token() {
        assert!(ArrayMetadata::deserialize("epsg:4326").is_err());
    }
}
