//! The closed set of geometry types this crate can store.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use arrow_schema::{DataType, Field, FieldRef};
use geo::Geometry;

use crate::error::{GeoColumnError, Result};
use crate::metadata::ArrayMetadata;

/// The geometry type tag governing the nesting depth of an array.
///
/// LineString and Polygon do not get their own variants: a LineString is stored as a
/// single-part MultiLineString and a Polygon as a single-part MultiPolygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

impl GeometryType {
    /// The Arrow extension name identifying this geometry type.
    pub fn extension_name(&self) -> &'static str {
        match self {
            Self::Point => "geoarrow.point",
            Self::MultiPoint => "geoarrow.multipoint",
            Self::MultiLineString => "geoarrow.multilinestring",
            Self::MultiPolygon => "geoarrow.multipolygon",
        }
    }

    /// Look up the geometry type for an Arrow extension name.
    pub fn from_extension_name(extension_name: &str) -> Result<Self> {
        match extension_name {
            "geoarrow.point" => Ok(Self::Point),
            "geoarrow.multipoint" => Ok(Self::MultiPoint),
            "geoarrow.multilinestring" => Ok(Self::MultiLineString),
            "geoarrow.multipolygon" => Ok(Self::MultiPolygon),
            other => Err(GeoColumnError::UnknownTypeTag(other.to_string())),
        }
    }

    /// The number of offset arrays (variable-length list levels) this geometry type uses.
    pub fn depth(&self) -> usize {
        match self {
            Self::Point => 0,
            Self::MultiPoint => 1,
            Self::MultiLineString => 2,
            Self::MultiPolygon => 3,
        }
    }

    /// Resolve a geometry object to its type tag.
    pub(crate) fn of(geometry: &Geometry) -> Result<Self> {
        match geometry {
            Geometry::Point(_) => Ok(Self::Point),
            Geometry::MultiPoint(_) => Ok(Self::MultiPoint),
            Geometry::LineString(_) | Geometry::MultiLineString(_) => Ok(Self::MultiLineString),
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Ok(Self::MultiPolygon),
            other => Err(GeoColumnError::IncorrectGeometryType(format!(
                "{} cannot be stored in a geometry column",
                geometry_kind(other)
            ))),
        }
    }

    /// The field name of the variable-length list at nesting `level` (0 is innermost).
    pub(crate) fn level_name(&self, level: usize) -> &'static str {
        match (self, level) {
            (Self::MultiPoint, 0) => "points",
            (Self::MultiLineString, 0) => "vertices",
            (Self::MultiLineString, 1) => "linestrings",
            (Self::MultiPolygon, 0) => "vertices",
            (Self::MultiPolygon, 1) => "rings",
            (Self::MultiPolygon, 2) => "polygons",
            _ => unreachable!(),
        }
    }

    /// The Arrow storage type: a fixed-size list of 2 floats wrapped in `depth()` list levels.
    pub fn data_type(&self) -> DataType {
        let mut data_type = DataType::FixedSizeList(coord_field(), 2);
        for level in 0..self.depth() {
            data_type = DataType::List(Arc::new(Field::new(
                self.level_name(level),
                data_type,
                false,
            )));
        }
        data_type
    }

    /// An Arrow [Field] for this geometry type carrying the extension name and CRS metadata.
    pub fn to_field(&self, name: &str, metadata: &ArrayMetadata) -> FieldRef {
        let mut field_metadata = HashMap::with_capacity(2);
        field_metadata.insert(
            "ARROW:extension:name".to_string(),
            self.extension_name().to_string(),
        );
        field_metadata.insert("ARROW:extension:metadata".to_string(), metadata.serialize());
        Arc::new(Field::new(name, self.data_type(), true).with_metadata(field_metadata))
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "Point",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
        };
        write!(f, "{name}")
    }
}

pub(crate) fn coord_field() -> FieldRef {
    Arc::new(Field::new("xy", DataType::Float64, false))
}

/// The name of a [Geometry] variant, for error messages.
pub(crate) fn geometry_kind(geometry: &Geometry) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
