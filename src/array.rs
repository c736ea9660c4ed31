//! The nested-array adapter: wrap flat coordinates and offsets into the Arrow nested-list
//! encoding and unwrap them back out.
//!
//! This is pure structural translation. The innermost unit is a fixed-size list of 2 floats;
//! each offset array becomes the offset buffer of one variable-length list level. No coordinate
//! is transformed and no offset value is altered.

use std::sync::Arc;

use arrow_array::{Array, ArrayRef, FixedSizeListArray, Float64Array, ListArray};
use arrow_buffer::{OffsetBuffer, ScalarBuffer};
use arrow_schema::Field;

use crate::coords::{validate_offsets, FlatCoords};
use crate::datatypes::{coord_field, GeometryType};
use crate::error::{GeoColumnError, Result};

/// Wrap a flat representation into an Arrow array of the geometry type's storage layout.
pub fn wrap(flat: &FlatCoords) -> Result<ArrayRef> {
    validate_offsets(flat.geometry_type, &flat.coords, &flat.offsets)?;

    let coords = Float64Array::from(flat.coords.clone());
    let mut array: ArrayRef = Arc::new(FixedSizeListArray::new(
        coord_field(),
        2,
        Arc::new(coords),
        None,
    ));

    for (level, offsets) in flat.offsets.iter().enumerate() {
        let field = Arc::new(Field::new(
            flat.geometry_type.level_name(level),
            array.data_type().clone(),
            false,
        ));
        let offsets = OffsetBuffer::new(ScalarBuffer::from(offsets.clone()));
        array = Arc::new(ListArray::new(field, offsets, array, None));
    }

    Ok(array)
}

/// Unwrap an Arrow array of the given geometry type into flat coordinates and offsets.
///
/// Offsets and coordinates are copied into private buffers, so the input may be backed by
/// shared or read-only memory. Arrays carrying nulls at any nesting level are rejected: null
/// geometries have no flat representation.
pub fn unwrap(array: &ArrayRef, geometry_type: GeometryType) -> Result<(Vec<f64>, Vec<Vec<i32>>)> {
    let mut offsets: Vec<Vec<i32>> = Vec::with_capacity(geometry_type.depth());
    let mut current = array.clone();

    for _ in 0..geometry_type.depth() {
        let list = current
            .as_any()
            .downcast_ref::<ListArray>()
            .ok_or_else(|| unexpected_storage(geometry_type, current.data_type()))?;
        check_no_nulls(list)?;
        offsets.push(list.offsets().iter().copied().collect());
        current = list.values().clone();
    }

    let coord_lists = current
        .as_any()
        .downcast_ref::<FixedSizeListArray>()
        .ok_or_else(|| unexpected_storage(geometry_type, current.data_type()))?;
    if coord_lists.value_length() != 2 {
        return Err(GeoColumnError::General(format!(
            "expected a fixed-size list of 2 coordinates, got {}",
            coord_lists.value_length()
        )));
    }
    check_no_nulls(coord_lists)?;

    let values = coord_lists
        .values()
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| unexpected_storage(geometry_type, coord_lists.values().data_type()))?;
    check_no_nulls(values)?;

    // Innermost level first, matching FlatCoords.
    offsets.reverse();
    Ok((values.values().to_vec(), offsets))
}

fn unexpected_storage(
    geometry_type: GeometryType,
    data_type: &arrow_schema::DataType,
) -> GeoColumnError {
    GeoColumnError::General(format!(
        "unexpected storage type {data_type:?} for {}",
        geometry_type.extension_name()
    ))
}

fn check_no_nulls(array: &dyn Array) -> Result<()> {
    if array.null_count() > 0 {
        return Err(GeoColumnError::General(
            "null values in geometry arrays are not supported".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use geo::Geometry;

    use super::*;
    use crate::coords::{flatten, rebuild};
    use crate::test::{multilinestring, multipolygon, point};

    fn wrap_unwrap_roundtrip(geoms: Vec<Geometry>) {
        let flat = flatten(&geoms).unwrap();
        let array = wrap(&flat).unwrap();
        assert_eq!(array.data_type(), &flat.geometry_type.data_type());
        assert_eq!(array.len(), geoms.len());

        let (coords, offsets) = unwrap(&array, flat.geometry_type).unwrap();
        assert_eq!(coords, flat.coords);
        assert_eq!(offsets, flat.offsets);
        assert_eq!(rebuild(flat.geometry_type, &coords, &offsets).unwrap(), geoms);
    }

    #[test]
    fn point_storage() {
        wrap_unwrap_roundtrip(vec![
            Geometry::Point(point::p0()),
            Geometry::Point(point::p1()),
        ]);
    }

    #[test]
    fn multilinestring_storage() {
        wrap_unwrap_roundtrip(vec![
            Geometry::MultiLineString(multilinestring::ml0()),
            Geometry::MultiLineString(multilinestring::ml1()),
        ]);
    }

    #[test]
    fn multipolygon_storage() {
        wrap_unwrap_roundtrip(vec![
            Geometry::MultiPolygon(multipolygon::mp0()),
            Geometry::MultiPolygon(multipolygon::mp1()),
        ]);
    }

    #[test]
    fn unwrap_rejects_wrong_nesting() {
        let flat = flatten(&[Geometry::Point(point::p0())]).unwrap();
        let array = wrap(&flat).unwrap();
        assert!(unwrap(&array, crate::GeometryType::MultiPoint).is_err());
    }
}
