//! The reconstruction engine: flat coordinates and offsets back to geometry objects.

use geo::{coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

use crate::datatypes::GeometryType;
use crate::error::{GeoColumnError, Result};

/// Reconstruct geometry objects from a flat coordinate buffer and its offset arrays.
///
/// This is the exact reverse walk of [`super::flatten`]: each successive pair of adjacent
/// offsets at the outermost level delimits one geometry, recursively slicing the next-inner
/// array down to coordinate pairs. A zero-length interval at any level produces an empty
/// sub-geometry rather than an omitted one, so the number of produced geometries always equals
/// the offset-implied count. Coordinates are reproduced in their original order with no
/// transformation.
///
/// Geometries with two or three nesting levels are always reconstructed as the multi variant;
/// single-part inputs round-trip through the multi type.
///
/// # Errors
///
/// [`GeoColumnError::MalformedOffsets`] if the coordinate buffer has odd length, the number of
/// offset arrays does not match the geometry type, or any offset array is empty, does not
/// start at 0, decreases, or does not end at the length of the array it indexes.
pub fn rebuild(
    geometry_type: GeometryType,
    coords: &[f64],
    offsets: &[Vec<i32>],
) -> Result<Vec<Geometry>> {
    validate_offsets(geometry_type, coords, offsets)?;

    let geometries = match geometry_type {
        GeometryType::Point => coords
            .chunks_exact(2)
            .map(|xy| Geometry::Point(Point::new(xy[0], xy[1])))
            .collect(),
        GeometryType::MultiPoint => offsets[0]
            .windows(2)
            .map(|geom| {
                let points = (geom[0] as usize..geom[1] as usize)
                    .map(|i| Point::new(coords[2 * i], coords[2 * i + 1]))
                    .collect();
                Geometry::MultiPoint(MultiPoint::new(points))
            })
            .collect(),
        GeometryType::MultiLineString => {
            let (vertex_offsets, line_offsets) = (&offsets[0], &offsets[1]);
            line_offsets
                .windows(2)
                .map(|geom| {
                    let lines = (geom[0] as usize..geom[1] as usize)
                        .map(|line| {
                            line_string(
                                coords,
                                vertex_offsets[line] as usize,
                                vertex_offsets[line + 1] as usize,
                            )
                        })
                        .collect();
                    Geometry::MultiLineString(MultiLineString::new(lines))
                })
                .collect()
        }
        GeometryType::MultiPolygon => {
            let (vertex_offsets, ring_offsets, polygon_offsets) =
                (&offsets[0], &offsets[1], &offsets[2]);
            polygon_offsets
                .windows(2)
                .map(|geom| {
                    let polygons = (geom[0] as usize..geom[1] as usize)
                        .map(|poly| {
                            let mut rings = (ring_offsets[poly] as usize
                                ..ring_offsets[poly + 1] as usize)
                                .map(|ring| {
                                    line_string(
                                        coords,
                                        vertex_offsets[ring] as usize,
                                        vertex_offsets[ring + 1] as usize,
                                    )
                                });
                            // The first ring is the exterior; a zero-ring polygon is empty.
                            match rings.next() {
                                Some(exterior) => Polygon::new(exterior, rings.collect()),
                                None => Polygon::new(LineString::new(vec![]), vec![]),
                            }
                        })
                        .collect();
                    Geometry::MultiPolygon(MultiPolygon::new(polygons))
                })
                .collect()
        }
    };

    Ok(geometries)
}

/// Check the offset invariants required for reconstruction: the number of offset arrays
/// matches the geometry type's nesting depth, and each array starts at 0, never decreases,
/// and ends at the length of the array it indexes (coordinate pairs at the innermost level).
pub(crate) fn validate_offsets(
    geometry_type: GeometryType,
    coords: &[f64],
    offsets: &[Vec<i32>],
) -> Result<()> {
    if coords.len() % 2 != 0 {
        return Err(GeoColumnError::MalformedOffsets(format!(
            "coordinate buffer length {} is not a multiple of 2",
            coords.len()
        )));
    }

    if offsets.len() != geometry_type.depth() {
        return Err(GeoColumnError::MalformedOffsets(format!(
            "{} requires {} offset arrays, got {}",
            geometry_type,
            geometry_type.depth(),
            offsets.len()
        )));
    }

    let mut indexed_len = coords.len() / 2;
    for (level, array) in offsets.iter().enumerate() {
        let (Some(&first), Some(&last)) = (array.first(), array.last()) else {
            return Err(GeoColumnError::MalformedOffsets(format!(
                "offset array at level {level} is empty"
            )));
        };
        if first != 0 {
            return Err(GeoColumnError::MalformedOffsets(format!(
                "offset array at level {level} starts at {first}, expected 0"
            )));
        }
        if array.windows(2).any(|w| w[0] > w[1]) {
            return Err(GeoColumnError::MalformedOffsets(format!(
                "offset array at level {level} is not monotonically non-decreasing"
            )));
        }
        if last as usize != indexed_len {
            return Err(GeoColumnError::MalformedOffsets(format!(
                "offset array at level {level} ends at {last}, expected {indexed_len}"
            )));
        }
        indexed_len = array.len() - 1;
    }

    Ok(())
}

fn line_string(coords: &[f64], start: usize, end: usize) -> LineString {
    LineString::new(
        (start..end)
            .map(|i| coord! { x: coords[2 * i], y: coords[2 * i + 1] })
            .collect(),
    )
}

#[cfg(test)]
mod test {
    use geo::{line_string, Geometry, MultiLineString, MultiPoint};

    use super::*;
    use crate::coords::flatten;
    use crate::test::{multilinestring, multipoint, multipolygon, point};

    fn roundtrip(geoms: Vec<Geometry>) {
        let flat = flatten(&geoms).unwrap();
        assert_eq!(flat.rebuild().unwrap(), geoms);
    }

    #[test]
    fn roundtrip_points() {
        roundtrip(vec![
            Geometry::Point(point::p0()),
            Geometry::Point(point::p1()),
            Geometry::Point(point::p2()),
        ]);
    }

    #[test]
    fn roundtrip_multipoints() {
        roundtrip(vec![
            Geometry::MultiPoint(multipoint::mp0()),
            Geometry::MultiPoint(MultiPoint::new(vec![])),
            Geometry::MultiPoint(multipoint::mp1()),
        ]);
    }

    #[test]
    fn roundtrip_multilinestrings() {
        roundtrip(vec![
            Geometry::MultiLineString(multilinestring::ml0()),
            Geometry::MultiLineString(MultiLineString::new(vec![])),
            Geometry::MultiLineString(multilinestring::ml1()),
        ]);
    }

    #[test]
    fn roundtrip_multipolygons() {
        roundtrip(vec![
            Geometry::MultiPolygon(multipolygon::mp0()),
            Geometry::MultiPolygon(geo::MultiPolygon::new(vec![])),
            Geometry::MultiPolygon(multipolygon::mp1()),
        ]);
    }

    #[test]
    fn single_part_roundtrips_as_multi() {
        let line = line_string![(x: 0., y: 0.), (x: 1., y: 1.)];
        let flat = flatten(&[Geometry::LineString(line.clone())]).unwrap();
        assert_eq!(
            flat.rebuild().unwrap(),
            vec![Geometry::MultiLineString(MultiLineString::new(vec![line]))]
        );
    }

    #[test]
    fn non_monotonic_offsets() {
        let err = rebuild(
            GeometryType::MultiPoint,
            &[0., 0., 1., 1., 2., 2.],
            &[vec![0, 3, 2]],
        )
        .unwrap_err();
        assert!(matches!(err, GeoColumnError::MalformedOffsets(_)));
    }

    #[test]
    fn offsets_must_start_at_zero() {
        let err = rebuild(GeometryType::MultiPoint, &[0., 0., 1., 1.], &[vec![1, 2]]).unwrap_err();
        assert!(matches!(err, GeoColumnError::MalformedOffsets(_)));
    }

    #[test]
    fn last_offset_must_match_coord_count() {
        let err = rebuild(GeometryType::MultiPoint, &[0., 0., 1., 1.], &[vec![0, 3]]).unwrap_err();
        assert!(matches!(err, GeoColumnError::MalformedOffsets(_)));
    }

    #[test]
    fn odd_coordinate_buffer() {
        let err = rebuild(GeometryType::Point, &[0., 0., 1.], &[]).unwrap_err();
        assert!(matches!(err, GeoColumnError::MalformedOffsets(_)));
    }

    #[test]
    fn wrong_offset_depth() {
        let err = rebuild(GeometryType::MultiLineString, &[], &[vec![0]]).unwrap_err();
        assert!(matches!(err, GeoColumnError::MalformedOffsets(_)));
    }

    #[test]
    fn zero_length_interval_yields_empty_geometry() {
        let geoms = rebuild(
            GeometryType::MultiPoint,
            &[0., 1., 2., 3.],
            &[vec![0, 2, 2]],
        )
        .unwrap();
        assert_eq!(geoms.len(), 2);
        assert_eq!(geoms[1], Geometry::MultiPoint(MultiPoint::new(vec![])));
    }

    #[test]
    fn rebuild_two_part_multilinestring() {
        let geoms = rebuild(
            GeometryType::MultiLineString,
            &[0., 0., 1., 1., 2., 2., 3., 3., 4., 4.],
            &[vec![0, 2, 5], vec![0, 2]],
        )
        .unwrap();
        assert_eq!(
            geoms,
            vec![Geometry::MultiLineString(MultiLineString::new(vec![
                line_string![(x: 0., y: 0.), (x: 1., y: 1.)],
                line_string![(x: 2., y: 2.), (x: 3., y: 3.), (x: 4., y: 4.)],
            ]))]
        );
    }
}
