//! The flattening engine: geometry objects to flat coordinates and offsets.

use geo::{Geometry, LineString, Polygon};

use crate::datatypes::{geometry_kind, GeometryType};
use crate::error::{GeoColumnError, Result};
use crate::offsets::OffsetsBuilder;

use super::FlatCoords;

/// Decompose a homogeneous sequence of geometries into a flat coordinate buffer plus 0–3
/// offset arrays.
///
/// The geometry type is inferred from the first element; LineString resolves to
/// MultiLineString and Polygon to MultiPolygon (stored as a single-part multi geometry). Leaf
/// coordinates are appended in their original order, and one offset entry is emitted every
/// time a container at the corresponding nesting level closes. Empty geometries contribute a
/// zero-length offset range and never advance the coordinate buffer.
///
/// # Errors
///
/// - [`GeoColumnError::EmptyInput`] if `geometries` is empty (the type cannot be inferred)
/// - [`GeoColumnError::TypeMismatch`] if an element does not resolve to the inferred type
/// - [`GeoColumnError::Overflow`] if a running counter does not fit in an `i32`
pub fn flatten(geometries: &[Geometry]) -> Result<FlatCoords> {
    let first = geometries.first().ok_or(GeoColumnError::EmptyInput)?;
    match GeometryType::of(first)? {
        GeometryType::Point => flatten_points(geometries),
        GeometryType::MultiPoint => flatten_multi_points(geometries),
        GeometryType::MultiLineString => flatten_multi_line_strings(geometries),
        GeometryType::MultiPolygon => flatten_multi_polygons(geometries),
    }
}

fn mismatch(expected: GeometryType, actual: &Geometry, index: usize) -> GeoColumnError {
    GeoColumnError::TypeMismatch {
        expected,
        actual: geometry_kind(actual),
        index,
    }
}

fn flatten_points(geometries: &[Geometry]) -> Result<FlatCoords> {
    let mut coords = Vec::with_capacity(geometries.len() * 2);

    for (index, geometry) in geometries.iter().enumerate() {
        match geometry {
            Geometry::Point(point) => {
                coords.push(point.x());
                coords.push(point.y());
            }
            other => return Err(mismatch(GeometryType::Point, other, index)),
        }
    }

    Ok(FlatCoords {
        geometry_type: GeometryType::Point,
        coords,
        offsets: vec![],
    })
}

fn flatten_multi_points(geometries: &[Geometry]) -> Result<FlatCoords> {
    let mut coords = Vec::new();
    let mut point_offsets = OffsetsBuilder::with_capacity(geometries.len());

    for (index, geometry) in geometries.iter().enumerate() {
        match geometry {
            Geometry::MultiPoint(multi_point) => {
                point_offsets.try_push_usize(multi_point.0.len())?;
                for point in &multi_point.0 {
                    coords.push(point.x());
                    coords.push(point.y());
                }
            }
            other => return Err(mismatch(GeometryType::MultiPoint, other, index)),
        }
    }

    Ok(FlatCoords {
        geometry_type: GeometryType::MultiPoint,
        coords,
        offsets: vec![point_offsets.into_inner()],
    })
}

fn flatten_multi_line_strings(geometries: &[Geometry]) -> Result<FlatCoords> {
    let mut coords = Vec::new();
    let mut vertex_offsets = OffsetsBuilder::new();
    let mut line_offsets = OffsetsBuilder::with_capacity(geometries.len());

    for (index, geometry) in geometries.iter().enumerate() {
        match geometry {
            // A LineString is a single-part MultiLineString.
            Geometry::LineString(line) => {
                line_offsets.try_push_usize(1)?;
                push_line(line, &mut vertex_offsets, &mut coords)?;
            }
            Geometry::MultiLineString(multi_line) => {
                line_offsets.try_push_usize(multi_line.0.len())?;
                for line in &multi_line.0 {
                    push_line(line, &mut vertex_offsets, &mut coords)?;
                }
            }
            other => return Err(mismatch(GeometryType::MultiLineString, other, index)),
        }
    }

    Ok(FlatCoords {
        geometry_type: GeometryType::MultiLineString,
        coords,
        offsets: vec![vertex_offsets.into_inner(), line_offsets.into_inner()],
    })
}

fn flatten_multi_polygons(geometries: &[Geometry]) -> Result<FlatCoords> {
    let mut coords = Vec::new();
    let mut vertex_offsets = OffsetsBuilder::new();
    let mut ring_offsets = OffsetsBuilder::new();
    let mut polygon_offsets = OffsetsBuilder::with_capacity(geometries.len());

    for (index, geometry) in geometries.iter().enumerate() {
        match geometry {
            // A Polygon is a single-part MultiPolygon.
            Geometry::Polygon(polygon) => {
                polygon_offsets.try_push_usize(1)?;
                push_polygon(polygon, &mut ring_offsets, &mut vertex_offsets, &mut coords)?;
            }
            Geometry::MultiPolygon(multi_polygon) => {
                polygon_offsets.try_push_usize(multi_polygon.0.len())?;
                for polygon in &multi_polygon.0 {
                    push_polygon(polygon, &mut ring_offsets, &mut vertex_offsets, &mut coords)?;
                }
            }
            other => return Err(mismatch(GeometryType::MultiPolygon, other, index)),
        }
    }

    Ok(FlatCoords {
        geometry_type: GeometryType::MultiPolygon,
        coords,
        offsets: vec![
            vertex_offsets.into_inner(),
            ring_offsets.into_inner(),
            polygon_offsets.into_inner(),
        ],
    })
}

fn push_line(
    line: &LineString,
    vertex_offsets: &mut OffsetsBuilder,
    coords: &mut Vec<f64>,
) -> Result<()> {
    vertex_offsets.try_push_usize(line.0.len())?;
    for coord in &line.0 {
        coords.push(coord.x);
        coords.push(coord.y);
    }
    Ok(())
}

fn push_polygon(
    polygon: &Polygon,
    ring_offsets: &mut OffsetsBuilder,
    vertex_offsets: &mut OffsetsBuilder,
    coords: &mut Vec<f64>,
) -> Result<()> {
    // A fully empty polygon is stored as zero rings so that it reconstructs as empty.
    if polygon.exterior().0.is_empty() && polygon.interiors().is_empty() {
        ring_offsets.try_push_usize(0)?;
        return Ok(());
    }

    ring_offsets.try_push_usize(1 + polygon.interiors().len())?;
    push_line(polygon.exterior(), vertex_offsets, coords)?;
    for interior in polygon.interiors() {
        push_line(interior, vertex_offsets, coords)?;
    }
    Ok(())
}
