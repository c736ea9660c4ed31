//! Abstractions for Arrow tables holding one geometry column plus attribute columns.

use std::sync::Arc;

use arrow_array::{RecordBatch, RecordBatchOptions};
use arrow_schema::{FieldRef, Schema, SchemaRef};
use geo::Geometry;

use crate::array;
use crate::coords::{flatten, rebuild};
use crate::error::{GeoColumnError, Result};
use crate::metadata::ArrayMetadata;
use crate::registry::ExtensionRegistry;

/// An Arrow table with one geometry column.
#[derive(Debug, Clone)]
pub struct GeoTable {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
    geometry_column_index: usize,
}

impl GeoTable {
    pub fn try_new(
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
        geometry_column_index: usize,
    ) -> Result<Self> {
        if geometry_column_index >= schema.fields().len() {
            return Err(GeoColumnError::General(format!(
                "geometry column index {geometry_column_index} out of bounds for schema with {} fields",
                schema.fields().len()
            )));
        }
        Ok(Self {
            schema,
            batches,
            geometry_column_index,
        })
    }

    /// Build a table from an attribute batch and a geometry sequence.
    ///
    /// The geometries are flattened, wrapped into their nested Arrow encoding and appended as
    /// a new column named `name` carrying the extension name and CRS metadata.
    pub fn from_geometries(
        batch: RecordBatch,
        name: &str,
        geometries: &[Geometry],
        metadata: &ArrayMetadata,
    ) -> Result<Self> {
        let flat = flatten(geometries)?;
        let geometry_array = array::wrap(&flat)?;

        if batch.num_columns() > 0 && batch.num_rows() != geometry_array.len() {
            return Err(GeoColumnError::General(format!(
                "geometry count {} does not match attribute row count {}",
                geometry_array.len(),
                batch.num_rows()
            )));
        }

        let mut fields: Vec<FieldRef> = batch.schema().fields().to_vec();
        fields.push(flat.geometry_type.to_field(name, metadata));
        let schema = Arc::new(Schema::new_with_metadata(
            fields,
            batch.schema().metadata().clone(),
        ));

        let mut columns = batch.columns().to_vec();
        let geometry_column_index = columns.len();
        columns.push(geometry_array);

        let options = RecordBatchOptions::new().with_row_count(Some(geometries.len()));
        let batch = RecordBatch::try_new_with_options(schema.clone(), columns, &options)?;

        Ok(Self {
            schema,
            batches: vec![batch],
            geometry_column_index,
        })
    }

    /// Reconstruct the geometry objects of the geometry column across all batches.
    pub fn geometries(&self, registry: &ExtensionRegistry) -> Result<Vec<Geometry>> {
        let field = self.schema.field(self.geometry_column_index);
        let extension_name = field
            .metadata()
            .get("ARROW:extension:name")
            .ok_or_else(|| {
                GeoColumnError::General(format!(
                    "geometry column '{}' carries no extension name",
                    field.name()
                ))
            })?;
        let geometry_type = registry.geometry_type(extension_name)?;

        let mut geometries = Vec::with_capacity(self.len());
        for batch in &self.batches {
            let (coords, offsets) =
                array::unwrap(batch.column(self.geometry_column_index), geometry_type)?;
            geometries.extend(rebuild(geometry_type, &coords, &offsets)?);
        }
        Ok(geometries)
    }

    /// The CRS metadata of the geometry column.
    pub fn geometry_metadata(&self) -> Result<ArrayMetadata> {
        ArrayMetadata::try_from(self.schema.field(self.geometry_column_index))
    }

    pub fn len(&self) -> usize {
        self.batches.iter().fold(0, |sum, val| sum + val.num_rows())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn batches(&self) -> &Vec<RecordBatch> {
        &self.batches
    }

    pub fn geometry_column_index(&self) -> usize {
        self.geometry_column_index
    }

    pub fn into_inner(self) -> (SchemaRef, Vec<RecordBatch>, usize) {
        (self.schema, self.batches, self.geometry_column_index)
    }
}
