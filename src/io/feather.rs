//! Read and write Feather (Arrow IPC) files.

use std::io::{Read, Seek, Write};
use std::sync::Arc;

use arrow_ipc::reader::FileReader;
use arrow_ipc::writer::FileWriter;
use arrow_schema::Schema;

use crate::error::{GeoColumnError, Result};
use crate::io::metadata::{GeoFileMetadata, GEO_METADATA_KEY};
use crate::table::GeoTable;

/// Write a table to an Arrow IPC (Feather v2) file with `"geo"` schema metadata describing the
/// geometry column.
pub fn write_feather<W: Write>(table: &GeoTable, writer: W) -> Result<()> {
    let geo_meta = GeoFileMetadata::from_table(table)?;

    let mut schema_metadata = table.schema().metadata().clone();
    schema_metadata.insert(GEO_METADATA_KEY.to_string(), geo_meta.to_json()?);
    let schema = Arc::new(Schema::new_with_metadata(
        table.schema().fields().clone(),
        schema_metadata,
    ));

    let mut writer = FileWriter::try_new(writer, &schema)?;
    for batch in table.batches() {
        writer.write(&batch.clone().with_schema(schema.clone())?)?;
    }
    writer.finish()?;

    Ok(())
}

/// Read an Arrow IPC (Feather v2) file carrying `"geo"` metadata into a [GeoTable].
pub fn read_feather<R: Read + Seek>(reader: R) -> Result<GeoTable> {
    let reader = FileReader::try_new(reader, None)?;
    let schema = reader.schema();

    let geo_json = schema.metadata().get(GEO_METADATA_KEY).ok_or_else(|| {
        GeoColumnError::General("expected a 'geo' key in Feather schema metadata".to_string())
    })?;
    let geo_meta = GeoFileMetadata::from_json(geo_json)?;
    let geometry_column_index = geo_meta.primary_column_index(&schema)?;

    let mut batches = vec![];
    for maybe_batch in reader {
        batches.push(maybe_batch?);
    }

    GeoTable::try_new(schema, batches, geometry_column_index)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use arrow_array::{Int32Array, RecordBatch};
    use arrow_schema::{DataType, Field};
    use geo::Geometry;

    use super::*;
    use crate::metadata::ArrayMetadata;
    use crate::registry::ExtensionRegistry;
    use crate::test::multilinestring::{ml0, ml1};

    #[test]
    fn feather_roundtrip() {
        let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int32, false)]));
        let batch =
            RecordBatch::try_new(schema, vec![Arc::new(Int32Array::from(vec![10, 20]))]).unwrap();

        let geoms = vec![
            Geometry::MultiLineString(ml0()),
            Geometry::MultiLineString(ml1()),
        ];
        let metadata = ArrayMetadata::new(Some("EPSG:31370".to_string()));
        let table = GeoTable::from_geometries(batch, "geometry", &geoms, &metadata).unwrap();

        let mut buf = Vec::new();
        write_feather(&table, &mut buf).unwrap();
        let read = read_feather(Cursor::new(buf)).unwrap();

        assert_eq!(read.geometry_column_index(), 1);
        assert_eq!(read.geometry_metadata().unwrap(), metadata);
        let registry = ExtensionRegistry::new();
        assert_eq!(read.geometries(&registry).unwrap(), geoms);
    }
}
