//! Read and write GeoParquet files.

use std::io::Write;

use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::file::metadata::{FileMetaData, KeyValue};
use parquet::file::properties::WriterProperties;
use parquet::file::reader::ChunkReader;

use crate::error::{GeoColumnError, Result};
use crate::io::metadata::{GeoFileMetadata, GEO_METADATA_KEY};
use crate::table::GeoTable;

/// Write a table to a Parquet file with `"geo"` key-value metadata describing the geometry
/// column.
pub fn write_parquet<W: Write + Send>(
    table: &GeoTable,
    writer: W,
    writer_properties: Option<WriterProperties>,
) -> Result<()> {
    let geo_meta = GeoFileMetadata::from_table(table)?;

    let mut writer = ArrowWriter::try_new(writer, table.schema().clone(), writer_properties)?;
    writer.append_key_value_metadata(KeyValue::new(
        GEO_METADATA_KEY.to_string(),
        geo_meta.to_json()?,
    ));

    for batch in table.batches() {
        writer.write(batch)?;
    }
    writer.close()?;

    Ok(())
}

/// Read a Parquet file carrying `"geo"` metadata into a [GeoTable].
pub fn read_parquet<R: ChunkReader + 'static>(reader: R) -> Result<GeoTable> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
    let geo_meta = parse_geo_metadata(builder.metadata().file_metadata())?;
    let schema = builder.schema().clone();
    let geometry_column_index = geo_meta.primary_column_index(&schema)?;

    let reader = builder.build()?;
    let mut batches = vec![];
    for maybe_batch in reader {
        batches.push(maybe_batch?);
    }

    GeoTable::try_new(schema, batches, geometry_column_index)
}

fn parse_geo_metadata(metadata: &FileMetaData) -> Result<GeoFileMetadata> {
    if let Some(kv_metadata) = metadata.key_value_metadata() {
        for kv in kv_metadata {
            if kv.key == GEO_METADATA_KEY {
                if let Some(value) = &kv.value {
                    return GeoFileMetadata::from_json(value);
                }
            }
        }
    }

    Err(GeoColumnError::General(
        "expected a 'geo' key in Parquet file metadata".to_string(),
    ))
}
