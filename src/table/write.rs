// src/table/write.rs

use anyhow::{bail, Context, Result};
use arrow::{
    array::{ArrayRef, Date32Builder, Int64Builder, StringBuilder},
    datatypes::{DataType, Field, Schema as ArrowSchema},
    record_batch::RecordBatch,
};
use chrono::NaiveDate;
use csv::WriterBuilder;
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info};

use super::{Cell, RawTable};
use crate::normalize::to_str;

/// Write `table` to `path`, choosing the format by extension (`.csv` or
/// `.parquet`). The file is written to a temporary sibling first and renamed
/// into place, so a failed run never leaves a partial artifact behind.
#[tracing::instrument(level = "info", skip(table, path), fields(path = %path.as_ref().display()))]
pub fn write_table<P: AsRef<Path>>(table: &RawTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    let tmp_path = temp_path(path);
    let written = match ext.as_str() {
        "csv" => write_csv(table, &tmp_path),
        "parquet" => write_parquet(table, &tmp_path),
        other => bail!("unsupported output format `{}` for {:?}", other, path),
    };
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    info!(rows = table.len(), "wrote output table");
    Ok(())
}

/// Pretty-print `value` as JSON with a trailing newline, atomically.
pub fn write_summary<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = temp_path(path);
    {
        let mut tmp = File::create(&tmp_path)
            .with_context(|| format!("creating {:?}", tmp_path))?;
        serde_json::to_writer_pretty(&mut tmp, value).context("serializing summary JSON")?;
        tmp.write_all(b"\n")?;
    }
    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".into());
    path.with_file_name(format!(".{}.tmp", name))
}

/// Every cell rendered through `to_str`, so dates come out date-only.
pub fn write_csv_to<W: Write>(table: &RawTable, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(to_str))?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_csv(table: &RawTable, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    write_csv_to(table, BufWriter::new(file))
}

/// Arrow type for one output column:
/// - every non-missing cell an integer (or bool) → Int64
/// - every non-missing cell a date                → Date32
/// - anything else, or an all-empty column        → Utf8
fn infer_column_type(table: &RawTable, idx: usize) -> DataType {
    let mut seen = None;
    for row in &table.rows {
        let cell = &row[idx];
        if cell.is_missing() {
            continue;
        }
        let ty = match cell {
            Cell::Int(_) | Cell::Bool(_) => DataType::Int64,
            Cell::Date(_) => DataType::Date32,
            _ => return DataType::Utf8,
        };
        match &seen {
            None => seen = Some(ty),
            Some(prev) if *prev != ty => return DataType::Utf8,
            _ => {}
        }
    }
    seen.unwrap_or(DataType::Utf8)
}

fn build_column(table: &RawTable, idx: usize, ty: &DataType) -> ArrayRef {
    match ty {
        DataType::Int64 => {
            let mut b = Int64Builder::with_capacity(table.len());
            for row in &table.rows {
                b.append_option(match row[idx] {
                    Cell::Int(i) => Some(i),
                    Cell::Bool(v) => Some(v as i64),
                    _ => None,
                });
            }
            Arc::new(b.finish())
        }
        DataType::Date32 => {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
            let mut b = Date32Builder::with_capacity(table.len());
            for row in &table.rows {
                b.append_option(match row[idx] {
                    Cell::Date(d) => Some((d - epoch).num_days() as i32),
                    _ => None,
                });
            }
            Arc::new(b.finish())
        }
        _ => {
            let mut b = StringBuilder::new();
            for row in &table.rows {
                b.append_value(to_str(&row[idx]));
            }
            Arc::new(b.finish())
        }
    }
}

fn write_parquet(table: &RawTable, path: &Path) -> Result<()> {
    let types: Vec<DataType> = (0..table.headers.len())
        .map(|i| infer_column_type(table, i))
        .collect();
    let fields: Vec<Field> = table
        .headers
        .iter()
        .zip(&types)
        .map(|(name, ty)| Field::new(name, ty.clone(), true))
        .collect();
    let schema = Arc::new(ArrowSchema::new(fields));
    debug!(?types, "inferred parquet column types");

    let columns: Vec<ArrayRef> = types
        .iter()
        .enumerate()
        .map(|(i, ty)| build_column(table, i, ty))
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer =
        ArrowWriter::try_new(file, schema, Some(props)).context("creating Arrow writer")?;
    writer.write(&batch).context("writing output batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
