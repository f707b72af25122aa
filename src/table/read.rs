// src/table/read.rs

use anyhow::{anyhow, bail, Context, Result};
use csv::ReaderBuilder;
use serde_json::Value;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::{debug, info, warn};

use super::{Cell, RawTable};

/// Load a whole tabular source into memory, choosing the parser by extension:
/// - `.csv`  → every non-blank field becomes `Cell::Text`
/// - `.json` → an array of row objects, keeping native number/bool/null types
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let reader = BufReader::new(file);

    let table = match ext.as_str() {
        "csv" => read_csv(reader).with_context(|| format!("reading CSV {:?}", path))?,
        "json" => read_json(reader).with_context(|| format!("reading JSON {:?}", path))?,
        other => bail!("unsupported input format `{}` for {:?}", other, path),
    };

    info!(
        rows = table.len(),
        columns = table.headers.len(),
        "loaded table"
    );
    Ok(table)
}

/// Parse CSV with a header row. Ragged rows are tolerated and squared off.
/// Bytes that are not valid UTF-8 are decoded lossily per field.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .byte_headers()
        .context("reading CSV header row")?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut lossy = 0usize;
    for (idx, result) in rdr.byte_records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        let row: Vec<Cell> = record
            .iter()
            .map(|field| {
                if std::str::from_utf8(field).is_err() {
                    lossy += 1;
                }
                Cell::from(String::from_utf8_lossy(field).into_owned())
            })
            .collect();
        rows.push(row);
    }
    if lossy > 0 {
        warn!(fields = lossy, "non-UTF-8 bytes replaced in CSV fields");
    }
    debug!(rows = rows.len(), "parsed CSV records");

    Ok(RawTable::new(headers, rows))
}

/// Parse a JSON array of objects (records orientation). Headers follow the
/// order in which keys are first seen across all rows.
pub fn read_json<R: Read>(reader: R) -> Result<RawTable> {
    let value: Value = serde_json::from_reader(reader).context("parsing JSON document")?;
    let records = value
        .as_array()
        .ok_or_else(|| anyhow!("expected a JSON array of row objects"))?;

    let mut headers: Vec<String> = Vec::new();
    for (idx, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| anyhow!("row {} is not a JSON object", idx))?;
        for key in obj.keys() {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_cell).unwrap_or(Cell::Empty))
                .collect()
        })
        .collect();

    Ok(RawTable::new(headers, rows))
}

fn json_to_cell(v: &Value) -> Cell {
    match v {
        Value::Null => Cell::Empty,
        Value::Bool(b) => Cell::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Cell::Int(i),
            None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Empty),
        },
        Value::String(s) => Cell::from(s.as_str()),
        // nested values have no tabular meaning; keep their text
        other => Cell::Text(other.to_string()),
    }
}
