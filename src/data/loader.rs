use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Column contract
// ---------------------------------------------------------------------------

// External column names; part of the dataset contract, never renamed.
pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_CLASS: &str = "class";

/// Violations of the tabular column contract.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: class value {value} is not 0 or 1")]
    ClassOutOfRange { row: usize, value: i64 },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch-records dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the contract columns; extra columns ignored
/// * `.json`    – records-oriented array of objects with the same keys
/// * `.parquet` – flat columnar file with the same column names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming at least the four contract columns.
/// Any other columns (flight numbers, booster versions, …) are skipped.
fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column = |name: &'static str| -> Result<usize, SchemaError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(SchemaError::MissingColumn(name))
    };
    let site_idx = column(COL_LAUNCH_SITE)?;
    let payload_idx = column(COL_PAYLOAD_MASS)?;
    let booster_idx = column(COL_BOOSTER_CATEGORY)?;
    let class_idx = column(COL_CLASS)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let payload_mass_kg: f64 = field(payload_idx).parse().with_context(|| {
            format!(
                "CSV row {row_no}: '{}' is not a number in '{COL_PAYLOAD_MASS}'",
                field(payload_idx)
            )
        })?;
        let class: i64 = field(class_idx).parse().with_context(|| {
            format!(
                "CSV row {row_no}: '{}' is not an integer in '{COL_CLASS}'",
                field(class_idx)
            )
        })?;

        records.push(LaunchRecord {
            site: field(site_idx).to_string(),
            payload_mass_kg,
            booster_category: field(booster_idx).to_string(),
            outcome: Outcome::from_class(class).ok_or(SchemaError::ClassOutOfRange {
                row: row_no,
                value: class,
            })?,
        });
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One raw JSON record, keyed by the contract column names
/// (the `df.to_json(orient='records')` shape). Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
    class: i64,
}

fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let raw: Vec<RawRecord> = serde_json::from_str(&text).context("parsing JSON records")?;

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(row, r)| {
            Ok(LaunchRecord {
                site: r.site,
                payload_mass_kg: r.payload_mass_kg,
                booster_category: r.booster_category,
                outcome: Outcome::from_class(r.class).ok_or(SchemaError::ClassOutOfRange {
                    row,
                    value: r.class,
                })?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat row per launch.
///
/// Expected schema: `Launch Site` and `Booster Version Category` as Utf8,
/// `Payload Mass (kg)` as Float64 or Float32, `class` as Int64 or Int32.
/// Works with files written by both Pandas and Polars.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &'static str| -> Result<usize, SchemaError> {
            schema
                .index_of(name)
                .map_err(|_| SchemaError::MissingColumn(name))
        };
        let site_col = batch.column(column(COL_LAUNCH_SITE)?);
        let payload_col = batch.column(column(COL_PAYLOAD_MASS)?);
        let booster_col = batch.column(column(COL_BOOSTER_CATEGORY)?);
        let class_col = batch.column(column(COL_CLASS)?);

        for row in 0..batch.num_rows() {
            let class = extract_i64(class_col, row)
                .with_context(|| format!("row {row}: reading '{COL_CLASS}'"))?;

            records.push(LaunchRecord {
                site: extract_string(site_col, row)
                    .with_context(|| format!("row {row}: reading '{COL_LAUNCH_SITE}'"))?,
                payload_mass_kg: extract_f64(payload_col, row)
                    .with_context(|| format!("row {row}: reading '{COL_PAYLOAD_MASS}'"))?,
                booster_category: extract_string(booster_col, row)
                    .with_context(|| format!("row {row}: reading '{COL_BOOSTER_CATEGORY}'"))?,
                outcome: Outcome::from_class(class).ok_or(SchemaError::ClassOutOfRange {
                    row,
                    value: class,
                })?,
            });
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<LargeStringArray>()
                .context("expected LargeStringArray")?;
            Ok(arr.value(row).to_string())
        }
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(f64::from(arr.value(row)))
        }
        other => bail!("Expected Float64 or Float32 column, got {other:?}"),
    }
}

fn extract_i64(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value in integer column");
    }
    match col.data_type() {
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(i64::from(arr.value(row)))
        }
        other => bail!("Expected Int64 or Int32 column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    const CSV_HEADER: &str =
        "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version Category";

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn csv_roundtrip_ignores_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "launches.csv",
            &format!(
                "{CSV_HEADER}\n\
                 1,CCAFS LC-40,0,0,v1.0\n\
                 2,VAFB SLC-4E,1,500,v1.1\n\
                 3,KSC LC-39A,1,5300.5,FT\n"
            ),
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[0].site, "CCAFS LC-40");
        assert_eq!(ds.records[0].outcome, Outcome::Failure);
        assert_eq!(ds.records[2].payload_mass_kg, 5300.5);
        assert_eq!(ds.records[2].booster_category, "FT");
        assert_eq!(ds.sites.len(), 3);
    }

    #[test]
    fn csv_missing_column_is_a_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "bad.csv",
            "Launch Site,class,Booster Version Category\nCCAFS LC-40,1,FT\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains(COL_PAYLOAD_MASS));
    }

    #[test]
    fn csv_rejects_non_binary_class() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "bad_class.csv",
            &format!("{CSV_HEADER}\n1,CCAFS LC-40,2,100,v1.0\n"),
        );

        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("not 0 or 1"));
    }

    #[test]
    fn json_records_load_with_contract_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "launches.json",
            r#"[
                {"Flight Number": 1, "Launch Site": "KSC LC-39A", "Payload Mass (kg)": 3500.0,
                 "Booster Version Category": "B5", "class": 1},
                {"Flight Number": 2, "Launch Site": "CCAFS SLC-40", "Payload Mass (kg)": 250.0,
                 "Booster Version Category": "v1.0", "class": 0}
            ]"#,
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].site, "KSC LC-39A");
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
    }

    #[test]
    fn parquet_flat_schema_loads() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
            Field::new(COL_CLASS, DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS LC-40", "KSC LC-39A"])),
                Arc::new(Float64Array::from(vec![677.0, 9600.0])),
                Arc::new(StringArray::from(vec!["v1.0", "B4"])),
                Arc::new(Int64Array::from(vec![0, 1])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launches.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].site, "KSC LC-39A");
        assert_eq!(ds.records[1].payload_mass_kg, 9600.0);
        assert_eq!(ds.records[1].outcome, Outcome::Success);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "launches.xlsx", "");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
