use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::{DataType, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{LaunchDataset, LaunchRecord, Outcome, RawRecord};
use super::DataError;

/// Required source columns, shared by every format.
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the four required columns
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat scalar columns with the same names (pandas/polars export)
pub fn load_file(path: &Path) -> Result<LaunchDataset, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let col = |name: &str| -> Result<usize, DataError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    };
    let site_idx = col(COL_SITE)?;
    let payload_idx = col(COL_PAYLOAD)?;
    let class_idx = col(COL_CLASS)?;
    let booster_idx = col(COL_BOOSTER)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let payload_raw = record.get(payload_idx).unwrap_or("").trim();
        let payload_mass_kg: f64 =
            payload_raw
                .parse()
                .map_err(|_| DataError::InvalidNumber {
                    row: row_no,
                    column: COL_PAYLOAD.to_string(),
                    value: payload_raw.to_string(),
                })?;

        let class_raw = record.get(class_idx).unwrap_or("").trim();
        let class: i64 = class_raw.parse().map_err(|_| DataError::InvalidNumber {
            row: row_no,
            column: COL_CLASS.to_string(),
            value: class_raw.to_string(),
        })?;

        records.push(LaunchRecord {
            site: record.get(site_idx).unwrap_or("").to_string(),
            payload_mass_kg,
            outcome: Outcome::from_class(class)?,
            booster_category: record.get(booster_idx).unwrap_or("").to_string(),
        });
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')` shape:
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 2500.0,
///     "class": 1,
///     "Booster Version Category": "FT"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset, DataError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let raw: Vec<RawRecord> = serde_json::from_str(&text)?;

    let records = raw
        .into_iter()
        .map(LaunchRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet export of the launch table.
///
/// Expected schema: flat scalar columns named like the CSV headers —
/// `Launch Site` (Utf8), `Payload Mass (kg)` (Float64/Float32/Int64),
/// `class` (Int64/Int32), `Booster Version Category` (Utf8).
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset, DataError> {
    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let site_idx = column_index(&schema, COL_SITE)?;
        let payload_idx = column_index(&schema, COL_PAYLOAD)?;
        let class_idx = column_index(&schema, COL_CLASS)?;
        let booster_idx = column_index(&schema, COL_BOOSTER)?;

        let site_col = batch.column(site_idx);
        let payload_col = batch.column(payload_idx);
        let class_col = batch.column(class_idx);
        let booster_col = batch.column(booster_idx);

        for row in 0..batch.num_rows() {
            let class = int_at(class_col, row, COL_CLASS)?;
            records.push(LaunchRecord {
                site: string_at(site_col, row, COL_SITE)?,
                payload_mass_kg: float_at(payload_col, row, COL_PAYLOAD)?,
                outcome: Outcome::from_class(class)?,
                booster_category: string_at(booster_col, row, COL_BOOSTER)?,
            });
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column_index(schema: &Schema, name: &str) -> Result<usize, DataError> {
    schema
        .index_of(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))
}

fn string_at(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<String, DataError> {
    match col.data_type() {
        DataType::Utf8 => {
            let arr = downcast::<StringArray>(col, name)?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = downcast::<LargeStringArray>(col, name)?;
            Ok(arr.value(row).to_string())
        }
        other => Err(DataError::ColumnType {
            column: name.to_string(),
            expected: "string",
            actual: format!("{other:?}"),
        }),
    }
}

fn float_at(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<f64, DataError> {
    match col.data_type() {
        DataType::Float64 => Ok(downcast::<Float64Array>(col, name)?.value(row)),
        DataType::Float32 => Ok(f64::from(downcast::<Float32Array>(col, name)?.value(row))),
        DataType::Int64 => Ok(downcast::<Int64Array>(col, name)?.value(row) as f64),
        DataType::Int32 => Ok(f64::from(downcast::<Int32Array>(col, name)?.value(row))),
        other => Err(DataError::ColumnType {
            column: name.to_string(),
            expected: "numeric",
            actual: format!("{other:?}"),
        }),
    }
}

fn int_at(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<i64, DataError> {
    match col.data_type() {
        DataType::Int64 => Ok(downcast::<Int64Array>(col, name)?.value(row)),
        DataType::Int32 => Ok(i64::from(downcast::<Int32Array>(col, name)?.value(row))),
        other => Err(DataError::ColumnType {
            column: name.to_string(),
            expected: "integer",
            actual: format!("{other:?}"),
        }),
    }
}

fn downcast<'a, T: Array + 'static>(
    col: &'a Arc<dyn Array>,
    name: &str,
) -> Result<&'a T, DataError> {
    col.as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| DataError::ColumnType {
            column: name.to_string(),
            expected: std::any::type_name::<T>(),
            actual: format!("{:?}", col.data_type()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(ext: &str, contents: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.into_temp_path()
    }

    const CSV_OK: &str = "\
Flight Number,Launch Site,Payload Mass (kg),class,Booster Version Category
1,CCAFS LC-40,2500.5,1,FT
2,VAFB SLC-4E,500,0,v1.0
3,CCAFS LC-40,9600,1,B4
";

    #[test]
    fn loads_csv_with_extra_columns() {
        let path = write_temp("csv", CSV_OK);
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(ds.payload_min, 500.0);
        assert_eq!(ds.payload_max, 9600.0);
        assert_eq!(ds.records[0].outcome, Outcome::Success);
        assert_eq!(ds.records[1].booster_category, "v1.0");
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let path = write_temp("csv", "Launch Site,class\nCCAFS,1\n");
        match load_file(&path) {
            Err(DataError::MissingColumn(col)) => assert_eq!(col, COL_PAYLOAD),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_payload_is_a_load_error() {
        let csv = "\
Launch Site,Payload Mass (kg),class,Booster Version Category
CCAFS,heavy,1,FT
";
        let path = write_temp("csv", csv);
        match load_file(&path) {
            Err(DataError::InvalidNumber { row, column, value }) => {
                assert_eq!(row, 0);
                assert_eq!(column, COL_PAYLOAD);
                assert_eq!(value, "heavy");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn out_of_domain_class_is_a_load_error() {
        let csv = "\
Launch Site,Payload Mass (kg),class,Booster Version Category
CCAFS,2500,2,FT
";
        let path = write_temp("csv", csv);
        assert!(matches!(load_file(&path), Err(DataError::InvalidOutcome(2))));
    }

    #[test]
    fn loads_records_oriented_json() {
        let json = r#"[
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 3100.0, "class": 1, "Booster Version Category": "FT"},
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 4800.0, "class": 0, "Booster Version Category": "B5"}
        ]"#;
        let path = write_temp("json", json);
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.sites, vec!["KSC LC-39A"]);
        assert_eq!(ds.booster_categories, vec!["B5", "FT"]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = write_temp("xlsx", "");
        assert!(matches!(
            load_file(&path),
            Err(DataError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }
}
