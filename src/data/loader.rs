use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{normalize_elevation, AirportRecord, AirportTable, Category, Region, ServiceFlag};

/// Columns every input source must provide. `ident` is optional.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "id",
    "name",
    "type",
    "latitude_deg",
    "longitude_deg",
    "elevation_ft",
    "iso_region",
    "municipality",
    "scheduled_service",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file is absent, not a regular file, or cannot be read.
    #[error("data source not found: {}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Raw rows as they appear in the file
// ---------------------------------------------------------------------------

/// One row before the region/category allowlists and elevation cleanup.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAirportRow {
    pub id: i64,
    #[serde(default)]
    pub ident: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub elevation_ft: Option<f64>,
    pub iso_region: String,
    pub municipality: Option<String>,
    pub scheduled_service: String,
}

/// Rows read from a source plus the number that could not be parsed at all.
#[derive(Debug, Default)]
struct RawRows {
    rows: Vec<RawAirportRow>,
    malformed: usize,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the airport table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the columns in [`REQUIRED_COLUMNS`] (default)
/// * `.json`    – `[{ "id": 1, "iso_region": "US-MA", ... }, ...]`
/// * `.parquet` – one column per field, any numeric/string physical type
///
/// The returned table only holds recognized regions and categories, has every
/// non-positive elevation replaced by `None`, and is sorted ascending by
/// elevation with missing values last.
pub fn load_file(path: &Path) -> Result<AirportTable, LoadError> {
    let not_found = |source: io::Error| LoadError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(not_found)?;
    if !file.metadata().map_err(not_found)?.is_file() {
        return Err(not_found(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => read_csv(file),
        "json" => read_json(file),
        "parquet" | "pq" => read_parquet(file),
        other => {
            return Err(LoadError::UnsupportedFormat {
                extension: other.to_string(),
            })
        }
    }
    .map_err(|err| match err.downcast::<LoadError>() {
        Ok(load_err) => load_err,
        // A read that fails mid-way means the source is unreadable, not malformed.
        Err(other) => match other.chain().find_map(|e| e.downcast_ref::<io::Error>()) {
            Some(io_err) => not_found(io::Error::new(io_err.kind(), format!("{other:#}"))),
            None => LoadError::Parse {
                path: path.to_path_buf(),
                message: format!("{other:#}"),
            },
        },
    })?;

    if raw.malformed > 0 {
        log::warn!("{}: skipped {} unparsable rows", path.display(), raw.malformed);
    }

    Ok(build_table(raw.rows))
}

/// Apply the allowlists, map region codes, clean elevations and sort.
pub fn build_table(rows: Vec<RawAirportRow>) -> AirportTable {
    let total = rows.len();
    let mut outside_region = 0usize;
    let mut outside_category = 0usize;
    let mut bad_service = 0usize;

    let records: Vec<AirportRecord> = rows
        .into_iter()
        .filter_map(|row| {
            let Some(region) = Region::from_code(&row.iso_region) else {
                outside_region += 1;
                return None;
            };
            let Some(category) = Category::from_label(&row.kind) else {
                outside_category += 1;
                return None;
            };
            let Some(scheduled_service) = ServiceFlag::parse(&row.scheduled_service) else {
                bad_service += 1;
                return None;
            };
            Some(AirportRecord {
                id: row.id,
                ident: row.ident.unwrap_or_default(),
                name: row.name,
                region,
                category,
                latitude_deg: row.latitude_deg,
                longitude_deg: row.longitude_deg,
                municipality: row.municipality.filter(|m| !m.is_empty()),
                scheduled_service,
                elevation_ft: normalize_elevation(row.elevation_ft),
            })
        })
        .collect();

    log::debug!(
        "Kept {} of {total} rows ({outside_region} outside New England, {outside_category} unrecognized type)",
        records.len()
    );
    if bad_service > 0 {
        log::warn!("Dropped {bad_service} rows with a scheduled_service value other than yes/no");
    }

    AirportTable::from_records(records)
}

fn check_columns(mut present: impl FnMut(&str) -> bool) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !present(column) {
            return Err(LoadError::MissingColumn {
                column: column.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(file: File) -> Result<RawRows> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_columns(|col| headers.iter().any(|h| h == col))?;

    let mut raw = RawRows::default();
    for (row_no, result) in reader.deserialize::<RawAirportRow>().enumerate() {
        match result {
            Ok(row) => raw.rows.push(row),
            Err(err) if matches!(err.kind(), csv::ErrorKind::Deserialize { .. }) => {
                log::debug!("CSV row {row_no}: {err}");
                raw.malformed += 1;
            }
            Err(err) => return Err(err).with_context(|| format!("CSV row {row_no}")),
        }
    }
    Ok(raw)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON: a top-level array of flat objects.
fn read_json(file: File) -> Result<RawRows> {
    let root: JsonValue = serde_json::from_reader(BufReader::new(file)).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    if let Some(first) = records.first() {
        let obj = first.as_object().context("Row 0 is not a JSON object")?;
        check_columns(|col| obj.contains_key(col))?;
    }

    let mut raw = RawRows::default();
    for (i, rec) in records.iter().enumerate() {
        match RawAirportRow::deserialize(rec) {
            Ok(row) => raw.rows.push(row),
            Err(err) => {
                log::debug!("JSON row {i}: {err}");
                raw.malformed += 1;
            }
        }
    }
    Ok(raw)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn read_parquet(file: File) -> Result<RawRows> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    {
        let schema = builder.schema();
        check_columns(|col| schema.index_of(col).is_ok())?;
    }
    let reader = builder.build().context("building parquet reader")?;

    let mut raw = RawRows::default();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, &mut raw)?;
    }
    Ok(raw)
}

fn read_batch(batch: &RecordBatch, raw: &mut RawRows) -> Result<()> {
    let ids = typed_column(batch, "id", &DataType::Int64)?;
    let ids = ids.as_primitive::<Int64Type>();
    let lat = typed_column(batch, "latitude_deg", &DataType::Float64)?;
    let lat = lat.as_primitive::<Float64Type>();
    let lon = typed_column(batch, "longitude_deg", &DataType::Float64)?;
    let lon = lon.as_primitive::<Float64Type>();
    let elev = typed_column(batch, "elevation_ft", &DataType::Float64)?;
    let elev = elev.as_primitive::<Float64Type>();

    let names = typed_column(batch, "name", &DataType::Utf8)?;
    let names = names.as_string::<i32>();
    let kinds = typed_column(batch, "type", &DataType::Utf8)?;
    let kinds = kinds.as_string::<i32>();
    let regions = typed_column(batch, "iso_region", &DataType::Utf8)?;
    let regions = regions.as_string::<i32>();
    let towns = typed_column(batch, "municipality", &DataType::Utf8)?;
    let towns = towns.as_string::<i32>();
    let service = typed_column(batch, "scheduled_service", &DataType::Utf8)?;
    let service = service.as_string::<i32>();
    let idents = match batch.column_by_name("ident") {
        Some(col) => Some(cast(col, &DataType::Utf8).context("casting 'ident'")?),
        None => None,
    };

    for row in 0..batch.num_rows() {
        if ids.is_null(row) || lat.is_null(row) || lon.is_null(row) {
            raw.malformed += 1;
            continue;
        }
        let ident = idents.as_ref().and_then(|col| {
            let col = col.as_string::<i32>();
            (!col.is_null(row)).then(|| col.value(row).to_string())
        });
        raw.rows.push(RawAirportRow {
            id: ids.value(row),
            ident,
            name: string_at(names, row).unwrap_or_default(),
            kind: string_at(kinds, row).unwrap_or_default(),
            latitude_deg: lat.value(row),
            longitude_deg: lon.value(row),
            elevation_ft: (!elev.is_null(row)).then(|| elev.value(row)),
            iso_region: string_at(regions, row).unwrap_or_default(),
            municipality: string_at(towns, row),
            scheduled_service: string_at(service, row).unwrap_or_default(),
        });
    }
    Ok(())
}

/// Fetch a column by name and cast it to the requested type.
fn typed_column(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    let col = batch
        .column_by_name(name)
        .with_context(|| format!("Parquet batch missing '{name}' column"))?;
    cast(col, to).with_context(|| format!("casting '{name}' to {to:?}"))
}

fn string_at(arr: &arrow::array::StringArray, row: usize) -> Option<String> {
    (!arr.is_null(row)).then(|| arr.value(row).to_string())
}
