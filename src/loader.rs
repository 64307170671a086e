use crate::error::{Result, TripError};
use crate::types::{Dataset, RawRow, TripRecord, REQUIRED_COLUMNS};
use crate::util::{parse_bool_safe, parse_f64_safe, parse_timestamp_safe, parse_year_safe};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Load the trip table from a CSV export.
///
/// The header is checked against [`REQUIRED_COLUMNS`] before any row is read,
/// then every row is parsed into a [`TripRecord`]. The first invalid value
/// aborts the load; there is no partial dataset.
pub fn load_trips(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TripError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(file);

    let headers = rdr.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TripError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        });
    }

    let mut records = Vec::new();
    let mut raw = StringRecord::new();
    while rdr.read_record(&mut raw)? {
        // Line the record starts on; quoted fields may span several.
        let line = raw.position().map_or(0, |p| p.line());
        let row: RawRow = raw.deserialize(Some(&headers))?;
        records.push(clean_row(row, line)?);
    }

    let dataset = Dataset::new(records, path);
    info!(
        path = %path.display(),
        rows = dataset.len(),
        cities = dataset.cities().len(),
        fleets = dataset.fleets().len(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn invalid(line: u64, column: &'static str, value: Option<&str>) -> TripError {
    TripError::InvalidValue {
        line,
        column,
        value: value.unwrap_or_default().to_string(),
    }
}

fn required_text(line: u64, column: &'static str, value: Option<String>) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        other => Err(invalid(line, column, other)),
    }
}

fn clean_row(row: RawRow, line: u64) -> Result<TripRecord> {
    let distance = match parse_f64_safe(row.distance.as_deref()) {
        Some(d) if d >= 0.0 => d,
        _ => return Err(invalid(line, "Distancia", row.distance.as_deref())),
    };
    let trip_cost = parse_f64_safe(row.trip_cost.as_deref())
        .ok_or_else(|| invalid(line, "trip_cost", row.trip_cost.as_deref()))?;
    let vehicle_year = parse_year_safe(row.vehicle_year.as_deref())
        .ok_or_else(|| invalid(line, "Año del vehiculo", row.vehicle_year.as_deref()))?;
    let completed = parse_bool_safe(row.completed.as_deref())
        .ok_or_else(|| invalid(line, "completed", row.completed.as_deref()))?;
    let timestamp = parse_timestamp_safe(row.date.as_deref())
        .ok_or_else(|| invalid(line, "date", row.date.as_deref()))?;

    let record = TripRecord {
        city: required_text(line, "city", row.city)?,
        fleet: required_text(line, "fleet", row.fleet)?,
        distance,
        trip_cost,
        vehicle_year,
        completed,
        user_id: required_text(line, "user_id", row.user_id)?,
        timestamp,
    };
    debug!(line, user = %record.user_id, "parsed trip");
    Ok(record)
}
