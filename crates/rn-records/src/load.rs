//! CSV loaders for station, track and gazetteer tables.
//!
//! Header validation is strict (a missing required column fails the whole
//! table); row handling is lenient (a row that cannot be deserialized is
//! skipped and counted).

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::schema::{GazetteerRecord, StationRecord, TrackRecord};
use crate::{RecordsError, RecordsResult};

/// Records read from one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    /// Rows that failed to deserialize (e.g. a missing station id).
    pub skipped_rows: usize,
}

const STATION_COLUMNS: &[&[&str]] = &[&["station_id"], &["station_name"]];
const TRACK_COLUMNS: &[&[&str]] = &[&["start_station"], &["end_station"], &["type"]];
const GAZETTEER_COLUMNS: &[&[&str]] = &[
    &["Name EN", "name"],
    &["Province", "category"],
    &["Lat", "latitude"],
    &["Long", "longitude"],
];

pub fn read_stations<R: Read>(reader: R) -> RecordsResult<Loaded<StationRecord>> {
    read_table(csv_reader(reader, b','), "stations", STATION_COLUMNS)
}

pub fn read_tracks<R: Read>(reader: R) -> RecordsResult<Loaded<TrackRecord>> {
    read_table(csv_reader(reader, b','), "tracks", TRACK_COLUMNS)
}

pub fn read_gazetteer<R: Read>(reader: R, delimiter: u8) -> RecordsResult<Loaded<GazetteerRecord>> {
    read_table(csv_reader(reader, delimiter), "gazetteer", GAZETTEER_COLUMNS)
}

pub fn load_stations(path: &Path) -> RecordsResult<Loaded<StationRecord>> {
    read_stations(open(path)?)
}

pub fn load_tracks(path: &Path) -> RecordsResult<Loaded<TrackRecord>> {
    read_tracks(open(path)?)
}

pub fn load_gazetteer(path: &Path, delimiter: u8) -> RecordsResult<Loaded<GazetteerRecord>> {
    read_gazetteer(open(path)?, delimiter)
}

/// Write station records as CSV with the same columns the loader reads.
pub fn write_stations<W: Write>(writer: W, stations: &[StationRecord]) -> RecordsResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    for station in stations {
        out.serialize(station)?;
    }
    out.flush()?;
    Ok(())
}

pub fn save_stations(path: &Path, stations: &[StationRecord]) -> RecordsResult<()> {
    let file = File::create(path)?;
    write_stations(file, stations)?;
    info!(path = %path.display(), rows = stations.len(), "stations written");
    Ok(())
}

fn open(path: &Path) -> RecordsResult<File> {
    info!(path = %path.display(), "reading table");
    File::open(path).map_err(|source| RecordsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R, delimiter: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

fn read_table<R: Read, T: DeserializeOwned>(
    mut reader: csv::Reader<R>,
    table: &'static str,
    required: &[&[&str]],
) -> RecordsResult<Loaded<T>> {
    let headers = reader.headers()?.clone();
    for alternatives in required {
        if !alternatives.iter().any(|col| headers.iter().any(|h| h == *col)) {
            return Err(RecordsError::MissingColumn {
                table,
                column: alternatives[0].to_string(),
            });
        }
    }

    let mut records = Vec::new();
    let mut skipped_rows = 0;
    for (row, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(err) => {
                debug!(table, row = row + 1, error = %err, "skipping malformed row");
                skipped_rows += 1;
            }
        }
    }

    if skipped_rows > 0 {
        warn!(table, skipped_rows, "malformed rows skipped");
    }
    info!(table, rows = records.len(), "table loaded");

    Ok(Loaded {
        records,
        skipped_rows,
    })
}
