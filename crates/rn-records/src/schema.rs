//! Record and configuration schema definitions.

use std::collections::BTreeMap;

use rn_core::Real;
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the station table.
///
/// Numeric columns are lenient: a malformed latitude/longitude deserializes
/// to `None` instead of failing the row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationRecord {
    #[serde(rename = "station_id", deserialize_with = "non_empty")]
    pub id: String,
    #[serde(rename = "station_name", default)]
    pub name: Option<String>,
    #[serde(rename = "province", alias = "region", default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub latitude: Option<Real>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub longitude: Option<Real>,
    /// Snapshot year of the row, as written in the source.
    #[serde(default)]
    pub year: Option<String>,
}

impl StationRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            region: None,
            latitude: None,
            longitude: None,
            year: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_coords(mut self, latitude: Real, longitude: Real) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }
}

/// One row of the track table. Endpoints are station *names*, not ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackRecord {
    #[serde(rename = "start_station", default)]
    pub source_name: Option<String>,
    #[serde(rename = "end_station", default)]
    pub target_name: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub length: Option<Real>,
    #[serde(rename = "type", default)]
    pub category: String,
    /// Year exactly as written in the source; also the snapshot year when
    /// the table holds several yearly snapshots.
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub edge_id: Option<String>,
}

impl TrackRecord {
    pub fn new(
        source_name: impl Into<String>,
        target_name: impl Into<String>,
        length: Real,
        category: impl Into<String>,
    ) -> Self {
        Self {
            source_name: Some(source_name.into()),
            target_name: Some(target_name.into()),
            length: Some(length),
            category: category.into(),
            year: None,
            edge_id: None,
        }
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_edge_id(mut self, edge_id: impl Into<String>) -> Self {
        self.edge_id = Some(edge_id.into());
        self
    }
}

/// One row of the reference gazetteer (a city and the region it lies in).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GazetteerRecord {
    #[serde(rename = "Name EN", alias = "name", deserialize_with = "non_empty")]
    pub name: String,
    #[serde(rename = "Province", alias = "category", default)]
    pub category: String,
    #[serde(rename = "Lat", alias = "latitude", default, deserialize_with = "csv::invalid_option")]
    pub latitude: Option<Real>,
    #[serde(rename = "Long", alias = "longitude", default, deserialize_with = "csv::invalid_option")]
    pub longitude: Option<Real>,
}

impl GazetteerRecord {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        latitude: Real,
        longitude: Real,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }
}

/// Identifiers must carry content; a blank id fails the row.
fn non_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    let s = String::deserialize(de)?;
    if s.trim().is_empty() {
        return Err(serde::de::Error::custom("empty identifier"));
    }
    Ok(s)
}

/// Run configuration, loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub canonical: CanonicalConfig,
    #[serde(default)]
    pub track_types: TrackTypeTable,
    #[serde(default)]
    pub region_labels: RegionLabels,
    #[serde(default = "default_rail_filter")]
    pub rail_filter: String,
    #[serde(default = "default_gazetteer_delimiter")]
    pub gazetteer_delimiter: char,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            canonical: CanonicalConfig::default(),
            track_types: TrackTypeTable::default(),
            region_labels: RegionLabels::default(),
            rail_filter: default_rail_filter(),
            gazetteer_delimiter: default_gazetteer_delimiter(),
        }
    }
}

fn default_version() -> u32 {
    crate::LATEST_VERSION
}

fn default_rail_filter() -> String {
    "rail".to_string()
}

fn default_gazetteer_delimiter() -> char {
    ';'
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalConfig {
    #[serde(default = "default_strip_chars")]
    pub strip_chars: String,
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            strip_chars: default_strip_chars(),
        }
    }
}

fn default_strip_chars() -> String {
    rn_names::DEFAULT_STRIP_CHARS.to_string()
}

/// Fixed standardization of raw track type labels.
///
/// Types absent from the table pass through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TrackTypeTable(pub BTreeMap<String, String>);

impl Default for TrackTypeTable {
    fn default() -> Self {
        Self(
            [
                ("rail_both", "rail_both"),
                ("rail_good", "rail_good"),
                ("rail pass", "rail_pass"),
                ("road", "road"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        )
    }
}

impl TrackTypeTable {
    pub fn standardize(&self, raw: &str) -> String {
        self.0
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }
}

/// Display labels for gazetteer categories (e.g. `HEBEI` → `河北省`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RegionLabels(pub BTreeMap<String, String>);

impl RegionLabels {
    /// Label for a category; unmapped categories are returned unchanged.
    pub fn label<'a>(&'a self, category: &'a str) -> &'a str {
        self.0.get(category).map(String::as_str).unwrap_or(category)
    }
}
