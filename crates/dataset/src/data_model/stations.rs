use model::station::{Station, StationId};
use serde::Deserialize;
use utility::id::Id;

use crate::database::WithPrimaryKey;

use super::{IdString, Latitude, Longitude};

/// One row of the station registry.
/// Primary Key: `Number`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    /// Unique Primary Key.
    #[serde(rename = "Number")]
    pub number: IdString,

    /// Rider-facing name of the station.
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Latitude")]
    pub latitude: Latitude,

    #[serde(rename = "Longitude")]
    pub longitude: Longitude,

    /// Municipality the station belongs to. Not present in every export.
    #[serde(rename = "District", default)]
    pub district: Option<String>,

    /// Whether the station is open to the public. Not present in every export.
    #[serde(
        rename = "Public",
        default,
        deserialize_with = "utility::serde::yes_no::deserialize_option"
    )]
    pub public: Option<bool>,

    /// Total number of docking ports.
    #[serde(rename = "Total docks")]
    pub total_docks: u32,
}

impl WithPrimaryKey<StationId> for Station {
    fn primary_key(&self) -> StationId {
        self.id.clone()
    }
}

impl From<StationRecord> for Station {
    fn from(record: StationRecord) -> Self {
        Station {
            id: Id::new(record.number),
            name: record.name,
            latitude: record.latitude,
            longitude: record.longitude,
            total_docks: record.total_docks,
            district: record.district.filter(|district| !district.is_empty()),
            public: record.public,
        }
    }
}
