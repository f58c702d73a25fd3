use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::ExampleData;

pub type StationId = Id<Station>;

/// A physical docking location from the station registry.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: StationId,
    pub name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    /// Total number of docking ports.
    pub total_docks: u32,
    pub district: Option<String>,
    pub public: Option<bool>,
}

impl HasId for Station {
    type IdType = String;
}

impl Station {
    pub fn location(&self) -> Location {
        Location {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl ExampleData for Station {
    fn example_data() -> Self {
        Station {
            id: Id::new("A32019".to_owned()),
            name: "175 N Harvard St".to_owned(),
            latitude: 42.363796,
            longitude: -71.129164,
            total_docks: 18,
            district: Some("Boston".to_owned()),
            public: Some(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_serialize_as_lat_lon() {
        let json = serde_json::to_value(Station::example_data()).unwrap();
        assert_eq!(json["lat"], 42.363796);
        assert_eq!(json["lon"], -71.129164);
        assert_eq!(json["totalDocks"], 18);
        assert!(json.get("latitude").is_none());
    }

    #[test]
    fn missing_optional_fields_are_skipped() {
        let mut station = Station::example_data();
        station.district = None;
        station.public = None;
        let json = serde_json::to_value(station).unwrap();
        assert!(json.get("district").is_none());
        assert!(json.get("public").is_none());
    }
}
