use std::{collections::HashMap, fmt::Display};

use dataset::database::StationTable;

/// Label used for station ids that are not in the registry. Consumers compare
/// against it verbatim to detect unresolved stations.
pub const UNKNOWN_STATION: &str = "Unknown Station";

/// Brings a station id into the representation used for lookups. Ids are
/// compared as plain strings: no trimming, so `"4"` and `" 4"` stay distinct.
pub fn normalize_station_id<T: Display + ?Sized>(id: &T) -> String {
    id.to_string()
}

/// Station id to name lookup built from the registry.
#[derive(Debug, Clone, Default)]
pub struct StationNameIndex {
    names: HashMap<String, String>,
}

impl StationNameIndex {
    pub fn new(stations: &StationTable) -> Self {
        let names = stations
            .iter()
            .map(|station| (normalize_station_id(&station.id), station.name.clone()))
            .collect();
        Self { names }
    }

    /// Name of the station, or `UNKNOWN_STATION` if the id is not registered.
    pub fn resolve<T: Display + ?Sized>(&self, id: &T) -> &str {
        self.names
            .get(&normalize_station_id(id))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_STATION)
    }

    pub fn resolve_all<'a, I, T>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a T>,
        T: Display + ?Sized + 'a,
    {
        ids.into_iter()
            .map(|id| self.resolve(id).to_owned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
