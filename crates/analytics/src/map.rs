use dataset::database::StationTable;
use model::{
    station::{Location, Station, StationId},
    trip::{BikeId, Trip},
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::last_seen::{last_seen, LastSeen, Sighting};

/// Picker entry that stands for every station at once.
pub const ALL_STATIONS: &str = "All Stations";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSelection<'a> {
    All,
    Station(&'a str),
}

impl<'a> MapSelection<'a> {
    /// No selection, a blank one and `All Stations` all mean every station.
    pub fn parse(input: Option<&'a str>) -> Self {
        match input {
            None => Self::All,
            Some(name) if name.trim().is_empty() || name == ALL_STATIONS => Self::All,
            Some(name) => Self::Station(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    pub id: StationId,
    pub name: String,
    #[serde(flatten)]
    pub location: Location,
    pub total_docks: u32,
}

impl From<&Station> for MapPoint {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            name: station.name.clone(),
            location: station.location(),
            total_docks: station.total_docks,
        }
    }
}

/// Stations to plot, in registry order. `None` if a single station was asked
/// for and no station carries that name.
pub fn map_points(stations: &StationTable, selection: MapSelection) -> Option<Vec<MapPoint>> {
    let points = stations
        .iter()
        .filter(|station| match selection {
            MapSelection::All => true,
            MapSelection::Station(name) => station.name == name,
        })
        .map(MapPoint::from)
        .collect::<Vec<_>>();
    match selection {
        MapSelection::Station(_) if points.is_empty() => None,
        _ => Some(points),
    }
}

/// Where a bike was left after its most recent trip.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BikeLocation {
    pub station_id: StationId,
    /// Registry name if the station is registered, the trip log name otherwise.
    pub station_name: String,
    /// Missing if the station is not in the registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub last_usage: Sighting,
}

pub fn last_location<'a, I>(
    trips: I,
    bike_id: BikeId,
    stations: &StationTable,
) -> Option<BikeLocation>
where
    I: IntoIterator<Item = &'a Trip>,
{
    let sighting = last_seen(trips, bike_id, LastSeen::Usage)?;
    let station = stations.get(&sighting.end_station_id);
    if station.is_none() {
        log::debug!(
            "bike {} was left at unregistered station {}",
            bike_id,
            sighting.end_station_id
        );
    }
    Some(BikeLocation {
        station_id: sighting.end_station_id.clone(),
        station_name: station
            .map(|station| station.name.clone())
            .unwrap_or_else(|| sighting.end_station_name.clone()),
        location: station.map(Station::location),
        last_usage: sighting,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{station, stations, trip};

    fn registry() -> StationTable {
        stations(vec![
            station("kendall t", "Kendall/MIT", 23),
            station("central sq", "Central Square", 19),
            station("dup", "Central Square", 11),
        ])
    }

    #[test]
    fn selection_parsing() {
        assert_eq!(MapSelection::parse(None), MapSelection::All);
        assert_eq!(MapSelection::parse(Some(ALL_STATIONS)), MapSelection::All);
        assert_eq!(MapSelection::parse(Some(" ")), MapSelection::All);
        assert_eq!(
            MapSelection::parse(Some("Kendall/MIT")),
            MapSelection::Station("Kendall/MIT")
        );
    }

    #[test]
    fn all_stations_are_plotted_in_registry_order() {
        let points = map_points(&registry(), MapSelection::All).unwrap();
        assert_eq!(
            points.iter().map(|p| p.id.raw()).collect::<Vec<_>>(),
            vec!["kendall t", "central sq", "dup"]
        );
    }

    #[test]
    fn single_station_keeps_every_name_match() {
        let points = map_points(&registry(), MapSelection::Station("Central Square")).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(map_points(&registry(), MapSelection::Station("Nowhere")), None);
    }

    #[test]
    fn empty_registry_plots_nothing() {
        let points = map_points(&StationTable::default(), MapSelection::All);
        assert_eq!(points, Some(Vec::new()));
    }

    #[test]
    fn point_serializes_lat_lon_inline() {
        let points = map_points(&registry(), MapSelection::Station("Kendall/MIT")).unwrap();
        let json = serde_json::to_value(&points[0]).unwrap();
        assert_eq!(json["lat"], 42.36);
        assert_eq!(json["totalDocks"], 23);
    }

    #[test]
    fn bike_is_where_its_last_trip_ended() {
        let trips = vec![
            trip("2017-07-04 08:00:00", "Kendall T", "Central Sq", 600, 7),
            trip("2017-07-04 09:00:00", "Central Sq", "Kendall T", 600, 7),
        ];
        let location = last_location(&trips, 7, &registry()).unwrap();
        assert_eq!(location.station_name, "Kendall/MIT");
        assert!(location.location.is_some());
        assert_eq!(location.last_usage.time, "09:10:00");
    }

    #[test]
    fn unregistered_end_station_falls_back_to_trip_name() {
        let trips = vec![trip("2017-07-04 08:00:00", "Kendall T", "Davis Sq", 600, 7)];
        let location = last_location(&trips, 7, &registry()).unwrap();
        assert_eq!(location.station_name, "Davis Sq");
        assert_eq!(location.location, None);
        assert_eq!(last_location(&trips, 8, &registry()), None);
    }
}
