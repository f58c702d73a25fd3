use std::env;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use data_model::{stations::StationRecord, trips::TripRecord};
use database::{read_csv, StationTable, TripTable};
use model::{station::Station, trip::Trip};
use utility::let_also::LetAlso;

pub mod data_model;
pub mod database;

pub const DEFAULT_STATIONS_PATH: &str = "resources/current_bluebike_stations.csv";
pub const DEFAULT_TRIPS_PATH: &str = "resources/hubway-tripdata.csv";

/// Locations of the two CSV sources.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub stations: PathBuf,
    pub trips: PathBuf,
}

impl DatasetPaths {
    pub fn new<S: Into<PathBuf>, T: Into<PathBuf>>(stations: S, trips: T) -> Self {
        Self {
            stations: stations.into(),
            trips: trips.into(),
        }
    }

    /// Reads `BIKESHARE_STATIONS_CSV` and `BIKESHARE_TRIPS_CSV`, falling back to
    /// the files below `resources/`.
    pub fn from_env() -> Self {
        let stations = env::var("BIKESHARE_STATIONS_CSV")
            .unwrap_or_else(|_| DEFAULT_STATIONS_PATH.to_owned());
        let trips = env::var("BIKESHARE_TRIPS_CSV")
            .unwrap_or_else(|_| DEFAULT_TRIPS_PATH.to_owned());
        Self::new(stations, trips)
    }
}

#[derive(Debug)]
pub enum LoadError {
    /// A source file is missing or unreadable.
    Open { path: PathBuf, why: io::Error },
    /// A source file is readable but one of its rows is malformed.
    Parse { table: &'static str, why: csv::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, why } => {
                write!(f, "could not open {}: {}", path.display(), why)
            }
            Self::Parse { table, why } => {
                write!(f, "malformed {}: {}", table, why)
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { why, .. } => Some(why),
            Self::Parse { why, .. } => Some(why),
        }
    }
}

/// Station registry and trip log, loaded once and never mutated afterwards.
/// Share it behind an `Arc` instead of loading it again.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub stations: StationTable,
    pub trips: TripTable,
}

impl Dataset {
    pub fn load(paths: &DatasetPaths) -> Result<Self, LoadError> {
        log::info!(
            "loading station registry from {}...",
            paths.stations.display()
        );
        let stations = read_stations(open(&paths.stations)?)?;
        log::info!("loading trip log from {}...", paths.trips.display());
        let trips = read_trips(open(&paths.trips)?)?;
        Ok(Self::new(stations, trips))
    }

    pub fn from_readers<S: Read, T: Read>(
        stations: S,
        trips: T,
    ) -> Result<Self, LoadError> {
        Ok(Self::new(read_stations(stations)?, read_trips(trips)?))
    }

    fn new(stations: StationTable, trips: TripTable) -> Self {
        Self { stations, trips }.also(|dataset| {
            log::info!(
                "dataset ready: {} stations, {} trips",
                dataset.stations.len(),
                dataset.trips.len()
            )
        })
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|why| LoadError::Open {
        path: path.to_owned(),
        why,
    })
}

fn read_stations<R: Read>(reader: R) -> Result<StationTable, LoadError> {
    let records = read_csv::<StationRecord, _>(reader).map_err(|why| LoadError::Parse {
        table: "station registry",
        why,
    })?;
    Ok(records
        .into_iter()
        .map(Station::from)
        .collect::<Vec<_>>()
        .let_owned(StationTable::from_rows))
}

fn read_trips<R: Read>(reader: R) -> Result<TripTable, LoadError> {
    let records = read_csv::<TripRecord, _>(reader).map_err(|why| LoadError::Parse {
        table: "trip log",
        why,
    })?;
    Ok(records
        .into_iter()
        .map(Trip::from)
        .collect::<Vec<_>>()
        .let_owned(TripTable::from_rows))
}

#[cfg(test)]
mod tests {
    use model::trip::RiderClass;
    use utility::id::Id;

    use super::*;

    const STATIONS: &str = "\
Number,Name,Latitude,Longitude,District,Public,Total docks
A32019,175 N Harvard St,42.363796,-71.129164,Boston,Yes,18
67,MIT at Mass Ave / Amherst St,42.3581,-71.093198,Cambridge,Yes,27
";

    const TRIPS: &str = "\
tripduration,starttime,stoptime,start station id,start station name,start station latitude,start station longitude,end station id,end station name,end station latitude,end station longitude,bikeid,usertype,birth year,gender
3725,2017-07-04 08:15:00,2017-07-04 09:17:05,67,MIT at Mass Ave / Amherst St,42.3581,-71.093198,A32019,175 N Harvard St,42.363796,-71.129164,1492,Subscriber,1990,1
300,2017-07-04 10:00:00.1230,2017-07-04 10:05:00.4560,999,Gone Station,0,0,67,MIT at Mass Ave / Amherst St,42.3581,-71.093198,7,Customer,\\N,0
";

    #[test]
    fn loads_both_tables() {
        let dataset = Dataset::from_readers(STATIONS.as_bytes(), TRIPS.as_bytes()).unwrap();
        assert_eq!(dataset.stations.len(), 2);
        assert_eq!(dataset.trips.len(), 2);

        let harvard = dataset
            .stations
            .get(&Id::new("A32019".to_owned()))
            .unwrap();
        assert_eq!(harvard.name, "175 N Harvard St");
        assert_eq!(harvard.total_docks, 18);
        assert_eq!(harvard.public, Some(true));

        let trip = &dataset.trips.rows()[1];
        assert_eq!(trip.bike_id, 7);
        assert_eq!(trip.rider_class, RiderClass::Customer);
        assert_eq!(trip.start_station_id.raw_ref::<str>(), "999");
        assert_eq!(trip.duration_secs, 300);
    }

    #[test]
    fn optional_registry_columns_may_be_absent() {
        let stations = "Number,Name,Latitude,Longitude,Total docks\n1,Kendall T,42.36,-71.08,15\n";
        let dataset = Dataset::from_readers(stations.as_bytes(), TRIPS.as_bytes()).unwrap();
        let station = dataset.stations.iter().next().unwrap();
        assert_eq!(station.district, None);
        assert_eq!(station.public, None);
    }

    #[test]
    fn malformed_timestamp_fails_the_load() {
        let trips = TRIPS.replace("2017-07-04 08:15:00", "07/04/2017 8:15");
        let error = Dataset::from_readers(STATIONS.as_bytes(), trips.as_bytes()).unwrap_err();
        assert!(matches!(
            error,
            LoadError::Parse {
                table: "trip log",
                ..
            }
        ));
    }

    #[test]
    fn non_integer_bike_id_fails_the_load() {
        let trips = TRIPS.replace(",1492,", ",bike-1492,");
        let error = Dataset::from_readers(STATIONS.as_bytes(), trips.as_bytes()).unwrap_err();
        assert!(error.to_string().starts_with("malformed trip log"));
    }

    #[test]
    fn missing_file_fails_the_load() {
        let paths = DatasetPaths::new("does/not/exist.csv", "does/not/exist.csv");
        let error = Dataset::load(&paths).unwrap_err();
        assert!(matches!(error, LoadError::Open { .. }));
        assert!(error.to_string().contains("does/not/exist.csv"));
    }
}
