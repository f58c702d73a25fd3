use std::cmp::Reverse;

use dataset::database::StationTable;
use model::station::Station;

/// All registered stations ordered by dock count, largest first. Stations with
/// the same capacity keep their registry order.
pub fn rank_by_capacity(stations: &StationTable) -> Vec<&Station> {
    let mut ranked = stations.iter().collect::<Vec<_>>();
    ranked.sort_by_key(|station| Reverse(station.total_docks));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{station, stations};

    #[test]
    fn largest_first_with_stable_ties() {
        let table = stations(vec![
            station("1", "Small", 11),
            station("2", "Big", 31),
            station("3", "Medium A", 19),
            station("4", "Medium B", 19),
        ]);
        let ranked = rank_by_capacity(&table);
        assert_eq!(
            ranked.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["Big", "Medium A", "Medium B", "Small"]
        );
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].total_docks >= pair[1].total_docks));
    }

    #[test]
    fn ranking_is_a_permutation() {
        let table = stations(vec![
            station("1", "A", 15),
            station("2", "B", 15),
            station("3", "C", 23),
        ]);
        let ranked = rank_by_capacity(&table);
        assert_eq!(ranked.len(), table.len());
        let mut ids = ranked.iter().map(|s| s.id.raw()).collect::<Vec<_>>();
        ids.sort();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn empty_registry_ranks_nothing() {
        assert!(rank_by_capacity(&StationTable::default()).is_empty());
    }
}
