use std::fmt::Debug;
use std::hash::Hash;
use std::io::Read;

use indexmap::{map::Entry, IndexMap};
use model::station::{Station, StationId};
use model::trip::Trip;
use serde::de::DeserializeOwned;

pub trait WithPrimaryKey<K> {
    fn primary_key(&self) -> K;
}

/// Deserializes every row of a CSV source with headers. Fails on the first
/// malformed row.
pub fn read_csv<V, R>(reader: R) -> Result<Vec<V>, csv::Error>
where
    V: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let mut rows = vec![];
    for row in csv_reader.deserialize() {
        let value: V = row?;
        rows.push(value);
    }
    Ok(rows)
}

/// Rows addressed by a primary key. Iteration follows insertion order, so the
/// table remembers the order of its source file.
#[derive(Debug, Clone)]
pub struct InMemoryPrimaryKeyTable<K, V> {
    map: IndexMap<K, V>,
}

impl<K, V> InMemoryPrimaryKeyTable<K, V>
where
    K: Eq + Hash + Debug,
    V: WithPrimaryKey<K>,
{
    pub fn new() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }

    pub fn from_rows(rows: Vec<V>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.insert(row);
        }
        table
    }

    /// Inserts a row unless its key is taken. The first row for a key wins.
    pub fn insert(&mut self, value: V) {
        match self.map.entry(value.primary_key()) {
            Entry::Occupied(entry) => {
                log::warn!("ignoring duplicate row with key: {:?}", entry.key());
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.map.values()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K, V> Default for InMemoryPrimaryKeyTable<K, V>
where
    K: Eq + Hash + Debug,
    V: WithPrimaryKey<K>,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Rows without a key. Duplicates are kept and the source order is preserved.
#[derive(Debug, Clone)]
pub struct InMemoryTable<V> {
    rows: Vec<V>,
}

impl<V> Default for InMemoryTable<V> {
    fn default() -> Self {
        Self { rows: vec![] }
    }
}

impl<V> InMemoryTable<V> {
    pub fn from_rows(rows: Vec<V>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[V] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub type StationTable = InMemoryPrimaryKeyTable<StationId, Station>;
pub type TripTable = InMemoryTable<Trip>;

#[cfg(test)]
mod tests {
    use model::ExampleData;
    use utility::id::Id;

    use super::*;

    fn station(id: &str, name: &str) -> Station {
        Station {
            id: Id::new(id.to_owned()),
            name: name.to_owned(),
            ..Station::example_data()
        }
    }

    #[test]
    fn first_row_wins_on_duplicate_key() {
        let table = StationTable::from_rows(vec![
            station("1", "First"),
            station("2", "Second"),
            station("1", "Shadowed"),
        ]);
        assert_eq!(table.len(), 2);
        let first = table.get(&Id::new("1".to_owned())).unwrap();
        assert_eq!(first.name, "First");
    }

    #[test]
    fn keeps_source_order() {
        let table = StationTable::from_rows(vec![
            station("9", "Nine"),
            station("3", "Three"),
            station("5", "Five"),
        ]);
        let names = table.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Nine", "Three", "Five"]);
    }
}
