use model::trip::{RiderClass, Trip};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{counting::value_counts, QueryError, QueryResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassCount {
    pub rider_class: RiderClass,
    pub count: usize,
}

/// Trip counts per rider class, most frequent class first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiderClassCounts {
    counts: Vec<ClassCount>,
}

impl RiderClassCounts {
    pub fn all(&self) -> &[ClassCount] {
        &self.counts
    }

    pub fn get(&self, rider_class: &RiderClass) -> Option<usize> {
        self.counts
            .iter()
            .find(|entry| entry.rider_class == *rider_class)
            .map(|entry| entry.count)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|entry| entry.count).sum()
    }

    /// The counts of the requested classes, in the order they are requested.
    /// A class that never occurs in the trip log is an error rather than a
    /// zero count.
    pub fn visible(&self, classes: &[RiderClass]) -> QueryResult<Vec<ClassCount>> {
        classes
            .iter()
            .map(|class| {
                self.get(class)
                    .map(|count| ClassCount {
                        rider_class: class.clone(),
                        count,
                    })
                    .ok_or_else(|| QueryError::UnknownRiderClass(class.clone()))
            })
            .collect()
    }
}

pub fn rider_class_counts<'a, I>(trips: I) -> RiderClassCounts
where
    I: IntoIterator<Item = &'a Trip>,
{
    let counts = value_counts(trips.into_iter().map(|trip| &trip.rider_class))
        .into_iter()
        .map(|(rider_class, count)| ClassCount {
            rider_class: rider_class.clone(),
            count,
        })
        .collect();
    RiderClassCounts { counts }
}
