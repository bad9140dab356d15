use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    High,
    Medium,
    Low,
    Unavailable,
}

/// Vendor capacity on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub available: u32,
    pub booked: u32,
    pub status: AvailabilityStatus,
}

impl DayAvailability {
    pub const UNAVAILABLE: Self = Self {
        available: 0,
        booked: 0,
        status: AvailabilityStatus::Unavailable,
    };

    pub fn is_bookable(&self) -> bool {
        self.status != AvailabilityStatus::Unavailable
    }
}

/// Per-day vendor availability. Days with no entry are unavailable.
///
/// Serialized as a map from ISO date to [`DayAvailability`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityCalendar {
    days: BTreeMap<NaiveDate, DayAvailability>,
}

impl AvailabilityCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        date: NaiveDate,
        day: DayAvailability,
    ) {
        self.days.insert(date, day);
    }

    pub fn status(
        &self,
        date: NaiveDate,
    ) -> DayAvailability {
        self.days
            .get(&date)
            .copied()
            .unwrap_or(DayAvailability::UNAVAILABLE)
    }

    pub fn is_bookable(
        &self,
        date: NaiveDate,
    ) -> bool {
        self.status(date).is_bookable()
    }
}

impl FromIterator<(NaiveDate, DayAvailability)> for AvailabilityCalendar {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, DayAvailability)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}
