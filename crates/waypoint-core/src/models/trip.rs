//! Trip model definition.

use jiff::{civil::Date, Span, Timestamp};
use serde::{Deserialize, Serialize};

use super::Day;

/// A trip owned by a single user, made of numbered days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: u64,

    /// Owner of the trip
    pub user_id: u64,

    pub name: String,

    pub destination: Option<String>,

    /// First day of the trip; day dates are derived from it when present
    pub start_date: Option<Date>,

    pub end_date: Option<Date>,

    /// Archived trips are hidden from the default listing
    #[serde(default)]
    pub archived: bool,

    /// Timestamp when the trip was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the trip was last modified (UTC)
    pub updated_at: Timestamp,

    /// Days ordered by day number (loaded with trip details)
    #[serde(default)]
    pub days: Vec<Day>,
}

impl Trip {
    /// Date a day with `day_number` falls on, when the trip has a start date.
    pub fn date_for_day(&self, day_number: i64) -> crate::Result<Option<Date>> {
        date_for_day(self.start_date, day_number)
    }

    /// Looks up a loaded day by its number.
    pub fn day(&self, day_number: i64) -> Option<&Day> {
        self.days.iter().find(|day| day.day_number == day_number)
    }
}

/// `start_date + (day_number - 1)` days, if a start date is known.
pub fn date_for_day(start_date: Option<Date>, day_number: i64) -> crate::Result<Option<Date>> {
    match start_date {
        Some(start) => {
            let offset = Span::new().try_days(day_number - 1)?;
            Ok(Some(start.checked_add(offset)?))
        }
        None => Ok(None),
    }
}
