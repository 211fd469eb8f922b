//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create,
//! update and delete operations with consistent messaging and resource
//! display.

use std::fmt;

use crate::models::{Day, Item, Place, SavedPlace, Trip, User};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{display::CreateResult, models::User};
/// use jiff::Timestamp;
///
/// let user = User {
///     id: 1,
///     username: "ana".to_string(),
///     created_at: Timestamp::now(),
/// };
/// println!("{}", CreateResult::new(user));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// The wrapper can track and display specific changes made during the
/// update.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

/// Implements the create and update wrappers for a resource with an `id`.
macro_rules! impl_result_display {
    ($($ty:ty => $label:literal),+ $(,)?) => {
        $(
            impl fmt::Display for CreateResult<$ty> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    writeln!(f, concat!("Created ", $label, " with ID: {}"), self.resource.id)?;
                    writeln!(f)?;
                    write!(f, "{}", self.resource)
                }
            }

            impl fmt::Display for UpdateResult<$ty> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    writeln!(f, concat!("Updated ", $label, " with ID: {}"), self.resource.id)?;
                    write_changes(f, &self.changes)?;
                    writeln!(f)?;
                    write!(f, "{}", self.resource)
                }
            }
        )+
    };
}

impl_result_display! {
    User => "user",
    Trip => "trip",
    Day => "day",
    Item => "item",
    Place => "place",
    SavedPlace => "saved place",
}

fn write_changes(f: &mut fmt::Formatter<'_>, changes: &[String]) -> fmt::Result {
    if changes.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "Changes made:")?;
    for change in changes {
        writeln!(f, "- {change}")?;
    }
    Ok(())
}

impl fmt::Display for DeleteResult<SavedPlace> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed '{}' (place {}) from saved places",
            self.resource.place_name, self.resource.place_id
        )
    }
}

impl fmt::Display for DeleteResult<Item> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted item {} (place {}) from day {}",
            self.resource.id, self.resource.place_id, self.resource.day_id
        )
    }
}

impl fmt::Display for DeleteResult<Day> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted day {} (ID: {}) and {} item(s)",
            self.resource.day_number,
            self.resource.id,
            self.resource.items.len()
        )
    }
}

impl fmt::Display for DeleteResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: usize = self.resource.days.iter().map(|day| day.items.len()).sum();
        writeln!(
            f,
            "Deleted trip '{}' (ID: {}) with {} day(s) and {items} item(s)",
            self.resource.name,
            self.resource.id,
            self.resource.days.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::rank::Rank;

    fn sample_item() -> Item {
        Item {
            id: 3,
            day_id: 2,
            place_id: 8,
            rank: Rank::ONE,
            scheduled_time: None,
            duration_minutes: None,
            notes: None,
            transport_to_next: None,
            transport_duration_minutes: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn update_result_lists_changes() {
        let result = UpdateResult::with_changes(
            sample_item(),
            vec!["Set duration to 45 min".to_string()],
        );
        let output = result.to_string();
        assert!(output.starts_with("Updated item with ID: 3"));
        assert!(output.contains("Changes made:\n- Set duration to 45 min"));
        assert!(output.contains("### 3. Place 8"));
    }

    #[test]
    fn update_result_without_changes_has_no_change_block() {
        let output = UpdateResult::new(sample_item()).to_string();
        assert!(!output.contains("Changes made:"));
    }

    #[test]
    fn delete_result_names_the_day() {
        let day = Day {
            id: 5,
            trip_id: 1,
            day_number: 2,
            date: None,
            notes: None,
            items: vec![sample_item()],
        };
        assert_eq!(
            DeleteResult::new(day).to_string(),
            "Deleted day 2 (ID: 5) and 1 item(s)\n"
        );
    }

    #[test]
    fn delete_result_counts_trip_contents() {
        let day = |id, day_number, items| Day {
            id,
            trip_id: 1,
            day_number,
            date: None,
            notes: None,
            items,
        };
        let trip = Trip {
            id: 1,
            user_id: 1,
            name: "Azores".to_string(),
            destination: None,
            start_date: None,
            end_date: None,
            archived: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            days: vec![day(4, 1, vec![sample_item(), sample_item()]), day(5, 2, vec![])],
        };
        assert_eq!(
            DeleteResult::new(trip).to_string(),
            "Deleted trip 'Azores' (ID: 1) with 2 day(s) and 2 item(s)\n"
        );
    }
}
