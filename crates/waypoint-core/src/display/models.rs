//! Display implementations for domain models.
//!
//! Everything renders as markdown: a trip is a `#` heading, its days are `##`
//! headings and items are `###` headings listed in rank order.

use std::fmt;

use super::datetime::{ClockTime, LocalDateTime};
use crate::models::{Day, Item, Place, SavedPlace, TransportMode, Trip, TripSummary, User};

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.username)?;
        writeln!(f)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        if let Some(destination) = &self.destination {
            writeln!(f, "- Destination: {destination}")?;
        }
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => writeln!(f, "- Dates: {start} to {end}")?,
            (Some(start), None) => writeln!(f, "- Starts: {start}")?,
            (None, Some(end)) => writeln!(f, "- Ends: {end}")?,
            (None, None) => {}
        }
        if self.archived {
            writeln!(f, "- Archived")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if self.days.is_empty() {
            writeln!(f, "\nNo days in this trip.")?;
        } else {
            for day in &self.days {
                writeln!(f)?;
                write!(f, "{day}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date {
            Some(date) => writeln!(f, "## Day {} ({date}, ID: {})", self.day_number, self.id)?,
            None => writeln!(f, "## Day {} (ID: {})", self.day_number, self.id)?,
        }
        writeln!(f)?;

        if let Some(notes) = &self.notes {
            writeln!(f, "{notes}")?;
            writeln!(f)?;
        }

        if self.items.is_empty() {
            writeln!(f, "Nothing planned.")?;
        }
        for item in &self.items {
            write!(f, "{item}")?;
        }

        Ok(())
    }
}

impl Item {
    fn fmt_item(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scheduled_time {
            Some(time) => writeln!(
                f,
                "### {}. {} place {}",
                self.id,
                ClockTime(time),
                self.place_id
            )?,
            None => writeln!(f, "### {}. Place {}", self.id, self.place_id)?,
        }
        writeln!(f)?;
        writeln!(f, "- Rank: {}", self.rank)?;

        if let Some(minutes) = self.duration_minutes {
            writeln!(f, "- Duration: {minutes} min")?;
        }
        if let Some(mode) = self.transport_to_next {
            match self.transport_duration_minutes {
                Some(minutes) => writeln!(f, "- Next: {mode}, {minutes} min")?,
                None => writeln!(f, "- Next: {mode}")?,
            }
        }
        writeln!(f)?;

        if let Some(notes) = &self.notes {
            writeln!(f, "{notes}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_item(f)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        if let Some(place_type) = &self.place_type {
            writeln!(f, "- **Type**: {place_type}")?;
        }
        if let Some(address) = &self.address {
            writeln!(f, "- **Address**: {address}")?;
        }
        if let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) {
            writeln!(f, "- **Location**: {latitude:.5}, {longitude:.5}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for SavedPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_placed { "✓" } else { "○" };
        writeln!(f, "## {marker} {} (place {})", self.place_name, self.place_id)?;
        writeln!(f)?;

        match self.current_item_id {
            Some(item_id) => writeln!(f, "- **Scheduled as item**: {item_id}")?,
            None => writeln!(f, "- **Not scheduled**")?,
        }
        if let Some(notes) = &self.notes {
            writeln!(f, "- **Notes**: {notes}")?;
        }
        writeln!(f, "- **Saved**: {}", LocalDateTime(&self.saved_at))?;
        writeln!(f)
    }
}

impl fmt::Display for TripSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) ({} days, {} items)",
            self.name, self.id, self.total_days, self.total_items
        )?;
        writeln!(f)?;

        if let Some(destination) = &self.destination {
            writeln!(f, "- **Destination**: {destination}")?;
        }
        if let Some(start) = self.start_date {
            writeln!(f, "- **Starts**: {start}")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use jiff::{
        civil::{date, time},
        Timestamp,
    };

    use super::*;
    use crate::rank::Rank;

    fn sample_item() -> Item {
        Item {
            id: 4,
            day_id: 2,
            place_id: 9,
            rank: Rank::ONE,
            scheduled_time: Some(time(10, 30, 0, 0)),
            duration_minutes: Some(90),
            notes: Some("book ahead".to_string()),
            transport_to_next: Some(TransportMode::Walk),
            transport_duration_minutes: Some(15),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn item_shows_schedule_and_transport() {
        let output = sample_item().to_string();
        assert!(output.starts_with("### 4. 10:30 place 9"));
        assert!(output.contains("- Rank: 1.0"));
        assert!(output.contains("- Duration: 90 min"));
        assert!(output.contains("- Next: walk, 15 min"));
        assert!(output.contains("book ahead"));
    }

    #[test]
    fn trip_lists_days_in_order() {
        let trip = Trip {
            id: 1,
            user_id: 1,
            name: "Andalusia".to_string(),
            destination: Some("Spain".to_string()),
            start_date: Some(date(2025, 9, 1)),
            end_date: None,
            archived: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            days: vec![
                Day {
                    id: 2,
                    trip_id: 1,
                    day_number: 1,
                    date: Some(date(2025, 9, 1)),
                    notes: None,
                    items: vec![sample_item()],
                },
                Day {
                    id: 3,
                    trip_id: 1,
                    day_number: 2,
                    date: None,
                    notes: Some("rest".to_string()),
                    items: vec![],
                },
            ],
        };

        let output = trip.to_string();
        assert!(output.starts_with("# 1. Andalusia"));
        assert!(output.contains("- Starts: 2025-09-01"));
        let first = output.find("## Day 1 (2025-09-01, ID: 2)").unwrap();
        let second = output.find("## Day 2 (ID: 3)").unwrap();
        assert!(first < second);
        assert!(output.contains("Nothing planned."));
    }

    #[test]
    fn saved_place_marks_placement() {
        let mut saved = SavedPlace {
            id: 1,
            user_id: 1,
            place_id: 9,
            place_name: "Mezquita".to_string(),
            notes: None,
            is_placed: true,
            current_item_id: Some(4),
            saved_at: Timestamp::UNIX_EPOCH,
        };
        assert!(saved.to_string().contains("## ✓ Mezquita"));
        assert!(saved.to_string().contains("Scheduled as item**: 4"));

        saved.is_placed = false;
        saved.current_item_id = None;
        assert!(saved.to_string().contains("## ○ Mezquita"));
        assert!(saved.to_string().contains("Not scheduled"));
    }
}
