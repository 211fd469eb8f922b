//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{Place, SavedPlace, TripSummary};

/// Generates a newtype over `Vec<T>` with slice-like accessors and a Display
/// that prints each element or an empty-collection message.
macro_rules! collection_wrapper {
    ($(#[$meta:meta])* $name:ident, $item:ty, $empty:literal) => {
        $(#[$meta])*
        pub struct $name(pub Vec<$item>);

        impl $name {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Get the number of elements in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Get a reference to the element at the given index.
            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            /// Get an iterator over the elements.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    return writeln!(f, $empty);
                }
                for element in &self.0 {
                    write!(f, "{element}")?;
                }
                Ok(())
            }
        }
    };
}

collection_wrapper!(
    /// Newtype wrapper for displaying trip listings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::{display::TripSummaries, models::TripSummary};
    /// use jiff::Timestamp;
    ///
    /// let summary = TripSummary {
    ///     id: 1,
    ///     name: "Andalusia".to_string(),
    ///     destination: None,
    ///     start_date: None,
    ///     end_date: None,
    ///     archived: false,
    ///     created_at: Timestamp::now(),
    ///     total_days: 3,
    ///     total_items: 7,
    /// };
    /// let output = format!("{}", TripSummaries(vec![summary]));
    /// assert!(output.contains("Andalusia (ID: 1) (3 days, 7 items)"));
    /// ```
    TripSummaries,
    TripSummary,
    "No trips found."
);

collection_wrapper!(
    /// Newtype wrapper for displaying the shared place pool.
    Places,
    Place,
    "No places found."
);

collection_wrapper!(
    /// Newtype wrapper for displaying a user's saved places.
    SavedPlaces,
    SavedPlace,
    "No saved places."
);
