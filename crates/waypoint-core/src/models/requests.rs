//! Request types for creating and updating items and trips.

use jiff::civil::{Date, Time};

use super::TransportMode;
use crate::{params, rank::Rank, PlannerError};

/// Row data for inserting an item at an already computed rank.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub day_id: u64,
    pub place_id: u64,
    pub rank: Rank,
    pub scheduled_time: Option<Time>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

/// Validated scheduling changes for an existing item.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UpdateItemRequest {
    pub scheduled_time: Option<Time>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
    pub transport_to_next: Option<TransportMode>,
    pub transport_duration_minutes: Option<u32>,
}

impl TryFrom<&params::UpdateItem> for UpdateItemRequest {
    type Error = PlannerError;

    /// Convert an UpdateItem parameter into a validated request.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the time or transport mode does
    ///   not parse
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::{models::{TransportMode, UpdateItemRequest}, params::UpdateItem};
    ///
    /// let params = UpdateItem {
    ///     item_id: 1,
    ///     scheduled_time: Some("09:30".to_string()),
    ///     transport_to_next: Some("subway".to_string()),
    ///     ..Default::default()
    /// };
    ///
    /// let request = UpdateItemRequest::try_from(&params)?;
    /// assert_eq!(request.transport_to_next, Some(TransportMode::Subway));
    /// # waypoint_core::Result::<()>::Ok(())
    /// ```
    fn try_from(params: &params::UpdateItem) -> Result<Self, Self::Error> {
        let scheduled_time = params::parse_time("scheduled_time", params.scheduled_time.as_deref())?;
        let transport_to_next = params
            .transport_to_next
            .as_deref()
            .map(|raw| {
                raw.parse::<TransportMode>()
                    .map_err(|reason| PlannerError::invalid_input("transport_to_next").with_reason(reason))
            })
            .transpose()?;

        Ok(Self {
            scheduled_time,
            duration_minutes: params.duration_minutes,
            notes: params.notes.clone(),
            transport_to_next,
            transport_duration_minutes: params.transport_duration_minutes,
        })
    }
}

/// Validated changes for an existing trip.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UpdateTripRequest {
    pub name: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub archived: Option<bool>,
}

impl TryFrom<&params::UpdateTrip> for UpdateTripRequest {
    type Error = PlannerError;

    fn try_from(params: &params::UpdateTrip) -> Result<Self, Self::Error> {
        let name = match params.name.as_deref().map(str::trim) {
            Some("") => {
                return Err(PlannerError::invalid_input("name").with_reason("must not be empty"))
            }
            other => other.map(String::from),
        };

        Ok(Self {
            name,
            destination: params.destination.clone(),
            start_date: params::parse_date("start_date", params.start_date.as_deref())?,
            end_date: params::parse_date("end_date", params.end_date.as_deref())?,
            archived: params.archived,
        })
    }
}
