use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::QuoteError;
use crate::shape::{self, attribute, ShapeError};

const AVAILABILITY_HOTELS: &str = "/ArnResponse/Availability/HotelAvailability/Hotel";
const RATE_DETAIL_HOTELS: &str = "/ArnResponse/RateDetails/HotelRateDetails/Hotel";

/// Traversal level that came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Hotels,
    RatePlans,
    Rooms,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Hotels => write!(f, "hotels"),
            Level::RatePlans => write!(f, "rate plans"),
            Level::Rooms => write!(f, "rooms"),
        }
    }
}

/// Identifiers the rate detail and reservation calls are keyed by.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCodes {
    pub rate_plan_code: String,
    pub room_code: String,
    pub gateway_id: String,
}

/// The (hotel, rate plan, room) nodes picked out of a response.
#[derive(Debug, Clone, Copy)]
pub struct RoomSelection<'a> {
    pub hotel: &'a Value,
    pub rate_plan: &'a Value,
    pub room: &'a Value,
}

impl RoomSelection<'_> {
    pub fn codes(&self) -> Result<RateCodes, QuoteError> {
        Ok(RateCodes {
            rate_plan_code: required(self.rate_plan, "@Code", "RatePlan.@Code")?,
            room_code: required(self.room, "@Code", "Room.@Code")?,
            gateway_id: required(self.rate_plan, "@Gateway", "RatePlan.@Gateway")?,
        })
    }
}

fn required(node: &Value, key: &str, field: &'static str) -> Result<String, QuoteError> {
    attribute(node, key)
        .filter(|value| !value.is_empty())
        .ok_or(QuoteError::MissingField(field))
}

fn first<'a>(
    node: Option<&'a Value>,
    field: &'static str,
    level: Level,
) -> Result<&'a Value, QuoteError> {
    shape::normalize_field(node, field)?
        .into_iter()
        .next()
        .ok_or(QuoteError::NotFound(level))
}

/// Walk hotel, rate plan and room, taking the first entry offered at each
/// level. Only the branch being descended is normalized.
pub fn extract_first_room<'a>(hotels: &[&'a Value]) -> Result<RoomSelection<'a>, QuoteError> {
    let hotel = *hotels.first().ok_or(QuoteError::NotFound(Level::Hotels))?;
    let rate_plan = first(hotel.get("RatePlan"), "RatePlan", Level::RatePlans)?;
    let room = first(rate_plan.get("Room"), "Room", Level::Rooms)?;
    debug!(
        hotel = ?attribute(hotel, "@HotelID"),
        rate_plan = ?attribute(rate_plan, "@Code"),
        room = ?attribute(room, "@Code"),
        "selected first available room"
    );
    Ok(RoomSelection {
        hotel,
        rate_plan,
        room,
    })
}

/// Hotels of an availability response. Missing wrapper elements read as no
/// hotels at all.
pub fn availability_hotels(response: &Value) -> Result<Vec<&Value>, ShapeError> {
    shape::normalize_field(response.pointer(AVAILABILITY_HOTELS), "Hotel")
}

/// Hotels of a rate detail response.
pub fn rate_detail_hotels(response: &Value) -> Result<Vec<&Value>, ShapeError> {
    shape::normalize_field(response.pointer(RATE_DETAIL_HOTELS), "Hotel")
}
