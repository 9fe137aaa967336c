use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::{
    constants::PLACEHOLDER,
    shape::{self, attribute},
};

/// An `ArnResponse.Error` element. Every part is optional on the wire and
/// falls back to a placeholder here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApiFault {
    pub code: String,
    pub description: String,
    pub message: String,
}

impl ApiFault {
    pub fn from_node(node: &Value) -> Self {
        let node = match node {
            Value::Array(items) => items.first().unwrap_or(node),
            _ => node,
        };
        if let Value::String(message) = node {
            return Self {
                code: PLACEHOLDER.to_string(),
                description: PLACEHOLDER.to_string(),
                message: message.clone(),
            };
        }
        let field = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| attribute(node, key))
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        };
        Self {
            code: field(&["@Code", "Code"]),
            description: field(&["@Description", "Description"]),
            message: field(&["Message", "@Message"]),
        }
    }

    /// The error element of a response document, if it carries one.
    pub fn from_document(document: &Value) -> Option<Self> {
        document.pointer("/ArnResponse/Error").map(Self::from_node)
    }
}

impl fmt::Display for ApiFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.description, self.message)
    }
}

/// What became of a reservation attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReservationOutcome {
    Success {
        reservation_id: String,
        itinerary_id: String,
        confirmation_number: String,
    },
    Failure(ApiFault),
    Malformed {
        raw_body: String,
    },
}

impl ReservationOutcome {
    /// Interpret the body of a reservation call.
    ///
    /// A non-200 status is always a failure, whatever the body says. Display
    /// identifiers the API omits on success come back as placeholders rather
    /// than failing the whole outcome.
    pub fn interpret(body: &str, status: u16) -> Self {
        let document = serde_json::from_str::<Value>(body);
        if status != 200 {
            let mut fault = document
                .ok()
                .and_then(|document| ApiFault::from_document(&document))
                .unwrap_or_else(|| ApiFault {
                    code: PLACEHOLDER.to_string(),
                    description: PLACEHOLDER.to_string(),
                    message: PLACEHOLDER.to_string(),
                });
            if fault.code == PLACEHOLDER {
                fault.code = status.to_string();
            }
            return ReservationOutcome::Failure(fault);
        }

        let malformed = || ReservationOutcome::Malformed {
            raw_body: body.to_string(),
        };
        let Ok(document) = document else {
            return malformed();
        };
        if let Some(fault) = ApiFault::from_document(&document) {
            return ReservationOutcome::Failure(fault);
        }
        let Some(reservation) = document.pointer("/ArnResponse/Reservation") else {
            return malformed();
        };
        let hotel_reservation = shape::normalize(reservation.get("HotelReservation"))
            .ok()
            .and_then(|reservations| reservations.into_iter().next());
        match hotel_reservation {
            Some(hotel_reservation) => {
                let read = |node: &Value, key: &str| {
                    attribute(node, key).unwrap_or_else(|| PLACEHOLDER.to_string())
                };
                ReservationOutcome::Success {
                    reservation_id: read(hotel_reservation, "@ReservationID"),
                    itinerary_id: read(reservation, "@ItineraryID"),
                    confirmation_number: read(hotel_reservation, "@CustomerConfirmationNumber"),
                }
            }
            None => malformed(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ReservationOutcome::Success { .. })
    }
}
