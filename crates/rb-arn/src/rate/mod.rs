mod extract;
mod price;
mod quote;

pub use extract::*;
pub use price::*;
pub use quote::*;

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::shape::ShapeError;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("unexpected response shape: {0}")]
    Shape(#[from] ShapeError),
    #[error("no {0} offered in the response")]
    NotFound(Level),
    #[error("the priced room has no currency code")]
    MissingCurrency,
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),
    #[error("`{field}` is not a valid amount: {value}")]
    InvalidAmount { field: &'static str, value: String },
    #[error("unable to assemble the quote: {0}")]
    Incomplete(#[from] RoomQuoteBuilderError),
}

impl RateCodes {
    /// First pass: pick the codes the rate detail lookup is keyed by.
    pub fn from_availability(response: &Value) -> Result<Self, QuoteError> {
        let hotels = availability_hotels(response)?;
        extract_first_room(&hotels)?.codes()
    }
}

/// Second pass: price the first room of a rate detail response.
///
/// The quote keeps the codes from `key`. A rate detail room quoting other
/// codes is logged but still priced, since the API answers for the requested
/// triple.
pub fn price_rate_details(response: &Value, key: RateKey) -> Result<RoomQuote, QuoteError> {
    let hotels = rate_detail_hotels(response)?;
    let selection = extract_first_room(&hotels)?;
    if let Ok(codes) = selection.codes() {
        if codes != key.codes {
            warn!(
                requested = ?key.codes,
                returned = ?codes,
                "rate details returned a different rate than requested"
            );
        }
    }
    aggregate(selection.room, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn key() -> RateKey {
        RateKey {
            hotel_id: "34853".to_string(),
            codes: RateCodes {
                rate_plan_code: "RAC".to_string(),
                room_code: "A1K".to_string(),
                gateway_id: "4".to_string(),
            },
        }
    }

    #[test]
    fn from_availability_picks_first_codes() {
        let response = json!({
            "ArnResponse": {
                "Availability": {
                    "HotelAvailability": {
                        "Hotel": {
                            "@HotelID": "34853",
                            "RatePlan": [
                                {"@Code": "RAC", "@Gateway": "4", "Room": {"@Code": "A1K"}},
                                {"@Code": "AAA", "@Gateway": "4", "Room": {"@Code": "B2Q"}}
                            ]
                        }
                    }
                }
            }
        });

        let codes = RateCodes::from_availability(&response).unwrap();

        assert_eq!(codes, key().codes);
    }

    #[test]
    fn from_availability_without_hotels_is_not_found() {
        let response = json!({"ArnResponse": {"Availability": {"HotelAvailability": {}}}});

        let error = RateCodes::from_availability(&response).unwrap_err();

        assert!(matches!(error, QuoteError::NotFound(Level::Hotels)));
    }

    #[test]
    fn from_availability_missing_gateway_fails() {
        let response = json!({
            "ArnResponse": {"Availability": {"HotelAvailability": {"Hotel": {
                "RatePlan": {"@Code": "RAC", "Room": {"@Code": "A1K"}}
            }}}}
        });

        let error = RateCodes::from_availability(&response).unwrap_err();

        assert!(matches!(error, QuoteError::MissingField("RatePlan.@Gateway")));
    }

    #[test]
    fn price_rate_details_sums_nightly_rates() {
        let response = json!({
            "ArnResponse": {"RateDetails": {"HotelRateDetails": {"Hotel": {
                "RatePlan": {
                    "@Code": "RAC",
                    "@Gateway": "4",
                    "Room": {
                        "@Code": "A1K",
                        "@CurrencyCode": "EUR",
                        "NightlyRate": [{"@Price": "100.00"}, {"@Price": "93.00"}],
                        "Total": {"@Amount": "193.00"}
                    }
                }
            }}}}
        });

        let quote = price_rate_details(&response, key()).unwrap();

        assert_eq!(quote.nightly_total, Decimal::new(19300, 2));
        assert_eq!(quote.grand_total, Decimal::new(19300, 2));
        assert_eq!(quote.currency_code, "EUR");
    }

    #[test]
    fn price_rate_details_keeps_requested_codes() {
        let response = json!({
            "ArnResponse": {"RateDetails": {"HotelRateDetails": {"Hotel": {
                "RatePlan": {
                    "@Code": "OTHER",
                    "@Gateway": "9",
                    "Room": {"@Code": "Z9", "@CurrencyCode": "USD"}
                }
            }}}}
        });

        let quote = price_rate_details(&response, key()).unwrap();

        assert_eq!(quote.rate_plan_code, "RAC");
        assert_eq!(quote.room_code, "A1K");
        assert_eq!(quote.gateway_id, "4");
    }

    #[test]
    fn price_rate_details_on_availability_document_is_not_found() {
        let response = json!({"ArnResponse": {"Availability": {}}});

        let error = price_rate_details(&response, key()).unwrap_err();

        assert!(matches!(error, QuoteError::NotFound(Level::Hotels)));
    }
}
