use derive_builder::Builder;
use rust_decimal::Decimal;
use serde::Serialize;

use super::RateCodes;

/// What a quote is priced for: the requested hotel plus the pass one codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateKey {
    pub hotel_id: String,
    pub codes: RateCodes,
}

/// A fully priced room, ready to be turned into a reservation request.
#[derive(Builder, Clone, Debug, PartialEq, Eq, Serialize)]
#[builder(setter(into))]
pub struct RoomQuote {
    pub hotel_id: String,
    pub rate_plan_code: String,
    pub room_code: String,
    pub gateway_id: String,
    pub currency_code: String,
    pub nightly_total: Decimal,
    pub tax_amount: Decimal,
    pub gateway_fee: Decimal,
    pub grand_total: Decimal,
    pub booking_fee: Decimal,
    pub booking_fee_currency: String,
}

impl RoomQuoteBuilder {
    pub fn key(&mut self, key: RateKey) -> &mut Self {
        self.hotel_id(key.hotel_id)
            .rate_plan_code(key.codes.rate_plan_code)
            .room_code(key.codes.room_code)
            .gateway_id(key.codes.gateway_id)
    }
}

/// Render an amount the way the reservation endpoint expects it: two
/// decimal places, no exponent.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}
