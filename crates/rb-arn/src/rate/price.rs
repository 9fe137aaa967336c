use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use super::{QuoteError, RateKey, RoomQuote, RoomQuoteBuilder};
use crate::{
    constants::DEFAULT_BOOKING_FEE_CURRENCY,
    shape::{self, attribute},
};

const NIGHTLY_PRICE: &str = "NightlyRate.@Price";

/// Price a rate detail room.
///
/// The API leaves out tax, fee and total elements instead of sending zero, so
/// an absent element counts as zero. The room currency is the one thing that
/// cannot be guessed.
pub fn aggregate(room: &Value, key: RateKey) -> Result<RoomQuote, QuoteError> {
    let currency_code = attribute(room, "@CurrencyCode")
        .filter(|code| !code.is_empty())
        .ok_or(QuoteError::MissingCurrency)?;

    let nightly_total = shape::normalize_field(room.get("NightlyRate"), "NightlyRate")?
        .into_iter()
        .try_fold(Decimal::ZERO, |total, rate| {
            let price = rate
                .get("@Price")
                .ok_or(QuoteError::MissingField(NIGHTLY_PRICE))?;
            total
                .checked_add(parse_amount(price, NIGHTLY_PRICE)?)
                .ok_or_else(|| QuoteError::InvalidAmount {
                    field: NIGHTLY_PRICE,
                    value: price.to_string(),
                })
        })?;

    let booking_fee_currency = room
        .get("BookingFee")
        .and_then(|fee| attribute(fee, "@CurrencyCode"))
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| DEFAULT_BOOKING_FEE_CURRENCY.to_string());

    let quote = RoomQuoteBuilder::default()
        .key(key)
        .currency_code(currency_code)
        .nightly_total(nightly_total)
        .tax_amount(element_amount(room, "Tax", "Tax.@Amount")?)
        .gateway_fee(element_amount(room, "GatewayFee", "GatewayFee.@Amount")?)
        .grand_total(element_amount(room, "Total", "Total.@Amount")?)
        .booking_fee(element_amount(room, "BookingFee", "BookingFee.@Amount")?)
        .booking_fee_currency(booking_fee_currency)
        .build()?;
    Ok(quote)
}

fn element_amount(
    room: &Value,
    element: &str,
    field: &'static str,
) -> Result<Decimal, QuoteError> {
    match room.get(element).and_then(|node| node.get("@Amount")) {
        None | Some(Value::Null) => Ok(Decimal::ZERO),
        Some(amount) => parse_amount(amount, field),
    }
}

fn parse_amount(value: &Value, field: &'static str) -> Result<Decimal, QuoteError> {
    let parsed = match value {
        Value::String(text) => Decimal::from_str(text.trim()).ok(),
        Value::Number(number) => Decimal::from_str(&number.to_string())
            .or_else(|_| Decimal::from_scientific(&number.to_string()))
            .ok(),
        _ => None,
    };
    match parsed {
        Some(amount) if amount >= Decimal::ZERO => Ok(amount),
        _ => Err(QuoteError::InvalidAmount {
            field,
            value: value.to_string(),
        }),
    }
}
