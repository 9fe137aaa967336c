use reqwest::multipart::Form;
use serde::{Serialize, Serializer};

use super::{GuestInfo, PaymentInfo, ReservationExtras};
use crate::{
    constants::RESPONSE_FORMAT,
    rate::{format_amount, RoomQuote},
    StayRequest,
};

/// Number of fields in every reservation request.
pub const FIELD_COUNT: usize = 57;

/// The multipart field set of a reservation call.
///
/// The endpoint rejects a request with any of these keys missing, so the set
/// is a fixed-size array: every request carries every key, in the same order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservationRequest {
    fields: [(&'static str, String); FIELD_COUNT],
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl ReservationRequest {
    pub fn build(
        site_id: &str,
        quote: &RoomQuote,
        guest: &GuestInfo,
        payment: &PaymentInfo,
        stay: &StayRequest,
        extras: &ReservationExtras,
    ) -> Self {
        let billing = &payment.billing_address;
        let fields = [
            ("type", "reservation".to_string()),
            ("inDate", stay.in_date()),
            ("outDate", stay.out_date()),
            ("siteid", site_id.to_string()),
            ("rooms", stay.rooms.to_string()),
            ("adults", stay.adults.to_string()),
            ("children", stay.children().to_string()),
            ("childages", stay.child_ages_param()),
            ("userAgent", stay.user_agent.clone()),
            ("userLanguage", stay.user_language.clone()),
            ("ipAddress", stay.ip_address.clone()),
            ("locale", stay.locale.clone()),
            ("currency", stay.currency.clone()),
            ("_type", RESPONSE_FORMAT.to_string()),
            ("hotelids", quote.hotel_id.clone()),
            ("ratePlanCode", quote.rate_plan_code.clone()),
            ("roomCode", quote.room_code.clone()),
            ("gateway", quote.gateway_id.clone()),
            ("recordLocator", text(&extras.record_locator)),
            ("campaignCode", text(&extras.campaign_code)),
            ("discountCard", text(&extras.discount_card)),
            // Misspelled on the API side.
            ("CCAuthIntineraryID", text(&extras.card_auth_itinerary_id)),
            ("memberToken", text(&extras.member_token)),
            ("agentRefNumber", text(&extras.agent_ref_number)),
            ("guestFirstName", guest.first_name.clone()),
            ("guestLastName", guest.last_name.clone()),
            ("guestEmail", guest.email.clone()),
            ("guestPhoneCountry", guest.phone_country.clone()),
            ("guestPhoneArea", guest.phone_area.clone()),
            ("guestPhoneNumber", guest.phone_number.clone()),
            ("guestPhoneExtension", guest.phone_extension.clone()),
            ("guestTitle", guest.title.clone()),
            ("guestMessage", guest.message.clone()),
            ("addressAddress", guest.address.street.clone()),
            ("addressCity", guest.address.city.clone()),
            ("addressRegion", guest.address.region.clone()),
            ("addressPostalCode", guest.address.postal_code.clone()),
            ("addressCountryCode", guest.address.country_code.clone()),
            ("addressExtraInfo", guest.address_extra_info.clone()),
            ("creditCardNumber", payment.card_number.clone()),
            ("creditCardHolder", payment.card_holder.clone()),
            ("creditCardExpiration", payment.expiration.to_string()),
            ("creditCardCVV2", payment.cvv2.clone()),
            ("creditCardType", payment.card_type.clone()),
            ("creditCardAddress", billing.street.clone()),
            ("creditCardCity", billing.city.clone()),
            ("creditCardRegion", billing.region.clone()),
            ("creditCardPostalCode", billing.postal_code.clone()),
            ("creditCardCountryCode", billing.country_code.clone()),
            ("roomCostPrice", format_amount(quote.nightly_total)),
            ("roomCostTaxAmount", format_amount(quote.tax_amount)),
            ("roomCostGatewayFee", format_amount(quote.gateway_fee)),
            ("roomCostTotalAmount", format_amount(quote.grand_total)),
            ("roomCostCurrencyCode", quote.currency_code.clone()),
            ("bookingFeeAmount", format_amount(quote.booking_fee)),
            ("bookingFeeCurrencyCode", quote.booking_fee_currency.clone()),
            ("specialRequests", text(&extras.special_requests)),
        ];
        Self { fields }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }

    /// The request as `multipart/form-data`, the only encoding the
    /// reservation endpoint accepts.
    pub fn to_form(&self) -> Form {
        self.fields
            .iter()
            .fold(Form::new(), |form, (key, value)| form.text(*key, value.clone()))
    }
}

impl Serialize for ReservationRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::{CardExpiration, PostalAddress};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::collections::HashSet;

    const EXPECTED_KEYS: [&str; FIELD_COUNT] = [
        "type",
        "inDate",
        "outDate",
        "siteid",
        "rooms",
        "adults",
        "children",
        "childages",
        "userAgent",
        "userLanguage",
        "ipAddress",
        "locale",
        "currency",
        "_type",
        "hotelids",
        "ratePlanCode",
        "roomCode",
        "gateway",
        "recordLocator",
        "campaignCode",
        "discountCard",
        "CCAuthIntineraryID",
        "memberToken",
        "agentRefNumber",
        "guestFirstName",
        "guestLastName",
        "guestEmail",
        "guestPhoneCountry",
        "guestPhoneArea",
        "guestPhoneNumber",
        "guestPhoneExtension",
        "guestTitle",
        "guestMessage",
        "addressAddress",
        "addressCity",
        "addressRegion",
        "addressPostalCode",
        "addressCountryCode",
        "addressExtraInfo",
        "creditCardNumber",
        "creditCardHolder",
        "creditCardExpiration",
        "creditCardCVV2",
        "creditCardType",
        "creditCardAddress",
        "creditCardCity",
        "creditCardRegion",
        "creditCardPostalCode",
        "creditCardCountryCode",
        "roomCostPrice",
        "roomCostTaxAmount",
        "roomCostGatewayFee",
        "roomCostTotalAmount",
        "roomCostCurrencyCode",
        "bookingFeeAmount",
        "bookingFeeCurrencyCode",
        "specialRequests",
    ];

    fn quote() -> RoomQuote {
        RoomQuote {
            hotel_id: "34853".to_string(),
            rate_plan_code: "RAC".to_string(),
            room_code: "A1K".to_string(),
            gateway_id: "4".to_string(),
            currency_code: "EUR".to_string(),
            nightly_total: Decimal::new(129300, 2),
            tax_amount: Decimal::new(15516, 2),
            gateway_fee: Decimal::ZERO,
            grand_total: Decimal::new(144816, 2),
            booking_fee: Decimal::new(5, 0),
            booking_fee_currency: "USD".to_string(),
        }
    }

    fn stay() -> StayRequest {
        StayRequest::builder()
            .hotel_id("34853")
            .check_in(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
            .check_out(NaiveDate::from_ymd_opt(2025, 6, 20).unwrap())
            .build()
            .unwrap()
    }

    fn guest() -> GuestInfo {
        GuestInfo {
            first_name: "Test".to_string(),
            last_name: "Guest".to_string(),
            email: "guest@example.com".to_string(),
            phone_country: "1".to_string(),
            phone_area: "123".to_string(),
            phone_number: "1234567890".to_string(),
            address: PostalAddress {
                street: "123 Made Up Ln.".to_string(),
                city: "Example City".to_string(),
                region: "FL".to_string(),
                postal_code: "12345".to_string(),
                country_code: "US".to_string(),
            },
            ..Default::default()
        }
    }

    fn payment() -> PaymentInfo {
        PaymentInfo {
            card_type: "VI".to_string(),
            card_number: "4111111111111111".to_string(),
            card_holder: "Test Cardholder".to_string(),
            expiration: CardExpiration {
                month: 5,
                year: 2027,
            },
            cvv2: "123".to_string(),
            billing_address: PostalAddress {
                street: "123 Test Street".to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn build_emits_every_key_once() {
        let request = ReservationRequest::build(
            "64",
            &quote(),
            &GuestInfo::default(),
            &PaymentInfo::default(),
            &stay(),
            &ReservationExtras::default(),
        );

        let keys = request.fields().map(|(key, _)| key).collect::<Vec<_>>();
        assert_eq!(keys, EXPECTED_KEYS);
        assert_eq!(keys.iter().collect::<HashSet<_>>().len(), FIELD_COUNT);
    }

    #[test]
    fn build_sends_empty_strings_for_missing_optionals() {
        let request = ReservationRequest::build(
            "64",
            &quote(),
            &guest(),
            &payment(),
            &stay(),
            &ReservationExtras::default(),
        );

        for key in [
            "recordLocator",
            "campaignCode",
            "discountCard",
            "CCAuthIntineraryID",
            "memberToken",
            "agentRefNumber",
            "guestPhoneExtension",
            "guestTitle",
            "guestMessage",
            "addressExtraInfo",
            "childages",
            "specialRequests",
            "creditCardCity",
        ] {
            assert_eq!(request.get(key), Some(""), "{key} should be empty");
        }
    }

    #[test]
    fn build_merges_quote_and_guest() {
        let extras = ReservationExtras {
            record_locator: Some("locator-1".to_string()),
            special_requests: Some("Late arrival".to_string()),
            ..Default::default()
        };

        let request =
            ReservationRequest::build("64", &quote(), &guest(), &payment(), &stay(), &extras);

        assert_eq!(request.get("type"), Some("reservation"));
        assert_eq!(request.get("siteid"), Some("64"));
        assert_eq!(request.get("inDate"), Some("2025-06-15"));
        assert_eq!(request.get("outDate"), Some("2025-06-20"));
        assert_eq!(request.get("hotelids"), Some("34853"));
        assert_eq!(request.get("ratePlanCode"), Some("RAC"));
        assert_eq!(request.get("roomCode"), Some("A1K"));
        assert_eq!(request.get("gateway"), Some("4"));
        assert_eq!(request.get("recordLocator"), Some("locator-1"));
        assert_eq!(request.get("guestLastName"), Some("Guest"));
        assert_eq!(request.get("addressAddress"), Some("123 Made Up Ln."));
        assert_eq!(request.get("creditCardExpiration"), Some("05/27"));
        assert_eq!(request.get("creditCardAddress"), Some("123 Test Street"));
        assert_eq!(request.get("roomCostPrice"), Some("1293.00"));
        assert_eq!(request.get("roomCostTaxAmount"), Some("155.16"));
        assert_eq!(request.get("roomCostGatewayFee"), Some("0.00"));
        assert_eq!(request.get("roomCostTotalAmount"), Some("1448.16"));
        assert_eq!(request.get("roomCostCurrencyCode"), Some("EUR"));
        assert_eq!(request.get("bookingFeeAmount"), Some("5.00"));
        assert_eq!(request.get("bookingFeeCurrencyCode"), Some("USD"));
        assert_eq!(request.get("specialRequests"), Some("Late arrival"));
        assert_eq!(request.get("notAField"), None);
    }

    #[test]
    fn serializes_as_flat_object() {
        let request = ReservationRequest::build(
            "64",
            &quote(),
            &guest(),
            &payment(),
            &stay(),
            &ReservationExtras::default(),
        );

        let value = serde_json::to_value(&request).unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), FIELD_COUNT);
        assert_eq!(object["roomCostTotalAmount"], "1448.16");
    }
}
