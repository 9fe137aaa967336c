use std::fmt;

use serde::{Deserialize, Serialize};

/// Postal address, used for both the guest and the card billing address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country_code: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub title: String,
    pub phone_country: String,
    pub phone_area: String,
    pub phone_number: String,
    pub phone_extension: String,
    /// Note to the hotel shown with the guest record.
    pub message: String,
    pub address: PostalAddress,
    pub address_extra_info: String,
}

/// Card expiry, sent as `MM/YY`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardExpiration {
    pub month: u32,
    pub year: u32,
}

impl fmt::Display for CardExpiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

/// Card details are passed through untouched; the endpoint validates them.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentInfo {
    pub card_type: String,
    pub card_number: String,
    pub card_holder: String,
    pub expiration: CardExpiration,
    pub cvv2: String,
    pub billing_address: PostalAddress,
}

impl fmt::Debug for PaymentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last_four = self
            .card_number
            .get(self.card_number.len().saturating_sub(4)..)
            .unwrap_or_default();
        f.debug_struct("PaymentInfo")
            .field("card_type", &self.card_type)
            .field("card_number", &format_args!("****{last_four}"))
            .field("card_holder", &self.card_holder)
            .field("expiration", &self.expiration)
            .field("cvv2", &"***")
            .field("billing_address", &self.billing_address)
            .finish()
    }
}

/// Optional reservation fields. Anything left unset goes out as an empty
/// string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationExtras {
    pub record_locator: Option<String>,
    pub campaign_code: Option<String>,
    pub discount_card: Option<String>,
    pub card_auth_itinerary_id: Option<String>,
    pub member_token: Option<String>,
    pub agent_ref_number: Option<String>,
    pub special_requests: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expiration_formats_as_month_and_two_digit_year() {
        let expiration = CardExpiration {
            month: 5,
            year: 2027,
        };
        assert_eq!(expiration.to_string(), "05/27");
        let expiration = CardExpiration { month: 12, year: 25 };
        assert_eq!(expiration.to_string(), "12/25");
    }

    #[test]
    fn payment_debug_masks_card() {
        let payment = PaymentInfo {
            card_number: "4111111111111111".to_string(),
            cvv2: "123".to_string(),
            ..Default::default()
        };
        let debug = format!("{payment:?}");
        assert!(debug.contains("****1111"));
        assert!(!debug.contains("4111111111111111"));
        assert!(!debug.contains("123"));
    }

    #[test]
    fn guest_deserializes_with_missing_fields() {
        let guest: GuestInfo = serde_json::from_value(json!({
            "first_name": "Test",
            "last_name": "Guest"
        }))
        .unwrap();
        assert_eq!(guest.first_name, "Test");
        assert_eq!(guest.phone_extension, "");
        assert_eq!(guest.address, PostalAddress::default());
    }
}
