use chrono::NaiveDate;
use derive_builder::Builder;

use crate::constants::RESPONSE_FORMAT;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The stay being searched for and booked. Shared by all three calls so the
/// rate detail and reservation requests describe the same stay as the
/// availability search.
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct StayRequest {
    pub hotel_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[builder(default = "1")]
    pub rooms: u32,
    #[builder(default = "2")]
    pub adults: u32,
    #[builder(default)]
    pub child_ages: Vec<u32>,
    #[builder(default = "\"Mozilla/5.0\".to_string()")]
    pub user_agent: String,
    #[builder(default = "\"en-US\".to_string()")]
    pub user_language: String,
    #[builder(default = "\"127.0.0.1\".to_string()")]
    pub ip_address: String,
    #[builder(default = "\"en\".to_string()")]
    pub locale: String,
    #[builder(default = "\"USD\".to_string()")]
    pub currency: String,
}

impl StayRequestBuilder {
    fn validate(&self) -> Result<(), String> {
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            if check_out <= check_in {
                return Err(format!(
                    "check-out {check_out} must be after check-in {check_in}"
                ));
            }
        }
        if self.rooms == Some(0) {
            return Err("at least one room is required".to_string());
        }
        Ok(())
    }
}

impl StayRequest {
    pub fn builder() -> StayRequestBuilder {
        StayRequestBuilder::default()
    }

    pub fn in_date(&self) -> String {
        self.check_in.format(DATE_FORMAT).to_string()
    }

    pub fn out_date(&self) -> String {
        self.check_out.format(DATE_FORMAT).to_string()
    }

    pub fn children(&self) -> u32 {
        self.child_ages.len() as u32
    }

    /// Comma separated, as the `childages` parameter wants them.
    pub fn child_ages_param(&self) -> String {
        self.child_ages
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Query parameters common to the availability and rate detail searches.
    pub(crate) fn search_query(&self, kind: &str, site_id: &str) -> Vec<(&'static str, String)> {
        vec![
            ("type", kind.to_string()),
            ("inDate", self.in_date()),
            ("outDate", self.out_date()),
            ("siteid", site_id.to_string()),
            ("rooms", self.rooms.to_string()),
            ("adults", self.adults.to_string()),
            ("children", self.children().to_string()),
            ("childages", self.child_ages_param()),
            ("userAgent", self.user_agent.clone()),
            ("userLanguage", self.user_language.clone()),
            ("hotelids", self.hotel_id.clone()),
            ("_type", RESPONSE_FORMAT.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(query: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builder_applies_defaults() {
        let stay = StayRequest::builder()
            .hotel_id("34853")
            .check_in(date(2025, 6, 15))
            .check_out(date(2025, 6, 20))
            .build()
            .unwrap();
        assert_eq!(stay.rooms, 1);
        assert_eq!(stay.adults, 2);
        assert_eq!(stay.children(), 0);
        assert_eq!(stay.currency, "USD");
        assert_eq!(stay.in_date(), "2025-06-15");
        assert_eq!(stay.out_date(), "2025-06-20");
    }

    #[test]
    fn builder_rejects_inverted_dates() {
        let result = StayRequest::builder()
            .hotel_id("34853")
            .check_in(date(2025, 6, 20))
            .check_out(date(2025, 6, 20))
            .build();
        assert!(matches!(
            result,
            Err(StayRequestBuilderError::ValidationError(_))
        ));
    }

    #[test]
    fn builder_rejects_zero_rooms() {
        let result = StayRequest::builder()
            .hotel_id("34853")
            .check_in(date(2025, 6, 15))
            .check_out(date(2025, 6, 20))
            .rooms(0u32)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn search_query_carries_child_ages() {
        let stay = StayRequest::builder()
            .hotel_id("34853")
            .check_in(date(2025, 6, 15))
            .check_out(date(2025, 6, 20))
            .child_ages(vec![4u32, 9])
            .build()
            .unwrap();

        let query = stay.search_query("availability", "64");

        let get = |key: &str| param(&query, key);
        assert_eq!(get("type"), Some("availability"));
        assert_eq!(get("siteid"), Some("64"));
        assert_eq!(get("children"), Some("2"));
        assert_eq!(get("childages"), Some("4,9"));
        assert_eq!(get("hotelids"), Some("34853"));
        assert_eq!(get("_type"), Some("json"));
    }
}
