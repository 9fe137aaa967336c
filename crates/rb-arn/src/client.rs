use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    constants::{DEFAULT_HOTEL_SERVICE_URL, RESPONSE_FORMAT, WIDGET_PATH},
    error::GetError,
    rate::RateCodes,
    reservation::{ApiFault, ReservationRequest},
    Credentials, StayRequest,
};

#[derive(Clone, Debug)]
pub struct Client {
    http_client: reqwest::Client,
    endpoint: Url,
    widget_endpoint: Url,
    credentials: Credentials,
}

#[derive(Debug, Error)]
pub enum ClientInitError {
    #[error("invalid endpoint url `{0}`: {1}")]
    InvalidEndpoint(String, String),
}

/// Status and body of a call whose body is interpreted by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// The GET searches the API offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchKind {
    Availability,
    RateDetails,
    Cities,
    Airports,
}

impl SearchKind {
    /// Value of the `type` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            SearchKind::Availability => "availability",
            SearchKind::RateDetails => "rateDetails",
            SearchKind::Cities => "cities",
            SearchKind::Airports => "airport",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchKind::Availability => "AvailabilitySearch",
            SearchKind::RateDetails => "RateDetails",
            SearchKind::Cities => "CitySearch",
            SearchKind::Airports => "AirportSearch",
        }
    }
}

/// A search as it was sent, with whatever came back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchCall {
    pub kind: SearchKind,
    pub url: Url,
    pub response: RawResponse,
}

impl SearchCall {
    /// The response document. Only a 200 carries one; anything else is an
    /// error holding the body the API sent.
    pub fn document(&self) -> Result<Value, GetError> {
        if self.response.status != StatusCode::OK.as_u16() {
            warn!(
                kind = self.kind.as_param(),
                status = self.response.status,
                "hotel request failed"
            );
            return Err(GetError::ResponseError(
                self.response.status,
                self.response.body.clone(),
            ));
        }
        let document: Value = serde_json::from_str(&self.response.body)?;
        if let Some(fault) = ApiFault::from_document(&document) {
            return Err(GetError::ApiError(fault));
        }
        Ok(document)
    }
}

impl Client {
    /// Create a client for the hotel service. Without an endpoint the
    /// production service is used. Widget searches go to the `widget` path
    /// next to it.
    pub fn new(
        http_client: reqwest::Client,
        endpoint: Option<&str>,
        credentials: Credentials,
    ) -> Result<Self, ClientInitError> {
        let raw = endpoint.unwrap_or(DEFAULT_HOTEL_SERVICE_URL);
        let invalid = |e: String| ClientInitError::InvalidEndpoint(raw.to_string(), e);
        let endpoint = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        let widget_endpoint = endpoint
            .join(WIDGET_PATH)
            .map_err(|e| invalid(e.to_string()))?;
        Ok(Self {
            http_client,
            endpoint,
            widget_endpoint,
            credentials,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn widget_endpoint(&self) -> &Url {
        &self.widget_endpoint
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Search availability for the stay. Returns the raw document.
    pub async fn search_availability(&self, stay: &StayRequest) -> Result<Value, GetError> {
        self.availability_call(stay).await?.document()
    }

    pub async fn availability_call(&self, stay: &StayRequest) -> Result<SearchCall, GetError> {
        let kind = SearchKind::Availability;
        let query = stay.search_query(kind.as_param(), self.credentials.site_id());
        self.send_search(kind, &self.endpoint, &query).await
    }

    /// Look up rate details for the codes picked from an availability search.
    pub async fn get_rate_details(
        &self,
        stay: &StayRequest,
        codes: &RateCodes,
    ) -> Result<Value, GetError> {
        self.rate_details_call(stay, codes).await?.document()
    }

    pub async fn rate_details_call(
        &self,
        stay: &StayRequest,
        codes: &RateCodes,
    ) -> Result<SearchCall, GetError> {
        let kind = SearchKind::RateDetails;
        let mut query = stay.search_query(kind.as_param(), self.credentials.site_id());
        query.extend([
            ("ratePlanCode", codes.rate_plan_code.clone()),
            ("roomCode", codes.room_code.clone()),
            ("gateway", codes.gateway_id.clone()),
        ]);
        self.send_search(kind, &self.endpoint, &query).await
    }

    /// Look up cities or airports by name, for finding hotels to search.
    pub async fn search_places(
        &self,
        kind: SearchKind,
        name: &str,
        count: u32,
    ) -> Result<Value, GetError> {
        self.places_call(kind, name, count).await?.document()
    }

    pub async fn places_call(
        &self,
        kind: SearchKind,
        name: &str,
        count: u32,
    ) -> Result<SearchCall, GetError> {
        let query = [
            ("type", kind.as_param().to_string()),
            ("count", count.to_string()),
            ("name", name.to_string()),
        ];
        self.send_search(kind, &self.widget_endpoint, &query).await
    }

    /// Submit a reservation. Sent exactly once: a retried reservation could
    /// book the room twice. Any status is returned to the caller, who decides
    /// what the body means.
    pub async fn create_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<RawResponse, GetError> {
        debug!(endpoint = %self.endpoint, "submitting reservation");
        let response = self
            .credentials
            .authorize(self.http_client.post(self.endpoint.clone()))
            .query(&[
                ("type", "reservation"),
                ("siteid", self.credentials.site_id()),
                ("_type", RESPONSE_FORMAT),
            ])
            .multipart(request.to_form())
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(GetError::ResponseBodyError)?;
        debug!(status, bytes = body.len(), "reservation response received");
        Ok(RawResponse { status, body })
    }

    async fn send_search(
        &self,
        kind: SearchKind,
        endpoint: &Url,
        query: &[(&'static str, String)],
    ) -> Result<SearchCall, GetError> {
        let request = self
            .credentials
            .authorize(self.http_client.get(endpoint.clone()))
            .query(query)
            .build()?;
        let url = request.url().clone();
        debug!(kind = kind.as_param(), %url, "sending hotel request");
        let response = self.http_client.execute(request).await?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(GetError::ResponseBodyError)?;
        Ok(SearchCall {
            kind,
            url,
            response: RawResponse { status, body },
        })
    }
}
