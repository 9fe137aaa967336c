//! The three-call booking flow: availability, rate details, reservation.
//!
//! Each call needs the previous one's answer, so they run strictly in
//! sequence. Nothing is retried.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, info_span, Instrument};

use crate::{
    client::{Client, RawResponse, SearchCall},
    error::GetError,
    rate::{price_rate_details, QuoteError, RateCodes, RateKey, RoomQuote},
    reservation::{GuestInfo, PaymentInfo, ReservationExtras, ReservationOutcome, ReservationRequest},
    StayRequest,
};

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("availability search failed: {0}")]
    Availability(#[source] GetError),
    #[error("rate details lookup failed: {0}")]
    RateDetails(#[source] GetError),
    #[error("reservation call failed: {0}")]
    Reservation(#[source] GetError),
    #[error("no bookable rate: {0}")]
    Quote(#[from] QuoteError),
}

/// Everything one booking attempt produced, for display and transcripts.
#[derive(Debug, Serialize)]
pub struct Booking {
    pub quote: RoomQuote,
    pub request: ReservationRequest,
    pub response: RawResponse,
    pub outcome: ReservationOutcome,
}

impl Client {
    /// Price the first room offered for the stay.
    pub async fn quote(&self, stay: &StayRequest) -> Result<RoomQuote, BookingError> {
        self.quote_recorded(stay, &mut Vec::new()).await
    }

    /// Same as [`Client::quote`], keeping every search sent in `calls`,
    /// including the one that failed.
    pub async fn quote_recorded(
        &self,
        stay: &StayRequest,
        calls: &mut Vec<SearchCall>,
    ) -> Result<RoomQuote, BookingError> {
        let span = info_span!("quote", hotel = %stay.hotel_id);
        async {
            let call = self
                .availability_call(stay)
                .await
                .map_err(BookingError::Availability)?;
            let availability = call.document();
            calls.push(call);
            let availability = availability.map_err(BookingError::Availability)?;
            let codes = RateCodes::from_availability(&availability)?;
            info!(
                rate_plan = %codes.rate_plan_code,
                room = %codes.room_code,
                gateway = %codes.gateway_id,
                "picked rate from availability"
            );

            let call = self
                .rate_details_call(stay, &codes)
                .await
                .map_err(BookingError::RateDetails)?;
            let details = call.document();
            calls.push(call);
            let details = details.map_err(BookingError::RateDetails)?;
            let quote = price_rate_details(
                &details,
                RateKey {
                    hotel_id: stay.hotel_id.clone(),
                    codes,
                },
            )?;
            info!(
                total = %quote.grand_total,
                currency = %quote.currency_code,
                "priced room"
            );
            Ok::<_, BookingError>(quote)
        }
        .instrument(span)
        .await
    }

    /// Quote the stay and reserve it.
    ///
    /// An API-level refusal of the reservation is not an error here; it
    /// comes back as [`ReservationOutcome::Failure`] alongside the request
    /// that caused it.
    pub async fn book(
        &self,
        stay: &StayRequest,
        guest: &GuestInfo,
        payment: &PaymentInfo,
        extras: &ReservationExtras,
    ) -> Result<Booking, BookingError> {
        let quote = self.quote(stay).await?;
        self.reserve(stay, quote, guest, payment, extras).await
    }

    /// Reserve an already priced room.
    pub async fn reserve(
        &self,
        stay: &StayRequest,
        quote: RoomQuote,
        guest: &GuestInfo,
        payment: &PaymentInfo,
        extras: &ReservationExtras,
    ) -> Result<Booking, BookingError> {
        let request = ReservationRequest::build(
            self.credentials().site_id(),
            &quote,
            guest,
            payment,
            stay,
            extras,
        );
        let response = self
            .create_reservation(&request)
            .await
            .map_err(BookingError::Reservation)?;
        let outcome = ReservationOutcome::interpret(&response.body, response.status);
        info!(
            status = response.status,
            success = outcome.is_success(),
            "reservation finished"
        );
        Ok(Booking {
            quote,
            request,
            response,
            outcome,
        })
    }
}
