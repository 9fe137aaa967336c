pub mod booking;
pub mod client;
pub mod constants;
mod credentials;
pub mod error;
pub mod profile;
pub mod rate;
pub mod reservation;
pub mod shape;
mod stay;
pub mod transcript;
mod util;

pub use client::{Client, RawResponse, SearchCall, SearchKind};
pub use credentials::Credentials;
pub use stay::{StayRequest, StayRequestBuilder, StayRequestBuilderError};
pub use util::default_http_client;
