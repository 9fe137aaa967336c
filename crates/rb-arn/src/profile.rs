use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::LoadError,
    reservation::{GuestInfo, PaymentInfo, ReservationExtras},
};

/// Who is booking and how they pay, kept in a JSON file next to the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingProfile {
    pub guest: GuestInfo,
    pub payment: PaymentInfo,
    #[serde(default)]
    pub extras: ReservationExtras,
}

impl BookingProfile {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file_contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LoadError::ReadError(path.display().to_string(), e))?;
        serde_json::from_str(file_contents.as_str())
            .map_err(|e| LoadError::ParseError(path.display().to_string(), e))
    }
}
