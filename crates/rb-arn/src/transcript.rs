use std::path::Path;

use reqwest::Url;
use serde_json::Value;
use tracing::info;

use crate::{
    client::{RawResponse, SearchCall},
    constants::RESPONSE_FORMAT,
    error::SaveError,
    reservation::ReservationRequest,
    Credentials,
};

const MASKED_FIELDS: [&str; 2] = ["creditCardNumber", "creditCardCVV2"];

/// Directory reservation transcripts are filed under.
pub const RESERVATION_LABEL: &str = "ReservationCreation";

/// A request and its response rendered as text, for keeping a record of
/// what was actually sent to the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exchange {
    /// Endpoint the exchange is filed under.
    pub label: &'static str,
    pub status: u16,
    pub request: String,
    pub response: String,
}

impl Exchange {
    pub fn reservation(
        endpoint: &Url,
        credentials: &Credentials,
        request: &ReservationRequest,
        response: &RawResponse,
    ) -> Self {
        let mut url = endpoint.clone();
        url.query_pairs_mut()
            .append_pair("type", "reservation")
            .append_pair("siteid", credentials.site_id())
            .append_pair("_type", RESPONSE_FORMAT);

        let mut lines = request_head("POST", &url, credentials);
        lines.push(String::new());
        lines.extend(request.fields().map(|(key, value)| {
            if MASKED_FIELDS.contains(&key) && !value.is_empty() {
                format!("{key}={}", mask(value))
            } else {
                format!("{key}={value}")
            }
        }));

        Self {
            label: RESERVATION_LABEL,
            status: response.status,
            request: lines.join("\n"),
            response: render_response(response),
        }
    }

    /// A GET search, query string included.
    pub fn search(credentials: &Credentials, call: &SearchCall) -> Self {
        Self {
            label: call.kind.label(),
            status: call.response.status,
            request: request_head("GET", &call.url, credentials).join("\n"),
            response: render_response(&call.response),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Write `<label>/<name>_Req.txt` and the response under `dir`. The
    /// response goes to `<name>_Res.txt`, or `<name>_Res_Error.txt` when the
    /// call did not succeed.
    pub async fn save<P: AsRef<Path>>(&self, dir: P, name: &str) -> Result<(), SaveError> {
        let dir = dir.as_ref().join(self.label);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| SaveError::CreateDirError(dir.display().to_string(), e))?;
        let request_path = dir.join(format!("{name}_Req.txt"));
        let response_path = if self.is_success() {
            dir.join(format!("{name}_Res.txt"))
        } else {
            dir.join(format!("{name}_Res_Error.txt"))
        };
        let files = [
            (&request_path, &self.request),
            (&response_path, &self.response),
        ];
        for (path, contents) in files {
            tokio::fs::write(path, contents)
                .await
                .map_err(|e| SaveError::WriteError(path.display().to_string(), e))?;
        }
        info!(
            request = %request_path.display(),
            response = %response_path.display(),
            "transcript saved"
        );
        Ok(())
    }
}

fn request_head(method: &str, url: &Url, credentials: &Credentials) -> Vec<String> {
    let mut lines = vec![format!("{method} {url} HTTP/1.1")];
    lines.extend(
        credentials
            .redacted_headers()
            .into_iter()
            .map(|(name, value)| format!("{name}: {value}")),
    );
    lines
}

fn mask(value: &str) -> String {
    let tail = value.len().saturating_sub(4);
    match value.get(tail..) {
        Some(last_four) if tail > 0 => format!("{}{last_four}", "*".repeat(tail)),
        _ => "*".repeat(value.len()),
    }
}

fn render_response(response: &RawResponse) -> String {
    let body = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|document| serde_json::to_string_pretty(&document).ok())
        .unwrap_or_else(|| response.body.clone());
    format!("Status Code: {}\n\n{body}", response.status)
}
