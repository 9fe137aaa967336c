use std::time::Duration;

/// The HTTP client the CLI uses unless told otherwise.
pub fn default_http_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
    let builder = reqwest::Client::builder().gzip(true).brotli(true);
    match timeout {
        Some(timeout) => builder.timeout(timeout).build(),
        None => builder.build(),
    }
}
