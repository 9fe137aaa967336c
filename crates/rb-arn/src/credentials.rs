use std::fmt;

use reqwest::RequestBuilder;

use crate::constants::*;

/// Site credentials issued by the hotel API.
#[derive(Clone)]
pub struct Credentials {
    site_id: String,
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(site_id: &str, username: &str, password: &str) -> Self {
        Self {
            site_id: site_id.to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Attach the site headers and HTTP Basic auth every endpoint requires.
    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(SITE_ID_HEADER, &self.site_id)
            .header(USERNAME_HEADER, &self.username)
            .header(PASSWORD_HEADER, &self.password)
            .header(API_VERSION_HEADER, API_VERSION)
            .basic_auth(&self.username, Some(&self.password))
    }

    /// The headers sent by [`Credentials::authorize`] with secrets masked,
    /// for transcripts.
    pub fn redacted_headers(&self) -> Vec<(&'static str, String)> {
        vec![
            (SITE_ID_HEADER, self.site_id.clone()),
            (USERNAME_HEADER, self.username.clone()),
            (PASSWORD_HEADER, "********".to_string()),
            (API_VERSION_HEADER, API_VERSION.to_string()),
            ("Authorization", "Basic ********".to_string()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("site_id", &self.site_id)
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}
