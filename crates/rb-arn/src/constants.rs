/// The default endpoint for the ARN hotel service
pub const DEFAULT_HOTEL_SERVICE_URL: &str = "https://api.travsrv.com/api/hotel";

/// City and airport lookups live next to the hotel endpoint
pub const WIDGET_PATH: &str = "widget";

/// Headers carrying the site credentials on every request
pub const SITE_ID_HEADER: &str = "Site-Id";
pub const USERNAME_HEADER: &str = "API-ClientUsername";
pub const PASSWORD_HEADER: &str = "API-ClientPassword";

/// The API only answers with the v2 JSON document layout when asked for it
pub const API_VERSION_HEADER: &str = "Accept-version";
pub const API_VERSION: &str = "2";

/// Value of the `_type` parameter sent with every call
pub const RESPONSE_FORMAT: &str = "json";

/// Stand-in for display-only values the API left out
pub const PLACEHOLDER: &str = "N/A";

/// Currency assumed for a booking fee that does not name one
pub const DEFAULT_BOOKING_FEE_CURRENCY: &str = "USD";
