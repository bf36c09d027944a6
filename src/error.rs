//! Error types for the Tekniska verken portal exporter.
//!
//! The portal is an informal HTML/JSON hybrid, so most failure modes are
//! about the portal's responses rather than the transport: a rejected login,
//! a service missing from the account, or a response body whose shape does
//! not match what the export API usually returns.

use thiserror::Error;

/// Result type alias using our custom error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type for all portal operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The login response contained the portal's failure marker.
    #[error("login failed, the portal rejected the credentials")]
    LoginFailed,

    /// Login succeeded but the account page listed no services at all.
    #[error("no services were found on the account page after login")]
    NoServicesFound,

    /// The requested service is not among the account's discovered services.
    #[error("service '{requested}' is not available for this account, known services are: {known}")]
    ServiceUnavailable { requested: String, known: String },

    /// The export endpoint returned HTTP 404.
    #[error("export endpoint not found (404), likely caused by a failed login or a wrong endpoint")]
    EndpointNotFound,

    /// The response body could not be decoded.
    #[error("failed to decode portal response")]
    Decode(#[from] DecodeError),

    /// Transport-level failure from the HTTP layer.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Decoding errors for the export API's JSON bodies.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The body was not valid JSON or did not match the expected records.
    #[error("failed to parse JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// A record's date fields do not form a valid calendar date.
    #[error("invalid calendar date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// A yearly response contained more than one series where exactly one was expected.
    #[error("expected exactly one series in the yearly response, found {keys:?}")]
    AmbiguousSeries { keys: Vec<String> },

    /// A yearly district-heating response was missing the selected series label.
    #[error("series '{label}' is missing from the yearly response")]
    MissingSeries { label: String },
}

impl Error {
    /// Creates a service-unavailable error from the requested name and the
    /// known service names.
    pub fn service_unavailable(
        requested: impl Into<String>,
        known: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::ServiceUnavailable {
            requested: requested.into(),
            known: known
                .into_iter()
                .map(Into::into)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl DecodeError {
    /// Creates an invalid-date error from raw record fields.
    pub fn invalid_date(year: i32, month: u32, day: u32) -> Self {
        Self::InvalidDate { year, month, day }
    }

    /// Creates a missing-series error.
    pub fn missing_series(label: impl Into<String>) -> Self {
        Self::MissingSeries {
            label: label.into(),
        }
    }
}
