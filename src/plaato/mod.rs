//! Client for the Plaato cloud API (https://api.plaato.cloud/): device listing
//! and per-device fermentation readings.
mod devices;
mod query;
mod readings;
mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use devices::Listing;
pub use query::Client;

#[derive(Debug, thiserror::Error)]
pub enum PlaatoError {
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("'{0}' cannot be sent as a url path segment")]
    InvalidPathSegment(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("failed to decode response JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// What an operation does with a transport or decode failure.
///
/// Devices are listed with `Swallow` and readings are fetched with `Propagate`
/// unless the [`Config`](crate::config::Config) says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and hand back an empty result.
    Swallow,
    /// Return the failure to the caller.
    Propagate,
}

impl FailurePolicy {
    pub(crate) fn apply<T>(
        self,
        what: &str,
        result: Result<T, PlaatoError>,
        fallback: impl FnOnce() -> T,
    ) -> Result<T, PlaatoError> {
        match (self, result) {
            (_, Ok(value)) => Ok(value),
            (FailurePolicy::Swallow, Err(err)) => {
                tracing::error!("Error fetching {what}: {err}");
                Ok(fallback())
            }
            (FailurePolicy::Propagate, Err(err)) => Err(err),
        }
    }
}
