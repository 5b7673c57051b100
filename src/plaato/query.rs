use core::time::Duration;
use reqwest::blocking::Client as HttpClient;
use reqwest::Url;
use serde_json::Value;

use super::{FailurePolicy, PlaatoError};
use crate::config::Config;

pub const API_KEY_HEADER: &str = "x-plaato-api-key";

/// Blocking transport shared by the device and readings queries.
pub struct Client {
    http: HttpClient,
    base_url: Url,
    api_key: String,
    pub(super) devices_policy: FailurePolicy,
    pub(super) readings_policy: FailurePolicy,
}

impl Client {
    pub fn new(config: &Config) -> Result<Self, PlaatoError> {
        let invalid = |reason: String| PlaatoError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason,
        };
        let base_url = Url::parse(&config.base_url).map_err(|err| invalid(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("url cannot take a path".to_string()));
        }

        // No timeout unless configured, reqwest's default applies otherwise.
        let mut builder = HttpClient::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(PlaatoError::Client)?;

        if config.api_key.is_empty() {
            tracing::warn!("no API key configured, requests will carry an empty {API_KEY_HEADER} header");
        }

        Ok(Client {
            http,
            base_url,
            api_key: config.api_key.clone(),
            devices_policy: config.devices_policy,
            readings_policy: config.readings_policy,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    ///
    /// `.` and `..` are refused: url parsers resolve them (even as `%2E`)
    /// instead of keeping them as a segment.
    pub(super) fn endpoint(&self, segments: &[&str]) -> Result<Url, PlaatoError> {
        if let Some(dots) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(PlaatoError::InvalidPathSegment(dots.to_string()));
        }
        let mut url = self.base_url.clone();
        // `new` rejected cannot-be-a-base urls, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    pub(super) fn get_json(&self, url: Url) -> Result<Value, PlaatoError> {
        tracing::debug!(%url, "sending request");
        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .send()
            .map_err(PlaatoError::Request)?;
        tracing::debug!(status = %response.status(), "response received");

        let text = response.text().map_err(PlaatoError::Request)?;
        Ok(serde_json::from_str::<Value>(&text)?)
    }
}
