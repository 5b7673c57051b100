use chrono::{Duration, Local, NaiveDateTime};
use reqwest::Url;

use super::utils::{format_iso, format_summary_time, to_pretty_json, whole_days, DOCUMENT_INDENT};
use super::{Client, PlaatoError};

pub const DEFAULT_WINDOW_DAYS: i64 = 7;

const TEMPERATURE_UNIT: &str = "Celsius";
const DENSITY_UNIT: &str = "Plato";

/// Bounds of a readings query, in local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Fills in missing bounds: `start` becomes a week before now and `end`
    /// becomes now. Each missing bound reads `now` on its own, so a given
    /// `start` with a missing `end` is not forced into a week long window.
    /// `end` before `start` is passed on unchecked.
    pub fn resolve(
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        mut now: impl FnMut() -> NaiveDateTime,
    ) -> TimeWindow {
        let start = start.unwrap_or_else(|| now() - Duration::days(DEFAULT_WINDOW_DAYS));
        let end = end.unwrap_or_else(|| now());
        TimeWindow { start, end }
    }

    pub fn days(&self) -> i64 {
        whole_days(&self.start, &self.end)
    }

    fn summary(&self, device_id: &str) -> String {
        format!(
            "Fetching readings from device_id='{device_id}'\n{start} to {end} ({days} days):",
            start = format_summary_time(&self.start),
            end = format_summary_time(&self.end),
            days = self.days(),
        )
    }
}

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl Client {
    /// Fetches the readings of `device_id` between `start` and `end`, see
    /// [`TimeWindow::resolve`] for the defaults. Failures follow the readings
    /// [`FailurePolicy`](super::FailurePolicy), which propagates them by default.
    pub fn fetch_readings(
        &self,
        device_id: &str,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<String, PlaatoError> {
        let window = TimeWindow::resolve(start, end, local_now);
        self.fetch_readings_in(device_id, &window)
    }

    pub fn fetch_readings_in(
        &self,
        device_id: &str,
        window: &TimeWindow,
    ) -> Result<String, PlaatoError> {
        println!("{}", window.summary(device_id));

        let result = self
            .readings_url(device_id, window)
            .and_then(|url| self.get_json(url))
            .and_then(|readings| {
                to_pretty_json(&readings, DOCUMENT_INDENT).map_err(PlaatoError::from)
            });

        self.readings_policy
            .apply("readings data", result, || "[]".to_string())
    }

    fn readings_url(&self, device_id: &str, window: &TimeWindow) -> Result<Url, PlaatoError> {
        let mut url = self.endpoint(&["devices", device_id, "readings"])?;
        url.query_pairs_mut()
            .append_pair("temperatureUnit", TEMPERATURE_UNIT)
            .append_pair("densityUnit", DENSITY_UNIT)
            .append_pair("from", &format_iso(&window.start))
            .append_pair("to", &format_iso(&window.end));
        Ok(url)
    }
}
