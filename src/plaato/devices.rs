use serde::Deserialize;
use serde_json::{value::from_value, Value};

use super::utils::{sorted_keys, to_pretty_json, DOCUMENT_INDENT, RAW_INDENT};
use super::{Client, PlaatoError};

/// Only the id of a device is interpreted, everything else is passed through.
#[derive(Deserialize, Debug)]
struct Device {
    id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// Device ids in the order the service returned them.
    Ids(Vec<String>),
    /// The whole devices document, pretty printed.
    Document(String),
}

impl Listing {
    /// True when the service returned no devices, in either shape.
    pub fn is_empty(&self) -> bool {
        match self {
            Listing::Ids(ids) => ids.is_empty(),
            Listing::Document(document) => document.trim() == "[]",
        }
    }

    pub fn first_id(&self) -> Option<&str> {
        match self {
            Listing::Ids(ids) => ids.first().map(String::as_str),
            Listing::Document(_) => None,
        }
    }
}

fn parse_listing(devices: Value, ids_only: bool) -> Result<Listing, PlaatoError> {
    if ids_only {
        let devices = from_value::<Vec<Device>>(devices)?;
        return Ok(Listing::Ids(devices.into_iter().map(|device| device.id).collect()));
    }
    Ok(Listing::Document(to_pretty_json(&devices, DOCUMENT_INDENT)?))
}

impl Client {
    /// Lists every device registered to the API key.
    ///
    /// With `include_raw_output` the full response is printed with sorted keys,
    /// whatever shape is returned. Failures follow the devices
    /// [`FailurePolicy`](super::FailurePolicy), which swallows them into an
    /// empty `Listing::Ids` by default.
    pub fn list_devices(
        &self,
        include_raw_output: bool,
        ids_only: bool,
    ) -> Result<Listing, PlaatoError> {
        println!("Fetching all devices data from {}...", self.base_url());

        let result = self
            .endpoint(&["devices"])
            .and_then(|url| self.get_json(url))
            .and_then(|devices| {
                if include_raw_output {
                    println!("{}", to_pretty_json(&sorted_keys(&devices), RAW_INDENT)?);
                }
                parse_listing(devices, ids_only)
            });

        self.devices_policy
            .apply("devices data", result, || Listing::Ids(Vec::new()))
    }
}
