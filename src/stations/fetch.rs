use tracing::debug;
use ureq::Agent;

use crate::{Area, Error, FuelType, Result};

use super::{xml::parse_markers, RawStation, StationSource};

pub const ENDPOINT: &str = "https://www.brandstof-zoeker.nl/getxml.fcgi";

// the endpoint only answers requests that look like they came from its map page
const HEADERS: [(&str, &str); 6] = [
    ("Connection", "keep-alive"),
    ("Accept", "application/xml, text/xml, */*; q=0.01"),
    ("X-Requested-With", "XMLHttpRequest"),
    ("Sec-Fetch-Mode", "cors"),
    ("Sec-Fetch-Site", "same-origin"),
    ("Referer", "https://www.brandstof-zoeker.nl/"),
];

pub struct Fetcher {
    agent: Agent,
    endpoint: String,
}

impl Fetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            agent: crate::agent(),
            endpoint: endpoint.into(),
        }
    }
}

impl StationSource for Fetcher {
    fn fetch(&self, area: &Area, fuel: FuelType) -> Result<Vec<RawStation>> {
        let mut request = self.agent.get(&self.endpoint);
        for (name, value) in HEADERS {
            request = request.set(name, value);
        }
        for (name, value) in area.bbox() {
            request = request.query(name, &value.to_string());
        }
        request = request.query("type", fuel.label());

        let url = request.url().to_string();
        debug!("GET {url}");

        let response = request.call().map_err(|e| match e {
            ureq::Error::Status(status, _) => {
                Error::fetch(&url, format!("server responded with status {status}"))
            }
            ureq::Error::Transport(e) => Error::fetch(&url, e.to_string()),
        })?;
        let body = response
            .into_string()
            .map_err(|e| Error::fetch(&url, format!("failed to read body: {e}")))?;

        let markers = parse_markers(&body)?;
        debug!("{} {fuel} markers in {area:?}", markers.len());
        Ok(markers)
    }
}
