use std::collections::BTreeMap;

use crate::{Area, Error, FuelType, Result};

mod fetch;
mod merge;
mod transform;
mod xml;

pub use fetch::{Fetcher, ENDPOINT};
pub use merge::merge;
pub use transform::{parse_date, transform};
pub use xml::parse_markers;

/// Anything that can list the stations in an area for one fuel type.
pub trait StationSource {
    fn fetch(&self, area: &Area, fuel: FuelType) -> Result<Vec<RawStation>>;
}

impl<F> StationSource for F
where
    F: Fn(&Area, FuelType) -> Result<Vec<RawStation>>,
{
    fn fetch(&self, area: &Area, fuel: FuelType) -> Result<Vec<RawStation>> {
        self(area, fuel)
    }
}

/// Attributes of one `<marker>` element, verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawStation {
    attributes: BTreeMap<String, String>,
}

impl FromIterator<(String, String)> for RawStation {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

impl RawStation {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|x| x.as_str())
    }

    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| {
            Error::parse(format!(
                "marker {} has no {key:?} attribute",
                self.get("url").unwrap_or("<no url>")
            ))
        })
    }

    /// The service flags stations without a usable price for the queried
    /// fuel with `priceless="1"`.
    pub fn is_priceless(&self) -> Result<bool> {
        Ok(self.require("priceless")? == "1")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FuelQuote {
    pub price: String,
    /// ISO `YYYY-MM-DD`
    pub updated: String,
}

/// One marker after normalisation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StationFields {
    pub url: String,
    pub lat: String,
    pub lng: String,
    pub chain: String,
    pub name: String,
    pub address: String,
    pub postcode: String,
    pub place: String,
    pub fuel: FuelType,
    pub quote: FuelQuote,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergedStation {
    pub url: String,
    pub lat: String,
    pub lng: String,
    pub chain: String,
    pub name: String,
    pub address: String,
    pub postcode: String,
    pub place: String,
    pub quotes: BTreeMap<FuelType, FuelQuote>,
}

impl MergedStation {
    /// Overwrites every display field and the quote for `fields.fuel`.
    /// Quotes for other fuels are left alone.
    pub fn apply(&mut self, fields: StationFields) {
        self.url = fields.url;
        self.lat = fields.lat;
        self.lng = fields.lng;
        self.chain = fields.chain;
        self.name = fields.name;
        self.address = fields.address;
        self.postcode = fields.postcode;
        self.place = fields.place;
        self.quotes.insert(fields.fuel, fields.quote);
    }

    pub fn price(&self, fuel: FuelType) -> &str {
        self.quotes.get(&fuel).map_or("", |x| x.price.as_str())
    }

    pub fn updated(&self, fuel: FuelType) -> &str {
        self.quotes.get(&fuel).map_or("", |x| x.updated.as_str())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RawStation;

    pub fn marker(url: &str, fuel: &str, lat: &str, lng: &str, price: &str) -> RawStation {
        [
            ("url", url),
            ("type", fuel),
            ("latitude", lat),
            ("longitude", lng),
            ("keten", "Tango"),
            ("naam", "Tango Centrum"),
            ("adres", "Stationsweg 1"),
            ("pc_cijfer", "1234"),
            ("pc_letter", "AB"),
            ("plaats", "UTRECHT"),
            ("prijs", price),
            ("datum", "5 maart 2020"),
            ("priceless", "0"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    pub fn priceless(url: &str, fuel: &str) -> RawStation {
        let mut x = marker(url, fuel, "52.0", "5.0", "0.000");
        x.attributes.insert("priceless".to_string(), "1".to_string());
        x
    }
}
