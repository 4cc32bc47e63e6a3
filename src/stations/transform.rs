use chrono::NaiveDate;

use crate::{utils::capitalize, Error, FuelType, Result};

use super::{FuelQuote, RawStation, StationFields};

const MONTHS: [&str; 12] = [
    "januari",
    "februari",
    "maart",
    "april",
    "mei",
    "juni",
    "juli",
    "augustus",
    "september",
    "oktober",
    "november",
    "december",
];

pub fn transform(raw: &RawStation) -> Result<StationFields> {
    let fuel: FuelType = raw.require("type")?.parse()?;
    let url = raw.require("url")?;
    let updated = parse_date(raw.require("datum")?).map_err(|e| match e {
        Error::Parse { message } => Error::parse(format!("{url}: {message}")),
        e => e,
    })?;

    Ok(StationFields {
        url: url.to_string(),
        lat: raw.require("latitude")?.to_string(),
        lng: raw.require("longitude")?.to_string(),
        chain: raw.require("keten")?.to_string(),
        name: raw.require("naam")?.to_string(),
        address: raw.require("adres")?.to_string(),
        postcode: format!("{}{}", raw.require("pc_cijfer")?, raw.require("pc_letter")?),
        place: capitalize(raw.require("plaats")?),
        fuel,
        quote: FuelQuote {
            price: raw.require("prijs")?.to_string(),
            updated: updated.format("%Y-%m-%d").to_string(),
        },
    })
}

/// Parses "5 maart 2020" style dates.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    let tokens: Vec<_> = date.split_whitespace().collect();
    let &[day, month, year] = tokens.as_slice() else {
        return Err(Error::parse(format!("expected \"day month year\", got {date:?}")));
    };

    let month = MONTHS
        .iter()
        .position(|x| *x == month)
        .ok_or_else(|| Error::parse(format!("unknown month {month:?} in {date:?}")))?;
    let day: u32 = day
        .parse()
        .map_err(|_| Error::parse(format!("bad day in {date:?}")))?;
    let year: i32 = year
        .parse()
        .map_err(|_| Error::parse(format!("bad year in {date:?}")))?;

    NaiveDate::from_ymd_opt(year, month as u32 + 1, day)
        .ok_or_else(|| Error::parse(format!("no such date: {date:?}")))
}
