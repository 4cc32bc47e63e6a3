use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::Serialize;
use tracing::info;

use crate::{Error, FuelType, MergedStation, Result};

pub const HEADER: [&str; 12] = [
    "lat",
    "lng",
    FuelType::Diesel.price_column(),
    FuelType::Euro95.price_column(),
    "url",
    "name",
    "chain",
    "address",
    "postcode",
    "place",
    FuelType::Diesel.updated_column(),
    FuelType::Euro95.updated_column(),
];

pub const LATEST: &str = "stations.csv";

/// Field order must match `HEADER`.
#[derive(Serialize)]
struct Row<'a> {
    lat: &'a str,
    lng: &'a str,
    price_diesel: &'a str,
    price_euro95: &'a str,
    url: &'a str,
    name: &'a str,
    chain: &'a str,
    address: &'a str,
    postcode: &'a str,
    place: &'a str,
    updated_diesel: &'a str,
    updated_euro95: &'a str,
}

impl<'a> From<&'a MergedStation> for Row<'a> {
    fn from(x: &'a MergedStation) -> Self {
        Row {
            lat: &x.lat,
            lng: &x.lng,
            price_diesel: x.price(FuelType::Diesel),
            price_euro95: x.price(FuelType::Euro95),
            url: &x.url,
            name: &x.name,
            chain: &x.chain,
            address: &x.address,
            postcode: &x.postcode,
            place: &x.place,
            updated_diesel: x.updated(FuelType::Diesel),
            updated_euro95: x.updated(FuelType::Euro95),
        }
    }
}

#[derive(Debug, Default)]
pub struct Snapshot {
    stations: Vec<MergedStation>,
}

impl Snapshot {
    /// Sorts by latitude, longitude and url, comparing the strings as given by
    /// the service.
    pub fn new(stations: Vec<MergedStation>) -> Self {
        let stations = stations
            .into_iter()
            .sorted_by(|a, b| (&a.lat, &a.lng, &a.url).cmp(&(&b.lat, &b.lng, &b.url)))
            .collect();
        Self { stations }
    }

    pub fn stations(&self) -> &[MergedStation] {
        &self.stations
    }

    pub fn write_csv(&self, writer: impl io::Write) -> csv::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(writer);

        writer.write_record(HEADER)?;
        for station in &self.stations {
            writer.serialize(Row::from(station))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the archive copy and the latest copy, replacing either if it
    /// exists. Returns both paths, archive first.
    pub fn save(&self, dir: &Path, timestamp: NaiveDateTime) -> Result<[PathBuf; 2]> {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

        let archive = dir.join(archive_name(timestamp));
        let latest = dir.join(LATEST);
        for path in [&archive, &latest] {
            self.write_file(path)?;
        }

        info!(
            "Wrote {} stations to {}",
            self.stations.len(),
            archive.display()
        );
        Ok([archive, latest])
    }

    fn write_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        self.write_csv(BufWriter::new(file))
            .map_err(|e| Error::io(path, e.into()))
    }
}

pub fn archive_name(timestamp: NaiveDateTime) -> String {
    format!("{}_stations.csv", timestamp.format("%Y_%m_%d__%H_%M"))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use crate::stations::FuelQuote;

    use super::*;

    fn station(url: &str, lat: &str, lng: &str, quotes: &[(FuelType, &str)]) -> MergedStation {
        MergedStation {
            url: url.to_string(),
            lat: lat.to_string(),
            lng: lng.to_string(),
            chain: "Shell".to_string(),
            name: "Shell Ring".to_string(),
            address: "Ringweg 2, Noord".to_string(),
            postcode: "3500AA".to_string(),
            place: "Utrecht".to_string(),
            quotes: quotes
                .iter()
                .map(|(fuel, price)| {
                    (
                        *fuel,
                        FuelQuote {
                            price: price.to_string(),
                            updated: "2020-03-05".to_string(),
                        },
                    )
                })
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 59)
            .unwrap()
    }

    fn render(snapshot: &Snapshot) -> String {
        let mut out = Vec::new();
        snapshot.write_csv(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn header_order() {
        assert_eq!(
            HEADER.join(","),
            "lat,lng,price_diesel,price_euro95,url,name,chain,address,postcode,place,updated_diesel,updated_euro95"
        );
    }

    #[test]
    fn sort_order() {
        let snapshot = Snapshot::new(vec![
            station("/b", "52.1", "5.0", &[]),
            station("/a", "52.1", "5.0", &[]),
            station("/c", "52.1", "4.9", &[]),
            station("/d", "51.9", "5.5", &[]),
        ]);
        let urls: Vec<_> = snapshot.stations().iter().map(|x| x.url.as_str()).collect();
        assert_eq!(urls, ["/d", "/c", "/a", "/b"]);
    }

    #[test]
    fn rows_and_empty_cells() {
        let snapshot = Snapshot::new(vec![station(
            "/station/1",
            "52.0",
            "5.0",
            &[(FuelType::Euro95, "1.899")],
        )]);

        assert_eq!(
            render(&snapshot),
            "lat,lng,price_diesel,price_euro95,url,name,chain,address,postcode,place,updated_diesel,updated_euro95\r\n\
             52.0,5.0,,1.899,/station/1,Shell Ring,Shell,\"Ringweg 2, Noord\",3500AA,Utrecht,,2020-03-05\r\n"
        );
    }

    #[test]
    fn header_only_when_empty() {
        assert_eq!(render(&Snapshot::default()), format!("{}\r\n", HEADER.join(",")));
    }

    #[test]
    fn archive_name_has_minutes() {
        assert_eq!(archive_name(timestamp()), "2020_03_05__14_07_stations.csv");
    }

    #[test]
    fn save_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("data");
        let snapshot = Snapshot::new(vec![
            station("/station/1", "52.0", "5.0", &[(FuelType::Diesel, "1.599")]),
            station("/station/2", "51.0", "4.0", &[(FuelType::Euro95, "1.899")]),
        ]);

        let [archive, latest] = snapshot.save(&output, timestamp()).unwrap();
        let first = fs::read(&latest).unwrap();
        assert_eq!(fs::read(&archive).unwrap(), first);

        snapshot.save(&output, timestamp()).unwrap();
        assert_eq!(fs::read(&latest).unwrap(), first);
        assert_eq!(fs::read_dir(&output).unwrap().count(), 2);
    }
}
