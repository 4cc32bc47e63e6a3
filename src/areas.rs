use std::{fs::File, io::Read, path::Path};

use geo::Point;
use tracing::debug;

use crate::{Error, Result};

/// Coordinates are kept to this many decimal places.
const PRECISION: usize = 12;

/// A query rectangle. Points follow geo's `x = lng, y = lat`. The first corner
/// gives `bottom`/`left` and the second gives `top`/`right`; nothing checks
/// that they are in that relative position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Area {
    pub first: Point,
    pub second: Point,
}

impl Area {
    pub fn new(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Self {
        Self {
            first: Point::new(round(lng1), round(lat1)),
            second: Point::new(round(lng2), round(lat2)),
        }
    }

    /// Query parameters for the markers endpoint.
    pub fn bbox(&self) -> [(&'static str, f64); 4] {
        [
            ("left", self.first.x()),
            ("right", self.second.x()),
            ("bottom", self.first.y()),
            ("top", self.second.y()),
        ]
    }
}

/// Rounds on the exact decimal expansion, not on a scaled float.
fn round(x: f64) -> f64 {
    format!("{x:.PRECISION$}").parse().unwrap_or(x)
}

pub fn load(path: &Path) -> Result<Vec<Area>> {
    let file = File::open(path).map_err(|e| {
        Error::config(format!("Failed to open area list {}: {e}", path.display()))
    })?;
    let areas = read(&path.display().to_string(), file)?;
    debug!("Loaded {} areas from {}", areas.len(), path.display());
    Ok(areas)
}

/// Rows are `lat1,lng1,lat2,lng2` with no header. Extra columns are ignored.
pub fn read(name: &str, input: impl Read) -> Result<Vec<Area>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut areas = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::config(format!("{name}: {e}")))?;
        let line = record.position().map_or(0, |x| x.line());
        if record.len() < 4 {
            return Err(Error::config(format!(
                "{name}: line {line} has {} fields, expected 4",
                record.len()
            )));
        }

        let mut values = [0.0; 4];
        for (value, field) in values.iter_mut().zip(record.iter()) {
            *value = field.parse().map_err(|_| {
                Error::config(format!("{name}: line {line}: {field:?} is not a number"))
            })?;
        }
        let [lat1, lng1, lat2, lng2] = values;
        areas.push(Area::new(lat1, lng1, lat2, lng2));
    }

    Ok(areas)
}
