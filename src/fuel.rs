use core::fmt;
use std::str::FromStr;

use crate::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FuelType {
    Euro95,
    Diesel,
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Accepts the `type` attribute the service puts on each marker. Spaces are
/// dropped and case is ignored, so "Euro 95" and "euro95" are the same.
impl FromStr for FuelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.replace(' ', "").to_lowercase().as_str() {
            "euro95" => Self::Euro95,
            "diesel" => Self::Diesel,
            _ => return Err(Error::parse(format!("Unknown fuel type: {s:?}"))),
        })
    }
}

impl FuelType {
    /// In request order: Euro 95 is queried before Diesel for every area.
    pub fn all() -> [Self; 2] {
        [FuelType::Euro95, FuelType::Diesel]
    }

    /// Value of the `type` query parameter.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Euro95 => "Euro 95",
            Self::Diesel => "Diesel",
        }
    }

    pub const fn price_column(&self) -> &'static str {
        match self {
            Self::Euro95 => "price_euro95",
            Self::Diesel => "price_diesel",
        }
    }

    pub const fn updated_column(&self) -> &'static str {
        match self {
            Self::Euro95 => "updated_euro95",
            Self::Diesel => "updated_diesel",
        }
    }
}
