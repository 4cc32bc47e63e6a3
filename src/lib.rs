//! Polls brandstof-zoeker.nl for diesel and Euro 95 prices over a list of
//! areas, merges the stations by url and writes CSV snapshots.

use ureq::{Agent, AgentBuilder};

pub mod areas;
pub mod error;
pub mod fuel;
pub mod schedule;
pub mod snapshot;
pub mod stations;
pub mod utils;

pub use areas::Area;
pub use error::{Error, Result};
pub use fuel::FuelType;
pub use snapshot::Snapshot;
pub use stations::{MergedStation, RawStation, StationSource};

pub fn agent() -> Agent {
    AgentBuilder::new()
        .user_agent(concat!("fuel-prices/", env!("CARGO_PKG_VERSION")))
        .build()
}
