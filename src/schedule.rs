use std::{
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use chrono::Local;
use indicatif::ProgressIterator;
use tracing::info;

use crate::{
    areas::{self, Area},
    stations::merge,
    utils::progress_style,
    FuelType, RawStation, Result, Snapshot, StationSource,
};

#[derive(Clone, Debug)]
pub struct Settings {
    pub areas: PathBuf,
    pub output: PathBuf,
    pub cycles: u32,
    pub wait: Duration,
}

/// Runs `settings.cycles` cycles back to back, sleeping in between. The first
/// error ends the run.
pub fn run(settings: &Settings, source: &impl StationSource) -> Result<()> {
    for cycle in 0..settings.cycles {
        if cycle > 0 {
            info!("waiting {} minutes...", settings.wait.as_secs_f64() / 60.0);
            thread::sleep(settings.wait);
        }
        run_cycle(settings, source)?;
    }

    Ok(())
}

pub fn run_cycle(settings: &Settings, source: &impl StationSource) -> Result<Snapshot> {
    info!("Fetching at {}...", Local::now().format("%H:%M:%S"));
    let start = Instant::now();

    // reread every cycle so the list can be edited while the process runs
    let areas = areas::load(&settings.areas)?;
    let records = fetch_all(source, &areas)?;
    let snapshot = Snapshot::new(merge(records)?);
    snapshot.save(&settings.output, Local::now().naive_local())?;

    info!(
        "{} stations from {} areas in {} seconds",
        snapshot.stations().len(),
        areas.len(),
        start.elapsed().as_secs()
    );
    Ok(snapshot)
}

fn fetch_all(source: &impl StationSource, areas: &[Area]) -> Result<Vec<RawStation>> {
    let mut records = Vec::new();
    for area in areas.iter().progress_with_style(progress_style()) {
        for fuel in FuelType::all() {
            records.extend(source.fetch(area, fuel)?);
        }
    }
    Ok(records)
}
