use std::collections::BTreeMap;

use tracing::debug;

use crate::Result;

use super::{transform, MergedStation, RawStation};

/// Drops priceless markers and folds the rest into one station per url.
///
/// Markers are applied in iteration order and the last one wins for any field
/// it sets. When overlapping areas report different values for the same
/// station and fuel, the area listed later in the area file therefore wins.
pub fn merge<I>(records: I) -> Result<Vec<MergedStation>>
where
    I: IntoIterator<Item = RawStation>,
{
    let mut stations: BTreeMap<String, MergedStation> = BTreeMap::new();
    let mut priceless = 0;

    for record in records {
        if record.is_priceless()? {
            priceless += 1;
            continue;
        }

        let fields = transform(&record)?;
        stations
            .entry(fields.url.clone())
            .or_default()
            .apply(fields);
    }

    debug!(
        "Merged into {} stations, skipped {priceless} priceless markers",
        stations.len()
    );
    Ok(stations.into_values().collect())
}
