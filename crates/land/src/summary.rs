//! Dashboard summary over parcel and crop records.
//!
//! A single pass over each collection. Counts are exact and area sums use
//! decimal arithmetic; ordering of the distribution maps carries no meaning.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use agroreg_core::ValueObject;

use crate::area::Hectares;
use crate::crop::{Crop, CropKind};
use crate::parcel::LandParcel;
use crate::state::StateCode;

/// Land use totals across parcels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandUse {
    pub arable: Hectares,
    pub vegetation: Hectares,
}

impl ValueObject for LandUse {}

/// Summary statistics for the reporting view.
///
/// Field names on the wire follow the dashboard contract (`total_farms`,
/// `total_hectares`, `total_cultures`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(rename = "total_farms")]
    pub total_parcels: usize,
    #[serde(rename = "total_hectares")]
    pub total_area: Hectares,
    pub total_producers: usize,
    #[serde(rename = "total_cultures")]
    pub total_crops: usize,
    pub state_distribution: BTreeMap<StateCode, usize>,
    pub culture_distribution: BTreeMap<CropKind, usize>,
    pub land_use: LandUse,
}

impl DashboardSummary {
    /// Replace the producer count derived from parcels with one the caller
    /// supplies (e.g. to include producers that own no farm yet).
    pub fn with_total_producers(mut self, total_producers: usize) -> Self {
        self.total_producers = total_producers;
        self
    }

    /// State counts, largest first; ties ordered by code.
    pub fn states_by_count(&self) -> Vec<(StateCode, usize)> {
        by_count_desc(&self.state_distribution)
    }

    /// Crop counts, largest first; ties ordered by code.
    pub fn cultures_by_count(&self) -> Vec<(CropKind, usize)> {
        by_count_desc(&self.culture_distribution)
    }
}

fn by_count_desc<K: Copy + Ord>(map: &BTreeMap<K, usize>) -> Vec<(K, usize)> {
    let mut entries: Vec<(K, usize)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    entries
}

/// Reduce parcels and crop entries into a [`DashboardSummary`].
///
/// `total_producers` counts distinct owners referenced by `parcels`. Empty
/// input yields zero counts, zero areas and empty maps.
pub fn summarize<'a, P, C>(parcels: P, crops: C) -> DashboardSummary
where
    P: IntoIterator<Item = &'a LandParcel>,
    C: IntoIterator<Item = &'a Crop>,
{
    let mut summary = DashboardSummary::default();
    let mut producers = BTreeSet::new();

    for parcel in parcels {
        summary.total_parcels += 1;
        summary.total_area = summary.total_area + parcel.total_area();
        summary.land_use.arable = summary.land_use.arable + parcel.arable_area();
        summary.land_use.vegetation = summary.land_use.vegetation + parcel.vegetation_area();
        *summary.state_distribution.entry(parcel.state()).or_insert(0) += 1;
        producers.insert(parcel.producer_id());
    }

    for crop in crops {
        summary.total_crops += 1;
        *summary.culture_distribution.entry(crop.kind()).or_insert(0) += 1;
    }

    summary.total_producers = producers.len();
    summary
}
