//! Land domain module (farm parcels, crop entries and the dashboard summary).
//!
//! Holds the area-consistency rule for a single parcel and the reduction of
//! parcel/crop collections into summary statistics. Everything here is a pure
//! function over plain records (no IO, no storage).

pub mod area;
pub mod crop;
pub mod parcel;
pub mod state;
pub mod summary;

pub use area::{AreaBreakdown, Hectares, check_area_invariant};
pub use crop::{Crop, CropKind, HarvestSeason};
pub use parcel::LandParcel;
pub use state::StateCode;
pub use summary::{DashboardSummary, LandUse, summarize};
