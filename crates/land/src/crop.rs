//! Crop entries grown on a parcel in a harvest season.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use agroreg_core::{CropId, DomainError, DomainResult, Entity, FarmId, ValueObject};

/// Longest harvest-season label accepted, in characters.
pub const MAX_SEASON_LEN: usize = 20;

/// Crop types a parcel may grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CropKind {
    Soja,
    Milho,
    Algodao,
    Cafe,
    Cana,
    Arroz,
    Feijao,
    Trigo,
    Outros,
}

impl CropKind {
    pub const ALL: [CropKind; 9] = [
        CropKind::Soja,
        CropKind::Milho,
        CropKind::Algodao,
        CropKind::Cafe,
        CropKind::Cana,
        CropKind::Arroz,
        CropKind::Feijao,
        CropKind::Trigo,
        CropKind::Outros,
    ];

    pub fn code(self) -> &'static str {
        match self {
            CropKind::Soja => "SOJA",
            CropKind::Milho => "MILHO",
            CropKind::Algodao => "ALGODAO",
            CropKind::Cafe => "CAFE",
            CropKind::Cana => "CANA",
            CropKind::Arroz => "ARROZ",
            CropKind::Feijao => "FEIJAO",
            CropKind::Trigo => "TRIGO",
            CropKind::Outros => "OUTROS",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CropKind::Soja => "Soja",
            CropKind::Milho => "Milho",
            CropKind::Algodao => "Algodão",
            CropKind::Cafe => "Café",
            CropKind::Cana => "Cana-de-açúcar",
            CropKind::Arroz => "Arroz",
            CropKind::Feijao => "Feijão",
            CropKind::Trigo => "Trigo",
            CropKind::Outros => "Outros",
        }
    }
}

impl core::fmt::Display for CropKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CropKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CropKind::ALL
            .into_iter()
            .find(|kind| kind.code() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown crop '{s}'")))
    }
}

/// Free-form harvest-season label (e.g. `Safra 2024`), trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HarvestSeason(String);

impl ValueObject for HarvestSeason {}

impl HarvestSeason {
    pub fn new(label: impl AsRef<str>) -> DomainResult<Self> {
        let label = label.as_ref().trim();
        if label.is_empty() {
            return Err(DomainError::validation("harvest season cannot be empty"));
        }
        if label.chars().count() > MAX_SEASON_LEN {
            return Err(DomainError::validation(format!(
                "harvest season cannot exceed {MAX_SEASON_LEN} characters"
            )));
        }
        Ok(Self(label.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for HarvestSeason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HarvestSeason {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HarvestSeason> for String {
    fn from(value: HarvestSeason) -> Self {
        value.0
    }
}

/// A crop grown on one parcel in one season.
///
/// `(farm_id, kind, season)` identifies the entry for uniqueness purposes;
/// the record layer enforces that no two entries share it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    id: CropId,
    farm_id: FarmId,
    kind: CropKind,
    season: HarvestSeason,
}

impl Crop {
    pub fn new(id: CropId, farm_id: FarmId, kind: CropKind, season: HarvestSeason) -> Self {
        Self {
            id,
            farm_id,
            kind,
            season,
        }
    }

    pub fn farm_id(&self) -> FarmId {
        self.farm_id
    }

    pub fn kind(&self) -> CropKind {
        self.kind
    }

    pub fn season(&self) -> &HarvestSeason {
        &self.season
    }

    /// Whether an entry for `kind` in `season` on `farm_id` would collide with this one.
    pub fn same_slot(&self, farm_id: FarmId, kind: CropKind, season: &HarvestSeason) -> bool {
        self.farm_id == farm_id && self.kind == kind && &self.season == season
    }
}

impl Entity for Crop {
    type Id = CropId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
