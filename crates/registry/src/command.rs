//! Write requests accepted by the registry.
//!
//! Fields arrive as the caller received them (raw document strings, plain
//! decimals); the registry validates before anything is stored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use agroreg_core::{CropId, FarmId, ProducerId};
use agroreg_land::{CropKind, StateCode};

/// Command: RegisterProducer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterProducer {
    pub producer_id: ProducerId,
    /// Raw CPF/CNPJ, formatted or bare digits.
    pub tax_id: String,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateProducer.
///
/// The tax id must identify the same document the producer was created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProducer {
    pub producer_id: ProducerId,
    pub tax_id: String,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RegisterFarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterFarm {
    pub farm_id: FarmId,
    pub producer_id: ProducerId,
    pub name: String,
    pub city: String,
    pub state: StateCode,
    pub total_area: Decimal,
    pub arable_area: Decimal,
    pub vegetation_area: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateFarm. Replaces every descriptive field and all three areas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFarm {
    pub farm_id: FarmId,
    pub name: String,
    pub city: String,
    pub state: StateCode,
    pub total_area: Decimal,
    pub arable_area: Decimal,
    pub vegetation_area: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddCrop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCrop {
    pub crop_id: CropId,
    pub farm_id: FarmId,
    pub kind: CropKind,
    pub season: String,
    pub occurred_at: DateTime<Utc>,
}
