use serde::{Deserialize, Serialize};

use agroreg_core::{DomainError, DomainResult, Entity, FarmId, ProducerId};

use crate::area::{AreaBreakdown, Hectares};
use crate::state::StateCode;

/// A farm: a bounded piece of land owned by one producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandParcel {
    id: FarmId,
    producer_id: ProducerId,
    name: String,
    city: String,
    state: StateCode,
    areas: AreaBreakdown,
}

impl LandParcel {
    pub fn new(
        id: FarmId,
        producer_id: ProducerId,
        name: impl Into<String>,
        city: impl Into<String>,
        state: StateCode,
        areas: AreaBreakdown,
    ) -> DomainResult<Self> {
        let name = name.into();
        let city = city.into();
        ensure_not_blank("name", &name)?;
        ensure_not_blank("city", &city)?;

        Ok(Self {
            id,
            producer_id,
            name,
            city,
            state,
            areas,
        })
    }

    pub fn producer_id(&self) -> ProducerId {
        self.producer_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> StateCode {
        self.state
    }

    pub fn areas(&self) -> &AreaBreakdown {
        &self.areas
    }

    pub fn total_area(&self) -> Hectares {
        self.areas.total()
    }

    pub fn arable_area(&self) -> Hectares {
        self.areas.arable()
    }

    pub fn vegetation_area(&self) -> Hectares {
        self.areas.vegetation()
    }

    /// Copy of this parcel with new descriptive fields and areas.
    ///
    /// Identity and owner are kept.
    pub fn revised(
        &self,
        name: impl Into<String>,
        city: impl Into<String>,
        state: StateCode,
        areas: AreaBreakdown,
    ) -> DomainResult<Self> {
        Self::new(self.id, self.producer_id, name, city, state, areas)
    }
}

impl Entity for LandParcel {
    type Id = FarmId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn ensure_not_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
