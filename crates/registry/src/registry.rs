//! In-memory registry store.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use agroreg_core::{CropId, DomainError, Entity, FarmId, ProducerId};
use agroreg_documents::{TaxId, is_valid_tax_id, normalize};
use agroreg_land::{
    AreaBreakdown, Crop, DashboardSummary, HarvestSeason, Hectares, LandParcel, StateCode,
    check_area_invariant, summarize,
};
use agroreg_land::area::AREA_SUM_EXCEEDS_TOTAL;

use crate::command::{AddCrop, RegisterFarm, RegisterProducer, UpdateFarm, UpdateProducer};
use crate::producer::Producer;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A write was rejected by a domain rule.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A writer panicked while holding the lock.
    #[error("registry lock poisoned")]
    Poisoned,
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// A stored record with its bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record<T> {
    pub record: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T> Record<T> {
    fn new(record: T, at: DateTime<Utc>) -> Self {
        Self {
            record,
            created_at: at,
            updated_at: at,
        }
    }

    fn replaced(&self, record: T, at: DateTime<Utc>) -> Self {
        Self {
            record,
            created_at: self.created_at,
            updated_at: at,
        }
    }
}

/// What a delete removed along with the requested record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    pub farms: usize,
    pub crops: usize,
}

#[derive(Debug, Default)]
struct Tables {
    producers: HashMap<ProducerId, Record<Producer>>,
    farms: HashMap<FarmId, Record<LandParcel>>,
    crops: HashMap<CropId, Record<Crop>>,
}

impl Tables {
    fn tax_id_owner(&self, tax_id: &TaxId) -> Option<ProducerId> {
        self.producers
            .values()
            .find(|p| p.record.tax_id() == tax_id)
            .map(|p| *p.record.id())
    }

    fn crop_ids_of(&self, farm_id: FarmId) -> Vec<CropId> {
        self.crops
            .values()
            .filter(|c| c.record.farm_id() == farm_id)
            .map(|c| *c.record.id())
            .collect()
    }

    fn farm_ids_of(&self, producer_id: ProducerId) -> Vec<FarmId> {
        self.farms
            .values()
            .filter(|f| f.record.producer_id() == producer_id)
            .map(|f| *f.record.id())
            .collect()
    }

    /// Removes a farm and its crops, returning how many crops went with it.
    fn remove_farm(&mut self, farm_id: FarmId) -> Option<usize> {
        self.farms.remove(&farm_id)?;
        let crop_ids = self.crop_ids_of(farm_id);
        for crop_id in &crop_ids {
            self.crops.remove(crop_id);
        }
        Some(crop_ids.len())
    }
}

/// Producer/farm/crop registry held in memory.
///
/// Every write validates first and mutates only on success, so a rejected
/// write leaves no partial state. Share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct LandRegistry {
    inner: RwLock<Tables>,
}

impl LandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RegistryResult<RwLockReadGuard<'_, Tables>> {
        self.inner.read().map_err(|_| RegistryError::Poisoned)
    }

    fn write(&self) -> RegistryResult<RwLockWriteGuard<'_, Tables>> {
        self.inner.write().map_err(|_| RegistryError::Poisoned)
    }

    // ---- producers ----

    pub fn register_producer(&self, cmd: RegisterProducer) -> RegistryResult<Record<Producer>> {
        let tax_id = parse_tax_id(&cmd.tax_id)?;
        let producer = Producer::new(cmd.producer_id, tax_id, cmd.name)?;

        let mut tables = self.write()?;
        if tables.producers.contains_key(&cmd.producer_id) {
            return Err(DomainError::conflict("producer already exists").into());
        }
        if tables.tax_id_owner(producer.tax_id()).is_some() {
            warn!(producer_id = %cmd.producer_id, "duplicate tax id rejected");
            return Err(DomainError::conflict(format!(
                "a producer with document {} already exists",
                producer.tax_id()
            ))
            .into());
        }

        let record = Record::new(producer, cmd.occurred_at);
        tables.producers.insert(cmd.producer_id, record.clone());
        info!(
            producer_id = %cmd.producer_id,
            kind = record.record.tax_id().kind().label(),
            "producer registered"
        );
        Ok(record)
    }

    pub fn update_producer(&self, cmd: UpdateProducer) -> RegistryResult<Record<Producer>> {
        let tax_id = parse_tax_id(&cmd.tax_id)?;

        let mut tables = self.write()?;
        let current = tables
            .producers
            .get(&cmd.producer_id)
            .ok_or_else(DomainError::not_found)?;

        if current.record.tax_id() != &tax_id {
            warn!(producer_id = %cmd.producer_id, "tax id change rejected");
            return Err(DomainError::invariant("tax id cannot change after creation").into());
        }

        let updated = current.replaced(current.record.renamed(cmd.name)?, cmd.occurred_at);
        tables.producers.insert(cmd.producer_id, updated.clone());
        info!(producer_id = %cmd.producer_id, "producer updated");
        Ok(updated)
    }

    /// Deletes a producer together with its farms and their crops.
    pub fn delete_producer(&self, producer_id: ProducerId) -> RegistryResult<CascadeReport> {
        let mut tables = self.write()?;
        if tables.producers.remove(&producer_id).is_none() {
            return Err(DomainError::not_found().into());
        }

        let mut report = CascadeReport::default();
        for farm_id in tables.farm_ids_of(producer_id) {
            if let Some(crops) = tables.remove_farm(farm_id) {
                report.farms += 1;
                report.crops += crops;
            }
        }

        info!(
            producer_id = %producer_id,
            farms = report.farms,
            crops = report.crops,
            "producer deleted"
        );
        Ok(report)
    }

    pub fn producer(&self, producer_id: ProducerId) -> RegistryResult<Option<Record<Producer>>> {
        Ok(self.read()?.producers.get(&producer_id).cloned())
    }

    /// All producers ordered by name.
    pub fn producers(&self) -> RegistryResult<Vec<Record<Producer>>> {
        let tables = self.read()?;
        let mut producers: Vec<_> = tables.producers.values().cloned().collect();
        producers.sort_by(|a, b| a.record.name().cmp(b.record.name()));
        Ok(producers)
    }

    // ---- farms ----

    pub fn register_farm(&self, cmd: RegisterFarm) -> RegistryResult<Record<LandParcel>> {
        let areas = checked_areas(cmd.total_area, cmd.arable_area, cmd.vegetation_area)?;

        let mut tables = self.write()?;
        if !tables.producers.contains_key(&cmd.producer_id) {
            return Err(DomainError::not_found().into());
        }
        if tables.farms.contains_key(&cmd.farm_id) {
            return Err(DomainError::conflict("farm already exists").into());
        }

        let parcel = LandParcel::new(
            cmd.farm_id,
            cmd.producer_id,
            cmd.name,
            cmd.city,
            cmd.state,
            areas,
        )?;
        let record = Record::new(parcel, cmd.occurred_at);
        tables.farms.insert(cmd.farm_id, record.clone());
        info!(
            farm_id = %cmd.farm_id,
            producer_id = %cmd.producer_id,
            state = %cmd.state,
            total_area = %cmd.total_area,
            "farm registered"
        );
        Ok(record)
    }

    /// Replaces a farm's fields; the area invariant is checked again.
    pub fn update_farm(&self, cmd: UpdateFarm) -> RegistryResult<Record<LandParcel>> {
        let areas = checked_areas(cmd.total_area, cmd.arable_area, cmd.vegetation_area)?;

        let mut tables = self.write()?;
        let current = tables
            .farms
            .get(&cmd.farm_id)
            .ok_or_else(DomainError::not_found)?;

        let parcel = current
            .record
            .revised(cmd.name, cmd.city, cmd.state, areas)?;
        let updated = current.replaced(parcel, cmd.occurred_at);
        tables.farms.insert(cmd.farm_id, updated.clone());
        info!(farm_id = %cmd.farm_id, "farm updated");
        Ok(updated)
    }

    /// Deletes a farm and its crop entries; returns the number of crops removed.
    pub fn delete_farm(&self, farm_id: FarmId) -> RegistryResult<usize> {
        let mut tables = self.write()?;
        let crops = tables
            .remove_farm(farm_id)
            .ok_or_else(DomainError::not_found)?;
        info!(farm_id = %farm_id, crops, "farm deleted");
        Ok(crops)
    }

    pub fn farm(&self, farm_id: FarmId) -> RegistryResult<Option<Record<LandParcel>>> {
        Ok(self.read()?.farms.get(&farm_id).cloned())
    }

    pub fn farms_of(&self, producer_id: ProducerId) -> RegistryResult<Vec<Record<LandParcel>>> {
        let tables = self.read()?;
        let mut farms: Vec<_> = tables
            .farms
            .values()
            .filter(|f| f.record.producer_id() == producer_id)
            .cloned()
            .collect();
        farms.sort_by_key(|f| f.created_at);
        Ok(farms)
    }

    // ---- crops ----

    pub fn add_crop(&self, cmd: AddCrop) -> RegistryResult<Record<Crop>> {
        let season = HarvestSeason::new(&cmd.season)?;

        let mut tables = self.write()?;
        if !tables.farms.contains_key(&cmd.farm_id) {
            return Err(DomainError::not_found().into());
        }
        if tables.crops.contains_key(&cmd.crop_id) {
            return Err(DomainError::conflict("crop entry already exists").into());
        }
        if tables
            .crops
            .values()
            .any(|c| c.record.same_slot(cmd.farm_id, cmd.kind, &season))
        {
            warn!(farm_id = %cmd.farm_id, crop = %cmd.kind, season = %season, "duplicate crop rejected");
            return Err(DomainError::conflict(format!(
                "{} already registered for {} on this farm",
                cmd.kind, season
            ))
            .into());
        }

        let crop = Crop::new(cmd.crop_id, cmd.farm_id, cmd.kind, season);
        let record = Record::new(crop, cmd.occurred_at);
        tables.crops.insert(cmd.crop_id, record.clone());
        debug!(crop_id = %cmd.crop_id, farm_id = %cmd.farm_id, crop = %cmd.kind, "crop added");
        Ok(record)
    }

    pub fn remove_crop(&self, crop_id: CropId) -> RegistryResult<()> {
        let mut tables = self.write()?;
        tables
            .crops
            .remove(&crop_id)
            .ok_or_else(DomainError::not_found)?;
        debug!(crop_id = %crop_id, "crop removed");
        Ok(())
    }

    pub fn crops_of(&self, farm_id: FarmId) -> RegistryResult<Vec<Record<Crop>>> {
        let tables = self.read()?;
        let mut crops: Vec<_> = tables
            .crops
            .values()
            .filter(|c| c.record.farm_id() == farm_id)
            .cloned()
            .collect();
        crops.sort_by_key(|c| c.created_at);
        Ok(crops)
    }

    // ---- reporting ----

    /// Dashboard over every stored farm and crop entry.
    ///
    /// `total_producers` counts registered producers, including those that
    /// own no farm yet.
    pub fn dashboard(&self) -> RegistryResult<DashboardSummary> {
        let tables = self.read()?;
        let summary = summarize(
            tables.farms.values().map(|f| &f.record),
            tables.crops.values().map(|c| &c.record),
        )
        .with_total_producers(tables.producers.len());
        debug!(
            farms = summary.total_parcels,
            crops = summary.total_crops,
            "dashboard generated"
        );
        Ok(summary)
    }

    /// Dashboard restricted to farms in `state` and their crops.
    pub fn dashboard_for_state(&self, state: StateCode) -> RegistryResult<DashboardSummary> {
        let tables = self.read()?;
        let farms: Vec<&LandParcel> = tables
            .farms
            .values()
            .map(|f| &f.record)
            .filter(|p| p.state() == state)
            .collect();
        let crops = tables
            .crops
            .values()
            .map(|c| &c.record)
            .filter(|c| farms.iter().any(|p| *p.id() == c.farm_id()));
        Ok(summarize(farms.iter().copied(), crops))
    }
}

fn parse_tax_id(raw: &str) -> Result<TaxId, DomainError> {
    if !is_valid_tax_id(raw) {
        debug!(digits = normalize(raw).len(), "invalid document rejected");
        return Err(DomainError::validation("invalid document (CPF/CNPJ)"));
    }
    TaxId::parse(raw)
}

/// Range check, then the area invariant, then the value object.
fn checked_areas(
    total: Decimal,
    arable: Decimal,
    vegetation: Decimal,
) -> Result<AreaBreakdown, DomainError> {
    let (total, arable, vegetation) = (
        Hectares::new(total),
        Hectares::new(arable),
        Hectares::new(vegetation),
    );
    if total.is_negative() || arable.is_negative() || vegetation.is_negative() {
        return Err(DomainError::validation("areas cannot be negative"));
    }
    if !check_area_invariant(total, arable, vegetation) {
        warn!(%total, %arable, %vegetation, "area invariant violated");
        return Err(DomainError::invariant(AREA_SUM_EXCEEDS_TOTAL));
    }
    AreaBreakdown::new(total, arable, vegetation)
}
