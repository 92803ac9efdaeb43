//! End-to-end flows through the registry: validation before writes,
//! uniqueness, cascades and the dashboard.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use agroreg_core::{CropId, DomainError, Entity, FarmId, ProducerId};
use agroreg_land::{CropKind, Hectares, StateCode};
use agroreg_registry::{
    AddCrop, LandRegistry, RegisterFarm, RegisterProducer, RegistryError, UpdateFarm,
    UpdateProducer,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn registry() -> LandRegistry {
    agroreg_observability::init();
    LandRegistry::new()
}

fn register_producer(registry: &LandRegistry, tax_id: &str, name: &str) -> ProducerId {
    let producer_id = ProducerId::new();
    registry
        .register_producer(RegisterProducer {
            producer_id,
            tax_id: tax_id.to_string(),
            name: name.to_string(),
            occurred_at: t0(),
        })
        .unwrap();
    producer_id
}

fn farm_cmd(producer_id: ProducerId, state: StateCode, total: &str, arable: &str, veg: &str) -> RegisterFarm {
    RegisterFarm {
        farm_id: FarmId::new(),
        producer_id,
        name: "Fazenda Esperança".to_string(),
        city: "Ribeirão Preto".to_string(),
        state,
        total_area: dec(total),
        arable_area: dec(arable),
        vegetation_area: dec(veg),
        occurred_at: t0(),
    }
}

fn add_crop(registry: &LandRegistry, farm_id: FarmId, kind: CropKind, season: &str) -> Result<CropId, RegistryError> {
    let crop_id = CropId::new();
    registry
        .add_crop(AddCrop {
            crop_id,
            farm_id,
            kind,
            season: season.to_string(),
            occurred_at: t0(),
        })
        .map(|_| crop_id)
}

fn expect_domain(err: RegistryError) -> DomainError {
    match err {
        RegistryError::Domain(e) => e,
        other => panic!("Expected domain error, got {other:?}"),
    }
}

#[test]
fn register_producer_accepts_valid_documents_and_normalizes() {
    let registry = registry();
    let cpf = register_producer(&registry, "111.444.777-35", "João Silva");
    let cnpj = register_producer(&registry, "11.222.333/0001-81", "Empresa Rural Ltda");

    let stored = registry.producer(cpf).unwrap().unwrap();
    assert_eq!(stored.record.tax_id().as_str(), "11144477735");
    assert_eq!(stored.created_at, t0());

    let stored = registry.producer(cnpj).unwrap().unwrap();
    assert_eq!(stored.record.tax_id().formatted(), "11.222.333/0001-81");
}

#[test]
fn register_producer_rejects_invalid_document_without_storing() {
    let registry = registry();
    let producer_id = ProducerId::new();

    let err = registry
        .register_producer(RegisterProducer {
            producer_id,
            tax_id: "111.111.111-11".to_string(),
            name: "João Silva".to_string(),
            occurred_at: t0(),
        })
        .unwrap_err();

    assert!(matches!(expect_domain(err), DomainError::Validation(_)));
    assert!(registry.producer(producer_id).unwrap().is_none());
}

#[test]
fn duplicate_tax_id_is_a_conflict_regardless_of_formatting() {
    let registry = registry();
    register_producer(&registry, "111.444.777-35", "João Silva");

    let err = registry
        .register_producer(RegisterProducer {
            producer_id: ProducerId::new(),
            tax_id: "11144477735".to_string(),
            name: "Outro João".to_string(),
            occurred_at: t0(),
        })
        .unwrap_err();

    assert!(matches!(expect_domain(err), DomainError::Conflict(_)));
    assert_eq!(registry.producers().unwrap().len(), 1);
}

#[test]
fn update_producer_changes_name_only() {
    let registry = registry();
    let producer_id = register_producer(&registry, "111.444.777-35", "João Silva");
    let later = t0() + Duration::hours(1);

    let updated = registry
        .update_producer(UpdateProducer {
            producer_id,
            tax_id: "11144477735".to_string(),
            name: "João da Silva".to_string(),
            occurred_at: later,
        })
        .unwrap();
    assert_eq!(updated.record.name(), "João da Silva");
    assert_eq!(updated.created_at, t0());
    assert_eq!(updated.updated_at, later);

    let err = registry
        .update_producer(UpdateProducer {
            producer_id,
            tax_id: "529.982.247-25".to_string(),
            name: "João da Silva".to_string(),
            occurred_at: later,
        })
        .unwrap_err();
    assert!(matches!(expect_domain(err), DomainError::InvariantViolation(_)));
}

#[test]
fn producers_are_listed_by_name() {
    let registry = registry();
    register_producer(&registry, "111.444.777-35", "Z Silva");
    register_producer(&registry, "529.982.247-25", "A Santos");

    let names: Vec<String> = registry
        .producers()
        .unwrap()
        .into_iter()
        .map(|p| p.record.name().to_string())
        .collect();
    assert_eq!(names, vec!["A Santos", "Z Silva"]);
}

#[test]
fn register_farm_enforces_area_invariant_at_boundary() {
    let registry = registry();
    let producer_id = register_producer(&registry, "111.444.777-35", "João Silva");

    let ok = registry
        .register_farm(farm_cmd(producer_id, StateCode::Sp, "100.00", "70.00", "30.00"))
        .unwrap();
    assert_eq!(ok.record.areas().unallocated(), Hectares::ZERO);

    let cmd = farm_cmd(producer_id, StateCode::Sp, "100.00", "80.00", "30.00");
    let farm_id = cmd.farm_id;
    let err = registry.register_farm(cmd).unwrap_err();
    assert_eq!(
        expect_domain(err),
        DomainError::invariant("sum of areas exceeds total area")
    );
    assert!(registry.farm(farm_id).unwrap().is_none());
}

#[test]
fn register_farm_rejects_negative_areas_and_unknown_producer() {
    let registry = registry();
    let producer_id = register_producer(&registry, "111.444.777-35", "João Silva");

    let err = registry
        .register_farm(farm_cmd(producer_id, StateCode::Sp, "100", "-1", "0"))
        .unwrap_err();
    assert!(matches!(expect_domain(err), DomainError::Validation(_)));

    let err = registry
        .register_farm(farm_cmd(ProducerId::new(), StateCode::Sp, "100", "50", "50"))
        .unwrap_err();
    assert_eq!(expect_domain(err), DomainError::NotFound);
}

#[test]
fn update_farm_rechecks_area_invariant() {
    let registry = registry();
    let producer_id = register_producer(&registry, "111.444.777-35", "João Silva");
    let cmd = farm_cmd(producer_id, StateCode::Sp, "1000", "800", "200");
    let farm_id = cmd.farm_id;
    registry.register_farm(cmd).unwrap();

    let update = |total: &str, arable: &str, veg: &str| UpdateFarm {
        farm_id,
        name: "Fazenda Esperança".to_string(),
        city: "Ribeirão Preto".to_string(),
        state: StateCode::Sp,
        total_area: dec(total),
        arable_area: dec(arable),
        vegetation_area: dec(veg),
        occurred_at: t0() + Duration::days(1),
    };

    let err = registry.update_farm(update("900", "800", "200")).unwrap_err();
    assert!(matches!(expect_domain(err), DomainError::InvariantViolation(_)));
    let unchanged = registry.farm(farm_id).unwrap().unwrap();
    assert_eq!(unchanged.record.total_area(), Hectares::from(1000));

    let updated = registry.update_farm(update("1200", "800", "200")).unwrap();
    assert_eq!(updated.record.total_area(), Hectares::from(1200));
    assert_eq!(updated.record.producer_id(), producer_id);
    assert!(updated.updated_at > updated.created_at);
}

#[test]
fn duplicate_crop_in_same_season_is_rejected() {
    let registry = registry();
    let producer_id = register_producer(&registry, "111.444.777-35", "João Silva");
    let farm = registry
        .register_farm(farm_cmd(producer_id, StateCode::Sp, "1000", "800", "200"))
        .unwrap();
    let farm_id = *farm.record.id();

    add_crop(&registry, farm_id, CropKind::Soja, "Safra 2024").unwrap();
    add_crop(&registry, farm_id, CropKind::Soja, "Safra 2025").unwrap();
    add_crop(&registry, farm_id, CropKind::Milho, "Safra 2024").unwrap();

    let err = add_crop(&registry, farm_id, CropKind::Soja, " Safra 2024 ").unwrap_err();
    assert!(matches!(expect_domain(err), DomainError::Conflict(_)));

    let err = add_crop(&registry, FarmId::new(), CropKind::Soja, "Safra 2024").unwrap_err();
    assert_eq!(expect_domain(err), DomainError::NotFound);

    assert_eq!(registry.crops_of(farm_id).unwrap().len(), 3);
}

#[test]
fn deleting_producer_cascades_to_farms_and_crops() {
    let registry = registry();
    let owner = register_producer(&registry, "111.444.777-35", "João Silva");
    let other = register_producer(&registry, "11.222.333/0001-81", "Empresa Rural Ltda");

    let sp = registry
        .register_farm(farm_cmd(owner, StateCode::Sp, "1000", "800", "200"))
        .unwrap();
    let mg = registry
        .register_farm(farm_cmd(owner, StateCode::Mg, "500", "400", "100"))
        .unwrap();
    let kept = registry
        .register_farm(farm_cmd(other, StateCode::Go, "300", "100", "100"))
        .unwrap();

    add_crop(&registry, *sp.record.id(), CropKind::Soja, "Safra 2024").unwrap();
    add_crop(&registry, *mg.record.id(), CropKind::Cafe, "Safra 2024").unwrap();
    add_crop(&registry, *kept.record.id(), CropKind::Trigo, "Safra 2024").unwrap();

    let report = registry.delete_producer(owner).unwrap();
    assert_eq!(report.farms, 2);
    assert_eq!(report.crops, 2);

    assert!(registry.farm(*sp.record.id()).unwrap().is_none());
    assert!(registry.farms_of(owner).unwrap().is_empty());
    assert_eq!(registry.farms_of(other).unwrap().len(), 1);
    assert_eq!(registry.crops_of(*kept.record.id()).unwrap().len(), 1);

    let err = registry.delete_producer(owner).unwrap_err();
    assert_eq!(expect_domain(err), DomainError::NotFound);
}

#[test]
fn deleting_farm_removes_its_crops() {
    let registry = registry();
    let owner = register_producer(&registry, "111.444.777-35", "João Silva");
    let farm = registry
        .register_farm(farm_cmd(owner, StateCode::Sp, "1000", "800", "200"))
        .unwrap();
    let farm_id = *farm.record.id();
    let crop_id = add_crop(&registry, farm_id, CropKind::Soja, "Safra 2024").unwrap();
    add_crop(&registry, farm_id, CropKind::Milho, "Safra 2024").unwrap();

    registry.remove_crop(crop_id).unwrap();
    assert_eq!(registry.delete_farm(farm_id).unwrap(), 1);
    assert!(registry.crops_of(farm_id).unwrap().is_empty());
    assert_eq!(registry.dashboard().unwrap().total_crops, 0);
}

#[test]
fn dashboard_aggregates_stored_records() {
    let registry = registry();
    let owner = register_producer(&registry, "111.444.777-35", "João Silva");
    register_producer(&registry, "11.222.333/0001-81", "Sem Fazenda Ltda");

    let sp = registry
        .register_farm(farm_cmd(owner, StateCode::Sp, "1000", "800", "200"))
        .unwrap();
    let mg = registry
        .register_farm(farm_cmd(owner, StateCode::Mg, "500", "400", "100"))
        .unwrap();
    add_crop(&registry, *sp.record.id(), CropKind::Soja, "Safra 2024").unwrap();
    add_crop(&registry, *sp.record.id(), CropKind::Milho, "Safra 2024").unwrap();
    add_crop(&registry, *mg.record.id(), CropKind::Soja, "Safra 2024").unwrap();

    let summary = registry.dashboard().unwrap();
    assert_eq!(summary.total_parcels, 2);
    assert_eq!(summary.total_area, Hectares::from(1500));
    assert_eq!(summary.total_producers, 2);
    assert_eq!(summary.total_crops, 3);
    assert_eq!(
        summary.state_distribution,
        BTreeMap::from([(StateCode::Sp, 1), (StateCode::Mg, 1)])
    );
    assert_eq!(
        summary.culture_distribution,
        BTreeMap::from([(CropKind::Soja, 2), (CropKind::Milho, 1)])
    );
    assert_eq!(summary.land_use.arable, Hectares::from(1200));
    assert_eq!(summary.land_use.vegetation, Hectares::from(300));
    assert_eq!(registry.dashboard().unwrap(), summary);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["total_farms"], 2);
    assert_eq!(json["total_hectares"], 1500.0);

    let sp_only = registry.dashboard_for_state(StateCode::Sp).unwrap();
    assert_eq!(sp_only.total_parcels, 1);
    assert_eq!(sp_only.total_crops, 2);
    assert_eq!(sp_only.total_area, Hectares::from(1000));
}

#[test]
fn empty_registry_dashboard_is_zeroed() {
    let summary = registry().dashboard().unwrap();
    assert_eq!(summary.total_parcels, 0);
    assert_eq!(summary.total_area, Hectares::ZERO);
    assert!(summary.state_distribution.is_empty());
    assert!(summary.culture_distribution.is_empty());
}

#[test]
fn registry_is_shareable_across_threads() {
    let registry = Arc::new(registry());
    let handles: Vec<_> = ["111.444.777-35", "529.982.247-25", "11.222.333/0001-81"]
        .into_iter()
        .map(|doc| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let producer_id = register_producer(&registry, doc, "Produtor");
                registry
                    .register_farm(farm_cmd(producer_id, StateCode::Pr, "10", "5", "5"))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let summary = registry.dashboard().unwrap();
    assert_eq!(summary.total_producers, 3);
    assert_eq!(summary.state_distribution.get(&StateCode::Pr), Some(&3));
}
