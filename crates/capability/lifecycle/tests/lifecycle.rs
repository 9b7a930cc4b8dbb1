use domain::{
    CustomerSegments, District, FaultDetail, FaultDetailPatch, FaultPatch, FaultRecord,
    FaultStatus, FaultType, Region, Role, UserIdentity,
};
use oms_lifecycle::{FaultLifecycle, LifecycleError};
use oms_storage::{FaultStore, InMemoryFaultStore, InMemoryReferenceStore};
use std::sync::Arc;

const T0: i64 = 1_700_000_000_000;

fn reference_store() -> Arc<InMemoryReferenceStore> {
    let regions = vec![Region {
        region_id: "region-1".to_string(),
        name: "Accra East Region".to_string(),
    }];
    let districts = vec![District {
        district_id: "district-1".to_string(),
        region_id: "region-1".to_string(),
        name: "Makola".to_string(),
    }];
    Arc::new(InMemoryReferenceStore::new(regions, districts))
}

fn op5_fault(fault_id: &str) -> FaultRecord {
    FaultRecord {
        fault_id: fault_id.to_string(),
        region_id: "region-1".to_string(),
        district_id: "district-1".to_string(),
        fault_type: FaultType::Unplanned,
        status: FaultStatus::Active,
        occurred_at_ms: T0,
        restored_at_ms: None,
        version: 1,
        detail: FaultDetail::Op5 {
            fault_location: "Feeder 3, Makola".to_string(),
            mttr_hours: None,
            affected_population: Some(CustomerSegments {
                rural: 10,
                urban: 20,
                metro: 30,
            }),
        },
    }
}

async fn engine_with(fault: FaultRecord) -> (FaultLifecycle, Arc<InMemoryFaultStore>) {
    let faults = Arc::new(InMemoryFaultStore::new());
    faults.insert_fault(fault).await.expect("seed");
    let engine = FaultLifecycle::new(faults.clone(), reference_store());
    (engine, faults)
}

fn district_engineer() -> UserIdentity {
    UserIdentity::new(
        "user-1",
        "kwame",
        Some(Role::DistrictEngineer),
        Some("Accra East Region".to_string()),
        Some("Makola".to_string()),
    )
}

fn admin() -> UserIdentity {
    UserIdentity::new("user-9", "admin", Some(Role::SystemAdmin), None, None)
}

#[tokio::test]
async fn resolve_stamps_restoration_and_flips_status() {
    let (engine, _store) = engine_with(op5_fault("fault-1")).await;
    let resolved = engine
        .resolve(&district_engineer(), "fault-1")
        .await
        .expect("resolve");
    assert_eq!(resolved.status, FaultStatus::Resolved);
    let restored = resolved.restored_at_ms.expect("restoration stamp");
    assert!(restored >= T0);
    assert_eq!(resolved.version, 2);
}

#[tokio::test]
async fn resolve_twice_hits_invalid_state() {
    let (engine, _store) = engine_with(op5_fault("fault-1")).await;
    engine
        .resolve(&district_engineer(), "fault-1")
        .await
        .expect("first resolve");
    match engine.resolve(&district_engineer(), "fault-1").await {
        Err(LifecycleError::InvalidState) => {}
        other => panic!("expected InvalidState, got {other:?}"),
    }
}

#[tokio::test]
async fn out_of_scope_resolver_is_unauthorized() {
    let (engine, _store) = engine_with(op5_fault("fault-1")).await;
    let outsider = UserIdentity::new(
        "user-2",
        "ama",
        Some(Role::DistrictEngineer),
        Some("Accra East Region".to_string()),
        Some("Roman Ridge".to_string()),
    );
    match engine.resolve(&outsider, "fault-1").await {
        Err(LifecycleError::Unauthorized) => {}
        other => panic!("expected Unauthorized, got {other:?}"),
    }
    // 拒绝无副作用
    match engine.evaluate_permissions(&district_engineer(), "fault-1").await {
        Ok(snapshot) => assert!(snapshot.can_resolve),
        Err(err) => panic!("{err:?}"),
    }
}

#[tokio::test]
async fn technician_cannot_resolve_or_delete() {
    let (engine, _store) = engine_with(op5_fault("fault-1")).await;
    let technician = UserIdentity::new(
        "user-3",
        "kofi",
        Some(Role::Technician),
        Some("Accra East Region".to_string()),
        Some("Makola".to_string()),
    );
    assert!(matches!(
        engine.resolve(&technician, "fault-1").await,
        Err(LifecycleError::Unauthorized)
    ));
    assert!(matches!(
        engine.delete(&technician, "fault-1").await,
        Err(LifecycleError::Unauthorized)
    ));
}

#[tokio::test]
async fn edit_applies_patch_on_resolved_record() {
    let (engine, _store) = engine_with(op5_fault("fault-1")).await;
    engine
        .resolve(&district_engineer(), "fault-1")
        .await
        .expect("resolve");
    let patch = FaultPatch {
        fault_type: Some(FaultType::Emergency),
        occurred_at_ms: None,
        detail: Some(FaultDetailPatch::Op5 {
            fault_location: None,
            mttr_hours: Some(1.5),
            affected_population: None,
        }),
    };
    let edited = engine
        .edit(&district_engineer(), "fault-1", &patch)
        .await
        .expect("edit");
    assert_eq!(edited.status, FaultStatus::Resolved);
    assert_eq!(edited.fault_type, FaultType::Emergency);
}

#[tokio::test]
async fn invalid_patch_leaves_record_untouched() {
    let (engine, store) = engine_with(op5_fault("fault-1")).await;
    let patch = FaultPatch {
        fault_type: Some(FaultType::Planned),
        occurred_at_ms: None,
        detail: Some(FaultDetailPatch::ControlOutage {
            load_mw: Some(10.0),
            reason: None,
            area_affected: None,
            unserved_energy_mwh: None,
            customers_affected: None,
        }),
    };
    match engine.edit(&district_engineer(), "fault-1", &patch).await {
        Err(LifecycleError::InvalidData(_)) => {}
        other => panic!("expected InvalidData, got {other:?}"),
    }
    let record = store.get_fault("fault-1").await.expect("query").expect("fault");
    assert_eq!(record.fault_type, FaultType::Unplanned);
    assert_eq!(record.version, 1);
}

#[tokio::test]
async fn delete_removes_record_then_not_found() {
    let (engine, store) = engine_with(op5_fault("fault-1")).await;
    engine.delete(&admin(), "fault-1").await.expect("delete");
    assert!(store.get_fault("fault-1").await.expect("query").is_none());
    assert!(matches!(
        engine.resolve(&admin(), "fault-1").await,
        Err(LifecycleError::NotFound)
    ));
    assert!(matches!(
        engine.delete(&admin(), "fault-1").await,
        Err(LifecycleError::NotFound)
    ));
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let (engine, _store) = engine_with(op5_fault("fault-1")).await;
    assert!(matches!(
        engine.evaluate_permissions(&admin(), "fault-9").await,
        Err(LifecycleError::NotFound)
    ));
}

#[tokio::test]
async fn concurrent_resolves_cannot_both_succeed() {
    let (engine, _store) = engine_with(op5_fault("fault-1")).await;
    let engine = Arc::new(engine);

    let first = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.resolve(&district_engineer(), "fault-1").await })
    };
    let second = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.resolve(&admin(), "fault-1").await })
    };

    let first = first.await.expect("join");
    let second = second.await.expect("join");
    let successes = [&first, &second]
        .iter()
        .filter(|result| result.is_ok())
        .count();
    assert_eq!(successes, 1, "exactly one resolve may win");
    let loser = if first.is_ok() { second } else { first };
    match loser {
        Err(LifecycleError::Conflict) | Err(LifecycleError::InvalidState) => {}
        other => panic!("loser must see Conflict or InvalidState, got {other:?}"),
    }
}
