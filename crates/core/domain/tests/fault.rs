use domain::{
    CustomerSegments, FaultDetail, FaultDetailPatch, FaultPatch, FaultRecord, FaultStatus,
    FaultType, InvariantViolation, Role,
};

fn op5_record() -> FaultRecord {
    FaultRecord {
        fault_id: "fault-1".to_string(),
        region_id: "region-1".to_string(),
        district_id: "district-1".to_string(),
        fault_type: FaultType::Unplanned,
        status: FaultStatus::Active,
        occurred_at_ms: 1_700_000_000_000,
        restored_at_ms: None,
        version: 1,
        detail: FaultDetail::Op5 {
            fault_location: "Feeder 7, Achimota".to_string(),
            mttr_hours: None,
            affected_population: Some(CustomerSegments {
                rural: 10,
                urban: 5,
                metro: 0,
            }),
        },
    }
}

#[test]
fn role_order_matches_seniority() {
    assert!(Role::Technician < Role::DistrictEngineer);
    assert!(Role::DistrictEngineer < Role::RegionalEngineer);
    assert!(Role::RegionalEngineer < Role::GlobalEngineer);
    assert!(Role::GlobalEngineer < Role::SystemAdmin);
}

#[test]
fn role_round_trips_through_strings() {
    for role in [
        Role::Technician,
        Role::DistrictEngineer,
        Role::RegionalEngineer,
        Role::GlobalEngineer,
        Role::SystemAdmin,
    ] {
        assert_eq!(role.as_str().parse::<Role>().expect("parse"), role);
    }
    assert!("auditor".parse::<Role>().is_err());
}

#[test]
fn active_record_validates() {
    op5_record().validate().expect("valid");
}

#[test]
fn resolved_without_restoration_is_rejected() {
    let mut record = op5_record();
    record.status = FaultStatus::Resolved;
    assert_eq!(
        record.validate(),
        Err(InvariantViolation::StatusRestorationMismatch)
    );
}

#[test]
fn restoration_before_occurrence_is_rejected() {
    let mut record = op5_record();
    record.status = FaultStatus::Resolved;
    record.restored_at_ms = Some(record.occurred_at_ms - 1);
    assert_eq!(
        record.validate(),
        Err(InvariantViolation::RestorationBeforeOccurrence)
    );
}

#[test]
fn negative_load_is_rejected() {
    let mut record = op5_record();
    record.detail = FaultDetail::ControlOutage {
        load_mw: -5.0,
        reason: None,
        area_affected: None,
        unserved_energy_mwh: None,
        customers_affected: None,
    };
    assert_eq!(
        record.validate(),
        Err(InvariantViolation::NonFiniteOrNegative("load_mw"))
    );
}

#[test]
fn patch_applies_atomically() {
    let record = op5_record();
    let patch = FaultPatch {
        fault_type: Some(FaultType::Emergency),
        occurred_at_ms: None,
        detail: Some(FaultDetailPatch::Op5 {
            fault_location: Some("Feeder 9, Dansoman".to_string()),
            mttr_hours: Some(2.5),
            affected_population: None,
        }),
    };
    let next = record.with_patch(&patch).expect("patched");
    assert_eq!(next.fault_type, FaultType::Emergency);
    match next.detail {
        FaultDetail::Op5 {
            ref fault_location,
            mttr_hours,
            ..
        } => {
            assert_eq!(fault_location, "Feeder 9, Dansoman");
            assert_eq!(mttr_hours, Some(2.5));
        }
        _ => panic!("variant changed"),
    }
    // 原记录保持不变
    assert_eq!(record.fault_type, FaultType::Unplanned);
}

#[test]
fn mismatched_detail_patch_is_rejected_without_side_effects() {
    let record = op5_record();
    let patch = FaultPatch {
        fault_type: Some(FaultType::Planned),
        occurred_at_ms: None,
        detail: Some(FaultDetailPatch::ControlOutage {
            load_mw: Some(12.0),
            reason: None,
            area_affected: None,
            unserved_energy_mwh: None,
            customers_affected: None,
        }),
    };
    assert_eq!(
        record.with_patch(&patch),
        Err(InvariantViolation::DetailVariantMismatch)
    );
}

#[test]
fn invalid_patch_rejected_as_a_whole() {
    let record = op5_record();
    let patch = FaultPatch {
        fault_type: None,
        occurred_at_ms: None,
        detail: Some(FaultDetailPatch::Op5 {
            fault_location: Some("Feeder 2".to_string()),
            mttr_hours: Some(f64::NAN),
            affected_population: None,
        }),
    };
    assert!(record.with_patch(&patch).is_err());
}
