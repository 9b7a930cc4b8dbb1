use domain::{
    District, FaultDetail, FaultRecord, FaultStatus, FaultType, Region, Role, UserIdentity,
};
use oms_access::{
    can_delete, can_edit, can_resolve, can_view, evaluate, menu_visible, ReferenceDirectory,
};

fn directory() -> ReferenceDirectory {
    let regions = vec![Region {
        region_id: "region-1".to_string(),
        name: "Accra East Region".to_string(),
    }];
    let districts = vec![
        District {
            district_id: "district-1".to_string(),
            region_id: "region-1".to_string(),
            name: "Makola".to_string(),
        },
        District {
            district_id: "district-2".to_string(),
            region_id: "region-1".to_string(),
            name: "Roman Ridge".to_string(),
        },
    ];
    ReferenceDirectory::new(&regions, &districts)
}

fn active_record() -> FaultRecord {
    FaultRecord {
        fault_id: "fault-1".to_string(),
        region_id: "region-1".to_string(),
        district_id: "district-1".to_string(),
        fault_type: FaultType::Emergency,
        status: FaultStatus::Active,
        occurred_at_ms: 1_700_000_000_000,
        restored_at_ms: None,
        version: 1,
        detail: FaultDetail::ControlOutage {
            load_mw: 40.0,
            reason: None,
            area_affected: None,
            unserved_energy_mwh: None,
            customers_affected: None,
        },
    }
}

fn resolved_record() -> FaultRecord {
    let mut record = active_record();
    record.status = FaultStatus::Resolved;
    record.restored_at_ms = Some(record.occurred_at_ms + 3_600_000);
    record
}

fn user(role: Role, region: Option<&str>, district: Option<&str>) -> UserIdentity {
    UserIdentity::new(
        "user-1",
        "user",
        Some(role),
        region.map(str::to_string),
        district.map(str::to_string),
    )
}

#[test]
fn resolved_record_is_never_resolvable() {
    let dir = directory();
    let record = resolved_record();
    for role in [
        Role::Technician,
        Role::DistrictEngineer,
        Role::RegionalEngineer,
        Role::GlobalEngineer,
        Role::SystemAdmin,
    ] {
        let user = user(role, Some("Accra East Region"), Some("Makola"));
        assert!(!can_resolve(&user, &record, &dir), "{role:?}");
    }
}

#[test]
fn system_admin_has_all_record_actions() {
    let dir = directory();
    let admin = user(Role::SystemAdmin, None, None);
    let active = active_record();
    assert!(can_resolve(&admin, &active, &dir));
    assert!(can_edit(&admin, &active, &dir));
    assert!(can_delete(&admin, &active, &dir));
    // 已恢复记录仍可编辑和删除
    let resolved = resolved_record();
    assert!(can_edit(&admin, &resolved, &dir));
    assert!(can_delete(&admin, &resolved, &dir));
}

#[test]
fn district_engineer_blocked_outside_own_district() {
    let dir = directory();
    let engineer = user(Role::DistrictEngineer, None, Some("Roman Ridge"));
    assert!(!can_resolve(&engineer, &active_record(), &dir));
    assert!(!can_edit(&engineer, &active_record(), &dir));
    assert!(!can_delete(&engineer, &active_record(), &dir));
}

#[test]
fn regional_engineer_resolves_anywhere_in_region() {
    let dir = directory();
    let engineer = user(Role::RegionalEngineer, Some("Accra East Region"), None);
    // 区无关，区域匹配即可
    assert!(can_resolve(&engineer, &active_record(), &dir));
}

#[test]
fn edit_and_delete_are_independent_of_status() {
    let dir = directory();
    let engineer = user(Role::DistrictEngineer, None, Some("Makola"));
    let resolved = resolved_record();
    assert!(!can_resolve(&engineer, &resolved, &dir));
    assert!(can_edit(&engineer, &resolved, &dir));
    assert!(can_delete(&engineer, &resolved, &dir));
}

#[test]
fn snapshot_matches_individual_predicates() {
    let dir = directory();
    let engineer = user(Role::DistrictEngineer, None, Some("Makola"));
    let record = resolved_record();
    let snapshot = evaluate(&engineer, &record, &dir);
    assert_eq!(snapshot.can_edit, can_edit(&engineer, &record, &dir));
    assert_eq!(snapshot.can_resolve, can_resolve(&engineer, &record, &dir));
    assert_eq!(snapshot.can_delete, can_delete(&engineer, &record, &dir));
}

#[test]
fn technician_can_view_own_district_but_not_act() {
    let dir = directory();
    let technician = user(Role::Technician, Some("Accra East Region"), Some("Makola"));
    let record = active_record();
    assert!(can_view(&technician, &record, &dir));
    assert!(!can_edit(&technician, &record, &dir));
    assert!(!can_resolve(&technician, &record, &dir));
    assert!(!can_delete(&technician, &record, &dir));
}

#[test]
fn unauthenticated_user_gets_nothing() {
    let dir = directory();
    let anonymous = UserIdentity::default();
    let record = active_record();
    let snapshot = evaluate(&anonymous, &record, &dir);
    assert!(!snapshot.can_edit && !snapshot.can_resolve && !snapshot.can_delete);
    assert!(!can_view(&anonymous, &record, &dir));
    assert!(!menu_visible(&anonymous, Role::DistrictEngineer, "/dashboard"));
}

#[test]
fn technician_menu_carve_out() {
    let technician = user(Role::Technician, None, Some("Makola"));
    assert!(!menu_visible(
        &technician,
        Role::DistrictEngineer,
        "/analytics/x"
    ));
    assert!(menu_visible(
        &technician,
        Role::DistrictEngineer,
        "/asset-management/x"
    ));
    // 要求更高角色的菜单对技术员不可见
    assert!(!menu_visible(
        &technician,
        Role::GlobalEngineer,
        "/asset-management/x"
    ));
}

#[test]
fn menu_visibility_follows_dominance_for_engineers() {
    let regional = user(Role::RegionalEngineer, Some("Accra East Region"), None);
    assert!(menu_visible(&regional, Role::DistrictEngineer, "/analytics/x"));
    assert!(!menu_visible(&regional, Role::GlobalEngineer, "/district-population"));
    let admin = user(Role::SystemAdmin, None, None);
    assert!(menu_visible(&admin, Role::SystemAdmin, "/user-management"));
}
