use api_contract::{ApiResponse, EditFaultRequest, FaultDto, PermissionSnapshotDto};

#[test]
fn success_envelope_shape() {
    let response = ApiResponse::success(PermissionSnapshotDto {
        can_edit: true,
        can_resolve: false,
        can_delete: true,
    });
    let json = serde_json::to_value(&response).expect("json");
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["canEdit"], true);
    assert_eq!(json["data"]["canResolve"], false);
    assert!(json["error"].is_null());
}

#[test]
fn error_envelope_carries_code_and_message() {
    let response = ApiResponse::<()>::error("FAULT.CONFLICT", "conflict");
    let json = serde_json::to_value(&response).expect("json");
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "FAULT.CONFLICT");
}

#[test]
fn fault_dto_omits_absent_variant_fields() {
    let dto = FaultDto {
        fault_id: "fault-1".to_string(),
        kind: "op5".to_string(),
        region_id: "region-1".to_string(),
        district_id: "district-1".to_string(),
        fault_type: "Unplanned".to_string(),
        status: "active".to_string(),
        occurred_at_ms: 1,
        restored_at_ms: None,
        version: 1,
        total_affected: Some(0),
        fault_location: Some("Feeder 3".to_string()),
        mttr_hours: None,
        affected_population: None,
        load_mw: None,
        reason: None,
        area_affected: None,
        unserved_energy_mwh: None,
        customers_affected: None,
    };
    let json = serde_json::to_value(&dto).expect("json");
    assert_eq!(json["faultId"], "fault-1");
    assert!(json.get("loadMw").is_none());
    assert!(json.get("restoredAtMs").is_none());
}

#[test]
fn edit_request_detects_variant_fields() {
    let request: EditFaultRequest =
        serde_json::from_str(r#"{"faultLocation": "Feeder 9"}"#).expect("parse");
    assert!(request.has_op5_fields());
    assert!(!request.has_control_fields());

    let request: EditFaultRequest =
        serde_json::from_str(r#"{"loadMw": 12.5, "reason": "load shedding"}"#).expect("parse");
    assert!(request.has_control_fields());
    assert!(!request.has_op5_fields());
}
