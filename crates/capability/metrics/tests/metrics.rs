use domain::{CustomerSegments, FaultDetail, FaultRecord, FaultStatus, FaultType};
use oms_metrics::{elapsed, mean_time_to_repair, total_affected, Elapsed};

const T0: i64 = 1_700_000_000_000;
const HOUR_MS: i64 = 3_600_000;

fn op5(population: Option<CustomerSegments>) -> FaultRecord {
    FaultRecord {
        fault_id: "fault-1".to_string(),
        region_id: "region-1".to_string(),
        district_id: "district-1".to_string(),
        fault_type: FaultType::Unplanned,
        status: FaultStatus::Active,
        occurred_at_ms: T0,
        restored_at_ms: None,
        version: 1,
        detail: FaultDetail::Op5 {
            fault_location: "Feeder 3".to_string(),
            mttr_hours: None,
            affected_population: population,
        },
    }
}

fn resolved_after(hours: i64) -> FaultRecord {
    let mut record = op5(None);
    record.status = FaultStatus::Resolved;
    record.restored_at_ms = Some(T0 + hours * HOUR_MS);
    record
}

#[test]
fn elapsed_of_restored_record_is_exact() {
    assert_eq!(
        elapsed(&resolved_after(3)),
        Elapsed::Completed {
            millis: 3 * HOUR_MS
        }
    );
}

#[test]
fn elapsed_of_active_record_is_ongoing() {
    assert_eq!(elapsed(&op5(None)), Elapsed::Ongoing);
}

#[test]
fn total_affected_sums_segments() {
    let record = op5(Some(CustomerSegments {
        rural: 10,
        urban: 5,
        metro: 0,
    }));
    assert_eq!(total_affected(&record), 15);
}

#[test]
fn total_affected_defaults_missing_segments_to_zero() {
    assert_eq!(total_affected(&op5(None)), 0);
}

#[test]
fn total_affected_reads_control_outage_customers() {
    let mut record = op5(None);
    record.detail = FaultDetail::ControlOutage {
        load_mw: 25.0,
        reason: None,
        area_affected: None,
        unserved_energy_mwh: None,
        customers_affected: Some(CustomerSegments {
            rural: 100,
            urban: 200,
            metro: 300,
        }),
    };
    assert_eq!(total_affected(&record), 600);
}

#[test]
fn mttr_averages_resolved_records_only() {
    let records = vec![resolved_after(2), resolved_after(4), op5(None)];
    assert_eq!(mean_time_to_repair(&records), Some(3.0));
}

#[test]
fn mttr_prefers_recorded_hours() {
    let mut record = resolved_after(10);
    if let FaultDetail::Op5 { ref mut mttr_hours, .. } = record.detail {
        *mttr_hours = Some(2.0);
    }
    assert_eq!(mean_time_to_repair(&[record]), Some(2.0));
}

#[test]
fn mttr_without_resolved_records_is_none() {
    assert_eq!(mean_time_to_repair(&[op5(None)]), None);
    assert_eq!(mean_time_to_repair(&[]), None);
}
