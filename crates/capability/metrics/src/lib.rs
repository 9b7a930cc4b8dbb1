//! 展示指标能力：历时、受影响客户数与 MTTR。
//!
//! 全部为只读纯函数，与授权逻辑完全独立，任何角色都可计算。

use domain::{CustomerSegments, FaultDetail, FaultRecord, FaultStatus};

/// 记录历时。
///
/// 未恢复的记录返回 `Ongoing` 哨兵，调用方不得把它当作
/// 零或无穷大参与数值运算。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elapsed {
    Completed { millis: i64 },
    Ongoing,
}

/// 计算记录历时：有恢复时间则为恢复减发生，否则 Ongoing。
pub fn elapsed(record: &FaultRecord) -> Elapsed {
    match record.restored_at_ms {
        Some(restored) => Elapsed::Completed {
            millis: restored - record.occurred_at_ms,
        },
        None => Elapsed::Ongoing,
    }
}

/// 记录影响的客户总数（三段合计）。
///
/// 分段字段在建档时可缺省，缺省按零计，展示永远有值。
pub fn total_affected(record: &FaultRecord) -> u64 {
    segments_of(record).map(|segments| segments.total()).unwrap_or(0)
}

/// 多条记录的平均修复时长（小时）。
///
/// 只统计已恢复的记录；OP5 记录若显式带 mttr_hours 则优先采用，
/// 否则按恢复减发生计算。没有任何已恢复记录时返回 None。
pub fn mean_time_to_repair(records: &[FaultRecord]) -> Option<f64> {
    let mut total_hours = 0.0;
    let mut count: u32 = 0;
    for record in records {
        if record.status != FaultStatus::Resolved {
            continue;
        }
        let hours = match &record.detail {
            FaultDetail::Op5 {
                mttr_hours: Some(mttr),
                ..
            } => *mttr,
            _ => match elapsed(record) {
                Elapsed::Completed { millis } => millis as f64 / 3_600_000.0,
                Elapsed::Ongoing => continue,
            },
        };
        total_hours += hours;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(total_hours / f64::from(count))
    }
}

fn segments_of(record: &FaultRecord) -> Option<CustomerSegments> {
    match &record.detail {
        FaultDetail::Op5 {
            affected_population, ..
        } => *affected_population,
        FaultDetail::ControlOutage {
            customers_affected, ..
        } => *customers_affected,
    }
}
