//! 故障记录模型
//!
//! 定义两类故障/停电记录的共同结构与变体字段：
//! - Op5：现场故障（带物理位置）
//! - ControlOutage：调度侧负荷停电（按 MW 计量）
//!
//! 不变式（`FaultRecord::validate` 统一校验）：
//! - `status == Resolved` 当且仅当 `restored_at_ms` 已设置
//! - `restored_at_ms >= occurred_at_ms`
//! - 浮点量（负荷、未供电量、MTTR）必须有限且非负

use std::fmt;

/// 故障类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultType {
    Planned,
    Unplanned,
    Emergency,
    LoadShedding,
}

impl FaultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultType::Planned => "Planned",
            FaultType::Unplanned => "Unplanned",
            FaultType::Emergency => "Emergency",
            FaultType::LoadShedding => "Load Shedding",
        }
    }

    /// 解析故障类型字符串。
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Planned" => Some(FaultType::Planned),
            "Unplanned" => Some(FaultType::Unplanned),
            "Emergency" => Some(FaultType::Emergency),
            "Load Shedding" => Some(FaultType::LoadShedding),
            _ => None,
        }
    }
}

/// 记录状态：Resolved 为终态，引擎不提供回退操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultStatus {
    Active,
    Resolved,
}

impl FaultStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultStatus::Active => "active",
            FaultStatus::Resolved => "resolved",
        }
    }
}

/// 按人口分段统计的客户数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomerSegments {
    pub rural: u64,
    pub urban: u64,
    pub metro: u64,
}

impl CustomerSegments {
    /// 三段合计。
    pub fn total(&self) -> u64 {
        self.rural + self.urban + self.metro
    }
}

/// 变体字段：OP5 现场故障或调度侧负荷停电。
#[derive(Debug, Clone, PartialEq)]
pub enum FaultDetail {
    Op5 {
        fault_location: String,
        mttr_hours: Option<f64>,
        affected_population: Option<CustomerSegments>,
    },
    ControlOutage {
        load_mw: f64,
        reason: Option<String>,
        area_affected: Option<String>,
        unserved_energy_mwh: Option<f64>,
        customers_affected: Option<CustomerSegments>,
    },
}

impl FaultDetail {
    /// 变体名（日志与 DTO 区分用）。
    pub fn kind(&self) -> &'static str {
        match self {
            FaultDetail::Op5 { .. } => "op5",
            FaultDetail::ControlOutage { .. } => "control_outage",
        }
    }
}

/// 故障/停电记录。
///
/// 权威副本由存储层持有；引擎只对传入的值做校验与变换，
/// 通过 `version` 做乐观并发控制。
#[derive(Debug, Clone, PartialEq)]
pub struct FaultRecord {
    pub fault_id: String,
    pub region_id: String,
    pub district_id: String,
    pub fault_type: FaultType,
    pub status: FaultStatus,
    pub occurred_at_ms: i64,
    pub restored_at_ms: Option<i64>,
    pub version: u64,
    pub detail: FaultDetail,
}

/// 不变式违例，整体拒绝补丁时返回。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// status 与 restored_at_ms 的存在性不一致。
    StatusRestorationMismatch,
    /// 恢复时间早于发生时间。
    RestorationBeforeOccurrence,
    /// 浮点量为负或非有限。
    NonFiniteOrNegative(&'static str),
    /// 补丁变体与记录变体不匹配。
    DetailVariantMismatch,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::StatusRestorationMismatch => {
                write!(f, "status and restoration date are inconsistent")
            }
            InvariantViolation::RestorationBeforeOccurrence => {
                write!(f, "restoration date precedes occurrence date")
            }
            InvariantViolation::NonFiniteOrNegative(field) => {
                write!(f, "{field} must be finite and non-negative")
            }
            InvariantViolation::DetailVariantMismatch => {
                write!(f, "patch detail does not match record variant")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl FaultRecord {
    /// 校验全部数据模型不变式。
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        match (self.status, self.restored_at_ms) {
            (FaultStatus::Resolved, None) | (FaultStatus::Active, Some(_)) => {
                return Err(InvariantViolation::StatusRestorationMismatch);
            }
            _ => {}
        }
        if let Some(restored) = self.restored_at_ms {
            if restored < self.occurred_at_ms {
                return Err(InvariantViolation::RestorationBeforeOccurrence);
            }
        }
        match &self.detail {
            FaultDetail::Op5 { mttr_hours, .. } => {
                if let Some(mttr) = mttr_hours {
                    ensure_finite_non_negative(*mttr, "mttr_hours")?;
                }
            }
            FaultDetail::ControlOutage {
                load_mw,
                unserved_energy_mwh,
                ..
            } => {
                ensure_finite_non_negative(*load_mw, "load_mw")?;
                if let Some(unserved) = unserved_energy_mwh {
                    ensure_finite_non_negative(*unserved, "unserved_energy_mwh")?;
                }
            }
        }
        Ok(())
    }

    /// 在副本上应用补丁并校验，原子地返回新记录或违例。
    ///
    /// 不修改 `self`；任何违例都不产生部分修改的结果。
    pub fn with_patch(&self, patch: &FaultPatch) -> Result<FaultRecord, InvariantViolation> {
        let mut next = self.clone();
        if let Some(fault_type) = patch.fault_type {
            next.fault_type = fault_type;
        }
        if let Some(occurred_at_ms) = patch.occurred_at_ms {
            next.occurred_at_ms = occurred_at_ms;
        }
        match (&mut next.detail, &patch.detail) {
            (_, None) => {}
            (
                FaultDetail::Op5 {
                    fault_location,
                    mttr_hours,
                    affected_population,
                },
                Some(FaultDetailPatch::Op5 {
                    fault_location: location_patch,
                    mttr_hours: mttr_patch,
                    affected_population: population_patch,
                }),
            ) => {
                if let Some(location) = location_patch {
                    *fault_location = location.clone();
                }
                if let Some(mttr) = mttr_patch {
                    *mttr_hours = Some(*mttr);
                }
                if let Some(population) = population_patch {
                    *affected_population = Some(*population);
                }
            }
            (
                FaultDetail::ControlOutage {
                    load_mw,
                    reason,
                    area_affected,
                    unserved_energy_mwh,
                    customers_affected,
                },
                Some(FaultDetailPatch::ControlOutage {
                    load_mw: load_patch,
                    reason: reason_patch,
                    area_affected: area_patch,
                    unserved_energy_mwh: unserved_patch,
                    customers_affected: customers_patch,
                }),
            ) => {
                if let Some(load) = load_patch {
                    *load_mw = *load;
                }
                if let Some(value) = reason_patch {
                    *reason = Some(value.clone());
                }
                if let Some(value) = area_patch {
                    *area_affected = Some(value.clone());
                }
                if let Some(value) = unserved_patch {
                    *unserved_energy_mwh = Some(*value);
                }
                if let Some(value) = customers_patch {
                    *customers_affected = Some(*value);
                }
            }
            _ => return Err(InvariantViolation::DetailVariantMismatch),
        }
        next.validate()?;
        Ok(next)
    }
}

/// 字段级可选补丁；未设置的字段保持原值。
#[derive(Debug, Clone, Default)]
pub struct FaultPatch {
    pub fault_type: Option<FaultType>,
    pub occurred_at_ms: Option<i64>,
    pub detail: Option<FaultDetailPatch>,
}

/// 变体字段补丁，必须与记录变体一致。
#[derive(Debug, Clone)]
pub enum FaultDetailPatch {
    Op5 {
        fault_location: Option<String>,
        mttr_hours: Option<f64>,
        affected_population: Option<CustomerSegments>,
    },
    ControlOutage {
        load_mw: Option<f64>,
        reason: Option<String>,
        area_affected: Option<String>,
        unserved_energy_mwh: Option<f64>,
        customers_affected: Option<CustomerSegments>,
    },
}

fn ensure_finite_non_negative(
    value: f64,
    field: &'static str,
) -> Result<(), InvariantViolation> {
    if !value.is_finite() || value < 0.0 {
        return Err(InvariantViolation::NonFiniteOrNegative(field));
    }
    Ok(())
}
