//! 地域作用域匹配
//!
//! 判断用户的地域授权是否覆盖某条故障记录。
//! 记录只携带 region_id/district_id，用户携带名称，
//! 因此需要通过参照目录把 id 解析成名称后再比较。
//! 任何解析失败（id 查不到）都按不覆盖处理。

use domain::{District, FaultRecord, Region, Role, UserIdentity};
use std::collections::HashMap;

/// 地域参照目录：region_id/district_id 到名称的只读快照。
///
/// 由 `ReferenceStore` 的列表构建，构建后判定全程无 I/O。
#[derive(Debug, Clone, Default)]
pub struct ReferenceDirectory {
    regions: HashMap<String, String>,
    districts: HashMap<String, String>,
}

impl ReferenceDirectory {
    /// 从参照实体列表构建目录。
    pub fn new(regions: &[Region], districts: &[District]) -> Self {
        let regions = regions
            .iter()
            .map(|region| (region.region_id.clone(), region.name.clone()))
            .collect();
        let districts = districts
            .iter()
            .map(|district| (district.district_id.clone(), district.name.clone()))
            .collect();
        Self { regions, districts }
    }

    /// 解析记录所属区域名；查不到返回 None。
    pub fn region_name_of(&self, record: &FaultRecord) -> Option<&str> {
        self.regions.get(&record.region_id).map(String::as_str)
    }

    /// 解析记录所属区名；查不到返回 None。
    pub fn district_name_of(&self, record: &FaultRecord) -> Option<&str> {
        self.districts.get(&record.district_id).map(String::as_str)
    }
}

/// 用户作用域是否覆盖记录。
///
/// - `system_admin` / `global_engineer`：无条件覆盖
/// - `regional_engineer`：用户区域名与记录区域名相等
/// - `district_engineer`：用户区名与记录区名相等；若用户还设置了区域名，
///   区域也必须一致（区/区域配对异常按数据完整性问题收紧为不覆盖）
/// - `technician`：resolve/delete 语境下从不覆盖
/// - 角色缺失：不覆盖
pub fn scope_covers(user: &UserIdentity, record: &FaultRecord, dir: &ReferenceDirectory) -> bool {
    match user.role {
        Some(Role::SystemAdmin) | Some(Role::GlobalEngineer) => true,
        Some(Role::RegionalEngineer) => region_matches(user, record, dir),
        Some(Role::DistrictEngineer) => {
            let district_matches = match (user.district.as_deref(), dir.district_name_of(record)) {
                (Some(user_district), Some(record_district)) => user_district == record_district,
                _ => false,
            };
            if !district_matches {
                return false;
            }
            // 用户若带区域名，必须与记录区域一致
            match user.region.as_deref() {
                Some(_) => region_matches(user, record, dir),
                None => true,
            }
        }
        Some(Role::Technician) | None => false,
    }
}

fn region_matches(user: &UserIdentity, record: &FaultRecord, dir: &ReferenceDirectory) -> bool {
    match (user.region.as_deref(), dir.region_name_of(record)) {
        (Some(user_region), Some(record_region)) => user_region == record_region,
        _ => false,
    }
}
