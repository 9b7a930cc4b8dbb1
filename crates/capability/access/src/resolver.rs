//! 动作级权限判定
//!
//! 将角色层级与地域作用域组合为具体动作的判定：
//! - can_resolve：仅限 active 记录（resolve 不可重入）
//! - can_edit / can_delete：与 resolve 同样的角色与作用域规则，
//!   但不受记录状态限制（记录管理动作独立于生命周期）
//! - can_view：只读查看（技术员限本区/本区域）
//! - menu_visible：非记录类菜单可见性，含技术员 analytics 禁入特例
//!
//! 角色缺失或无法识别时所有判定为 false。

use crate::hierarchy::dominates;
use crate::scope::{scope_covers, ReferenceDirectory};
use domain::{FaultRecord, FaultStatus, Role, UserIdentity};

/// analytics 受限子树：技术员无论层级比较结果如何都不可见。
const ANALYTICS_PREFIX: &str = "/analytics";

/// 三个记录管理动作的判定快照，供调用方决定提供哪些操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionSnapshot {
    pub can_edit: bool,
    pub can_resolve: bool,
    pub can_delete: bool,
}

/// 是否允许将记录标记为已恢复。
///
/// 已恢复的记录对任何用户都返回 false；其余情况要求角色不低于
/// district_engineer 且作用域覆盖（作用域随角色放宽：区工程师须
/// 区名精确匹配，区域工程师只须区域匹配，更高角色无须匹配）。
pub fn can_resolve(user: &UserIdentity, record: &FaultRecord, dir: &ReferenceDirectory) -> bool {
    if record.status == FaultStatus::Resolved {
        return false;
    }
    record_action_allowed(user, record, dir)
}

/// 是否允许编辑记录；不受记录状态限制。
pub fn can_edit(user: &UserIdentity, record: &FaultRecord, dir: &ReferenceDirectory) -> bool {
    record_action_allowed(user, record, dir)
}

/// 是否允许删除记录；不受记录状态限制。
pub fn can_delete(user: &UserIdentity, record: &FaultRecord, dir: &ReferenceDirectory) -> bool {
    record_action_allowed(user, record, dir)
}

/// 是否允许查看记录。
///
/// 技术员可查看本区（无区名时退化为本区域）的记录；
/// 其余角色与记录管理动作同样的作用域规则。
pub fn can_view(user: &UserIdentity, record: &FaultRecord, dir: &ReferenceDirectory) -> bool {
    match user.role {
        None => false,
        Some(Role::Technician) => match (user.district.as_deref(), user.region.as_deref()) {
            (Some(district), _) => dir.district_name_of(record) == Some(district),
            (None, Some(region)) => dir.region_name_of(record) == Some(region),
            (None, None) => false,
        },
        Some(_) => scope_covers(user, record, dir),
    }
}

/// 一次评估三个记录管理动作，作为供 UI 使用的快照。
pub fn evaluate(
    user: &UserIdentity,
    record: &FaultRecord,
    dir: &ReferenceDirectory,
) -> PermissionSnapshot {
    PermissionSnapshot {
        can_edit: can_edit(user, record, dir),
        can_resolve: can_resolve(user, record, dir),
        can_delete: can_delete(user, record, dir),
    }
}

/// 非记录类菜单的可见性判定。
///
/// - `system_admin`：恒可见
/// - `technician`：仅当要求角色为 district_engineer 且当前路径
///   不在 analytics 子树下（显式特例，不并入层级比较）
/// - 其余角色：层级支配关系
pub fn menu_visible(user: &UserIdentity, required_role: Role, current_path: &str) -> bool {
    match user.role {
        None => false,
        Some(Role::SystemAdmin) => true,
        Some(Role::Technician) => {
            required_role == Role::DistrictEngineer && !current_path.starts_with(ANALYTICS_PREFIX)
        }
        Some(role) => dominates(role, required_role),
    }
}

/// resolve/edit/delete 共用的角色 + 作用域规则。
fn record_action_allowed(
    user: &UserIdentity,
    record: &FaultRecord,
    dir: &ReferenceDirectory,
) -> bool {
    let role = match user.role {
        Some(role) => role,
        None => return false,
    };
    dominates(role, Role::DistrictEngineer) && scope_covers(user, record, dir)
}
