//! 角色层级：资历全序上的支配关系。

use domain::Role;

/// 角色 `a` 是否支配角色 `b`（资历不低于即可）。
///
/// 纯函数、全定义、无失败路径；仅作为判定积木使用。
pub fn dominates(a: Role, b: Role) -> bool {
    a >= b
}
