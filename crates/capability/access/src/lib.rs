//! 授权能力：角色层级、地域作用域与动作级权限判定。
//!
//! 全部为纯函数：输入是显式传入的身份、记录与地域参照快照，
//! 无全局会话状态，无 I/O。判定失败一律收紧（fail-closed）。

mod hierarchy;
mod resolver;
mod scope;

pub use hierarchy::dominates;
pub use resolver::{
    can_delete, can_edit, can_resolve, can_view, evaluate, menu_visible, PermissionSnapshot,
};
pub use scope::{scope_covers, ReferenceDirectory};
