//! 身份与地域参照模型
//!
//! 定义授权判定所需的输入：
//! - Role：有序角色枚举（资历从低到高）
//! - UserIdentity：调用者身份（角色 + 地域作用域）
//! - Region / District：地域参照实体（引擎只读，不拥有）

use std::fmt;
use std::str::FromStr;

/// 角色枚举，顺序即资历。
///
/// 派生 `Ord` 使比较直接反映支配关系：变体声明顺序从低到高。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Technician,
    DistrictEngineer,
    RegionalEngineer,
    GlobalEngineer,
    SystemAdmin,
}

impl Role {
    /// 稳定的字符串表示（与外部系统交换用）。
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Technician => "technician",
            Role::DistrictEngineer => "district_engineer",
            Role::RegionalEngineer => "regional_engineer",
            Role::GlobalEngineer => "global_engineer",
            Role::SystemAdmin => "system_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    /// 解析角色字符串；未知值返回错误，调用方按最严格处理。
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "technician" => Ok(Role::Technician),
            "district_engineer" => Ok(Role::DistrictEngineer),
            "regional_engineer" => Ok(Role::RegionalEngineer),
            "global_engineer" => Ok(Role::GlobalEngineer),
            "system_admin" => Ok(Role::SystemAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// 无法识别的角色字符串。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

/// 调用者身份：所有权限判定的显式输入。
///
/// `role` 为 `None` 表示未认证或角色无法识别，所有判定按拒绝处理。
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub user_id: String,
    pub username: String,
    pub role: Option<Role>,
    pub region: Option<String>,
    pub district: Option<String>,
}

impl UserIdentity {
    /// 构造带角色与地域作用域的身份。
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        role: Option<Role>,
        region: Option<String>,
        district: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            role,
            region,
            district,
        }
    }
}

impl Default for UserIdentity {
    /// 未认证占位身份（仅用于测试或默认值）。
    fn default() -> Self {
        Self {
            user_id: "".to_string(),
            username: "".to_string(),
            role: None,
            region: None,
            district: None,
        }
    }
}

/// 区域参照实体。
#[derive(Debug, Clone)]
pub struct Region {
    pub region_id: String,
    pub name: String,
}

/// 区参照实体，按 id 反向引用所属区域。
#[derive(Debug, Clone)]
pub struct District {
    pub district_id: String,
    pub region_id: String,
    pub name: String,
}
