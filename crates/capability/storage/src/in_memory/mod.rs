//! 内存存储实现模块
//!
//! 仅用于本地演示和测试。
//!
//! 包含以下实现：
//! - FaultStore: InMemoryFaultStore
//! - ReferenceStore: InMemoryReferenceStore
//! - UserStore: InMemoryUserStore

pub mod fault;
pub mod reference;
pub mod user;

pub use fault::*;
pub use reference::*;
pub use user::*;
