//! # OMS Storage 模块
//!
//! 故障记录、地域参照与用户的统一存储抽象层。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：定义所有资源存储的异步 Trait 接口
//! 2. **数据模型层** (`models.rs`)：存储侧数据结构（领域记录直接复用 `domain`）
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **实现层**：`in_memory/`（RwLock + HashMap 内存存储）
//!
//! ## 核心特性
//!
//! - **乐观并发**：`commit_fault` 要求调用方携带读取时的 `version`，
//!   版本不一致返回 `CommitOutcome::Conflict`，保证同一记录上的
//!   resolve/edit/delete 串行化（两个并发 resolve 不可能都成功）
//! - **异步接口**：基于 async_trait，支持动态分发
//! - **可扩展性**：通过 Trait 接口支持替换为持久化后端

pub mod error;
pub mod in_memory;
pub mod models;
pub mod traits;

pub use error::StorageError;
pub use in_memory::{InMemoryFaultStore, InMemoryReferenceStore, InMemoryUserStore};
pub use models::UserRecord;
pub use traits::{CommitOutcome, FaultStore, ReferenceStore, UserStore};
