//! Handlers 模块

pub mod auth;
pub mod faults;
pub mod menu;
pub mod metrics;
pub mod reference;

pub use auth::*;
pub use faults::*;
pub use menu::*;
pub use metrics::*;
pub use reference::*;
