pub mod fault;
pub mod identity;

pub use fault::{
    CustomerSegments, FaultDetail, FaultDetailPatch, FaultPatch, FaultRecord, FaultStatus,
    FaultType, InvariantViolation,
};
pub use identity::{District, Region, Role, UserIdentity};
