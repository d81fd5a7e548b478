//! Sterilization batches
//!
//! Batch codes, the batch record with its append-only audit trail, and the
//! state machine that moves a batch through packaging and the autoclave.

pub mod code;
pub mod lifecycle;
pub mod types;

pub use code::{get_batch_by_code, validate_batch_code, BatchCodeGeneration, BatchCodeGenerator};
pub use lifecycle::{BatchEvent, BatchLifecycle};
pub use types::{
    BatchAuditAction, BatchAuditEvent, BatchStatus, PackageInfo, SterilizationBatch,
    SterilizationInfo,
};
