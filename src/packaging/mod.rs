//! Packaging sessions
//!
//! An operator scans tools into a session before they are finalized into a
//! sterilization batch.

pub mod manager;
pub mod session;

pub use manager::PackagingSessionManager;
pub use session::{PackagingSession, SessionStatus, Tool, ToolStatus};
