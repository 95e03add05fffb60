//! Domain Layer
//!
//! Entities and derived values. No backend or UI dependencies
//! (except serde and chrono).

mod error;
mod report;
mod session;
mod task;

pub use error::{BackendError, BackendResult, ValidationError};
pub use report::{Report, ReportEntry, TaskStats};
pub use session::{Session, SessionState, UserId};
pub use task::{NewTask, Task, TaskId};
