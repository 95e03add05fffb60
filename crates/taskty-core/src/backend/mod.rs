//! Backend Layer
//!
//! Abstract interfaces to the identity provider and document store.
//! Implementations: Firebase (in the frontend crate) and in-memory.

mod memory;
mod query;
mod subscription;
mod traits;

pub use memory::MemoryBackend;
pub use query::{TaskOrder, TaskQuery};
pub use subscription::Subscription;
pub use traits::{
    ErrorCallback, FederatedProvider, IdentityBackend, SessionCallback, SnapshotCallback,
    TaskStore,
};
