//! Storage layer: the external-store contract plus the in-memory
//! reference backend used by tests and the live-sync layer.

pub mod memory;
pub mod traits;

pub use memory::MemoryConnection;
pub use traits::{ActivityStorage, Connection};
