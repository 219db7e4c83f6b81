//! # In-Memory Storage
//!
//! A reference implementation of the storage traits: per-user record
//! lists guarded by an async lock, with a broadcast channel per user that
//! pushes a full re-ordered snapshot after every mutation. Demonstrates
//! that the domain layer is storage-agnostic and gives the live-sync
//! layer something real to subscribe to in tests.

pub mod activity_repository;
pub mod connection;

pub use activity_repository::ActivityRepository;
pub use connection::MemoryConnection;
