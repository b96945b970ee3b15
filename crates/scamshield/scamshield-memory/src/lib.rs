//! # scamshield-memory
//!
//! Persists every analysed submission as a [`MemoryRecord`] in the private
//! memory collection so later, similar submissions can retrieve it.
//!
//! Writes are append-only and best-effort: each one gets a fresh id, runs
//! in the background, and a failure never reaches the caller.
//!
//! [`MemoryRecord`]: scamshield_core::models::MemoryRecord

pub mod writer;

pub use writer::MemoryWriter;
