//! Service layer for the orphanage directory.
//! - Orchestrates image storage, validation and persistence.
//! - Reuses validation and entity definitions in `models` crate.
//! - Shapes persisted records into their public representation.

pub mod errors;
pub mod runtime;
pub mod metrics;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod orphanage;
