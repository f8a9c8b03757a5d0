//! Storage abstractions for service layer
//!
//! Uploaded photos are written to a directory on disk and referenced from the
//! database by file name only.

pub mod image_store;

pub use image_store::{DiskImageStore, ImageStore};
