//! # Folio Core
//!
//! The domain layer of the Folio blog service.
//! This crate contains the blog document model, its query and mutation rules,
//! and the ports infrastructure must implement. It performs no I/O itself.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, StoreError};
pub use service::{BlogService, CorruptionPolicy};
