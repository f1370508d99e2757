#![forbid(unsafe_code)]

//! Rate Engine — Runtime
//!
//! Wraps the kernel with the JSON file contracts, replay, batch
//! quoting, fixture verification and drift detection.
//!
//! No domain logic lives here — replay and resolution are delegated
//! to the kernel.

pub mod error;
pub mod store;
pub mod event_store;
pub mod replay;
pub mod batch;
pub mod verify;
pub mod drift;
pub mod config;
pub mod logging;
pub mod app;

pub use error::{Result, RuntimeError};
