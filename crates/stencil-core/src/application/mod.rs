//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: the scaffold materializer and the generation pass
//! - **Ports**: traits for the filesystem and the scaffold asset source
//! - **Errors**: orchestration and I/O failures
//!
//! Generation rules live in `crate::domain`; this layer only sequences them
//! against the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    GenerationReport, GenerationService, LocationOutcome, MaterializationReport,
    ScaffoldMaterializer,
};

pub use ports::{AssetSource, Filesystem};

pub use error::ApplicationError;
