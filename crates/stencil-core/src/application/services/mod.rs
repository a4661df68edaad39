//! Application services - orchestrate use cases.

pub mod generation;
pub mod materializer;
pub mod template_loader;

pub use generation::{GenerationReport, GenerationService};
pub use materializer::{LocationOutcome, MaterializationReport, ScaffoldMaterializer};
