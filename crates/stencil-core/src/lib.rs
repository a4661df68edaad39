//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Stencil, a
//! generator for construct library projects.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ScaffoldMaterializer, GenerationService)│
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │        (Filesystem, AssetSource)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     stencil-adapters (Infrastructure)   │
//! │  (LocalFilesystem, EmbeddedAssets, ...) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! A generation pass has two halves. Managed files (README, workflows,
//! `package.json`) are declared into a [`domain::GenerationContext`] and
//! rewritten on every pass. Scaffold files (sample sources and tests) go
//! through the [`application::ScaffoldMaterializer`], which only writes into
//! locations the user has not populated yet.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stencil_core::prelude::*;
//!
//! # fn run(fs: Box<dyn Filesystem>, assets: &dyn AssetSource) -> StencilResult<()> {
//! let options = ProjectOptions {
//!     name: "my-construct".into(),
//!     ..ProjectOptions::default()
//! };
//! let templates = ProjectType::CdkConstruct.load_templates(assets, &options)?;
//! let mut ctx = GenerationContext::new("/tmp/my-construct", ProjectType::CdkConstruct, options);
//!
//! GenerationService::new(fs).generate(&mut ctx, &templates)?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationReport, GenerationService, MaterializationReport, ScaffoldMaterializer,
        ports::{AssetSource, Filesystem},
    };
    pub use crate::domain::{
        AssetTemplate, FileDeclaration, GenerationContext, LocationKind,
        MaterializationDecision, OutputLocation, ProjectOptions, ProjectOverrides, ProjectType,
        Snapshot,
    };
    pub use crate::error::{StencilError, StencilResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
