//! packgen core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the packgen
//! module graph generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           packgen-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (GenerateService, GraphService)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: GraphSource, Renderer, Files)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    packgen-adapters (Infrastructure)    │
//! │ (GraphLoader, LocalFilesystem, etc)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Module, ModuleNode, GraphValidator)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use packgen_core::prelude::*;
//!
//! let config = PackageConfiguration::builder("Shop").build().unwrap();
//! let client = Module::new("Client", ModuleLocation::typed(ModuleType::Client));
//! let screen = Module::new("Screen", ModuleLocation::typed(ModuleType::Screen));
//!
//! let graph = ModuleGraph::new([
//!     ModuleNode::new(client.clone()),
//!     ModuleNode::new(screen)
//!         .with_dependency(ModuleTarget::Main, ModuleDependency::module(&client)),
//! ])
//! .unwrap();
//!
//! graph.validate(&config).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateOptions, GenerateService, GenerationReport, GraphService, GraphSummary,
        ModuleInfo,
        ports::{Filesystem, GraphDefinition, GraphSource, ModuleRenderer},
    };
    pub use crate::domain::{
        DomainError, ExternalDependency, MacroConfiguration, Module, ModuleDependency,
        ModuleGraph, ModuleLocation, ModuleNode, ModuleTarget, ModuleType, PackageConfiguration,
        Platform, ProductKind, ProjectStructure,
    };
    pub use crate::error::{PackgenError, PackgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
