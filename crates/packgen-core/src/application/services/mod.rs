//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate the graph" or "describe the graph".

pub mod generate_service;
pub mod graph_service;

pub use generate_service::{GenerateOptions, GenerateService, GenerationReport, ModuleReport};
pub use graph_service::{GraphService, GraphSummary, ModuleInfo, TargetInfo};
