//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `packgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `GraphSource`: Where the module graph and configuration come from
//!   - `ModuleRenderer`: Manifest and placeholder rendering
//!   - `Filesystem`: File operations
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, GraphDefinition, GraphSource, ModuleRenderer};

#[cfg(test)]
pub use output::{MockFilesystem, MockGraphSource, MockModuleRenderer};
