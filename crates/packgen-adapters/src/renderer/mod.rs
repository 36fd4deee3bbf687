//! Module renderers.

mod manifest;

pub use manifest::{PackageManifestRenderer, SWIFT_SYNTAX_URL};
