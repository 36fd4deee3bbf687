//! Starter graph manifest written by `packgen init`.
//!
//! The starter declares one module of each common kind, wired the way a
//! typical feature is: a screen that depends on a client and re-exports it,
//! with a shared utility injected into every screen through a global
//! dependency. It loads and validates as-is.

use crate::graph_loader::MANIFEST_FILE_NAME;

/// File name the starter is written under.
pub const STARTER_FILE_NAME: &str = MANIFEST_FILE_NAME;

const TEMPLATE: &str = r#"# packgen graph manifest.
# Run `packgen validate` to check the graph and `packgen generate` to write it.

[package]
app_name      = "{{APP_NAME}}"
tools_version = "6.0"
platforms     = ["iOS 17", "macOS 14"]

[directories]
base_path = "Modules"

# Every screen's main target gets these on top of its own dependencies.
[[global_dependencies]]
type         = "screen"
target       = "main"
dependencies = ["Utilities"]

[[modules]]
name = "Utilities"
type = "utility"

[[modules]]
name  = "{{APP_NAME}}Client"
type  = "client"
tests = true

[[modules]]
name    = "Home"
type    = "screen"
exports = ["{{APP_NAME}}Client"]
[modules.dependencies]
main  = ["{{APP_NAME}}Client"]
views = ["{{APP_NAME}}Client:interface"]
"#;

/// Starter manifest text for an app called `app_name`.
pub fn starter_manifest(app_name: &str) -> String {
    TEMPLATE.replace("{{APP_NAME}}", app_name)
}
