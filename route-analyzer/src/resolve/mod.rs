//! Cross-file resolution: module paths, package manifests and constant values.

pub mod constant;
pub mod manifest;
pub mod module_path;

pub use constant::{ConstantResolver, SymbolRef};
pub use manifest::{ManifestDependency, ManifestResolver, PackageManifest};
pub use module_path::{LocatedModule, ModuleResolver};
