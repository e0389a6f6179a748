//! dotnet-publish - output-layer slicing for .NET container image builds
//!
//! After `dotnet publish` finishes, the toolchain leaves a dependency-lock
//! manifest (`obj/project.assets.json`) next to the project. This crate
//! decodes that manifest and divides the published files into slices that
//! change at different rates, so each can be cached as its own image layer:
//!
//! - **packages**: stable NuGet package assemblies
//! - **early-packages**: pre-release packages (version carries a `-` marker)
//! - **projects**: assemblies built from other projects in the solution
//!
//! # Example
//!
//! ```no_run
//! use dotnet_publish::{OutputSlicer, Slicer};
//! use std::path::Path;
//!
//! let slices = OutputSlicer::new()
//!     .slice(Path::new("obj/project.assets.json"))
//!     .expect("slicing failed");
//!
//! for (kind, slice) in slices.iter() {
//!     println!("{}: {:?}", kind, slice.paths);
//! }
//! ```

pub mod assets;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod fs;
pub mod layers;
pub mod project;
pub mod slicer;
pub mod util;

pub use assets::{decode_manifest, DependencyKind, Manifest, ProjectDependency, RuntimeTarget, Target};
pub use config::{ConfigError, PublishConfig};
pub use detect::{BuildPlan, Detector, Requirement};
pub use error::{DecodeCategory, DecodeError, SliceError};
pub use layers::{launch_slices, DOTNET_ROOT_DIR};
pub use project::{assets_file, Project, ProjectError, ProjectLocator};
pub use slicer::{slice_manifest, OutputSlicer, OutputSlices, Slice, SliceKind, Slicer};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "dotnet-publish");
    }
}
