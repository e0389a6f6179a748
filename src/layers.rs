//! Launch slices for the published application
//!
//! The lifecycle exports each launch slice as its own image layer. The
//! `.dotnet_root` symlink farm always gets a slice; the slicer's groups follow
//! when output slicing is enabled. Empty groups are dropped so no empty layer
//! is created.

use crate::config::PublishConfig;
use crate::error::SliceError;
use crate::slicer::{Slice, Slicer};
use std::path::Path;
use tracing::{debug, info};

/// Directory holding the links to the SDK and runtime inside the working directory
pub const DOTNET_ROOT_DIR: &str = ".dotnet_root";

/// Builds the ordered launch slices for a finished publish
///
/// A slicing failure fails the build; no partial slice list is returned.
pub fn launch_slices(
    config: &PublishConfig,
    assets_file: &Path,
    slicer: &dyn Slicer,
) -> Result<Vec<Slice>, SliceError> {
    let mut slices = vec![Slice::new([DOTNET_ROOT_DIR])];

    if config.disable_output_slicing {
        debug!("Skipping output slicing");
        return Ok(slices);
    }

    info!("Dividing build output into layers to optimize cache reuse");

    let output = slicer.slice(assets_file)?;
    for (kind, slice) in output.iter() {
        if slice.is_empty() {
            debug!("No files for {} slice", kind);
            continue;
        }
        debug!("{} slice: {} file(s)", kind, slice.len());
        slices.push(slice.clone());
    }

    Ok(slices)
}
