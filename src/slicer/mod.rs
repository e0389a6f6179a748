//! Output-layer slicing
//!
//! Reads the assets file left behind by `dotnet publish` and splits the
//! published files into three groups that change at different rates:
//! stable NuGet packages, pre-release packages, and project references from
//! the same solution. Each group becomes its own cacheable layer so an
//! application-only change does not re-upload unchanged dependencies.

mod slice;

pub use slice::{base_name, is_publishable, OutputSlices, Slice, SliceKind, EMPTY_ASSET_PLACEHOLDER};

use crate::assets::{decode_manifest, Manifest};
use crate::error::SliceError;
use crate::fs::{FileSystem, RealFileSystem};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Splits published output into cacheable slices
pub trait Slicer {
    fn slice(&self, assets_file: &Path) -> Result<OutputSlices, SliceError>;
}

/// [`Slicer`] driven by `project.assets.json`
pub struct OutputSlicer {
    fs: Arc<dyn FileSystem>,
}

impl OutputSlicer {
    pub fn new() -> Self {
        Self::with_fs(Arc::new(RealFileSystem::new()))
    }

    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl Default for OutputSlicer {
    fn default() -> Self {
        Self::new()
    }
}

impl Slicer for OutputSlicer {
    fn slice(&self, assets_file: &Path) -> Result<OutputSlices, SliceError> {
        debug!("Reading assets file {}", assets_file.display());

        let bytes = self.fs.read(assets_file).map_err(|source| SliceError::Open {
            path: assets_file.to_path_buf(),
            source,
        })?;

        let manifest = decode_manifest(&bytes).map_err(|source| SliceError::Decode {
            path: assets_file.to_path_buf(),
            source,
        })?;

        let slices = slice_manifest(&manifest);
        info!(
            packages = slices.packages.len(),
            early_packages = slices.early_packages.len(),
            projects = slices.projects.len(),
            "Identified output slices"
        );

        Ok(slices)
    }
}

/// Buckets every publishable file of a decoded manifest
///
/// Files are deduplicated within a bucket only. When two dependencies in
/// different buckets contribute the same base name, both buckets keep it.
pub fn slice_manifest(manifest: &Manifest) -> OutputSlices {
    let mut buckets: BTreeMap<SliceKind, BTreeSet<String>> = BTreeMap::new();

    for target in &manifest.targets {
        for dep in &target.dependencies {
            let Some(kind) = SliceKind::for_dependency(dep) else {
                continue;
            };

            let runtime = dep.runtime_files.iter().map(String::as_str);
            let runtime_targets = dep.runtime_targets.iter().map(|rt| rt.file_name.as_str());

            let files: Vec<&str> = runtime
                .chain(runtime_targets)
                .map(base_name)
                .filter(|name| is_publishable(name))
                .collect();

            if files.is_empty() {
                continue;
            }

            debug!(
                target = %target.name,
                dependency = %dep.name,
                slice = %kind,
                files = files.len(),
                "Slicing dependency"
            );

            let bucket = buckets.entry(kind).or_default();
            bucket.extend(files.into_iter().map(str::to_string));
        }
    }

    let mut slices = OutputSlices::default();
    for (kind, paths) in buckets {
        slices.get_mut(kind).paths = paths.into_iter().collect();
    }
    slices
}
