//! Slice types shared by the slicer and the launch layering step

use crate::assets::{DependencyKind, ProjectDependency};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder the toolchain writes where a package has no asset for a slot
pub const EMPTY_ASSET_PLACEHOLDER: &str = "_._";

/// Group of output file base names destined for one cache layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    pub paths: Vec<String>,
}

impl Slice {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }
}

/// Output bucket a dependency's files are filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SliceKind {
    Packages,
    EarlyPackages,
    Projects,
}

impl SliceKind {
    pub const ALL: [SliceKind; 3] = [
        SliceKind::Packages,
        SliceKind::EarlyPackages,
        SliceKind::Projects,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SliceKind::Packages => "packages",
            SliceKind::EarlyPackages => "early-packages",
            SliceKind::Projects => "projects",
        }
    }

    /// Bucket for a dependency, or `None` when its kind is never published
    ///
    /// Packages whose version carries a pre-release marker go to
    /// [`SliceKind::EarlyPackages`]; the dependency itself is left untouched.
    pub fn for_dependency(dep: &ProjectDependency) -> Option<Self> {
        match dep.kind {
            DependencyKind::Package if dep.is_prerelease() => Some(SliceKind::EarlyPackages),
            DependencyKind::Package => Some(SliceKind::Packages),
            DependencyKind::Project => Some(SliceKind::Projects),
            DependencyKind::Other(_) => None,
        }
    }
}

impl fmt::Display for SliceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three slices produced by one slicing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputSlices {
    pub packages: Slice,
    pub early_packages: Slice,
    pub projects: Slice,
}

impl OutputSlices {
    pub fn get(&self, kind: SliceKind) -> &Slice {
        match kind {
            SliceKind::Packages => &self.packages,
            SliceKind::EarlyPackages => &self.early_packages,
            SliceKind::Projects => &self.projects,
        }
    }

    pub fn get_mut(&mut self, kind: SliceKind) -> &mut Slice {
        match kind {
            SliceKind::Packages => &mut self.packages,
            SliceKind::EarlyPackages => &mut self.early_packages,
            SliceKind::Projects => &mut self.projects,
        }
    }

    /// Slices in packages, early-packages, projects order
    pub fn iter(&self) -> impl Iterator<Item = (SliceKind, &Slice)> {
        SliceKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn into_vec(self) -> Vec<Slice> {
        vec![self.packages, self.early_packages, self.projects]
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, slice)| slice.is_empty())
    }
}

/// Last element of a `/`-separated path, ignoring trailing separators
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Whether a base name refers to a real output file
pub fn is_publishable(name: &str) -> bool {
    !name.is_empty() && name != EMPTY_ASSET_PLACEHOLDER
}
