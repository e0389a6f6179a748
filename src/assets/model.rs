//! Typed model of `project.assets.json`
//!
//! The toolchain writes every listing as an object keyed by identifier:
//! targets by framework moniker, dependencies by `<id>/<version>`, runtime
//! targets by relative file path. Each level is read into a string-keyed map
//! and then re-projected into records that carry the key as a named field, so
//! nothing downstream deals with dynamic keys.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Decoded dependency-lock document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "targets_from_map")]
    pub targets: Vec<Target>,
}

/// Dependency closure for one target framework
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub dependencies: Vec<ProjectDependency>,
}

/// Declared kind of a dependency entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DependencyKind {
    Package,
    Project,
    /// Any kind the slicer does not publish, kept verbatim
    Other(String),
}

impl From<String> for DependencyKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "package" => DependencyKind::Package,
            "project" => DependencyKind::Project,
            _ => DependencyKind::Other(kind),
        }
    }
}

impl Default for DependencyKind {
    fn default() -> Self {
        DependencyKind::Other(String::new())
    }
}

/// One resolved dependency within a target
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectDependency {
    /// Map key: `<package-id>/<version>` or a bare project name
    #[serde(skip)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: DependencyKind,

    #[serde(rename = "runtime", default, deserialize_with = "keys_of_map")]
    pub runtime_files: Vec<String>,

    #[serde(
        rename = "runtimeTargets",
        default,
        deserialize_with = "runtime_targets_from_map"
    )]
    pub runtime_targets: Vec<RuntimeTarget>,
}

impl ProjectDependency {
    /// Version half of a `<id>/<version>` name; the whole name when there is no separator
    pub fn version(&self) -> &str {
        match self.name.rsplit_once('/') {
            Some((_, version)) => version,
            None => &self.name,
        }
    }

    /// Semantic-versioning pre-release marker present in the version
    pub fn is_prerelease(&self) -> bool {
        self.version().contains('-')
    }
}

/// Per-RID asset not covered by the default runtime closure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeTarget {
    pub file_name: String,
    pub asset_type: String,
    pub rid: String,
}

#[derive(Deserialize)]
struct RuntimeTargetFields {
    #[serde(rename = "assetType")]
    asset_type: String,
    rid: String,
}

fn targets_from_map<'de, D>(deserializer: D) -> Result<Vec<Target>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, BTreeMap<String, ProjectDependency>> =
        BTreeMap::deserialize(deserializer)?;

    Ok(raw
        .into_iter()
        .map(|(name, deps)| Target {
            name,
            dependencies: deps
                .into_iter()
                .map(|(dep_name, mut dep)| {
                    dep.name = dep_name;
                    dep
                })
                .collect(),
        })
        .collect())
}

fn keys_of_map<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, IgnoredAny> = BTreeMap::deserialize(deserializer)?;
    Ok(raw.into_keys().collect())
}

fn runtime_targets_from_map<'de, D>(deserializer: D) -> Result<Vec<RuntimeTarget>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, RuntimeTargetFields> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(file_name, fields)| RuntimeTarget {
            file_name,
            asset_type: fields.asset_type,
            rid: fields.rid,
        })
        .collect())
}
