//! Build plan for a .NET application
//!
//! Detection locates the project file and states what the build needs: an
//! SDK matching the project's major runtime version, ICU, and the ASP.NET
//! Core runtime for web projects. In return the build provides the
//! `dotnet-application` entry that later steps depend on.

use crate::config::PublishConfig;
use crate::fs::{FileSystem, RealFileSystem};
use crate::project::{Project, ProjectError, ProjectFileParser, ProjectLocator};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub const PROVIDES_APPLICATION: &str = "dotnet-application";
pub const REQUIRES_SDK: &str = "dotnet-sdk";
pub const REQUIRES_ICU: &str = "icu";
pub const REQUIRES_ASPNETCORE: &str = "dotnet-aspnetcore";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provision {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RequirementMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_source: Option<String>,
    #[serde(default)]
    pub build: bool,
    #[serde(default)]
    pub launch: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub metadata: RequirementMetadata,
}

impl Requirement {
    fn build_only(name: &str) -> Self {
        Self {
            name: name.to_string(),
            metadata: RequirementMetadata {
                build: true,
                ..Default::default()
            },
        }
    }
}

/// What a build provides and requires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub provides: Vec<Provision>,
    pub requires: Vec<Requirement>,
}

impl BuildPlan {
    pub fn requirement(&self, name: &str) -> Option<&Requirement> {
        self.requires.iter().find(|r| r.name == name)
    }
}

pub struct Detector {
    fs: Arc<dyn FileSystem>,
}

impl Detector {
    pub fn new() -> Self {
        Self::with_fs(Arc::new(RealFileSystem::new()))
    }

    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Locates the project under `working_dir` and derives its build plan
    pub fn detect(
        &self,
        config: &PublishConfig,
        working_dir: &Path,
    ) -> Result<BuildPlan, ProjectError> {
        let project = ProjectLocator::with_fs(Arc::clone(&self.fs)).locate(config, working_dir)?;
        self.plan_for(&project)
    }

    fn plan_for(&self, project: &Project) -> Result<BuildPlan, ProjectError> {
        let parser = ProjectFileParser::new(self.fs.as_ref());
        let path = &project.project_file;

        let version = parser.parse_version(path)?;
        let major = major_version(&version).ok_or_else(|| ProjectError::InvalidVersion {
            path: path.clone(),
            version: version.clone(),
        })?;
        info!("Project targets .NET runtime {}", version);

        let version_source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        let mut requires = vec![
            Requirement {
                name: REQUIRES_SDK.to_string(),
                metadata: RequirementMetadata {
                    version: Some(format!("{}.*", major)),
                    version_source,
                    build: true,
                    launch: false,
                },
            },
            Requirement::build_only(REQUIRES_ICU),
        ];

        if parser.aspnet_required(path)? {
            debug!("Project uses the web SDK");
            requires.push(Requirement::build_only(REQUIRES_ASPNETCORE));
        }

        Ok(BuildPlan {
            provides: vec![Provision {
                name: PROVIDES_APPLICATION.to_string(),
            }],
            requires,
        })
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

/// Leading numeric component of a dotted version (`6.0.0` -> 6, `8.0.0-rc.1` -> 8)
fn major_version(version: &str) -> Option<u64> {
    version
        .trim()
        .trim_start_matches('v')
        .split(|c: char| matches!(c, '.' | '-' | '+'))
        .next()?
        .parse()
        .ok()
}
