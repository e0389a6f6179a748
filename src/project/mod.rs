//! Locating the .NET project inside the application source tree
//!
//! The project directory comes from `BP_DOTNET_PROJECT_PATH` or, for older
//! apps, from `buildpack.yml`. The assets file the slicer reads lives in the
//! project's `obj/` directory after `dotnet publish` has run.

mod buildpack_yml;
mod project_file;

pub use buildpack_yml::{BuildpackYmlParser, BUILDPACK_YML};
pub use project_file::{is_project_file, ProjectFileParser, PROJECT_EXTENSIONS};

use crate::assets::ASSETS_FILE;
use crate::config::PublishConfig;
use crate::fs::{FileSystem, RealFileSystem};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("failed to read {path}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid buildpack.yml")]
    InvalidBuildpackYml(#[source] serde_yaml::Error),

    #[error("failed to parse project file {path}")]
    InvalidProjectFile {
        path: PathBuf,
        source: roxmltree::Error,
    },

    #[error("failed to find version in project file {0}: missing TargetFramework property")]
    MissingVersion(PathBuf),

    #[error("invalid runtime version {version} in project file {path}")]
    InvalidVersion { path: PathBuf, version: String },

    #[error("no project file found in {0}")]
    NoProjectFile(PathBuf),
}

/// A located .NET project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Project directory relative to the working directory ("" for the root)
    pub project_path: String,
    pub project_file: PathBuf,
    pub assets_file: PathBuf,
}

/// Assets file written for the project at `project_path`
pub fn assets_file(working_dir: &Path, project_path: &str) -> PathBuf {
    working_dir.join(project_path).join(ASSETS_FILE)
}

pub struct ProjectLocator {
    fs: Arc<dyn FileSystem>,
}

impl ProjectLocator {
    pub fn new() -> Self {
        Self::with_fs(Arc::new(RealFileSystem::new()))
    }

    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Project directory: configuration first, then `buildpack.yml`
    pub fn resolve_project_path(
        &self,
        config: &PublishConfig,
        working_dir: &Path,
    ) -> Result<String, ProjectError> {
        if let Some(path) = &config.project_path {
            debug!("Using project path from configuration: {}", path);
            return Ok(path.clone());
        }

        let parser = BuildpackYmlParser::new(self.fs.as_ref());
        let path = parser.parse_project_path(&working_dir.join(BUILDPACK_YML))?;

        if !path.is_empty() {
            warn!("Setting the project path through buildpack.yml is deprecated");
            warn!("Please specify the project path through the $BP_DOTNET_PROJECT_PATH environment variable instead");
        }

        Ok(path)
    }

    /// Resolves the project directory and finds its project file
    pub fn locate(
        &self,
        config: &PublishConfig,
        working_dir: &Path,
    ) -> Result<Project, ProjectError> {
        let project_path = self.resolve_project_path(config, working_dir)?;
        let root = working_dir.join(&project_path);

        let parser = ProjectFileParser::new(self.fs.as_ref());
        let project_file = parser
            .find_project_file(&root)?
            .ok_or_else(|| ProjectError::NoProjectFile(root.clone()))?;

        debug!("Found project file {}", project_file.display());

        Ok(Project {
            assets_file: assets_file(working_dir, &project_path),
            project_path,
            project_file,
        })
    }
}

impl Default for ProjectLocator {
    fn default() -> Self {
        Self::new()
    }
}
