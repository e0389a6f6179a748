//! Legacy `buildpack.yml` project-path configuration

use super::ProjectError;
use crate::fs::FileSystem;
use serde::Deserialize;
use std::io;
use std::path::Path;

pub const BUILDPACK_YML: &str = "buildpack.yml";

#[derive(Debug, Default, Deserialize)]
struct BuildpackYml {
    #[serde(rename = "dotnet-build", default)]
    dotnet_build: DotnetBuildSection,
}

#[derive(Debug, Default, Deserialize)]
struct DotnetBuildSection {
    #[serde(rename = "project-path", default)]
    project_path: String,
}

/// Reads `dotnet-build.project-path` from a `buildpack.yml` file
pub struct BuildpackYmlParser<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> BuildpackYmlParser<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Returns the configured project path, or an empty string when the file
    /// or the key is absent
    pub fn parse_project_path(&self, path: &Path) -> Result<String, ProjectError> {
        let content = match self.fs.read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(String::new()),
            Err(source) => {
                return Err(ProjectError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(String::new());
        }

        let parsed: BuildpackYml =
            serde_yaml::from_str(&content).map_err(ProjectError::InvalidBuildpackYml)?;
        Ok(parsed.dotnet_build.project_path)
    }
}
