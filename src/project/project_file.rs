//! MSBuild project file discovery and inspection

use super::ProjectError;
use crate::fs::{FileSystem, FileType};
use roxmltree::{Document, Node};
use std::io;
use std::path::{Path, PathBuf};

/// Project file extensions for C#, F# and Visual Basic
pub const PROJECT_EXTENSIONS: [&str; 3] = ["csproj", "fsproj", "vbproj"];

const WEB_SDK: &str = "Microsoft.NET.Sdk.Web";

pub struct ProjectFileParser<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ProjectFileParser<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// First project file directly inside `root`, in name order
    pub fn find_project_file(&self, root: &Path) -> Result<Option<PathBuf>, ProjectError> {
        let entries = match self.fs.read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ProjectError::Read {
                    path: root.to_path_buf(),
                    source,
                })
            }
        };

        let mut candidates: Vec<PathBuf> = entries
            .into_iter()
            .filter(|entry| entry.file_type() == FileType::File)
            .filter(|entry| is_project_file(entry.path()))
            .map(|entry| entry.path)
            .collect();
        candidates.sort();

        Ok(candidates.into_iter().next())
    }

    /// .NET runtime version the project targets
    ///
    /// An explicit `RuntimeFrameworkVersion` wins; otherwise the version is
    /// derived from a `netcoreappX.Y` or `netX.Y` `TargetFramework`.
    pub fn parse_version(&self, path: &Path) -> Result<String, ProjectError> {
        let content = self.read(path)?;
        let doc = self.parse(path, &content)?;

        let groups: Vec<Node<'_, '_>> = doc
            .root_element()
            .children()
            .filter(|n| n.has_tag_name("PropertyGroup"))
            .collect();

        for group in &groups {
            if let Some(version) = child_text(group, "RuntimeFrameworkVersion") {
                return Ok(version.to_string());
            }
        }

        for group in &groups {
            if let Some(version) =
                child_text(group, "TargetFramework").and_then(version_from_target_framework)
            {
                return Ok(version);
            }
        }

        Err(ProjectError::MissingVersion(path.to_path_buf()))
    }

    /// Whether the project uses the ASP.NET Core web SDK
    pub fn aspnet_required(&self, path: &Path) -> Result<bool, ProjectError> {
        let content = self.read(path)?;
        let doc = self.parse(path, &content)?;
        Ok(doc.root_element().attribute("Sdk") == Some(WEB_SDK))
    }

    fn read(&self, path: &Path) -> Result<String, ProjectError> {
        self.fs
            .read_to_string(path)
            .map_err(|source| ProjectError::Read {
                path: path.to_path_buf(),
                source,
            })
    }

    fn parse<'input>(
        &self,
        path: &Path,
        content: &'input str,
    ) -> Result<Document<'input>, ProjectError> {
        Document::parse(content).map_err(|source| ProjectError::InvalidProjectFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn is_project_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| PROJECT_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn child_text<'a>(node: &Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// `netcoreapp3.1` -> `3.1.0`, `net6.0` / `net8.0-windows` -> `6.0.0` / `8.0.0`
fn version_from_target_framework(framework: &str) -> Option<String> {
    let rest = framework
        .strip_prefix("netcoreapp")
        .or_else(|| framework.strip_prefix("net"))?;
    let rest = rest.split('-').next().unwrap_or(rest);

    let starts_with_digit = rest.chars().next().is_some_and(|c| c.is_ascii_digit());
    if !starts_with_digit || !rest.contains('.') {
        return None;
    }

    Some(format!("{}.0", rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    const WEB_PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <PropertyGroup>
    <TargetFramework>net6.0</TargetFramework>
  </PropertyGroup>
</Project>"#;

    #[test]
    fn test_find_project_file_none() {
        let fs = MockFileSystem::new();
        fs.add_dir("/workspace");
        let parser = ProjectFileParser::new(&fs);
        assert_eq!(parser.find_project_file(Path::new("/workspace")).unwrap(), None);
    }

    #[test]
    fn test_find_project_file_missing_root() {
        let fs = MockFileSystem::new();
        let parser = ProjectFileParser::new(&fs);
        assert_eq!(parser.find_project_file(Path::new("/workspace/src")).unwrap(), None);
    }

    #[test]
    fn test_find_project_file_each_language() {
        for name in ["app.csproj", "app.fsproj", "app.vbproj"] {
            let fs = MockFileSystem::new();
            fs.add_file(name, "<Project />");
            fs.add_file("Program.cs", "");

            let parser = ProjectFileParser::new(&fs);
            assert_eq!(
                parser.find_project_file(Path::new("/workspace")).unwrap(),
                Some(PathBuf::from("/workspace").join(name))
            );
        }
    }

    #[test]
    fn test_find_project_file_ignores_nested_projects() {
        let fs = MockFileSystem::new();
        fs.add_file("tests/app.Tests.csproj", "<Project />");
        fs.add_file("console.csproj", "<Project />");
        fs.add_file("api.csproj", "<Project />");

        let parser = ProjectFileParser::new(&fs);
        assert_eq!(
            parser.find_project_file(Path::new("/workspace")).unwrap(),
            Some(PathBuf::from("/workspace/api.csproj"))
        );
    }

    #[test]
    fn test_parse_version_runtime_framework_version_wins() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "app.csproj",
            r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>netcoreapp3.1</TargetFramework>
  </PropertyGroup>
  <PropertyGroup>
    <RuntimeFrameworkVersion>3.1.22</RuntimeFrameworkVersion>
  </PropertyGroup>
</Project>"#,
        );

        let parser = ProjectFileParser::new(&fs);
        assert_eq!(
            parser.parse_version(Path::new("/workspace/app.csproj")).unwrap(),
            "3.1.22"
        );
    }

    #[test]
    fn test_parse_version_from_target_framework() {
        let fs = MockFileSystem::new();
        fs.add_file("app.csproj", WEB_PROJECT);

        let parser = ProjectFileParser::new(&fs);
        assert_eq!(
            parser.parse_version(Path::new("/workspace/app.csproj")).unwrap(),
            "6.0.0"
        );
    }

    #[test]
    fn test_parse_version_missing() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "lib.csproj",
            "<Project><PropertyGroup><TargetFramework>netstandard2.0</TargetFramework></PropertyGroup></Project>",
        );

        let parser = ProjectFileParser::new(&fs);
        let err = parser
            .parse_version(Path::new("/workspace/lib.csproj"))
            .unwrap_err();
        assert!(matches!(err, ProjectError::MissingVersion(_)));
    }

    #[test]
    fn test_parse_version_invalid_xml() {
        let fs = MockFileSystem::new();
        fs.add_file("app.csproj", "<Project><PropertyGroup>");

        let parser = ProjectFileParser::new(&fs);
        let err = parser
            .parse_version(Path::new("/workspace/app.csproj"))
            .unwrap_err();
        assert!(matches!(err, ProjectError::InvalidProjectFile { .. }));
    }

    #[test]
    fn test_aspnet_required() {
        let fs = MockFileSystem::new();
        fs.add_file("web.csproj", WEB_PROJECT);
        fs.add_file("console.csproj", "<Project Sdk=\"Microsoft.NET.Sdk\" />");

        let parser = ProjectFileParser::new(&fs);
        assert!(parser.aspnet_required(Path::new("/workspace/web.csproj")).unwrap());
        assert!(!parser
            .aspnet_required(Path::new("/workspace/console.csproj"))
            .unwrap());
    }

    #[test]
    fn test_version_from_target_framework() {
        assert_eq!(version_from_target_framework("netcoreapp2.1"), Some("2.1.0".to_string()));
        assert_eq!(version_from_target_framework("net8.0"), Some("8.0.0".to_string()));
        assert_eq!(
            version_from_target_framework("net7.0-windows"),
            Some("7.0.0".to_string())
        );
        assert_eq!(version_from_target_framework("netstandard2.0"), None);
        assert_eq!(version_from_target_framework("net48"), None);
    }
}
