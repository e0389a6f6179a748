//! Dependency-lock manifest (`obj/project.assets.json`) produced by `dotnet restore`

mod model;

pub use model::{DependencyKind, Manifest, ProjectDependency, RuntimeTarget, Target};

use crate::error::DecodeError;
use tracing::debug;

/// Conventional location of the assets file relative to a project directory
pub const ASSETS_FILE: &str = "obj/project.assets.json";

/// Decodes raw assets-file bytes into a [`Manifest`]
///
/// Any value with the wrong shape fails the whole decode; malformed entries
/// usually mean the toolchain wrote a format this crate does not understand.
pub fn decode_manifest(bytes: &[u8]) -> Result<Manifest, DecodeError> {
    let manifest: Manifest = serde_json::from_slice(bytes)?;
    debug!(
        targets = manifest.targets.len(),
        "Decoded assets manifest"
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeCategory;

    const TWO_TARGETS: &str = r#"{
      "version": 3,
      "targets": {
        ".NETCoreApp,Version=v3.1": {
          "Microsoft.AspNetCore.Diagnostics.HealthChecks/2.2.0-rc1": {
            "type": "package",
            "dependencies": {
              "Microsoft.AspNetCore.Http.Abstractions": "2.2.0",
              "Microsoft.Net.Http.Headers": "2.2.0"
            },
            "compile": {
              "lib/netstandard2.0/Microsoft.AspNetCore.Diagnostics.HealthChecks.dll": {}
            },
            "runtime": {
              "lib/netstandard2.0/Microsoft.AspNetCore.Diagnostics.HealthChecks.dll": {}
            }
          }
        },
        ".NETCoreApp,Version=v6.0": {
          "Consul/0.7.2.6": {
            "type": "package",
            "compile": {
              "lib/netstandard1.3/Consul.dll": {}
            },
            "runtime": {
              "lib/netstandard1.3/Consul.dll": {}
            }
          }
        }
      },
      "libraries": {}
    }"#;

    #[test]
    fn test_decodes_targets_with_key_as_name() {
        let manifest = decode_manifest(TWO_TARGETS.as_bytes()).unwrap();
        assert_eq!(manifest.targets.len(), 2);

        assert!(manifest.targets.contains(&Target {
            name: ".NETCoreApp,Version=v3.1".to_string(),
            dependencies: vec![ProjectDependency {
                name: "Microsoft.AspNetCore.Diagnostics.HealthChecks/2.2.0-rc1".to_string(),
                kind: DependencyKind::Package,
                runtime_files: vec![
                    "lib/netstandard2.0/Microsoft.AspNetCore.Diagnostics.HealthChecks.dll"
                        .to_string()
                ],
                runtime_targets: vec![],
            }],
        }));
        assert!(manifest.targets.contains(&Target {
            name: ".NETCoreApp,Version=v6.0".to_string(),
            dependencies: vec![ProjectDependency {
                name: "Consul/0.7.2.6".to_string(),
                kind: DependencyKind::Package,
                runtime_files: vec!["lib/netstandard1.3/Consul.dll".to_string()],
                runtime_targets: vec![],
            }],
        }));
    }

    #[test]
    fn test_decodes_runtime_targets() {
        let input = r#"{
          "targets": {
            "net6.0": {
              "Microsoft.Win32.Registry/4.6.0": {
                "type": "package",
                "compile": { "ref/netstandard2.0/_._": {} },
                "runtime": { "lib/netstandard2.0/Microsoft.Win32.Registry.dll": {} },
                "runtimeTargets": {
                  "runtimes/unix/lib/netstandard2.0/Microsoft.Win32.Registry.dll": {
                    "assetType": "runtime",
                    "rid": "unix"
                  },
                  "runtimes/win/lib/netstandard2.0/Microsoft.Win32.Registry.dll": {
                    "assetType": "runtime",
                    "rid": "win"
                  }
                }
              }
            }
          }
        }"#;

        let manifest = decode_manifest(input.as_bytes()).unwrap();
        let dep = &manifest.targets[0].dependencies[0];
        assert_eq!(dep.runtime_targets.len(), 2);
        assert_eq!(
            dep.runtime_targets[0],
            RuntimeTarget {
                file_name: "runtimes/unix/lib/netstandard2.0/Microsoft.Win32.Registry.dll"
                    .to_string(),
                asset_type: "runtime".to_string(),
                rid: "unix".to_string(),
            }
        );
        assert_eq!(dep.runtime_targets[1].rid, "win");
    }

    #[test]
    fn test_multiple_runtime_files_are_kept() {
        let input = r#"{"targets": {"net8.0": {"Grpc.Core/2.46.6": {
            "type": "package",
            "runtime": { "lib/netstandard2.0/Grpc.Core.dll": {}, "lib/netstandard2.0/Grpc.Core.Api.dll": {} }
        }}}}"#;
        let manifest = decode_manifest(input.as_bytes()).unwrap();
        assert_eq!(manifest.targets[0].dependencies[0].runtime_files.len(), 2);
    }

    #[test]
    fn test_empty_runtime_object() {
        let input = r#"{"targets": {"net6.0": {"Meta/1.0.0": {"type": "package", "runtime": {}}}}}"#;
        let manifest = decode_manifest(input.as_bytes()).unwrap();
        assert!(manifest.targets[0].dependencies[0].runtime_files.is_empty());
    }

    #[test]
    fn test_missing_targets_is_empty_manifest() {
        let manifest = decode_manifest(br#"{"version": 3}"#).unwrap();
        assert!(manifest.targets.is_empty());
    }

    #[test]
    fn test_missing_type_is_other_kind() {
        let input = r#"{"targets": {"net6.0": {"Untyped/1.0.0": {}}}}"#;
        let manifest = decode_manifest(input.as_bytes()).unwrap();
        assert_eq!(
            manifest.targets[0].dependencies[0].kind,
            DependencyKind::Other(String::new())
        );
    }

    #[test]
    fn test_boolean_dependency_is_type_mismatch() {
        let input = r#"{
          "targets": {
            ".NETCoreApp,Version=v6.0": {
              "Consul/0.7.2.6": { "type": "package", "runtime": { "lib/netstandard1.3/Consul.dll": {} } },
              "some-garbage": true
            }
          }
        }"#;
        let err = decode_manifest(input.as_bytes()).unwrap_err();
        assert_eq!(err.category(), DecodeCategory::Shape);
        assert!(err.to_string().contains("invalid type: boolean `true`"), "{}", err);
    }

    #[test]
    fn test_array_runtime_is_rejected() {
        let input = r#"{"targets": {"net6.0": {"Consul/0.7.2.6": {"type": "package", "runtime": ["Consul.dll"]}}}}"#;
        let err = decode_manifest(input.as_bytes()).unwrap_err();
        assert_eq!(err.category(), DecodeCategory::Shape);
        assert!(err.to_string().contains("invalid type: sequence"), "{}", err);
    }

    #[test]
    fn test_runtime_target_missing_rid() {
        let input = r#"{"targets": {"net6.0": {"Native/1.0.0": {
            "type": "package",
            "runtimeTargets": { "runtimes/linux-x64/native/libnative.so": { "assetType": "native" } }
        }}}}"#;
        let err = decode_manifest(input.as_bytes()).unwrap_err();
        assert_eq!(err.category(), DecodeCategory::Shape);
        assert!(err.to_string().contains("missing field `rid`"), "{}", err);
    }

    #[test]
    fn test_runtime_target_wrong_shape() {
        let input = r#"{"targets": {"net6.0": {"Native/1.0.0": {
            "type": "package",
            "runtimeTargets": { "runtimes/linux-x64/native/libnative.so": "native" }
        }}}}"#;
        let err = decode_manifest(input.as_bytes()).unwrap_err();
        assert_eq!(err.category(), DecodeCategory::Shape);
    }

    #[test]
    fn test_garbage_input() {
        let err = decode_manifest(b"this is not json").unwrap_err();
        assert_eq!(err.category(), DecodeCategory::Syntax);
        assert!(err.to_string().contains("invalid JSON syntax"));
    }

    #[test]
    fn test_truncated_input() {
        let err = decode_manifest(br#"{"targets": {"net6.0": {"#).unwrap_err();
        assert_eq!(err.category(), DecodeCategory::Eof);
    }
}
