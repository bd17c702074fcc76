//! Filesystem collaborator capability
//!
//! The engine never touches the filesystem directly; it goes through [`Vfs`],
//! which provides exactly two reads: listing a directory and reading an
//! optional package descriptor. This keeps traversal primitives external to
//! the classification core and makes discovery testable against in-memory
//! trees.
//!
//! [`OsFs`] is the standard implementation. It reads descriptors from
//! `bundle.yaml` (the native format) falling back to `package.json` with an
//! optional `locator` table, so node-style package trees work out of the box.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, descriptor_parse_failed, descriptor_read_failed, dir_read_failed};

/// Native descriptor file name.
pub const YAML_DESCRIPTOR: &str = "bundle.yaml";
/// Node-compatible descriptor file name.
pub const JSON_DESCRIPTOR: &str = "package.json";

/// One directory entry as presented to the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Optional per-bundle metadata read from a package descriptor.
///
/// All three fields are optional and independently applied: an authoritative
/// bundle name, a redirected effective base directory (relative to the bundle
/// directory unless absolute), and an override ruleset name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Descriptor {
    pub name: Option<String>,
    pub base_dir: Option<String>,
    pub ruleset: Option<String>,
}

/// Filesystem read capability used by discovery.
///
/// `Sync` because sibling bundle discoveries run in parallel against the same
/// handle.
pub trait Vfs: Sync {
    /// List a directory's entries in lexicographic order by name.
    fn list_entries(&self, dir: &Path) -> Result<Vec<DirEntry>>;

    /// Read the package descriptor at `dir`, if one exists. Absence is not an
    /// error.
    fn read_descriptor(&self, dir: &Path) -> Result<Option<Descriptor>>;
}

/// [`Vfs`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl Vfs for OsFs {
    fn list_entries(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let read = std::fs::read_dir(dir)
            .map_err(|e| dir_read_failed(dir.display().to_string(), e.to_string()))?;
        let mut entries = Vec::new();
        for entry in read {
            let entry =
                entry.map_err(|e| dir_read_failed(dir.display().to_string(), e.to_string()))?;
            let file_type = entry
                .file_type()
                .map_err(|e| dir_read_failed(dir.display().to_string(), e.to_string()))?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: file_type.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_descriptor(&self, dir: &Path) -> Result<Option<Descriptor>> {
        let yaml_path = dir.join(YAML_DESCRIPTOR);
        match std::fs::read_to_string(&yaml_path) {
            Ok(text) => {
                return serde_yaml::from_str(&text).map(Some).map_err(|e| {
                    descriptor_parse_failed(yaml_path.display().to_string(), e.to_string())
                });
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(descriptor_read_failed(
                    yaml_path.display().to_string(),
                    e.to_string(),
                ));
            }
        }

        let json_path = dir.join(JSON_DESCRIPTOR);
        match std::fs::read_to_string(&json_path) {
            Ok(text) => {
                let manifest: PackageManifest = serde_json::from_str(&text).map_err(|e| {
                    descriptor_parse_failed(json_path.display().to_string(), e.to_string())
                })?;
                Ok(Some(manifest.into_descriptor()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(descriptor_read_failed(
                json_path.display().to_string(),
                e.to_string(),
            )),
        }
    }
}

/// Subset of package.json the engine reads.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PackageManifest {
    name: Option<String>,
    locator: Option<LocatorSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LocatorSection {
    base_dir: Option<String>,
    ruleset: Option<String>,
}

impl PackageManifest {
    fn into_descriptor(self) -> Descriptor {
        let section = self.locator.unwrap_or_default();
        Descriptor {
            name: self.name,
            base_dir: section.base_dir,
            ruleset: section.ruleset,
        }
    }
}
