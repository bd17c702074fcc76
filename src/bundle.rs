//! Bundle tree node
//!
//! One logical package: its identity, its own classified resources, and any
//! nested child bundles. A parent exclusively owns its children; there are no
//! back references and no sharing, so a finished tree is a plain owned value.
//! Bundles are built by exactly one discovery pass and never mutated after
//! the pass (and all descendant passes) complete.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::resources::{ResourceEntry, ResourceMap};

/// One logical package with classified resources and nested child bundles.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    /// Logical identifier, from the package descriptor if present, else the
    /// directory's base name.
    pub name: String,
    /// Name of the ruleset this bundle's own resources were classified with.
    pub ruleset: Option<String>,
    /// Absolute directory this bundle's relative paths resolve against. May
    /// differ from the directory that triggered discovery when a descriptor
    /// redirects the effective base.
    pub base_dir: PathBuf,
    /// Classification results for this bundle's own subtree.
    pub resources: ResourceMap,
    /// Child bundles by name. Sibling name collisions resolve last-write-wins
    /// in enumeration order.
    pub bundles: BTreeMap<String, Bundle>,
}

impl Bundle {
    pub(crate) fn new(name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            ruleset: None,
            base_dir: base_dir.into(),
            resources: ResourceMap::new(),
            bundles: BTreeMap::new(),
        }
    }

    /// Flattened view of one resource type, optionally restricted to a
    /// selector.
    pub fn resources_of_type(
        &self,
        resource_type: &str,
        selector_filter: Option<&str>,
    ) -> Vec<ResourceEntry> {
        self.resources.entries_of_type(resource_type, selector_filter)
    }

    /// Look up a descendant bundle by name chain.
    ///
    /// An empty chain returns this bundle.
    pub fn find(&self, chain: &[&str]) -> Option<&Bundle> {
        match chain.split_first() {
            None => Some(self),
            Some((head, rest)) => self.bundles.get(*head)?.find(rest),
        }
    }
}
