//! Resource map for one bundle
//!
//! Accumulated classification results, keyed first by selector (default
//! `"{}"`), then by resource-type label, then (only when the matching rule
//! declared a subtype group) by subtype, then by resource name, with the
//! bundle-relative path as the leaf value.
//!
//! All intermediate-container bookkeeping lives in [`ResourceMap::insert`];
//! the classification algorithm never touches nested maps directly. Within
//! one bundle a (selector, type, subtype, name) tuple is unique and the last
//! path inserted for it wins, which is deterministic because the walker's
//! visitation order is lexicographic.

use std::collections::BTreeMap;

use crate::ruleset::DEFAULT_SELECTOR;

/// Entries of one resource type within one selector.
///
/// `Direct` is produced by rules without a subtype group, `Subtyped` by rules
/// with one. A validated configuration never mixes the two shapes for one
/// type label; if it does, the later insertion replaces the whole entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeEntries {
    /// name -> relative path
    Direct(BTreeMap<String, String>),
    /// subtype -> name -> relative path
    Subtyped(BTreeMap<String, BTreeMap<String, String>>),
}

/// One flattened resource classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub selector: String,
    pub subtype: Option<String>,
    pub name: String,
    pub rel_path: String,
}

/// Per-bundle classification results: selector -> type -> [subtype ->] name
/// -> relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceMap {
    selectors: BTreeMap<String, BTreeMap<String, TypeEntries>>,
}

impl ResourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified path, creating intermediate containers as
    /// needed. Last write wins at the leaf.
    pub fn insert(
        &mut self,
        selector: &str,
        resource_type: &str,
        subtype: Option<&str>,
        name: &str,
        rel_path: impl Into<String>,
    ) {
        let types = self.selectors.entry(selector.to_string()).or_default();
        match subtype {
            None => {
                let entry = types
                    .entry(resource_type.to_string())
                    .or_insert_with(|| TypeEntries::Direct(BTreeMap::new()));
                if let TypeEntries::Subtyped(_) = entry {
                    tracing::warn!(
                        resource_type,
                        "rule shape changed from subtyped to direct; replacing entries"
                    );
                    *entry = TypeEntries::Direct(BTreeMap::new());
                }
                if let TypeEntries::Direct(names) = entry {
                    names.insert(name.to_string(), rel_path.into());
                }
            }
            Some(subtype) => {
                let entry = types
                    .entry(resource_type.to_string())
                    .or_insert_with(|| TypeEntries::Subtyped(BTreeMap::new()));
                if let TypeEntries::Direct(_) = entry {
                    tracing::warn!(
                        resource_type,
                        "rule shape changed from direct to subtyped; replacing entries"
                    );
                    *entry = TypeEntries::Subtyped(BTreeMap::new());
                }
                if let TypeEntries::Subtyped(subtypes) = entry {
                    subtypes
                        .entry(subtype.to_string())
                        .or_default()
                        .insert(name.to_string(), rel_path.into());
                }
            }
        }
    }

    /// Look up one relative path. `selector` defaults to `"{}"` when `None`.
    pub fn get(
        &self,
        selector: Option<&str>,
        resource_type: &str,
        subtype: Option<&str>,
        name: &str,
    ) -> Option<&str> {
        let types = self.selectors.get(selector.unwrap_or(DEFAULT_SELECTOR))?;
        match (types.get(resource_type)?, subtype) {
            (TypeEntries::Direct(names), None) => names.get(name).map(String::as_str),
            (TypeEntries::Subtyped(subtypes), Some(subtype)) => {
                subtypes.get(subtype)?.get(name).map(String::as_str)
            }
            _ => None,
        }
    }

    /// Flatten all entries of one resource type, optionally restricted to a
    /// single selector. Output order is deterministic (selector, subtype,
    /// name).
    pub fn entries_of_type(
        &self,
        resource_type: &str,
        selector_filter: Option<&str>,
    ) -> Vec<ResourceEntry> {
        let mut out = Vec::new();
        for (selector, types) in &self.selectors {
            if selector_filter.is_some_and(|f| f != selector.as_str()) {
                continue;
            }
            match types.get(resource_type) {
                Some(TypeEntries::Direct(names)) => {
                    for (name, rel_path) in names {
                        out.push(ResourceEntry {
                            selector: selector.clone(),
                            subtype: None,
                            name: name.clone(),
                            rel_path: rel_path.clone(),
                        });
                    }
                }
                Some(TypeEntries::Subtyped(subtypes)) => {
                    for (subtype, names) in subtypes {
                        for (name, rel_path) in names {
                            out.push(ResourceEntry {
                                selector: selector.clone(),
                                subtype: Some(subtype.clone()),
                                name: name.clone(),
                                rel_path: rel_path.clone(),
                            });
                        }
                    }
                }
                None => {}
            }
        }
        out
    }

    /// All selectors present, in sorted order.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.selectors.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get_direct() {
        let mut map = ResourceMap::new();
        map.insert("{}", "views", None, "index", "views/index.html");
        assert_eq!(
            map.get(None, "views", None, "index"),
            Some("views/index.html")
        );
    }

    #[test]
    fn test_insert_and_get_subtyped() {
        let mut map = ResourceMap::new();
        map.insert("{}", "assets", Some("png"), "logo", "assets/logo.png");
        assert_eq!(
            map.get(None, "assets", Some("png"), "logo"),
            Some("assets/logo.png")
        );
        assert_eq!(map.get(None, "assets", None, "logo"), None);
    }

    #[test]
    fn test_selector_keys_are_distinct() {
        let mut map = ResourceMap::new();
        map.insert("{}", "models", None, "flickr", "models/flickr.js");
        map.insert("common", "models", None, "flickr", "models/flickr.common.js");
        assert_eq!(
            map.get(None, "models", None, "flickr"),
            Some("models/flickr.js")
        );
        assert_eq!(
            map.get(Some("common"), "models", None, "flickr"),
            Some("models/flickr.common.js")
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut map = ResourceMap::new();
        map.insert("{}", "models", None, "flickr", "models/flickr.js");
        map.insert("{}", "models", None, "flickr", "other/flickr.js");
        assert_eq!(
            map.get(None, "models", None, "flickr"),
            Some("other/flickr.js")
        );
    }

    #[test]
    fn test_shape_conflict_replaces_entry() {
        let mut map = ResourceMap::new();
        map.insert("{}", "assets", None, "logo", "assets/logo");
        map.insert("{}", "assets", Some("png"), "icon", "assets/icon.png");
        assert_eq!(map.get(None, "assets", None, "logo"), None);
        assert_eq!(
            map.get(None, "assets", Some("png"), "icon"),
            Some("assets/icon.png")
        );
    }

    #[test]
    fn test_entries_of_type_flattened_order() {
        let mut map = ResourceMap::new();
        map.insert("device", "models", None, "b", "models/b.device.js");
        map.insert("{}", "models", None, "a", "models/a.js");
        map.insert("{}", "views", None, "v", "views/v.html");

        let entries = map.entries_of_type("models", None);
        assert_eq!(entries.len(), 2);
        // "{}" sorts before "device"
        assert_eq!(entries[0].selector, "{}");
        assert_eq!(entries[0].name, "a");
        assert_eq!(entries[1].selector, "device");
        assert_eq!(entries[1].name, "b");
    }

    #[test]
    fn test_entries_of_type_selector_filter() {
        let mut map = ResourceMap::new();
        map.insert("{}", "models", None, "a", "models/a.js");
        map.insert("device", "models", None, "a", "models/a.device.js");

        let entries = map.entries_of_type("models", Some("device"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].rel_path, "models/a.device.js");
    }

    #[test]
    fn test_empty_map() {
        let map = ResourceMap::new();
        assert!(map.is_empty());
        assert!(map.entries_of_type("models", None).is_empty());
    }
}
