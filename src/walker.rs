//! Recursive bundle-subtree enumeration
//!
//! One walk covers exactly one bundle's own subtree: every non-hidden entry
//! is visited in lexicographic order per level (directories and files
//! interleaved) and fed to the classifier. Hidden entries (leading `.`) are
//! pruned at discovery and their subtrees never visited. A directory is
//! classified before any of its children, so skip and nested-bundle rules
//! prune the subtree; a subtree handed to a nested bundle is enumerated only
//! by that bundle's own walk.
//!
//! The lexicographic order is what makes the resource map's last-write-wins
//! resolution reproducible across runs, so the walker re-sorts entries rather
//! than trusting the `Vfs` implementation to.
//!
//! A filesystem error on any entry aborts this bundle's walk and propagates;
//! sibling bundles already in flight are unaffected.

use std::path::{Path, PathBuf};

use crate::classify::{Outcome, classify};
use crate::error::Result;
use crate::path_utils::join_rel;
use crate::resources::ResourceMap;
use crate::ruleset::RuleSet;
use crate::vfs::Vfs;

/// A nested-bundle match awaiting its own discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingBundle {
    /// Name from the matched capture (a descriptor may override it).
    pub name: String,
    /// Absolute directory the child bundle is rooted at.
    pub dir: PathBuf,
    pub child_ruleset: String,
}

/// Everything one walk produces for its bundle.
#[derive(Debug, Default)]
pub(crate) struct WalkOutcome {
    pub resources: ResourceMap,
    pub pending: Vec<PendingBundle>,
}

/// Enumerate a bundle's subtree, classifying every visible path.
pub(crate) fn walk<V: Vfs + ?Sized>(
    vfs: &V,
    base_dir: &Path,
    ruleset: &RuleSet,
) -> Result<WalkOutcome> {
    let mut outcome = WalkOutcome::default();
    walk_dir(vfs, base_dir, "", ruleset, &mut outcome)?;
    Ok(outcome)
}

fn walk_dir<V: Vfs + ?Sized>(
    vfs: &V,
    base_dir: &Path,
    prefix: &str,
    ruleset: &RuleSet,
    out: &mut WalkOutcome,
) -> Result<()> {
    let dir = if prefix.is_empty() {
        base_dir.to_path_buf()
    } else {
        base_dir.join(prefix)
    };
    let mut entries = vfs.list_entries(&dir)?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    for entry in entries {
        if entry.name.starts_with('.') {
            continue;
        }
        let rel = join_rel(prefix, &entry.name);
        match classify(ruleset, &rel, entry.is_dir) {
            Some(Outcome::Skipped) => continue,
            Some(Outcome::NestedBundle {
                name,
                child_ruleset,
            }) => {
                out.pending.push(PendingBundle {
                    name,
                    dir: base_dir.join(&rel),
                    child_ruleset,
                });
                continue;
            }
            Some(Outcome::Resource {
                selector,
                resource_type,
                subtype,
                name,
            }) => {
                out.resources.insert(
                    &selector,
                    &resource_type,
                    subtype.as_deref(),
                    &name,
                    rel.clone(),
                );
            }
            None => {}
        }
        if entry.is_dir {
            walk_dir(vfs, base_dir, &rel, ruleset, out)?;
        }
    }
    Ok(())
}
