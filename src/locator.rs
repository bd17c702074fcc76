//! Discovery orchestration
//!
//! [`Locator`] owns the ruleset registry and the filesystem capability, and
//! turns a root directory into a fully built [`Bundle`] tree. Each bundle is
//! populated by a single synchronous walk over its own subtree; the nested
//! bundles that walk uncovers are then discovered in parallel, since they are
//! independent subtrees with no shared state. A parent is complete only once
//! every child has settled.
//!
//! Every discovery task returns an owned, fully built bundle; parents
//! assemble children's results after the join. Nothing is shared or mutated
//! across concurrent branches, and no partially populated bundle is ever
//! observable by the caller: discovery returns the whole tree or the first
//! error (in enumeration order) after all in-flight children have settled.

use std::collections::BTreeMap;
use std::path::Path;

use rayon::prelude::*;

use crate::bundle::Bundle;
use crate::error::{Result, unknown_ruleset};
use crate::path_utils::to_forward_slashes;
use crate::ruleset::RuleSet;
use crate::vfs::{OsFs, Vfs};
use crate::walker::walk;

/// Callback choosing a ruleset from a discovered bundle's identity (name and
/// triggering directory). Used when the ruleset cannot be known until the
/// descriptor is read; takes precedence over the descriptor's own override.
pub type RulesetSelector = dyn Fn(&str, &Path) -> Option<String> + Send + Sync;

/// Per-call explicit overrides for the root bundle of one discovery.
///
/// Explicit values outrank both the selection callback and the descriptor;
/// child bundles are unaffected and resolve their identity as usual.
#[derive(Debug, Clone, Default)]
pub struct DiscoverOptions {
    /// Authoritative name for the root bundle.
    pub name: Option<String>,
    /// Ruleset for the root bundle.
    pub ruleset: Option<String>,
}

/// Builds bundle trees from directories according to registered rulesets.
pub struct Locator<V: Vfs = OsFs> {
    vfs: V,
    rulesets: BTreeMap<String, RuleSet>,
    ruleset_selector: Option<Box<RulesetSelector>>,
}

impl Locator<OsFs> {
    /// Locator over the real filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::with_vfs(OsFs)
    }
}

impl Default for Locator<OsFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vfs> Locator<V> {
    /// Locator over a custom filesystem capability.
    pub fn with_vfs(vfs: V) -> Self {
        Self {
            vfs,
            rulesets: BTreeMap::new(),
            ruleset_selector: None,
        }
    }

    /// Register a ruleset under its own name. Registering the same name again
    /// replaces the earlier ruleset.
    pub fn register(&mut self, ruleset: RuleSet) -> &mut Self {
        self.rulesets.insert(ruleset.name().to_string(), ruleset);
        self
    }

    /// Install a ruleset-selection callback (see [`RulesetSelector`]).
    #[must_use]
    pub fn with_ruleset_selector(
        mut self,
        selector: impl Fn(&str, &Path) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.ruleset_selector = Some(Box::new(selector));
        self
    }

    /// Build the bundle tree rooted at `dir`, classifying with the named
    /// ruleset unless a descriptor or the selection callback overrides it.
    pub fn discover(&self, dir: &Path, ruleset_name: &str) -> Result<Bundle> {
        self.discover_with(dir, ruleset_name, &DiscoverOptions::default())
    }

    /// Like [`Locator::discover`], with explicit overrides applied to the
    /// root bundle (see [`DiscoverOptions`]).
    pub fn discover_with(
        &self,
        dir: &Path,
        ruleset_name: &str,
        options: &DiscoverOptions,
    ) -> Result<Bundle> {
        let default_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| to_forward_slashes(dir));
        self.discover_bundle(dir, ruleset_name, &default_name, Some(options))
    }

    fn discover_bundle(
        &self,
        dir: &Path,
        default_ruleset: &str,
        default_name: &str,
        overrides: Option<&DiscoverOptions>,
    ) -> Result<Bundle> {
        let descriptor = self.vfs.read_descriptor(dir)?.unwrap_or_default();

        // The three descriptor fields apply independently.
        let name = overrides
            .and_then(|o| o.name.clone())
            .or(descriptor.name)
            .unwrap_or_else(|| default_name.to_string());
        let base_dir = match descriptor.base_dir.as_deref() {
            Some(redirect) if Path::new(redirect).is_absolute() => {
                Path::new(redirect).to_path_buf()
            }
            Some(redirect) => dir.join(redirect),
            None => dir.to_path_buf(),
        };
        // Precedence: explicit per-call override > selection callback >
        // descriptor override > caller default
        let ruleset_name = overrides
            .and_then(|o| o.ruleset.clone())
            .or_else(|| {
                self.ruleset_selector
                    .as_ref()
                    .and_then(|select| select(&name, dir))
            })
            .or(descriptor.ruleset)
            .unwrap_or_else(|| default_ruleset.to_string());
        let ruleset = self
            .rulesets
            .get(&ruleset_name)
            .ok_or_else(|| unknown_ruleset(ruleset_name.as_str()))?;

        tracing::debug!(
            bundle = name.as_str(),
            dir = %base_dir.display(),
            ruleset = ruleset_name.as_str(),
            "discovering bundle"
        );

        let outcome = walk(&self.vfs, &base_dir, ruleset)?;

        let mut bundle = Bundle::new(name, base_dir);
        bundle.ruleset = Some(ruleset_name);
        bundle.resources = outcome.resources;

        // Children settle before any error is reported; the first failure in
        // enumeration order wins and partially built siblings are dropped.
        let children: Vec<Result<Bundle>> = outcome
            .pending
            .par_iter()
            .map(|pending| {
                self.discover_bundle(&pending.dir, &pending.child_ruleset, &pending.name, None)
            })
            .collect();
        for child in children {
            let child = child?;
            if bundle.bundles.contains_key(&child.name) {
                tracing::warn!(
                    parent = bundle.name.as_str(),
                    child = child.name.as_str(),
                    "sibling bundle name collision; later discovery wins"
                );
            }
            bundle.bundles.insert(child.name.clone(), child);
        }

        tracing::debug!(bundle = bundle.name.as_str(), "bundle discovery complete");
        Ok(bundle)
    }
}
