//! Rule-driven resource classification and bundle tree discovery.
//!
//! Locator answers one question for a directory tree: what resource of what
//! type, under what variant selector, does each file represent, and which
//! logical package ("bundle") does it belong to? Classification is driven by
//! declarative [`RuleSet`]s; nested packages matched by nested-bundle rules
//! become independent child bundles discovered in parallel.
//!
//! ```no_run
//! use locator::{Locator, Rule, RuleSet};
//!
//! # fn main() -> locator::Result<()> {
//! let mut locator = Locator::new();
//! locator.register(
//!     RuleSet::builder("app")
//!         .skip("artifacts")
//!         .nested_bundle(r"node_modules/([^/]+)", "package")
//!         .rule(
//!             "models",
//!             Rule::new(r"models/([a-z_-]+)(\.([\w_-]+))?\.js")?.with_selector_group(3),
//!         )
//!         .build()?,
//! );
//! locator.register(RuleSet::builder("package").build()?);
//!
//! let bundle = locator.discover(std::path::Path::new("/srv/app"), "app")?;
//! for entry in bundle.resources_of_type("models", None) {
//!     println!("{} -> {}", entry.name, entry.rel_path);
//! }
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod classify;
pub mod error;
pub mod locator;
pub mod path_utils;
pub mod resources;
pub mod ruleset;
pub mod vfs;

mod walker;

pub use bundle::Bundle;
pub use classify::{Outcome, classify};
pub use error::{LocatorError, Result};
pub use locator::{DiscoverOptions, Locator, RulesetSelector};
pub use resources::{ResourceEntry, ResourceMap, TypeEntries};
pub use ruleset::{DEFAULT_SELECTOR, NestedBundleRule, Rule, RuleSet, RuleSetBuilder};
pub use vfs::{Descriptor, DirEntry, OsFs, Vfs};
