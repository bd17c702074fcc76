//! Per-path classification
//!
//! Applies one [`RuleSet`] to one bundle-relative path and produces at most
//! one [`Outcome`]. Precedence is fixed: skip patterns first (first skip wins
//! and short-circuits everything else), nested-bundle rules second (these
//! only fire on directories), resource-type rules last in insertion order.
//!
//! Rules are expected to be mutually exclusive by convention; the engine does
//! not enforce that. When a path matches more than one resource rule, the
//! first match wins and a warning is emitted so configuration authors can see
//! the ambiguity.

use crate::path_utils::base_name;
use crate::ruleset::{DEFAULT_SELECTOR, Rule, RuleSet};

/// Result of classifying a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Path matched a skip pattern; excluded along with everything beneath it.
    Skipped,
    /// Directory starts an independent child bundle.
    NestedBundle {
        /// Bundle name derived from the matched pattern's first participating
        /// capture, falling back to the directory's base name. A descriptor
        /// inside the directory may later override it.
        name: String,
        child_ruleset: String,
    },
    /// Path is a resource of the current bundle.
    Resource {
        selector: String,
        resource_type: String,
        subtype: Option<String>,
        name: String,
    },
}

/// Classify one relative path against a ruleset.
///
/// `rel_path` uses forward-slash separators; hidden segments are never
/// presented here (the walker prunes them). Returns `None` when no rule
/// matched.
pub fn classify(ruleset: &RuleSet, rel_path: &str, is_dir: bool) -> Option<Outcome> {
    for skip in ruleset.skip_patterns() {
        if skip.is_match(rel_path) {
            return Some(Outcome::Skipped);
        }
    }

    if is_dir {
        for nested in ruleset.nested_bundle_rules() {
            if let Some(caps) = nested.captures(rel_path) {
                let name = caps
                    .iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str())
                    .find(|s| !s.is_empty())
                    .unwrap_or_else(|| base_name(rel_path));
                return Some(Outcome::NestedBundle {
                    name: name.to_string(),
                    child_ruleset: nested.child_ruleset().to_string(),
                });
            }
        }
    }

    let rules = ruleset.rules();
    for (idx, (resource_type, rule)) in rules.iter().enumerate() {
        let Some(caps) = rule.captures(rel_path) else {
            continue;
        };
        // An optional name group that did not participate yields no resource.
        let Some(name) = caps.get(rule.name_group()) else {
            continue;
        };

        warn_on_ambiguity(rel_path, resource_type, &rules[idx + 1..]);

        let selector = rule
            .selector_group()
            .and_then(|g| caps.get(g))
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SELECTOR);
        let subtype = rule
            .subtype_group()
            .and_then(|g| caps.get(g))
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(ToString::to_string);

        return Some(Outcome::Resource {
            selector: selector.to_string(),
            resource_type: resource_type.clone(),
            subtype,
            name: name.as_str().to_string(),
        });
    }

    None
}

/// Advisory diagnostic for paths matching more than one resource rule.
fn warn_on_ambiguity(rel_path: &str, matched: &str, remaining: &[(String, Rule)]) {
    for (other_type, other_rule) in remaining {
        if other_rule.captures(rel_path).is_some() {
            tracing::warn!(
                path = rel_path,
                matched,
                also_matches = other_type.as_str(),
                "path matches multiple resource rules; first match wins"
            );
        }
    }
}
