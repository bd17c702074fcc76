//! Rule and RuleSet data model
//!
//! A [`Rule`] is one classification pattern: a path-matching regex plus the
//! capture-group roles used to extract a resource name, an optional variant
//! selector, and an optional subtype from a matched path. A [`RuleSet`] is a
//! named, insertion-ordered collection of rules together with skip patterns
//! and nested-bundle rules; it is immutable once built.
//!
//! Patterns match bundle-relative, forward-slash paths and are anchored to
//! the full path. Capture-group indices are validated against the compiled
//! pattern when the ruleset is built, so a misconfigured rule fails fast
//! instead of deep inside a walk.

use regex::{Captures, Regex};

use crate::error::{Result, capture_group_out_of_range, invalid_pattern};

/// Selector used when a rule has no selector group or the group did not
/// participate in the match.
pub const DEFAULT_SELECTOR: &str = "{}";

/// A single classification pattern with capture-group roles.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    name_group: usize,
    selector_group: Option<usize>,
    subtype_group: Option<usize>,
}

impl Rule {
    /// Compile a rule from a pattern matched against the full relative path.
    ///
    /// The resource name defaults to capture group 1.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: compile_anchored(pattern)?,
            name_group: 1,
            selector_group: None,
            subtype_group: None,
        })
    }

    /// Override which capture group identifies the resource name.
    #[must_use]
    pub fn with_name_group(mut self, group: usize) -> Self {
        self.name_group = group;
        self
    }

    /// Capture group whose value becomes the selector for this resource.
    #[must_use]
    pub fn with_selector_group(mut self, group: usize) -> Self {
        self.selector_group = Some(group);
        self
    }

    /// Capture group inserted as an extra level between type and name.
    #[must_use]
    pub fn with_subtype_group(mut self, group: usize) -> Self {
        self.subtype_group = Some(group);
        self
    }

    /// Match the rule against a relative path.
    pub(crate) fn captures<'p>(&self, rel_path: &'p str) -> Option<Captures<'p>> {
        self.pattern.captures(rel_path)
    }

    pub(crate) fn name_group(&self) -> usize {
        self.name_group
    }

    pub(crate) fn selector_group(&self) -> Option<usize> {
        self.selector_group
    }

    pub(crate) fn subtype_group(&self) -> Option<usize> {
        self.subtype_group
    }

    /// Validate that every declared capture-group index exists in the pattern.
    fn validate(&self, resource_type: &str) -> Result<()> {
        // captures_len counts the implicit whole-match group 0
        let available = self.pattern.captures_len() - 1;
        for group in [
            Some(self.name_group),
            self.selector_group,
            self.subtype_group,
        ]
        .into_iter()
        .flatten()
        {
            if group == 0 || group > available {
                return Err(capture_group_out_of_range(resource_type, group, available));
            }
        }
        Ok(())
    }
}

/// Starts an independent classification scope at a matched directory.
#[derive(Debug, Clone)]
pub struct NestedBundleRule {
    pattern: Regex,
    child_ruleset: String,
}

impl NestedBundleRule {
    pub(crate) fn captures<'p>(&self, rel_path: &'p str) -> Option<Captures<'p>> {
        self.pattern.captures(rel_path)
    }

    /// Name of the ruleset the child bundle is classified with.
    pub fn child_ruleset(&self) -> &str {
        &self.child_ruleset
    }
}

/// A named, ordered set of classification rules for one bundle scope.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: String,
    rules: Vec<(String, Rule)>,
    skip: Vec<Regex>,
    nested_bundles: Vec<NestedBundleRule>,
}

impl RuleSet {
    /// Start building a ruleset with the given name.
    pub fn builder(name: impl Into<String>) -> RuleSetBuilder {
        RuleSetBuilder {
            name: name.into(),
            rules: Vec::new(),
            skip: Vec::new(),
            nested_bundles: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resource-type rules in insertion (evaluation) order.
    pub(crate) fn rules(&self) -> &[(String, Rule)] {
        &self.rules
    }

    pub(crate) fn skip_patterns(&self) -> &[Regex] {
        &self.skip
    }

    pub(crate) fn nested_bundle_rules(&self) -> &[NestedBundleRule] {
        &self.nested_bundles
    }
}

/// Builder for [`RuleSet`]; patterns are compiled and capture-group indices
/// validated in [`RuleSetBuilder::build`].
#[derive(Debug)]
pub struct RuleSetBuilder {
    name: String,
    rules: Vec<(String, Rule)>,
    skip: Vec<String>,
    nested_bundles: Vec<(String, String)>,
}

impl RuleSetBuilder {
    /// Add a resource-type rule. Evaluation order is insertion order; when a
    /// path could match more than one rule, the first match wins.
    #[must_use]
    pub fn rule(mut self, resource_type: impl Into<String>, rule: Rule) -> Self {
        self.rules.push((resource_type.into(), rule));
        self
    }

    /// Add a skip pattern. A matching path and everything beneath it is
    /// excluded; the first matching skip pattern short-circuits all other
    /// rule evaluation for that path.
    #[must_use]
    pub fn skip(mut self, pattern: impl Into<String>) -> Self {
        self.skip.push(pattern.into());
        self
    }

    /// Add a nested-bundle rule. A matching directory starts an independent
    /// child bundle classified with `child_ruleset`.
    #[must_use]
    pub fn nested_bundle(
        mut self,
        pattern: impl Into<String>,
        child_ruleset: impl Into<String>,
    ) -> Self {
        self.nested_bundles.push((pattern.into(), child_ruleset.into()));
        self
    }

    /// Compile all patterns and validate capture-group references.
    pub fn build(self) -> Result<RuleSet> {
        for (resource_type, rule) in &self.rules {
            rule.validate(resource_type)?;
        }
        let skip = self
            .skip
            .iter()
            .map(|p| compile_anchored(p))
            .collect::<Result<Vec<_>>>()?;
        let nested_bundles = self
            .nested_bundles
            .into_iter()
            .map(|(pattern, child_ruleset)| {
                Ok(NestedBundleRule {
                    pattern: compile_anchored(&pattern)?,
                    child_ruleset,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RuleSet {
            name: self.name,
            rules: self.rules,
            skip,
            nested_bundles,
        })
    }
}

/// Compile a pattern anchored to the whole relative path.
fn compile_anchored(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|e| invalid_pattern(pattern, e.to_string()))
}
