//! Tests for path classification through the public API
//!
//! Classification must be a pure function of the ruleset and the path, with
//! the documented precedence: skip, then nested-bundle, then resource rules
//! in insertion order.

use std::io::Write;
use std::sync::{Arc, Mutex};

use locator::{DEFAULT_SELECTOR, Outcome, Rule, RuleSet, classify};

/// Shared in-memory sink for capturing tracing output in a test.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log lock poisoned")).into_owned()
    }
}

impl Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log lock poisoned").write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn with_captured_log(f: impl FnOnce()) -> String {
    let log = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    log.contents()
}

fn ruleset() -> RuleSet {
    RuleSet::builder("touchdown-app")
        .skip(r"tmp(/.*)?")
        .nested_bundle(r"node_modules/([^/]+)", "touchdown-package")
        .rule(
            "models",
            Rule::new(r"models/([a-z_-]+)(\.([\w_-]+))?\.js")
                .expect("valid pattern")
                .with_selector_group(3),
        )
        .rule(
            "langs",
            Rule::new(r"lang/([\w]+)_([\w-]+)\.json")
                .expect("valid pattern")
                .with_name_group(1)
                .with_selector_group(2),
        )
        .build()
        .expect("valid ruleset")
}

#[test]
fn test_classification_is_deterministic() {
    let ruleset = ruleset();
    for _ in 0..3 {
        assert_eq!(
            classify(&ruleset, "models/flickr.common.js", false),
            Some(Outcome::Resource {
                selector: "common".to_string(),
                resource_type: "models".to_string(),
                subtype: None,
                name: "flickr".to_string(),
            })
        );
    }
}

#[test]
fn test_skip_beats_resource_and_nested_rules() {
    let ruleset = RuleSet::builder("test")
        .skip(r"node_modules(/.*)?")
        .nested_bundle(r"node_modules/([^/]+)", "pkg")
        .rule("all", Rule::new(r"(.+)").expect("valid"))
        .build()
        .expect("valid ruleset");
    assert_eq!(
        classify(&ruleset, "node_modules/roster", true),
        Some(Outcome::Skipped)
    );
}

#[test]
fn test_nested_bundle_beats_resource_rules() {
    let ruleset = RuleSet::builder("test")
        .nested_bundle(r"node_modules/([^/]+)", "pkg")
        .rule("all", Rule::new(r"(.+)").expect("valid"))
        .build()
        .expect("valid ruleset");
    assert_eq!(
        classify(&ruleset, "node_modules/roster", true),
        Some(Outcome::NestedBundle {
            name: "roster".to_string(),
            child_ruleset: "pkg".to_string(),
        })
    );
    // Files fall through to the resource rules
    assert!(matches!(
        classify(&ruleset, "node_modules/roster", false),
        Some(Outcome::Resource { .. })
    ));
}

#[test]
fn test_default_selector_is_braces_not_empty() {
    let outcome = classify(&ruleset(), "models/weather.js", false);
    let Some(Outcome::Resource { selector, .. }) = outcome else {
        panic!("expected a resource outcome");
    };
    assert_eq!(selector, DEFAULT_SELECTOR);
    assert_eq!(selector, "{}");
    assert!(!selector.is_empty());
}

#[test]
fn test_name_and_selector_groups_by_index() {
    assert_eq!(
        classify(&ruleset(), "lang/titles_de-DE.json", false),
        Some(Outcome::Resource {
            selector: "de-DE".to_string(),
            resource_type: "langs".to_string(),
            subtype: None,
            name: "titles".to_string(),
        })
    );
}

#[test]
fn test_unmatched_path_is_none() {
    assert_eq!(classify(&ruleset(), "docs/guide.md", false), None);
}

#[test]
fn test_ambiguous_match_warns_and_first_rule_wins() {
    let ruleset = RuleSet::builder("test")
        .rule("wide", Rule::new(r"lib/([\w.]+)").expect("valid"))
        .rule("narrow", Rule::new(r"lib/([\w]+)\.js").expect("valid"))
        .build()
        .expect("valid ruleset");

    let log = with_captured_log(|| {
        let outcome = classify(&ruleset, "lib/util.js", false);
        assert!(matches!(
            outcome,
            Some(Outcome::Resource { resource_type, .. }) if resource_type == "wide"
        ));
    });
    assert!(log.contains("first match wins"), "warning missing: {log}");
    assert!(log.contains("narrow"), "warning names the shadowed rule: {log}");
    assert!(log.contains("lib/util.js"), "warning names the path: {log}");
}

#[test]
fn test_unambiguous_match_emits_no_warning() {
    let ruleset = RuleSet::builder("test")
        .rule("models", Rule::new(r"models/([\w]+)\.js").expect("valid"))
        .rule("views", Rule::new(r"views/([\w]+)\.html").expect("valid"))
        .build()
        .expect("valid ruleset");

    let log = with_captured_log(|| {
        assert!(matches!(
            classify(&ruleset, "models/flickr.js", false),
            Some(Outcome::Resource { .. })
        ));
    });
    assert!(!log.contains("first match wins"), "unexpected warning: {log}");
}

#[test]
fn test_skip_applies_under_skipped_prefix() {
    assert_eq!(
        classify(&ruleset(), "tmp/models/cached.js", false),
        Some(Outcome::Skipped)
    );
}
