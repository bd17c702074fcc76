//! Error types and handling for Locator
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Two error domains exist:
//! - filesystem errors: a directory could not be listed or a package
//!   descriptor could not be read or parsed; fatal to the affected bundle's
//!   discovery, never to siblings already settled
//! - configuration errors: a rule references a capture group its pattern does
//!   not define, or a nested-bundle rule names a ruleset that was never
//!   registered; raised at ruleset construction where feasible

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Locator operations
#[derive(Error, Diagnostic, Debug)]
pub enum LocatorError {
    // Filesystem errors
    #[error("Failed to list directory: {path}")]
    #[diagnostic(
        code(locator::fs::dir_read_failed),
        help("Check that the directory exists and is readable")
    )]
    DirReadFailed { path: String, reason: String },

    #[error("Failed to read package descriptor: {path}")]
    #[diagnostic(code(locator::fs::descriptor_read_failed))]
    DescriptorReadFailed { path: String, reason: String },

    #[error("Failed to parse package descriptor: {path}")]
    #[diagnostic(
        code(locator::fs::descriptor_parse_failed),
        help("Descriptors are bundle.yaml (YAML) or package.json (JSON) files")
    )]
    DescriptorParseFailed { path: String, reason: String },

    // Configuration errors
    #[error("Invalid classification pattern: {pattern}")]
    #[diagnostic(code(locator::config::invalid_pattern))]
    InvalidPattern { pattern: String, reason: String },

    #[error(
        "Rule '{resource_type}' references capture group {group}, but its pattern only defines {available}"
    )]
    #[diagnostic(
        code(locator::config::capture_group_out_of_range),
        help("Capture groups are numbered from 1 in pattern order")
    )]
    CaptureGroupOutOfRange {
        resource_type: String,
        group: usize,
        available: usize,
    },

    #[error("Unknown ruleset: {name}")]
    #[diagnostic(
        code(locator::config::unknown_ruleset),
        help("Register the ruleset on the Locator before discovery")
    )]
    UnknownRuleset { name: String },
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, LocatorError>;

/// Creates a directory listing error
pub fn dir_read_failed(path: impl Into<String>, reason: impl Into<String>) -> LocatorError {
    LocatorError::DirReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a descriptor read error
pub fn descriptor_read_failed(path: impl Into<String>, reason: impl Into<String>) -> LocatorError {
    LocatorError::DescriptorReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a descriptor parse error
pub fn descriptor_parse_failed(path: impl Into<String>, reason: impl Into<String>) -> LocatorError {
    LocatorError::DescriptorParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid pattern error
pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> LocatorError {
    LocatorError::InvalidPattern {
        pattern: pattern.into(),
        reason: reason.into(),
    }
}

/// Creates a capture group validation error
pub fn capture_group_out_of_range(
    resource_type: impl Into<String>,
    group: usize,
    available: usize,
) -> LocatorError {
    LocatorError::CaptureGroupOutOfRange {
        resource_type: resource_type.into(),
        group,
        available,
    }
}

/// Creates an unknown ruleset error
pub fn unknown_ruleset(name: impl Into<String>) -> LocatorError {
    LocatorError::UnknownRuleset { name: name.into() }
}
