//! Which runtime versions a given tool release works with.
//!
//! Rules are checked newest first and the first rule whose threshold the
//! tool version reaches applies. Tool versions older than every threshold
//! get [`PERMISSIVE`]. Compatibility is advisory: nothing here returns an
//! error.

use sopmod_version::Version;

/// Runtime bounds for a range of tool versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatibilityRule {
    /// The rule applies to tool versions at or above this one.
    pub tool_since:  &'static str,
    /// Minimum runtime, inclusive.
    pub min_runtime: &'static str,
    /// Maximum runtime, inclusive; `None` for no upper bound.
    pub max_runtime: Option<&'static str>,
}

/// Applied to tool versions below every known threshold.
pub const PERMISSIVE: CompatibilityRule = CompatibilityRule {
    tool_since:  "0.0.0",
    min_runtime: "0",
    max_runtime: None,
};

/// Newest first. Add new requirements at the top.
pub const RULES: &[CompatibilityRule] = &[CompatibilityRule {
    tool_since:  "0.1.0",
    min_runtime: "1.21",
    max_runtime: None,
}];

fn parse(version: &str) -> Option<Version> { Version::parse(version).ok() }

/// The rule governing `tool_version`, or `None` if it does not parse.
pub fn compatibility_for(tool_version: &str) -> Option<CompatibilityRule> {
    compatibility_in(RULES, tool_version)
}

fn compatibility_in(rules: &[CompatibilityRule], tool_version: &str) -> Option<CompatibilityRule> {
    let tool = parse(tool_version)?;
    let rule = rules
        .iter()
        .find(|rule| parse(rule.tool_since).is_some_and(|since| tool >= since))
        .copied()
        .unwrap_or(PERMISSIVE);
    Some(rule)
}

/// Whether `runtime_version` satisfies the rule for `tool_version`.
///
/// Fails closed: if either version does not parse the answer is `false`.
pub fn is_compatible(runtime_version: &str, tool_version: &str) -> bool {
    is_compatible_in(RULES, runtime_version, tool_version)
}

fn is_compatible_in(rules: &[CompatibilityRule], runtime_version: &str, tool_version: &str) -> bool {
    let Some(runtime) = parse(runtime_version) else {
        return false;
    };
    let Some(rule) = compatibility_in(rules, tool_version) else {
        return false;
    };
    let above_min = parse(rule.min_runtime).is_some_and(|min| runtime >= min);
    let below_max = rule
        .max_runtime
        .is_none_or(|max| parse(max).is_some_and(|max| runtime <= max));
    above_min && below_max
}

/// Human-readable requirement for diagnostics.
pub fn compat_message(tool_version: &str) -> String {
    match compatibility_for(tool_version) {
        None => format!("sop {tool_version} has unknown go requirements"),
        Some(rule) if rule == PERMISSIVE => format!("sop {tool_version} works with any go version"),
        Some(CompatibilityRule {
            min_runtime,
            max_runtime: None,
            ..
        }) => format!("sop {tool_version} requires go {min_runtime} or later"),
        Some(CompatibilityRule {
            min_runtime,
            max_runtime: Some(max),
            ..
        }) => format!("sop {tool_version} requires go {min_runtime} to {max}"),
    }
}

/// Highest runtime in `installed` compatible with `tool_version`.
pub fn best_compatible<'a>(installed: &'a [String], tool_version: &str) -> Option<&'a str> {
    installed
        .iter()
        .filter(|runtime| is_compatible(runtime, tool_version))
        .max_by(|a, b| sopmod_version::compare_versions(a, b))
        .map(String::as_str)
}
