//! Path selection by regular expression.

use regex_lite::Regex;
use serde_json::{Map, Value};

use crate::error::ShakeError;

/// Pattern used when the caller supplies none.
pub const MATCH_ALL: &str = ".*";

/// Compiled set of path patterns. A path is kept if any pattern matches it.
#[derive(Debug, Clone)]
pub struct PathFilter {
    patterns: Vec<Regex>,
}

/// Result of applying a [`PathFilter`] to a `paths` mapping.
///
/// Both lists keep the source enumeration order.
#[derive(Debug, Default)]
pub struct PathPartition<'a> {
    pub kept: Vec<(&'a str, &'a Value)>,
    pub removed: Vec<String>,
}

impl PathFilter {
    /// Compile `patterns`. An empty list keeps every path.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ShakeError> {
        if patterns.is_empty() {
            return Self::new(&[MATCH_ALL]);
        }

        let patterns = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|e| ShakeError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Combine regex `patterns` with literal path `templates`. A path is kept
    /// if it matches either; with neither, every path is kept.
    pub fn from_selection<P, T>(patterns: &[P], templates: &[T]) -> Result<Self, ShakeError>
    where
        P: AsRef<str>,
        T: AsRef<str>,
    {
        let patterns: Vec<String> = patterns
            .iter()
            .map(|pattern| pattern.as_ref().to_string())
            .chain(
                templates
                    .iter()
                    .map(|template| template_pattern(template.as_ref())),
            )
            .collect();
        Self::new(&patterns)
    }

    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(path))
    }

    /// Split `paths` into kept entries and removed keys.
    pub fn partition<'a>(&self, paths: &'a Map<String, Value>) -> PathPartition<'a> {
        let mut partition = PathPartition::default();
        for (path, item) in paths {
            if self.matches(path) {
                partition.kept.push((path.as_str(), item));
            } else {
                partition.removed.push(path.clone());
            }
        }
        partition
    }
}

/// Anchored pattern matching a literal path template.
///
/// Each `{param}` segment matches any non-empty run without `/`; everything
/// else is matched literally, so `/users/{id}` also selects `/users/42`.
fn template_pattern(template: &str) -> String {
    let mut pattern = String::from("^");
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|offset| open + offset) else {
            break;
        };
        pattern.push_str(&regex_lite::escape(&rest[..open]));
        pattern.push_str("[^/]+");
        rest = &rest[close + 1..];
    }

    pattern.push_str(&regex_lite::escape(rest));
    pattern.push('$');
    pattern
}
