//! Constraining facets of the FES simple types
//!
//! FES 2.0 restricts its simple types with pattern facets only. XSD patterns
//! match the whole value, so every pattern is compiled anchored.

use crate::error::{Error, Result, ValidationError};
use regex::Regex;

/// Pattern facet using regular expressions
#[derive(Debug, Clone)]
pub struct PatternFacet {
    /// Pattern as written in the schema
    pub pattern: String,
    /// Compiled, anchored regex
    regex: Regex,
}

impl PatternFacet {
    /// Compile a schema pattern
    pub fn new(pattern: &str) -> Result<Self> {
        let anchored = format!("^(?:{})$", pattern);
        let regex = Regex::new(&anchored)
            .map_err(|e| Error::Configuration(format!("Invalid pattern '{}': {}", pattern, e)))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// True when the whole value matches
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// Validate a value against this pattern
    pub fn validate(&self, value: &str) -> Result<()> {
        if self.is_match(value) {
            Ok(())
        } else {
            Err(Error::Validation(
                ValidationError::new(format!("Value does not match pattern '{}'", self.pattern))
                    .with_reason(format!("Value: '{}'", value)),
            ))
        }
    }
}

// Patterns compare by source text; the compiled regex follows from it.
impl PartialEq for PatternFacet {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

/// Validate a value against a set of pattern facets declared on one type.
///
/// Patterns of the same derivation step are alternatives; an empty set
/// accepts everything.
pub fn validate_patterns(patterns: &[PatternFacet], value: &str) -> Result<()> {
    match patterns {
        [] => Ok(()),
        [single] => single.validate(value),
        _ if patterns.iter().any(|p| p.is_match(value)) => Ok(()),
        _ => {
            let all = patterns
                .iter()
                .map(|p| p.pattern.as_str())
                .collect::<Vec<_>>()
                .join("' | '");
            Err(Error::Validation(
                ValidationError::new(format!("Value does not match any of the patterns '{}'", all))
                    .with_reason(format!("Value: '{}'", value)),
            ))
        }
    }
}

/// Collapse whitespace the way list and token types do
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
