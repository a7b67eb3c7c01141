//! Match rules: a named bucket plus the ordered patterns that claim records for it.

use crate::error::ConfigError;
use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone)]
pub struct MatchRule {
    pub name: String,
    pub patterns: Vec<Regex>,
}

impl MatchRule {
    /// Compile `patterns` as case-insensitive regexes.
    pub fn compile(
        section: &'static str,
        name: &str,
        patterns: &[String],
    ) -> Result<Self, ConfigError> {
        if patterns.is_empty() {
            return Err(ConfigError::EmptyPatterns {
                section,
                name: name.to_string(),
            });
        }

        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ConfigError::InvalidPattern {
                        section,
                        name: name.to_string(),
                        pattern: p.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.to_string(),
            patterns,
        })
    }

    /// True if any pattern matches somewhere in `role`.
    pub fn matches(&self, role: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(role))
    }
}

/// Turn a config key like `volunteer_groups` into the label `Volunteer Groups`.
///
/// Only the first letter of each word is touched, so `HR_team` becomes
/// `HR Team` and labels already in display form come back unchanged.
pub fn display_label(key: &str) -> String {
    key.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
