//! The (name, role) record every stage of the pipeline works on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator meaning "this person holds two roles".
pub const DUAL_ROLE_SEPARATOR: char = '&';

/// A single person/role pair. Immutable once produced by a data source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub role: String,
}

impl Record {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }

    /// Split a dual-role record into one record per role.
    ///
    /// Only the first separator is honoured: `"A & B & C"` yields `"A"` and
    /// `"B & C"`. Halves that are empty after trimming are dropped; a role that
    /// would leave no halves at all is kept unchanged.
    pub fn split_dual_role(&self) -> Vec<Record> {
        let Some((first, second)) = self.role.split_once(DUAL_ROLE_SEPARATOR) else {
            return vec![self.clone()];
        };

        let halves: Vec<Record> = [first, second]
            .into_iter()
            .map(trim_role)
            .filter(|r| !r.is_empty())
            .map(|r| Record::new(self.name.clone(), r))
            .collect();

        if halves.is_empty() {
            vec![self.clone()]
        } else {
            halves
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}

fn trim_role(s: &str) -> &str {
    s.trim()
        .trim_end_matches([',', ';', '.'])
        .trim_end()
}

/// Expand every dual-role record, preserving input order.
pub fn split_dual_roles(records: &[Record]) -> Vec<Record> {
    records.iter().flat_map(Record::split_dual_role).collect()
}
