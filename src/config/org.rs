//! Organization config (YAML) and its validated form.
//!
//! YAML shape:
//! ```yaml
//! organization: Living Dreams
//! subdivided_group: Volunteers
//! groups:                      # ordered, first match wins
//!   - founders: [Founder]
//!   - volunteers: [Volunteer]
//! subgroups:                   # only applied inside `subdivided_group`
//!   - logistics: [Logistics]
//!   - outreach: [Outreach]
//! group_order: [Founders, Volunteers]
//! additions:                   # people missing from the source, role -> names
//!   - advisor: [Dana]
//! ```
//!
//! Rule keys, `subdivided_group`, `group_order` entries and addition roles all
//! go through [`display_label`], so `volunteers` and `Volunteers` name the same
//! group.

use crate::config::rule::{MatchRule, display_label};
use crate::error::ConfigError;
use crate::record::Record;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// One `- key: [values]` entry of an ordered YAML list.
pub type RawEntry = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrgConfig {
    /// Root node label and graph name.
    pub organization: String,

    /// The one group whose members are split into subgroups.
    pub subdivided_group: String,

    pub groups: Vec<RawEntry>,

    #[serde(default)]
    pub subgroups: Vec<RawEntry>,

    /// Cluster rendering order; must be a permutation of the groups.
    pub group_order: Vec<String>,

    #[serde(default)]
    pub additions: Vec<RawEntry>,
}

/// Config with compiled rules and cross-checked names.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub root_label: String,
    pub groups: Vec<MatchRule>,
    pub subgroups: Vec<MatchRule>,
    pub designated: String,
    pub group_order: Vec<String>,
    pub supplemental: Vec<Record>,
}

impl OrgConfig {
    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Compile rules and check:
    /// - at least one group, no duplicate group/subgroup names
    /// - no empty or invalid pattern lists
    /// - `subdivided_group` names a declared group
    /// - `group_order` lists every group exactly once
    pub fn validate_and_build(&self) -> Result<ValidatedConfig, ConfigError> {
        let groups = compile_rules("groups", &self.groups)?;
        if groups.is_empty() {
            return Err(ConfigError::NoGroups);
        }
        let subgroups = compile_rules("subgroups", &self.subgroups)?;

        let known: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();

        let designated = display_label(&self.subdivided_group);
        if !known.contains(&designated.as_str()) {
            return Err(ConfigError::UnknownDesignatedGroup {
                name: designated,
                known: known.join(", "),
            });
        }

        let group_order: Vec<String> = self.group_order.iter().map(|g| display_label(g)).collect();
        check_permutation(&known, &group_order)?;

        let mut supplemental = Vec::new();
        for (index, entry) in self.additions.iter().enumerate() {
            let (role, names) = single_entry("additions", index, entry)?;
            let role = display_label(role);
            supplemental.extend(names.iter().map(|n| Record::new(n.trim(), role.clone())));
        }

        Ok(ValidatedConfig {
            root_label: self.organization.trim().to_string(),
            groups,
            subgroups,
            designated,
            group_order,
            supplemental,
        })
    }
}

fn single_entry<'a>(
    section: &'static str,
    index: usize,
    entry: &'a RawEntry,
) -> Result<(&'a String, &'a Vec<String>), ConfigError> {
    match entry.iter().next() {
        Some(kv) if entry.len() == 1 => Ok(kv),
        _ => Err(ConfigError::MalformedEntry {
            section,
            index,
            keys: entry.len(),
        }),
    }
}

fn compile_rules(section: &'static str, entries: &[RawEntry]) -> Result<Vec<MatchRule>, ConfigError> {
    let mut seen = BTreeSet::new();
    let mut rules = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let (key, patterns) = single_entry(section, index, entry)?;
        let name = display_label(key);
        if !seen.insert(name.clone()) {
            return Err(ConfigError::DuplicateRule { section, name });
        }
        rules.push(MatchRule::compile(section, &name, patterns)?);
    }

    Ok(rules)
}

fn check_permutation(known: &[&str], order: &[String]) -> Result<(), ConfigError> {
    let known_set: BTreeSet<&str> = known.iter().copied().collect();

    let mut seen = BTreeSet::new();
    let mut repeated = BTreeSet::new();
    let mut unknown = BTreeSet::new();
    for g in order {
        if !known_set.contains(g.as_str()) {
            unknown.insert(g.as_str());
        } else if !seen.insert(g.as_str()) {
            repeated.insert(g.as_str());
        }
    }
    let missing: Vec<&str> = known.iter().copied().filter(|g| !seen.contains(g)).collect();

    if missing.is_empty() && unknown.is_empty() && repeated.is_empty() {
        return Ok(());
    }

    let join = |it: Vec<&str>| it.join(", ");
    Err(ConfigError::OrderNotPermutation {
        missing: join(missing),
        unknown: join(unknown.into_iter().collect()),
        repeated: join(repeated.into_iter().collect()),
    })
}
