//! Compose the group pass and the subgroup pass into one nested structure.

use crate::classify::{Partition, classify};
use crate::config::ValidatedConfig;
use crate::error::Error;
use crate::record::{Record, split_dual_roles};
use indexmap::IndexMap;

/// Members of one top-level group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Members {
    Flat(Vec<Record>),
    Nested(Partition),
}

impl Members {
    /// Every record of the group, subgroup by subgroup for the nested form.
    pub fn records(&self) -> Vec<&Record> {
        match self {
            Members::Flat(records) => records.iter().collect(),
            Members::Nested(subgroups) => subgroups.values().flatten().collect(),
        }
    }
}

/// Top-level group name -> members. Exactly one group is nested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    pub designated: String,
    pub groups: IndexMap<String, Members>,
}

impl Hierarchy {
    pub fn get(&self, group: &str) -> Option<&Members> {
        self.groups.get(group)
    }

    pub fn record_count(&self) -> usize {
        self.groups.values().map(|m| m.records().len()).sum()
    }
}

/// Classify `records` (plus the config's supplemental records) into a
/// [`Hierarchy`]. `records` is not modified.
///
/// Dual roles are split once, before the group pass. The subgroup pass sees
/// the halves unchanged, so a second `&` stays inside its half.
pub fn build(records: &[Record], config: &ValidatedConfig) -> Result<Hierarchy, Error> {
    let mut all = records.to_vec();
    all.extend(config.supplemental.iter().cloned());
    let all = split_dual_roles(&all);
    tracing::debug!(
        source = records.len(),
        supplemental = config.supplemental.len(),
        "classifying records"
    );

    let top = classify(&all, &config.groups, "group")?;

    let mut groups = IndexMap::with_capacity(top.len());
    for (name, members) in top {
        if name != config.designated {
            groups.insert(name, Members::Flat(members));
            continue;
        }

        let nested = classify(&members, &config.subgroups, "subgroup")?;

        let found = nested.values().map(Vec::len).sum::<usize>();
        if found != members.len() || !same_records(&members, &nested) {
            return Err(Error::AmbiguousStructure {
                group: name,
                expected: members.len(),
                found,
            });
        }
        groups.insert(name, Members::Nested(nested));
    }

    if !groups.contains_key(&config.designated) {
        return Err(Error::AmbiguousStructure {
            group: config.designated.clone(),
            expected: 0,
            found: 0,
        });
    }

    let hierarchy = Hierarchy {
        designated: config.designated.clone(),
        groups,
    };
    tracing::info!(
        groups = hierarchy.groups.len(),
        records = hierarchy.record_count(),
        "built hierarchy"
    );
    Ok(hierarchy)
}

fn same_records(members: &[Record], nested: &Partition) -> bool {
    let mut expected: Vec<&Record> = members.iter().collect();
    let mut found: Vec<&Record> = nested.values().flatten().collect();
    expected.sort();
    found.sort();
    expected == found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchRule;
    use pretty_assertions::assert_eq;

    fn rule(name: &str, patterns: &[&str]) -> MatchRule {
        let p: Vec<String> = patterns.iter().map(|s| s.to_string()).collect();
        MatchRule::compile("groups", name, &p).unwrap()
    }

    fn scenario_config() -> ValidatedConfig {
        ValidatedConfig {
            root_label: "Living Dreams".to_string(),
            groups: vec![rule("Leadership", &["Founder"]), rule("Volunteers", &["Volunteer"])],
            subgroups: vec![rule("Logistics", &["Logistics"]), rule("Outreach", &["Outreach"])],
            designated: "Volunteers".to_string(),
            group_order: vec!["Leadership".to_string(), "Volunteers".to_string()],
            supplemental: vec![],
        }
    }

    fn scenario_records() -> Vec<Record> {
        vec![
            Record::new("Alice", "Founder"),
            Record::new("Bob", "Volunteer - Logistics"),
            Record::new("Carol", "Volunteer - Outreach"),
        ]
    }

    #[test]
    fn designated_group_is_nested_others_flat() {
        let h = build(&scenario_records(), &scenario_config()).unwrap();

        assert_eq!(
            h.get("Leadership"),
            Some(&Members::Flat(vec![Record::new("Alice", "Founder")]))
        );

        let Some(Members::Nested(subs)) = h.get("Volunteers") else {
            panic!("Volunteers should be nested");
        };
        assert_eq!(subs["Logistics"], vec![Record::new("Bob", "Volunteer - Logistics")]);
        assert_eq!(subs["Outreach"], vec![Record::new("Carol", "Volunteer - Outreach")]);
        assert_eq!(h.record_count(), 3);
    }

    #[test]
    fn supplemental_records_are_classified_too() {
        let mut cfg = scenario_config();
        cfg.supplemental = vec![Record::new("Dana", "Volunteer Outreach Lead")];

        let records = scenario_records();
        let h = build(&records, &cfg).unwrap();
        let Some(Members::Nested(subs)) = h.get("Volunteers") else {
            panic!("Volunteers should be nested");
        };
        assert_eq!(subs["Outreach"].len(), 2);
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn supplemental_records_must_match_a_rule() {
        let mut cfg = scenario_config();
        cfg.supplemental = vec![Record::new("Dana", "Auditor")];
        let err = build(&scenario_records(), &cfg).unwrap_err();
        assert!(matches!(err, Error::Unclassified { ref scope, .. } if scope == "group"));
    }

    #[test]
    fn dual_role_halves_land_independently() {
        let mut cfg = scenario_config();
        cfg.groups.insert(1, rule("Board", &["treasurer", "secretary"]));
        let h = build(&[Record::new("A. Smith", "Treasurer & Secretary")], &cfg).unwrap();
        assert_eq!(
            h.get("Board"),
            Some(&Members::Flat(vec![
                Record::new("A. Smith", "Treasurer"),
                Record::new("A. Smith", "Secretary"),
            ]))
        );
    }

    #[test]
    fn role_is_split_only_at_its_first_ampersand() {
        let records = [Record::new("Eve", "Founder & Volunteer - Logistics & Outreach")];
        let h = build(&records, &scenario_config()).unwrap();

        assert_eq!(
            h.get("Leadership"),
            Some(&Members::Flat(vec![Record::new("Eve", "Founder")]))
        );
        let Some(Members::Nested(subs)) = h.get("Volunteers") else {
            panic!("Volunteers should be nested");
        };
        assert_eq!(
            subs["Logistics"],
            vec![Record::new("Eve", "Volunteer - Logistics & Outreach")]
        );
        assert!(subs["Outreach"].is_empty());
        assert_eq!(h.record_count(), 2);
    }

    #[test]
    fn volunteer_without_subgroup_fails_in_subgroup_pass() {
        let mut records = scenario_records();
        records.push(Record::new("Eve", "Volunteer - Fundraising"));
        match build(&records, &scenario_config()) {
            Err(Error::Unclassified { scope, records }) => {
                assert_eq!(scope, "subgroup");
                assert_eq!(records, vec![Record::new("Eve", "Volunteer - Fundraising")]);
            }
            other => panic!("expected subgroup failure, got {other:?}"),
        }
    }
}
