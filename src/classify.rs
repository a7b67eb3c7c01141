//! First-match-wins partitioning of records into named buckets.
//!
//! Used twice: once with the group rules over every record, and once with the
//! subgroup rules over the members of the subdivided group.

use crate::config::MatchRule;
use crate::error::Error;
use crate::record::Record;
use indexmap::IndexMap;

/// Bucket name -> members, in rule declaration order.
pub type Partition = IndexMap<String, Vec<Record>>;

/// Partition `records` by `rules`.
///
/// Records are partitioned as given; dual roles must already be split. Each
/// rule, in order, claims every still-unclaimed record whose role it matches, so a record belongs to the
/// earliest matching rule. Members keep their input order. Every rule gets a
/// bucket, even an empty one.
///
/// Fails with [`Error::Unclassified`] if any record is left unclaimed.
pub fn classify(records: &[Record], rules: &[MatchRule], scope: &str) -> Result<Partition, Error> {
    let mut claimed = vec![false; records.len()];

    let mut out = Partition::with_capacity(rules.len());
    for rule in rules {
        let members: Vec<Record> = records
            .iter()
            .zip(claimed.iter_mut())
            .filter(|(r, c)| !**c && rule.matches(&r.role))
            .map(|(r, c)| {
                *c = true;
                r.clone()
            })
            .collect();

        tracing::trace!(scope, rule = %rule.name, members = members.len(), "applied rule");
        out.insert(rule.name.clone(), members);
    }

    let residual: Vec<Record> = records
        .iter()
        .zip(claimed)
        .filter_map(|(r, c)| (!c).then(|| r.clone()))
        .collect();
    if !residual.is_empty() {
        return Err(Error::Unclassified {
            scope: scope.to_string(),
            records: residual,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn rule(name: &str, patterns: &[&str]) -> MatchRule {
        let p: Vec<String> = patterns.iter().map(|s| s.to_string()).collect();
        MatchRule::compile("groups", name, &p).unwrap()
    }

    fn names(members: &[Record]) -> Vec<&str> {
        members.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn partitions_without_omission_or_duplication() {
        let records = vec![
            Record::new("Alice", "Founder"),
            Record::new("Bob", "Volunteer - Logistics"),
            Record::new("Carol", "Volunteer - Outreach"),
            Record::new("Dan", "Co-Founder"),
        ];
        let rules = vec![rule("Leadership", &["founder"]), rule("Volunteers", &["volunteer"])];

        let out = classify(&records, &rules, "group").unwrap();
        assert_eq!(names(&out["Leadership"]), vec!["Alice", "Dan"]);
        assert_eq!(names(&out["Volunteers"]), vec!["Bob", "Carol"]);

        let all: Vec<&Record> = out.values().flatten().collect();
        assert_eq!(all.len(), records.len());
        let unique: BTreeSet<&Record> = all.into_iter().collect();
        assert_eq!(unique, records.iter().collect());
    }

    #[test]
    fn earlier_rule_wins_over_later_overlap() {
        let records = vec![Record::new("Fay", "Volunteer Coordinator")];
        let rules = vec![
            rule("Coordinators", &["coordinator"]),
            rule("Volunteers", &["volunteer"]),
        ];
        let out = classify(&records, &rules, "group").unwrap();
        assert_eq!(names(&out["Coordinators"]), vec!["Fay"]);
        assert!(out["Volunteers"].is_empty());

        let swapped: Vec<MatchRule> = rules.into_iter().rev().collect();
        let out = classify(&records, &swapped, "group").unwrap();
        assert_eq!(names(&out["Volunteers"]), vec!["Fay"]);
        assert!(out["Coordinators"].is_empty());
    }

    #[test]
    fn partitions_ampersand_roles_as_given() {
        let records = vec![Record::new("A. Smith", "Treasurer & Secretary")];
        let rules = vec![rule("Finance", &["treasurer"]), rule("Admin", &["secretary"])];
        let out = classify(&records, &rules, "group").unwrap();
        assert_eq!(out["Finance"], records);
        assert!(out["Admin"].is_empty());
    }

    #[test]
    fn unmatched_records_are_reported() {
        let records = vec![
            Record::new("Alice", "Founder"),
            Record::new("Zed", "Janitor"),
        ];
        let rules = vec![rule("Leadership", &["founder"])];
        match classify(&records, &rules, "subgroup") {
            Err(Error::Unclassified { scope, records }) => {
                assert_eq!(scope, "subgroup");
                assert_eq!(records, vec![Record::new("Zed", "Janitor")]);
            }
            other => panic!("expected unclassified error, got {other:?}"),
        }
    }

    #[test]
    fn bucket_order_follows_rules() {
        let rules = vec![rule("Zeta", &["z"]), rule("Alpha", &["a"])];
        let out = classify(&[], &rules, "group").unwrap();
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Zeta", "Alpha"]);
    }
}
