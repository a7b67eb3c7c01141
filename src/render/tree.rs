use crate::hierarchy::{Hierarchy, Members};
use crate::record::Record;

/// Indented plain-text view of a hierarchy, groups in `group_order`.
pub fn render_tree(hierarchy: &Hierarchy, root_label: &str, group_order: &[String]) -> String {
    let mut out = vec![format!("{} ({} records)", root_label, hierarchy.record_count())];

    for group in group_order {
        match hierarchy.get(group) {
            Some(Members::Flat(records)) => {
                out.push(format!("  {} ({})", group, records.len()));
                push_records(&mut out, records, "    ");
            }
            Some(Members::Nested(subgroups)) => {
                let total: usize = subgroups.values().map(Vec::len).sum();
                out.push(format!("  {} ({})", group, total));
                for (sub, records) in subgroups {
                    out.push(format!("    {} ({})", sub, records.len()));
                    push_records(&mut out, records, "      ");
                }
            }
            None => out.push(format!("  {} (0)", group)),
        }
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn push_records(out: &mut Vec<String>, records: &[Record], indent: &str) {
    out.extend(records.iter().map(|r| format!("{indent}{} - {}", r.name, r.role)));
}
