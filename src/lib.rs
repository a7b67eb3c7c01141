//! Classify a flat (name, role) directory extract into a configured group
//! hierarchy and emit it as a Graphviz org chart.
//!
//! Pipeline: [`config`] rules -> [`classify`] (groups, then subgroups of the
//! subdivided group) -> [`hierarchy`] -> [`emit`] -> [`render`].

pub mod cache;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod record;
pub mod render;
pub mod source;

pub use config::ValidatedConfig;
pub use error::{ConfigError, Error};
pub use hierarchy::{Hierarchy, Members};
pub use model::Document;
pub use record::Record;

/// Classify `records` and build the chart document. Nothing is emitted unless
/// every record lands in the hierarchy.
pub fn chart(records: &[Record], config: &ValidatedConfig) -> Result<Document, Error> {
    let hierarchy = hierarchy::build(records, config)?;
    Ok(emit::build_document(
        &hierarchy,
        &config.root_label,
        &config.group_order,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeKind, Style};
    use pretty_assertions::assert_eq;

    const CONFIG: &str = r#"
organization: Living Dreams
subdivided_group: Volunteers
groups:
  - leadership: [Founder]
  - volunteers: [Volunteer]
subgroups:
  - logistics: [Logistics]
  - outreach: [Outreach]
group_order: [Leadership, Volunteers]
"#;

    fn config() -> ValidatedConfig {
        config::OrgConfig::from_yaml_str(CONFIG)
            .unwrap()
            .validate_and_build()
            .unwrap()
    }

    fn records() -> Vec<Record> {
        vec![
            Record::new("Alice", "Founder"),
            Record::new("Bob", "Volunteer - Logistics"),
            Record::new("Carol", "Volunteer - Outreach"),
        ]
    }

    #[test]
    fn end_to_end_scenario() {
        let doc = chart(&records(), &config()).unwrap();

        assert_eq!(doc.nodes().filter(|n| n.kind == NodeKind::Root).count(), 1);

        let lead = doc.cluster("Leadership").unwrap();
        assert_eq!(lead.nodes.iter().filter(|n| n.kind == NodeKind::Role).count(), 1);
        assert_eq!(lead.nodes.iter().filter(|n| n.kind == NodeKind::Name).count(), 1);
        assert_eq!(lead.edges.len(), 1);

        let vol = doc.cluster("Volunteers").unwrap();
        let count = |style: Style| vol.nodes.iter().filter(|n| n.style == style).count();
        assert_eq!(count(Style::SubgroupLabel), 2);
        assert_eq!(count(Style::GroupRole), 2);
        assert_eq!(count(Style::Name), 2);
        assert_eq!(vol.edges.len(), 4);

        let alice = doc.node_id(NodeKind::Name, "Alice").unwrap();
        let logistics = doc.node_id(NodeKind::Role, "Logistics").unwrap();
        let outreach = doc.node_id(NodeKind::Role, "Outreach").unwrap();
        assert_eq!(
            doc.layout_edges,
            vec![
                model::Edge::invisible(alice, logistics),
                model::Edge::invisible(alice, outreach),
            ]
        );
    }

    #[test]
    fn unclassified_record_yields_no_document() {
        let mut input = records();
        input.push(Record::new("Zed", "Janitor"));
        let err = chart(&input, &config()).unwrap_err();
        assert!(matches!(err, Error::Unclassified { ref records, .. } if records == &[Record::new("Zed", "Janitor")]));
    }

    #[test]
    fn rendering_is_byte_identical_across_runs() {
        let cfg = config();
        let first = render::render_dot(&chart(&records(), &cfg).unwrap());
        let second = render::render_dot(&chart(&records(), &cfg).unwrap());
        assert_eq!(first, second);
        assert!(first.starts_with("digraph Living_Dreams {\n"));
        assert_eq!(first.matches("[style=\"invis\"]").count(), 3);
    }
}
