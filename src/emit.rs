//! Compile a [`Hierarchy`] into a graph [`Document`].
//!
//! Node ids are allocated in first-seen order across the whole emission and a
//! `(kind, label)` pair always resolves to the same id, so a role shared by two
//! groups, or a person holding two roles, is drawn once.

use crate::classify::Partition;
use crate::hierarchy::{Hierarchy, Members};
use crate::model::{Cluster, Document, Edge, Node, NodeKind, Style};
use crate::record::Record;
use crate::render::render_dot;
use indexmap::IndexSet;
use std::collections::HashMap;

/// Running id allocation for one emission pass.
#[derive(Debug, Default)]
struct EmitterState {
    next_id: u32,
    ids: HashMap<(NodeKind, String), u32>,
}

impl EmitterState {
    /// Return the id for `(kind, label)`, declaring a new node into `out` the
    /// first time the pair is seen.
    fn declare(&mut self, kind: NodeKind, label: &str, style: Style, out: &mut Vec<Node>) -> u32 {
        if let Some(&id) = self.ids.get(&(kind, label.to_string())) {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert((kind, label.to_string()), id);
        out.push(Node {
            id,
            label: label.to_string(),
            kind,
            style,
        });
        id
    }
}

/// Ids a cluster exposes to its neighbours for the layout edges.
#[derive(Debug, Default)]
struct ClusterEnds {
    heads: IndexSet<u32>,
    names: IndexSet<u32>,
}

/// Build the document model. Groups absent from `hierarchy` render as empty
/// clusters.
pub fn build_document(hierarchy: &Hierarchy, root_label: &str, group_order: &[String]) -> Document {
    let mut state = EmitterState::default();

    let mut root_nodes = Vec::with_capacity(1);
    state.declare(NodeKind::Root, root_label, Style::Root, &mut root_nodes);
    let root = root_nodes.remove(0);

    let mut clusters = Vec::with_capacity(group_order.len());
    let mut ends = Vec::with_capacity(group_order.len());
    for (index, group) in group_order.iter().enumerate() {
        let mut cluster = Cluster {
            id: cluster_id(index, group),
            label: group.clone(),
            nodes: Vec::new(),
            edges: Vec::new(),
        };

        let group_ends = match hierarchy.get(group) {
            Some(Members::Flat(records)) => emit_flat(&mut state, records, &mut cluster),
            Some(Members::Nested(subgroups)) => emit_nested(&mut state, subgroups, &mut cluster),
            None => {
                tracing::warn!("group '{}' has no members in the hierarchy", group);
                ClusterEnds::default()
            }
        };

        clusters.push(cluster);
        ends.push(group_ends);
    }

    let anchors: Vec<Edge> = ends
        .first()
        .map(|first| first.heads.iter().map(|&h| Edge::invisible(root.id, h)).collect())
        .unwrap_or_default();

    let mut layout_edges = Vec::new();
    for pair in ends.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        for &name in &upper.names {
            for &head in &lower.heads {
                layout_edges.push(Edge::invisible(name, head));
            }
        }
    }

    tracing::debug!(
        nodes = state.next_id,
        layout_edges = layout_edges.len(),
        "emitted graph document"
    );

    Document {
        name: graph_id(root_label),
        root,
        anchors,
        clusters,
        layout_edges,
    }
}

/// Emit the hierarchy as DOT text.
pub fn emit(hierarchy: &Hierarchy, root_label: &str, group_order: &[String]) -> String {
    render_dot(&build_document(hierarchy, root_label, group_order))
}

fn emit_flat(state: &mut EmitterState, records: &[Record], cluster: &mut Cluster) -> ClusterEnds {
    let roles: Vec<u32> = records
        .iter()
        .map(|r| state.declare(NodeKind::Role, &r.role, Style::GroupRole, &mut cluster.nodes))
        .collect();
    let names: Vec<u32> = records
        .iter()
        .map(|r| state.declare(NodeKind::Name, &r.name, Style::Name, &mut cluster.nodes))
        .collect();

    cluster.edges.extend(
        roles
            .iter()
            .zip(&names)
            .map(|(&role, &name)| Edge::visible(role, name)),
    );

    ClusterEnds {
        heads: roles.into_iter().collect(),
        names: names.into_iter().collect(),
    }
}

fn emit_nested(state: &mut EmitterState, subgroups: &Partition, cluster: &mut Cluster) -> ClusterEnds {
    let heads: Vec<u32> = subgroups
        .keys()
        .map(|label| state.declare(NodeKind::Role, label, Style::SubgroupLabel, &mut cluster.nodes))
        .collect();

    // (subgroup id, record) in subgroup order.
    let members: Vec<(u32, &Record)> = heads
        .iter()
        .zip(subgroups.values())
        .flat_map(|(&head, records)| records.iter().map(move |r| (head, r)))
        .collect();

    let roles: Vec<u32> = members
        .iter()
        .map(|(_, r)| state.declare(NodeKind::Role, &r.role, Style::GroupRole, &mut cluster.nodes))
        .collect();
    let names: Vec<u32> = members
        .iter()
        .map(|(_, r)| state.declare(NodeKind::Name, &r.name, Style::Name, &mut cluster.nodes))
        .collect();

    // At most one subgroup -> role edge per distinct role in this cluster,
    // none when the role is the subgroup label itself.
    let mut linked = IndexSet::new();
    for ((head, _), &role) in members.iter().zip(&roles) {
        if linked.insert(role) && *head != role {
            cluster.edges.push(Edge::visible(*head, role));
        }
    }
    cluster.edges.extend(
        roles
            .iter()
            .zip(&names)
            .map(|(&role, &name)| Edge::visible(role, name)),
    );

    ClusterEnds {
        heads: heads.into_iter().collect(),
        names: names.into_iter().collect(),
    }
}

fn slug(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

fn cluster_id(index: usize, group: &str) -> String {
    format!("cluster_{}_{}", index, slug(group))
}

fn graph_id(root_label: &str) -> String {
    let id: String = root_label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if id.is_empty() || id.starts_with(|c: char| c.is_ascii_digit()) {
        format!("G_{id}")
    } else {
        id
    }
}
