//! Graph document model: what the emitter produces and the renderers consume.

use serde::Serialize;

/// Node identity namespace. Subgroup labels share the `Role` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Role,
    Name,
}

/// Presentation class of a node; fixed per class, never derived from data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Root,
    GroupRole,
    SubgroupLabel,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpec {
    pub shape: &'static str,
    pub fillcolor: &'static str,
    /// The root sits at weight 1, everything inside a cluster at 2.
    pub weight: u32,
}

impl Style {
    pub fn spec(self) -> StyleSpec {
        let (shape, fillcolor, weight) = match self {
            Style::Root => ("triangle", "steelblue", 1),
            Style::GroupRole => ("box", "lightblue", 2),
            Style::SubgroupLabel => ("trapezium", "greenyellow", 2),
            Style::Name => ("egg", "steelblue", 2),
        };
        StyleSpec {
            shape,
            fillcolor,
            weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: u32,
    pub label: String,
    pub kind: NodeKind,
    pub style: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: u32,
    pub to: u32,
    pub invisible: bool,
}

impl Edge {
    pub fn visible(from: u32, to: u32) -> Self {
        Self {
            from,
            to,
            invisible: false,
        }
    }

    pub fn invisible(from: u32, to: u32) -> Self {
        Self {
            from,
            to,
            invisible: true,
        }
    }
}

/// One top-level group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    /// Graph identifier, always prefixed with `cluster_`.
    pub id: String,
    pub label: String,
    /// Nodes first declared inside this cluster, in id order.
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Graph identifier derived from the root label.
    pub name: String,
    pub root: Node,
    /// Invisible edges pinning the root above the first cluster.
    pub anchors: Vec<Edge>,
    pub clusters: Vec<Cluster>,
    /// Invisible edges between consecutive clusters.
    pub layout_edges: Vec<Edge>,
}

impl Document {
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        std::iter::once(&self.root).chain(self.clusters.iter().flat_map(|c| c.nodes.iter()))
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.anchors
            .iter()
            .chain(self.clusters.iter().flat_map(|c| c.edges.iter()))
            .chain(self.layout_edges.iter())
    }

    pub fn cluster(&self, label: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.label == label)
    }

    /// Id of the node with this kind and label, if declared.
    pub fn node_id(&self, kind: NodeKind, label: &str) -> Option<u32> {
        self.nodes()
            .find(|n| n.kind == kind && n.label == label)
            .map(|n| n.id)
    }
}
