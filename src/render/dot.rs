use crate::model::{Cluster, Document, Edge, Node};

const GRAPH_ATTRS: &[&str] = &[
    "nodesep=1.0",
    "edge [style=\"setlinewidth(1)\"];",
    "rankdir = \"TB\"",
    "splines = true",
    "fontname = Helvetica",
    "concentrate = true",
    "center = true",
    "compound = true",
    "clusterrank = local",
];

const CLUSTER_ATTRS: &[&str] = &[
    "style = filled",
    "bgcolor = lemonchiffon",
    "rankdir = \"TB\"",
    "splines = true",
    "fontname = Helvetica",
    "concentrate = true",
    "center = true",
    "compound = true",
];

/// Render a document as Graphviz DOT.
///
/// Statement order follows the model exactly (header, root, anchors, one
/// `subgraph` per cluster, layout edges), so equal documents render to equal
/// bytes.
pub fn render_dot(doc: &Document) -> String {
    let mut out = Vec::new();

    out.push(format!("digraph {} {{", doc.name));
    out.extend(GRAPH_ATTRS.iter().map(|a| format!("\t{a}")));

    out.push(String::new());
    out.push(node_stmt(&doc.root));
    out.extend(doc.anchors.iter().map(edge_stmt));

    for cluster in &doc.clusters {
        out.push(String::new());
        push_cluster(&mut out, cluster);
    }

    if !doc.layout_edges.is_empty() {
        out.push(String::new());
        out.extend(doc.layout_edges.iter().map(edge_stmt));
    }

    out.push("}".to_string());
    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn push_cluster(out: &mut Vec<String>, cluster: &Cluster) {
    out.push(format!("\tsubgraph {} {{", cluster.id));
    out.extend(CLUSTER_ATTRS.iter().map(|a| format!("\t\t{a}")));
    out.push(format!("\t\tlabel = \"{}\"", escape(&cluster.label)));
    out.extend(cluster.nodes.iter().map(|n| format!("\t{}", node_stmt(n))));
    out.extend(cluster.edges.iter().map(|e| format!("\t{}", edge_stmt(e))));
    out.push("\t}".to_string());
}

fn node_stmt(node: &Node) -> String {
    let style = node.style.spec();
    format!(
        "\t{} [label=\"{}\" style=\"filled\" shape=\"{}\" fillcolor=\"{}\" weight=\"{}\"]",
        node.id,
        escape(&node.label),
        style.shape,
        style.fillcolor,
        style.weight
    )
}

fn edge_stmt(edge: &Edge) -> String {
    if edge.invisible {
        format!("\t{} -> {} [style=\"invis\"]", edge.from, edge.to)
    } else {
        format!("\t{} -> {}", edge.from, edge.to)
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
