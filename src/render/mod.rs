//! Text renderers: Graphviz DOT for the chart, an indented tree for `check`.

pub mod dot;
pub mod tree;

pub use dot::render_dot;
pub use tree::render_tree;
