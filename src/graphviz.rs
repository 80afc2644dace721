//! Graphviz rendering of tree snapshots.
//!
//! [`write_dot`] turns a [`Snapshot`] into a DOT digraph: one record per node showing
//! its parent, identity, key and children, filled red or grey by color, plus a `ROOT`
//! record and the sentinel. [`HtmlReport`] runs the `dot` tool on that graph and
//! appends the resulting SVG to an HTML page, one drawing per call.
//!
//! Nothing here is reachable from the tree itself; a report only ever reads a
//! snapshot.
//!
//! # Examples
//!
//! ```
//! use redblack_tree::RBTree;
//! use redblack_tree::graphviz::write_dot;
//!
//! let tree = RBTree::from([2, 1, 3]);
//! let mut dot = String::new();
//! write_dot(&tree.snapshot(), &mut dot).unwrap();
//! assert!(dot.starts_with("digraph G {"));
//! assert!(dot.contains("root:root -> node1;"));
//! assert!(dot.contains("node1:left -> node2;"));
//! ```

use core::fmt::{self, Write};

use crate::{Color, NodeSnapshot, Snapshot};

mod report;

pub use report::{HtmlReport, ReportConfig, ReportError, ReportResult};

const BACKGROUND: &str = "#FFFACD";
const ROOT_FILL: &str = "#FFA07A";
const FRAME: &str = "#000000";
const CLUSTER_FRAME: &str = "#483D8B";
const RED_FILL: &str = "#FF0000";
const BLACK_FILL: &str = "#808080";

/// Writes `snapshot` as a DOT digraph into `out`.
///
/// # Errors
///
/// Returns any error reported by `out`.
pub fn write_dot<K: fmt::Display, W: Write>(snapshot: &Snapshot<'_, K>, out: &mut W) -> fmt::Result {
    writeln!(out, "digraph G {{")?;
    writeln!(out, "    rankdir = TB;")?;
    writeln!(out, "    bgcolor = \"{BACKGROUND}\";")?;
    writeln!(out, "    node [shape = Mrecord, style = filled, color = \"{FRAME}\", fontsize = 10];")?;
    writeln!(out, "    edge [color = \"{FRAME}\", fontsize = 15];")?;

    writeln!(out, "    subgraph cluster_tree {{")?;
    writeln!(out, "        style = \"dashed\";")?;
    writeln!(out, "        color = \"{CLUSTER_FRAME}\";")?;
    for node in snapshot.iter().filter(|node| !node.id.is_nil()) {
        write_record(out, "        ", node)?;
        for (port, child) in [("left", node.left), ("right", node.right)] {
            if !child.is_nil() {
                writeln!(out, "        node{}:{port} -> node{};", node.id.index(), child.index())?;
            }
        }
    }
    writeln!(out, "    }}")?;

    writeln!(out, "    root [shape = Mrecord, fillcolor = \"{ROOT_FILL}\", label = \"ROOT | <root> {}\"];", snapshot.root())?;
    if !snapshot.root().is_nil() {
        writeln!(out, "    root:root -> node{};", snapshot.root().index())?;
    }
    write_record(out, "    ", snapshot.nil())?;
    writeln!(out, "}}")
}

fn write_record<K: fmt::Display, W: Write>(out: &mut W, indent: &str, node: &NodeSnapshot<'_, K>) -> fmt::Result {
    let fill = match node.color {
        Color::Red => RED_FILL,
        Color::Black => BLACK_FILL,
    };
    write!(out, "{indent}node{} [fillcolor = \"{fill}\", label = \"{{ PARENT: {} | ID: {} | ", node.id.index(), node.parent, node.id)?;
    match node.key {
        Some(key) => {
            out.write_str("KEY: ")?;
            write!(RecordEscape(&mut *out), "{key}")?;
        }
        None => out.write_str("NIL")?,
    }
    writeln!(out, " | {{ <left> LEFT: {} | <right> RIGHT: {} }} }}\"];", node.left, node.right)
}

/// Escapes the characters that are structural inside a record label.
struct RecordEscape<'w, W>(&'w mut W);

impl<W: Write> Write for RecordEscape<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if matches!(c, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
                self.0.write_char('\\')?;
            }
            self.0.write_char(c)?;
        }
        Ok(())
    }
}
