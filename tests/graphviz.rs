use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use pretty_assertions::assert_eq;
use redblack_tree::RBTree;
use redblack_tree::graphviz::{HtmlReport, ReportConfig, ReportError, write_dot};

fn scratch_dir(name: &str) -> PathBuf {
    env::temp_dir().join(format!("redblack_tree_it_{name}_{}", process::id()))
}

#[test]
fn dot_has_one_record_per_node_and_one_edge_per_child() {
    let tree: RBTree<i32> = [1, 4, 5, 0, 2, 10, 3, 20, 18, 21, 23, 7].into_iter().collect();
    let mut dot = String::new();
    write_dot(&tree.snapshot(), &mut dot).unwrap();

    // One record per key plus the sentinel.
    assert_eq!(dot.matches("label = \"{ PARENT:").count(), tree.len() + 1);
    // Every node but the root hangs from exactly one parent port.
    let child_edges = dot.lines().filter(|line| line.contains(":left ->") || line.contains(":right ->")).count();
    assert_eq!(child_edges, tree.len() - 1);
    assert_eq!(dot.matches("root:root ->").count(), 1);
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn dot_colors_match_node_colors() {
    let tree: RBTree<u32> = (0..50).collect();
    let snapshot = tree.snapshot();
    let mut dot = String::new();
    write_dot(&snapshot, &mut dot).unwrap();

    for node in snapshot.iter().filter(|node| !node.id.is_nil()) {
        let prefix = format!("node{} [fillcolor = ", node.id.index());
        let line = dot.lines().find(|line| line.trim_start().starts_with(&prefix)).unwrap();
        let fill = if node.color.is_red() { "#FF0000" } else { "#808080" };
        assert!(line.contains(fill), "{line}");
    }
}

#[test]
fn report_without_graphviz_keeps_page_valid() {
    let dir = scratch_dir("no_tool");
    let config = ReportConfig::new(&dir).with_dot_program(dir.join("missing-dot"));
    let mut report = HtmlReport::create(config.clone()).unwrap();

    let tree = RBTree::from([2, 1, 3]);
    match report.log_tree(&tree) {
        Err(ReportError::ToolNotFound(_)) => {}
        other => panic!("expected a missing tool, got {other:?}"),
    }
    report.finish().unwrap();

    let page = fs::read_to_string(config.log_path()).unwrap();
    assert!(page.contains("Logs for Red-Black Tree"));
    assert!(!page.contains("### In file:"));
    assert!(page.ends_with("</html>\n"));
    fs::remove_dir_all(&dir).unwrap();
}
