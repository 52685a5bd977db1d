use std::collections::HashMap;

use crate::core::package::PackageId;

pub fn render_tree(root: &PackageId, edges: &HashMap<PackageId, Vec<PackageId>>) -> String {
    let mut out = String::new();
    out.push_str(root.as_str());
    out.push('\n');
    let mut path = vec![root.clone()];
    render_tree_children(root, edges, "", &mut path, &mut out);
    out
}

pub fn render_flat(root: &PackageId, edges: &HashMap<PackageId, Vec<PackageId>>) -> String {
    let mut out = String::new();
    out.push_str(root.as_str());
    out.push('\n');
    let mut path = vec![root.clone()];
    render_flat_children(root, edges, 1, &mut path, &mut out);
    out
}

/// DOT digraph: root node declared first, then one edge statement per
/// recorded `(parent, child)` pair. Parents sorted, children in declaration
/// order.
pub fn render_dot(root: &PackageId, edges: &HashMap<PackageId, Vec<PackageId>>) -> String {
    let mut out = format!(
        "digraph \"{} dependencies\" {{\n",
        escape_dot_label(root.as_str())
    );
    out.push_str(&format!("  \"{}\";\n", escape_dot_label(root.as_str())));
    let mut parents: Vec<&PackageId> = edges.keys().collect();
    parents.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    for parent in parents {
        for child in &edges[parent] {
            out.push_str(&format!(
                "  \"{}\" -> \"{}\";\n",
                escape_dot_label(parent.as_str()),
                escape_dot_label(child.as_str())
            ));
        }
    }
    out.push_str("}\n");
    out
}

fn render_tree_children(
    node: &PackageId,
    edges: &HashMap<PackageId, Vec<PackageId>>,
    prefix: &str,
    path: &mut Vec<PackageId>,
    out: &mut String,
) {
    let mut children = edges.get(node).cloned().unwrap_or_else(Vec::new);
    children.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    for (idx, child) in children.iter().enumerate() {
        let is_last = idx + 1 == children.len();
        out.push_str(prefix);
        out.push_str(if is_last { "`-- " } else { "|-- " });
        out.push_str(child.as_str());
        if path.iter().any(|id| id == child) {
            out.push_str(" (cycle)");
            out.push('\n');
            continue;
        }
        out.push('\n');
        path.push(child.clone());
        let mut next_prefix = prefix.to_string();
        if is_last {
            next_prefix.push_str("    ");
        } else {
            next_prefix.push_str("|   ");
        }
        render_tree_children(child, edges, &next_prefix, path, out);
        path.pop();
    }
}

fn render_flat_children(
    node: &PackageId,
    edges: &HashMap<PackageId, Vec<PackageId>>,
    depth: usize,
    path: &mut Vec<PackageId>,
    out: &mut String,
) {
    let mut children = edges.get(node).cloned().unwrap_or_else(Vec::new);
    children.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    for child in children {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(child.as_str());
        if path.iter().any(|id| id == &child) {
            out.push_str(" (cycle)");
            out.push('\n');
            continue;
        }
        out.push('\n');
        path.push(child.clone());
        render_flat_children(&child, edges, depth + 1, path, out);
        path.pop();
    }
}

fn escape_dot_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
