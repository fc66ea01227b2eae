//! Report extraction: four independent read-only passes over an
//! annotated tree, concatenated in fixed order.
//!
//! 1. Annotation: every reached node, pre-order, indented 4 spaces per level.
//! 2. Node output: the unbroken true path from the root.
//! 3. Exceptions: every captured error message.
//! 4. Exception traceback: every captured trace.
//!
//! A section is omitted entirely when it has no content; each section after
//! the first is preceded by a blank line and a literal header/underline.

use crate::node::{EvalStatus, TreeNode};

/// Render the full report for an evaluated tree.
pub fn extract(root: &TreeNode) -> String {
    let mut report = String::new();

    let annotation = tree_annotation(root);
    if !annotation.is_empty() {
        report.push_str(&annotation);
    }
    let output = tree_output(root);
    if !output.is_empty() {
        report.push('\n');
        report.push_str("Node output:\n");
        report.push_str("------------\n");
        report.push_str(&output);
    }
    let exceptions = tree_exceptions(root);
    if !exceptions.is_empty() {
        report.push('\n');
        report.push_str("Exceptions:\n");
        report.push_str("-----------\n");
        report.push_str(&exceptions);
    }
    let tracebacks = tree_tracebacks(root);
    if !tracebacks.is_empty() {
        report.push('\n');
        report.push_str("Exception traceback:\n");
        report.push_str("--------------------\n");
        report.push_str(&tracebacks);
    }
    report
}

/// Pre-order rendering of every node's status. Pruned nodes carry no status
/// text and are skipped.
pub fn tree_annotation(root: &TreeNode) -> String {
    let mut out = String::new();
    annotate(root, 0, &mut out);
    out
}

fn annotate(node: &TreeNode, depth: usize, out: &mut String) {
    if let Some(status_text) = status_text(node) {
        out.push_str(&" ".repeat(depth * 4));
        if let Some(index) = node.hint_index {
            out.push_str(&format!("[{}] ", index));
        }
        out.push_str(&format!("{} : {}\n", node.name, status_text));
    }
    for child in &node.children {
        annotate(child, depth + 1, out);
    }
}

fn status_text(node: &TreeNode) -> Option<String> {
    if let Some(record) = &node.error {
        return Some(record.message.clone());
    }
    match node.status {
        EvalStatus::True => Some("true".to_string()),
        EvalStatus::False => Some("false".to_string()),
        EvalStatus::Unevaluated => None,
    }
}

/// Output lines of the consecutive true path starting at the root. Descent
/// stops at the first non-true node on each branch.
pub fn tree_output(node: &TreeNode) -> String {
    if !node.is_true() {
        return String::new();
    }
    let mut out = String::new();
    if let (Some(index), Some(text)) = (node.hint_index, node.output.as_deref()) {
        out.push_str(&format!("[{}] {}\n", index, text));
    }
    for child in &node.children {
        out.push_str(&tree_output(child));
    }
    out
}

/// Error messages from every node in the tree, pre-order.
pub fn tree_exceptions(node: &TreeNode) -> String {
    let mut out = String::new();
    if let Some(record) = &node.error {
        out.push_str(&format!("{}: {}\n", node.name, record.message));
    }
    for child in &node.children {
        out.push_str(&tree_exceptions(child));
    }
    out
}

/// Captured traces from every node in the tree, pre-order.
pub fn tree_tracebacks(node: &TreeNode) -> String {
    let mut out = String::new();
    if let Some(trace) = node.error.as_ref().and_then(|record| record.trace.as_deref()) {
        out.push_str(&format!("{}: {}\n", node.name, trace));
    }
    for child in &node.children {
        out.push_str(&tree_tracebacks(child));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, ErrorRecord};

    fn true_node(name: &str, index: usize) -> TreeNode {
        let mut node = TreeNode::new(name);
        node.status = EvalStatus::True;
        node.hint_index = Some(index);
        node.output = Some(format!("{} is true", name));
        node
    }

    #[test]
    fn test_annotation_skips_unevaluated_nodes() {
        let mut root = true_node("Rootnode", 0);
        let mut falsy = TreeNode::new("Subnode1");
        falsy.status = EvalStatus::False;
        falsy.add_child(TreeNode::new("Pruned"));
        root.add_child(falsy);

        let annotation = tree_annotation(&root);
        assert_eq!(annotation, "[0] Rootnode : true\n    Subnode1 : false\n");
    }

    #[test]
    fn test_error_message_replaces_status_text() {
        let mut node = TreeNode::new("Subnode12");
        node.status = EvalStatus::False;
        node.error = Some(ErrorRecord {
            kind: ErrorKind::Evaluation,
            message: "NotImplementedError".to_string(),
            trace: None,
        });
        assert_eq!(tree_annotation(&node), "Subnode12 : NotImplementedError\n");
    }

    #[test]
    fn test_report_has_no_sections_without_content() {
        let root = true_node("Rootnode", 0);
        let report = extract(&root);
        assert!(report.contains("Node output:\n------------\n"));
        assert!(!report.contains("Exceptions:"));
        assert!(!report.contains("Exception traceback:"));
    }
}
