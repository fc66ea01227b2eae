//! Placeholder check-implementation generation.
//!
//! Produces a Rust module registering every node name with a check that
//! fails with `NotImplementedError`, ready for the application to fill in
//! one registration at a time. Existing files are never overwritten.

use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use crate::errors::ScaffoldError;
use crate::node::TreeNode;

/// Render the placeholder registration module for a loaded tree.
pub fn scaffold_module(root: &TreeNode) -> String {
    let mut text = String::new();
    text.push_str("//! Check registrations for the decision tree.\n");
    text.push_str("//! Generated scaffold: replace each NotImplemented body.\n");
    text.push('\n');
    text.push_str("use rsdiag::{CheckContext, CheckError, NodeRegistry};\n");
    text.push('\n');
    text.push_str("pub fn register_checks(registry: &mut NodeRegistry) {\n");
    for name in node_names(root) {
        text.push_str(&format!(
            "    registry.register(\"{name}\", |_ctx: &mut CheckContext<'_>| -> Result<bool, CheckError> {{\n"
        ));
        text.push_str("        Err(CheckError::NotImplemented)\n");
        text.push_str("    });\n");
    }
    text.push_str("}\n");
    text
}

/// Write the scaffold module next to the application sources.
#[instrument(level = "debug", skip(root), fields(root = %root.name))]
pub fn write_scaffold(root: &TreeNode, path: &Path) -> Result<(), ScaffoldError> {
    if path.exists() {
        return Err(ScaffoldError::AlreadyExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, scaffold_module(root))?;
    debug!(path = %path.display(), "scaffold module written");
    Ok(())
}

/// Pre-order node names with duplicates dropped: duplicate names resolve to
/// the same check, so they get a single registration.
fn node_names(root: &TreeNode) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for node in root.iter() {
        if !names.contains(&node.name.as_str()) {
            names.push(node.name.as_str());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_lists_each_name_once() {
        let mut root = TreeNode::new("Rootnode");
        root.add_child(TreeNode::new("Subnode1"));
        root.add_child(TreeNode::new("Subnode1"));

        let module = scaffold_module(&root);
        assert_eq!(module.matches("registry.register(\"Subnode1\"").count(), 1);
        assert!(module.contains("register_checks"));
        assert!(module.contains("CheckError::NotImplemented"));
    }
}
