//! Tree node data model and the per-check node view.

use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{CheckError, ErrorRecord};

/// Truth state of a node. Terminal once left `Unevaluated`; children are
/// entered only from `True`. Pruned subtrees stay `Unevaluated` forever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvalStatus {
    #[default]
    Unevaluated,
    True,
    False,
}

impl fmt::Display for EvalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalStatus::Unevaluated => write!(f, "unevaluated"),
            EvalStatus::True => write!(f, "true"),
            EvalStatus::False => write!(f, "false"),
        }
    }
}

/// A node in the rooted, ordered decision tree.
///
/// Built by the loader (or programmatically), mutated in place by the
/// [`Evaluator`](crate::evaluate::Evaluator), read by
/// [`extract`](crate::extract::extract). The parent owns its children
/// exclusively, so concurrently evaluated siblings never alias.
#[derive(Debug, Clone, Default)]
pub struct TreeNode {
    /// Identifier used to resolve the check implementation
    pub name: String,
    /// Load-time domain metadata, not evaluation state
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<TreeNode>,
    pub status: EvalStatus,
    /// Text produced by a true node; defaulted when the check sets none
    pub output: Option<String>,
    /// Present only when the node's resolution or check failed
    pub error: Option<ErrorRecord>,
    /// Sequence number assigned to true nodes in dispatch order
    pub hint_index: Option<usize>,
    /// Inherited key/value scope, flowing strictly parent to child
    pub(crate) branch: BTreeMap<String, String>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>) -> Self {
        TreeNode {
            name: name.into(),
            ..TreeNode::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    pub fn is_true(&self) -> bool {
        self.status == EvalStatus::True
    }

    /// True when resolution or the check itself failed for this node.
    pub fn is_errored(&self) -> bool {
        self.error.is_some()
    }

    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }

    pub fn leaf_names(&self) -> Vec<&str> {
        if self.children.is_empty() {
            vec![self.name.as_str()]
        } else {
            let mut leaves = Vec::new();
            for child in &self.children {
                leaves.extend(child.leaf_names());
            }
            leaves
        }
    }

    /// Pre-order traversal over the whole tree, pruned subtrees included.
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter { stack: vec![self] }
    }

    /// Branch-context entry as seen by this node's own check.
    pub fn branch_value(&self, key: &str) -> Option<&str> {
        self.branch.get(key).map(String::as_str)
    }
}

/// Pre-order iterator over a node and all of its descendants.
pub struct PreOrderIter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Mutable view of a single node, handed to its check implementation.
///
/// A check may only touch its own node: attribute reads, branch-context
/// reads (which see ancestor-inherited entries), branch-context writes
/// (visible to descendants after propagation) and a custom output string.
pub struct CheckContext<'a> {
    node: &'a mut TreeNode,
}

impl<'a> CheckContext<'a> {
    pub(crate) fn new(node: &'a mut TreeNode) -> Self {
        CheckContext { node }
    }

    pub fn name(&self) -> &str {
        &self.node.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.node.attributes.get(key).map(String::as_str)
    }

    /// Attribute lookup that fails the check when the key is absent.
    pub fn require_attribute(&self, key: &str) -> Result<&str, CheckError> {
        self.attribute(key).ok_or_else(|| CheckError::AttributeUnset {
            node: self.node.name.clone(),
            key: key.to_string(),
        })
    }

    /// Read a branch-context entry set by an ancestor (or by this check).
    pub fn branch(&self, key: &str) -> Result<&str, CheckError> {
        self.node
            .branch
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| CheckError::BranchKeyUnset {
                node: self.node.name.clone(),
                key: key.to_string(),
            })
    }

    /// Write a branch-context entry for this node's descendants.
    pub fn set_branch(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.node.branch.insert(key.into(), value.into());
    }

    /// Override the default `"<name> is true"` output line.
    pub fn set_output(&mut self, text: impl Into<String>) {
        self.node.output = Some(text.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> TreeNode {
        let mut root = TreeNode::new("Rootnode");
        let mut sub1 = TreeNode::new("Subnode1");
        sub1.add_child(TreeNode::new("Subnode11"));
        root.add_child(sub1);
        root.add_child(TreeNode::new("Subnode2"));
        root
    }

    #[test]
    fn test_preorder_iteration_order() {
        let root = sample_tree();
        let names: Vec<&str> = root.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Rootnode", "Subnode1", "Subnode11", "Subnode2"]);
    }

    #[test]
    fn test_depth_and_leaves() {
        let root = sample_tree();
        assert_eq!(root.depth(), 3);
        assert_eq!(root.leaf_names(), vec!["Subnode11", "Subnode2"]);
    }

    #[test]
    fn test_context_branch_read_unset_key_fails() {
        let mut node = TreeNode::new("Subnode31");
        let ctx = CheckContext::new(&mut node);
        let err = ctx.branch("test").unwrap_err();
        assert_eq!(
            err,
            CheckError::BranchKeyUnset {
                node: "Subnode31".to_string(),
                key: "test".to_string(),
            }
        );
    }

    #[test]
    fn test_context_attribute_access() {
        let mut node = TreeNode::new("Rootnode_ma").with_attribute("register", "Rootnode_ma_REG");
        let ctx = CheckContext::new(&mut node);
        assert_eq!(ctx.attribute("register"), Some("Rootnode_ma_REG"));
        assert!(ctx.require_attribute("missing").is_err());
    }
}
