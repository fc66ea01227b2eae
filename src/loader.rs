//! Indented-text tree source format.
//!
//! Four spaces of indentation encode one parent/child level; tokens after
//! the node name become `key=value` attributes:
//!
//! ```text
//! Rootnode
//!     Subnode1 severity=high
//!         Subnode11
//!     Subnode2
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Structural problems
//! (odd indentation, orphaned depth jumps, multiple roots) are loader errors;
//! the evaluator assumes the tree it receives is well formed.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::{debug, instrument};

use crate::errors::{LoadError, LoadResult};
use crate::node::TreeNode;

const INDENT_WIDTH: usize = 4;

/// Load a tree from an indented-text file.
#[instrument(level = "debug")]
pub fn load_file(path: &Path) -> LoadResult<TreeNode> {
    let content = fs::read_to_string(path)?;
    from_text(&content)
}

/// Parse a tree from indented-text content.
pub fn from_text(content: &str) -> LoadResult<TreeNode> {
    let line_re = Regex::new(r"^(?P<space> *)(?P<text>\S.*)$").unwrap();
    let name_re = Regex::new(r"^\w+$").unwrap();

    // stack[d] is the currently open node at depth d, not yet attached.
    let mut stack: Vec<TreeNode> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end();
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        // anything the grammar cannot place (tabs in the indent, control
        // characters) is a structural error, never silently dropped
        let caps = line_re
            .captures(line)
            .ok_or(LoadError::BadIndent { line: line_no })?;
        let indent = caps["space"].len();
        if indent % INDENT_WIDTH != 0 {
            return Err(LoadError::BadIndent { line: line_no });
        }
        let depth = indent / INDENT_WIDTH;
        let node = parse_node(&caps["text"], line_no, &name_re)?;

        if stack.is_empty() {
            if depth != 0 {
                return Err(LoadError::OrphanNode {
                    line: line_no,
                    name: node.name,
                });
            }
            stack.push(node);
            continue;
        }
        if depth == 0 {
            return Err(LoadError::MultipleRoots { line: line_no });
        }
        if depth > stack.len() {
            return Err(LoadError::OrphanNode {
                line: line_no,
                name: node.name,
            });
        }
        collapse_to(&mut stack, depth);
        stack.push(node);
    }

    collapse_to(&mut stack, 1);
    let root = stack.pop().ok_or(LoadError::EmptySource)?;
    debug!(root = %root.name, depth = root.depth(), "tree loaded");
    Ok(root)
}

/// Pop open nodes until the stack is `depth` deep, attaching each popped
/// node to its parent.
fn collapse_to(stack: &mut Vec<TreeNode>, depth: usize) {
    while stack.len() > depth {
        if let Some(child) = stack.pop() {
            if let Some(parent) = stack.last_mut() {
                parent.add_child(child);
            }
        }
    }
}

fn parse_node(text: &str, line_no: usize, name_re: &Regex) -> LoadResult<TreeNode> {
    let mut tokens = text.split_whitespace();
    let name = tokens.next().unwrap_or_default();
    if !name_re.is_match(name) {
        return Err(LoadError::InvalidName {
            line: line_no,
            name: name.to_string(),
        });
    }
    let mut node = TreeNode::new(name);
    for token in tokens {
        match token.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                node.attributes.insert(key.to_string(), value.to_string());
            }
            _ => {
                return Err(LoadError::BadAttribute {
                    line: line_no,
                    token: token.to_string(),
                });
            }
        }
    }
    Ok(node)
}
