//! rsdiag: runbook decision-tree diagnostics.
//!
//! Each tree node carries a user-registered boolean check. The evaluator
//! walks the tree ("if true, go deeper"): true nodes recurse into their
//! children with siblings dispatched concurrently one level at a time, while
//! false or erroring nodes prune their subtree. Every run produces a
//! complete text report with an annotated tree, the true-path outputs and
//! any captured failures.
//!
//! ```
//! use rsdiag::{extract, CheckContext, CheckError, Evaluator, NodeRegistry, TreeNode};
//!
//! let mut root = TreeNode::new("EngineCranks");
//! root.add_child(TreeNode::new("BatteryDead"));
//!
//! let mut registry = NodeRegistry::new();
//! registry.register("EngineCranks", |_: &mut CheckContext<'_>| -> Result<bool, CheckError> {
//!     Ok(true)
//! });
//! registry.register("BatteryDead", |_: &mut CheckContext<'_>| -> Result<bool, CheckError> {
//!     Ok(false)
//! });
//!
//! Evaluator::new(&registry).evaluate(&mut root);
//! let report = extract(&root);
//! assert!(report.starts_with("[0] EngineCranks : true\n"));
//! ```

pub mod cli;
pub mod errors;
pub mod evaluate;
pub mod extract;
pub mod loader;
pub mod node;
pub mod registry;
pub mod scaffold;
pub mod util;

pub use errors::{CheckError, ErrorKind, ErrorRecord, LoadError, ResolveError, ScaffoldError};
pub use evaluate::{EvalConfig, Evaluator};
pub use extract::extract;
pub use node::{CheckContext, EvalStatus, TreeNode};
pub use registry::{Check, NodeRegistry};
