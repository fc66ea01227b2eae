//! Truth-driven tree walk with batched concurrent sibling dispatch.
//!
//! Simple mantra to remember: "If true, go deeper."
//!
//! For each node the evaluator resolves and runs its check inside a failure
//! boundary. True nodes receive the next hint index, hand their branch
//! context down to every child, and have their children evaluated in
//! consecutive batches of [`EvalConfig::parallelism`] workers; each batch
//! fully joins before the next starts. Recursion into child subtrees is then
//! sequential, so parallelism is exploited one tree level at a time and hint
//! indices follow dispatch order, not wall-clock completion order.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use rayon::prelude::*;
use tracing::{debug, instrument, trace};

use crate::errors::ErrorRecord;
use crate::node::{CheckContext, EvalStatus, TreeNode};
use crate::registry::NodeRegistry;

/// Evaluation settings, passed in explicitly rather than read from globals.
#[derive(Debug, Clone, Copy)]
pub struct EvalConfig {
    /// Sibling batch width. Defaults to the detected parallel-execution-unit
    /// count, falling back to 1 when it cannot be determined.
    pub parallelism: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        let parallelism = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        EvalConfig { parallelism }
    }
}

/// Walks a tree, annotating every reached node in place.
pub struct Evaluator<'r> {
    registry: &'r NodeRegistry,
    config: EvalConfig,
}

impl<'r> Evaluator<'r> {
    pub fn new(registry: &'r NodeRegistry) -> Self {
        Evaluator {
            registry,
            config: EvalConfig::default(),
        }
    }

    pub fn with_config(registry: &'r NodeRegistry, config: EvalConfig) -> Self {
        let config = EvalConfig {
            parallelism: config.parallelism.max(1),
        };
        Evaluator { registry, config }
    }

    /// Evaluate the whole tree rooted at `root`.
    ///
    /// Always completes: node failures are recorded on the node and pruned
    /// subtrees are left `Unevaluated`.
    #[instrument(level = "debug", skip_all, fields(root = %root.name))]
    pub fn evaluate(&self, root: &mut TreeNode) {
        let hint_counter = AtomicUsize::new(0);
        self.evaluate_node(root);
        self.walk(root, &hint_counter);
        debug!(true_nodes = hint_counter.load(Ordering::SeqCst), "walk complete");
    }

    fn walk(&self, node: &mut TreeNode, hint_counter: &AtomicUsize) {
        if !node.is_true() {
            return;
        }
        node.hint_index = Some(hint_counter.fetch_add(1, Ordering::SeqCst));
        trace!(node = %node.name, index = node.hint_index, "assigned hint index");

        // Branch context flows strictly parent -> child, before dispatch.
        // Children may later overwrite their own copies.
        let inherited = node.branch.clone();
        for child in &mut node.children {
            for (key, value) in &inherited {
                child.branch.insert(key.clone(), value.clone());
            }
        }

        // Consecutive batches, each fully joined before the next starts.
        // No early abort: a batch runs every member even if one failed.
        for batch in node.children.chunks_mut(self.config.parallelism) {
            batch
                .par_iter_mut()
                .for_each(|child| self.evaluate_node(child));
        }

        for child in &mut node.children {
            self.walk(child, hint_counter);
        }
    }

    /// Resolve and run a single node's check. All failure modes end here:
    /// the node is marked false with an error record and the walk goes on.
    fn evaluate_node(&self, node: &mut TreeNode) {
        let check = match self.registry.resolve(&node.name) {
            Ok(check) => check,
            Err(err) => {
                debug!(node = %node.name, %err, "check resolution failed");
                node.status = EvalStatus::False;
                node.error = Some(ErrorRecord::from(err));
                return;
            }
        };

        let verdict = {
            let mut ctx = CheckContext::new(node);
            catch_unwind(AssertUnwindSafe(|| check.evaluate(&mut ctx)))
        };
        match verdict {
            Ok(Ok(true)) => {
                node.status = EvalStatus::True;
                if node.output.is_none() {
                    node.output = Some(format!("{} is true", node.name));
                }
            }
            Ok(Ok(false)) => {
                node.status = EvalStatus::False;
            }
            Ok(Err(err)) => {
                debug!(node = %node.name, %err, "check failed");
                node.status = EvalStatus::False;
                node.error = Some(ErrorRecord::from(err));
            }
            Err(payload) => {
                let record = ErrorRecord::from_panic(payload.as_ref());
                debug!(node = %node.name, message = %record.message, "check panicked");
                node.status = EvalStatus::False;
                node.error = Some(record);
            }
        }
        trace!(node = %node.name, status = %node.status, "node evaluated");
    }
}
