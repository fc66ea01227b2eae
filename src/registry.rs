//! Name-based registry of check implementations.
//!
//! Replaces runtime discovery: the surrounding application registers every
//! check at startup, and the evaluator resolves by exact node name. A failed
//! lookup is a typed error the evaluator records on the node, never a panic.

use std::collections::HashMap;

use crate::errors::{CheckError, ResolveError};
use crate::node::CheckContext;

/// A user-supplied boolean check attached to a node name.
///
/// Implementations may read node attributes, read/write the node's own
/// branch context and set a custom output string through the context.
/// Closures and fn items with the matching signature implement this
/// automatically.
pub trait Check: Send + Sync {
    fn evaluate(&self, ctx: &mut CheckContext<'_>) -> Result<bool, CheckError>;
}

impl<F> Check for F
where
    F: Fn(&mut CheckContext<'_>) -> Result<bool, CheckError> + Send + Sync,
{
    fn evaluate(&self, ctx: &mut CheckContext<'_>) -> Result<bool, CheckError> {
        self(ctx)
    }
}

/// Maps node names to check implementations.
#[derive(Default)]
pub struct NodeRegistry {
    checks: HashMap<String, Box<dyn Check>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        NodeRegistry::default()
    }

    /// Register a check for a node name. A later registration under the
    /// same name replaces the earlier one.
    pub fn register(&mut self, name: impl Into<String>, check: impl Check + 'static) {
        self.checks.insert(name.into(), Box::new(check));
    }

    /// Closure convenience for [`register`](Self::register); pins the
    /// signature so plain closures need no type annotations.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, check: F)
    where
        F: Fn(&mut CheckContext<'_>) -> Result<bool, CheckError> + Send + Sync + 'static,
    {
        self.register(name, check);
    }

    /// Exact-name lookup; no fallback or wildcard resolution.
    pub fn resolve(&self, name: &str) -> Result<&dyn Check, ResolveError> {
        match self.checks.get(name) {
            Some(check) => Ok(check.as_ref()),
            None => Err(ResolveError::NotRegistered(name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
