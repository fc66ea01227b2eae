//! Error taxonomy for the evaluation engine and its collaborators.
//!
//! Check and resolution failures never abort a run: the evaluator captures
//! them as an [`ErrorRecord`] on the failing node and keeps walking. Only the
//! loader and scaffold collaborators return hard errors to the caller.

use std::any::Any;
use std::path::PathBuf;
use thiserror::Error;

/// Failure raised by a check implementation during its own evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("NotImplementedError")]
    NotImplemented,

    #[error("branch element '{key}' not assigned by any ancestor of {node}")]
    BranchKeyUnset { node: String, key: String },

    #[error("attribute '{key}' not assigned for {node}")]
    AttributeUnset { node: String, key: String },

    #[error("{message}")]
    Failed {
        message: String,
        trace: Option<String>,
    },
}

impl CheckError {
    pub fn failed(message: impl Into<String>) -> Self {
        CheckError::Failed {
            message: message.into(),
            trace: None,
        }
    }

    pub fn failed_with_trace(message: impl Into<String>, trace: impl Into<String>) -> Self {
        CheckError::Failed {
            message: message.into(),
            trace: Some(trace.into()),
        }
    }
}

/// Registry lookup failure: the node name maps to no check implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no check implementation registered for node: {0}")]
    NotRegistered(String),
}

/// Classification of a captured node failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No check implementation found for the node name
    Resolution,
    /// The check ran and failed (includes "not implemented")
    Evaluation,
    /// The check read a branch-context key no ancestor set
    BranchKeyUnset,
}

/// Failure captured on a single node.
///
/// Records never propagate past the node that produced them; they surface
/// only in the Exceptions/Traceback report sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub message: String,
    pub trace: Option<String>,
}

impl ErrorRecord {
    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "check panicked".to_string()
        };
        ErrorRecord {
            kind: ErrorKind::Evaluation,
            message,
            trace: None,
        }
    }
}

impl From<CheckError> for ErrorRecord {
    fn from(err: CheckError) -> Self {
        let kind = match err {
            CheckError::BranchKeyUnset { .. } => ErrorKind::BranchKeyUnset,
            _ => ErrorKind::Evaluation,
        };
        let message = err.to_string();
        let trace = match err {
            CheckError::Failed { trace, .. } => trace,
            _ => None,
        };
        ErrorRecord {
            kind,
            message,
            trace,
        }
    }
}

impl From<ResolveError> for ErrorRecord {
    fn from(err: ResolveError) -> Self {
        ErrorRecord {
            kind: ErrorKind::Resolution,
            message: err.to_string(),
            trace: None,
        }
    }
}

/// Errors from the indented-text tree loader.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read tree source: {0}")]
    Io(#[from] std::io::Error),

    #[error("tree source contains no nodes")]
    EmptySource,

    #[error("line {line}: indentation must be a multiple of 4 spaces")]
    BadIndent { line: usize },

    #[error("line {line}: node '{name}' has no parent at the previous indentation level")]
    OrphanNode { line: usize, name: String },

    #[error("line {line}: more than one root node")]
    MultipleRoots { line: usize },

    #[error("line {line}: node name '{name}' may only contain alphanumeric characters or '_'")]
    InvalidName { line: usize, name: String },

    #[error("line {line}: attribute token '{token}' is not of the form key=value")]
    BadAttribute { line: usize, token: String },
}

/// Errors from placeholder check-module generation.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("failed to write scaffold module: {0}")]
    Io(#[from] std::io::Error),

    #[error("refusing to overwrite existing file: {0}")]
    AlreadyExists(PathBuf),
}

pub type LoadResult<T> = Result<T, LoadError>;
