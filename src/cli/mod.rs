//! CLI surface: argument parsing and subcommand dispatch.
//!
//! Evaluation itself is a library concern; checks are compiled into the
//! consuming application. The binary covers the loader-side collaborators.

pub mod args;
pub mod commands;
