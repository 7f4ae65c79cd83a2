//! Foundation types for Seam.
//!
//! This crate provides the data model shared by the diff engine and its
//! consumers: the operation tag, the edit unit, and helpers that treat a
//! slice of edits as a whole script.
//!
//! # Key Types
//!
//! - [`Operation`] -- Delete / Insert / Equal tag
//! - [`Edit`] -- A run of text tagged with an operation
//! - [`ScriptError`] -- Violations of the edit-script invariants
//!
//! Every script produced by the engine reproduces the left text from its
//! `Equal` and `Delete` edits ([`source_text`]) and the right text from its
//! `Equal` and `Insert` edits ([`target_text`]).

pub mod edit;
pub mod error;
pub mod operation;
pub mod script;

pub use edit::Edit;
pub use error::{ScriptError, ScriptResult};
pub use operation::Operation;
pub use script::{levenshtein, source_text, target_text, validate, validate_against, x_index};
