//! Error types for the editor

use thiserror::Error;

/// Typed rejection signals from the editing operations. None of these
/// escape to the UI: the session layer absorbs them into no-ops with a
/// diagnostic, so the caller always keeps a valid tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("The root element cannot be deleted, duplicated, or moved")]
    RootProtected,

    #[error("Move would create a cycle")]
    CycleDetected,

    #[error("Target node is not an element")]
    NotAnElement,

    #[error("Invalid move: {0}")]
    InvalidMove(&'static str),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] pagecraft_parser::ParseError),

    #[error("Edit error: {0}")]
    Edit(#[from] EditError),
}
