//! # Pagecraft Editor
//!
//! Structural editing engine for the visual editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: component body text → node tree     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session + operations + history      │
//! │  - Clone-on-write tree snapshots            │
//! │  - Structural edits with integrity checks   │
//! │  - Linear undo/redo over whole snapshots    │
//! │  - Clipboard and parse memoization          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ codegen: node tree → source text            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The tree is a value**: every operation commits a fresh snapshot;
//!    nothing in history is ever mutated in place.
//! 2. **Integrity first**: unique ids, consistent parent pointers, and no
//!    cycles hold after every operation.
//! 3. **No-op over crash**: a rejected operation leaves the current tree
//!    untouched and reports through the tracing side channel.
//! 4. **Single writer**: one session owns the tree/history pair; there is
//!    no shared mutable state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::EditorSession;
//! use pagecraft_parser::ImportRegistry;
//! use pagecraft_codegen::CodegenOptions;
//!
//! let mut session = EditorSession::open(
//!     "return <div className=\"hero\"><h1>Hello</h1></div>;",
//!     ImportRegistry::new(),
//!     CodegenOptions::default(),
//! )?;
//!
//! let root_id = session.tree().unwrap().id().to_string();
//! session.add_element(&root_id, "p", None);
//! session.undo();
//!
//! let source = session.generate();
//! ```

mod cache;
pub mod errors;
pub mod history;
pub mod ops;
pub mod session;
pub mod tree;

pub use cache::{source_fingerprint, ParseCache};
pub use errors::{EditError, EditorError};
pub use history::History;
pub use ops::{
    ComponentDescriptor, ComponentKind, Direction, DropPosition, EditResult, ElementPatch,
    ROOT_ALIAS,
};
pub use session::EditorSession;
pub use tree::{find_by_id, find_with_parent, is_descendant, NodeLocation};

// Re-export common types for convenience
pub use pagecraft_codegen::CodegenOptions;
pub use pagecraft_parser::ast::Node;
pub use pagecraft_parser::{ImportRegistry, Parsed};
