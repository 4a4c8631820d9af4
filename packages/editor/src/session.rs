//! # Editor Session
//!
//! Single-writer owner of the tree/history pair. Every public operation
//! runs to completion on the calling thread, commits a new snapshot, and
//! returns either the new tree or `None` when the operation was absorbed
//! as a no-op (missing node, illegal move, history boundary, stale
//! clipboard id). Failures never escape to the UI layer; they are
//! reported through the tracing side channel instead.

use crate::cache::ParseCache;
use crate::errors::{EditError, EditorError};
use crate::history::History;
use crate::ops::{self, ComponentDescriptor, Direction, DropPosition, ElementPatch};
use crate::tree;
use pagecraft_codegen::{generate_module, CodegenOptions};
use pagecraft_parser::ast::{Fragment, Node};
use pagecraft_parser::{IdGenerator, ImportRegistry};
use std::collections::HashSet;
use tracing::{debug, warn};

pub struct EditorSession {
    history: History,
    preamble: String,
    imports: ImportRegistry,
    options: CodegenOptions,
    ids: IdGenerator,
    /// Clipboard holds an id, not content; a copied node that has since
    /// been deleted is a stale reference and pasting it is a no-op.
    copied_node: Option<String>,
    cache: ParseCache,
}

impl EditorSession {
    /// Parse `source` and seed history with the resulting tree. The
    /// no-root-element case still opens: the session starts with an
    /// empty history and just the preamble.
    pub fn open(
        source: &str,
        imports: ImportRegistry,
        options: CodegenOptions,
    ) -> Result<Self, EditorError> {
        let mut cache = ParseCache::new();
        let parsed = cache.parse(source, &imports)?;
        let mut history = History::new();
        if let Some(tree) = parsed.tree {
            history.commit(tree);
        }
        Ok(Self {
            history,
            preamble: parsed.preamble,
            imports,
            options,
            ids: IdGenerator::new(),
            copied_node: None,
            cache,
        })
    }

    /// Replace the document with freshly parsed source (external change
    /// on disk). Unchanged text is served from the parse cache. History
    /// is reseeded; edit history does not survive a reload.
    pub fn reload(&mut self, source: &str) -> Result<(), EditorError> {
        let parsed = self.cache.parse(source, &self.imports)?;
        self.preamble = parsed.preamble;
        match parsed.tree {
            Some(tree) => self.history.reset(tree),
            None => self.history = History::new(),
        }
        self.copied_node = None;
        Ok(())
    }

    pub fn tree(&self) -> Option<&Node> {
        self.history.current()
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    pub fn imports(&self) -> &ImportRegistry {
        &self.imports
    }

    pub fn add_element(
        &mut self,
        parent_id: &str,
        tag: &str,
        position: Option<usize>,
    ) -> Option<&Node> {
        self.apply("add_element", |tree, ids| {
            ops::add_element(tree, parent_id, tag, position, ids)
        })
    }

    /// Append a new top-level sibling. On a session with no tree (the
    /// no-root-element case) this bootstraps a fresh root fragment.
    pub fn add_element_to_root(&mut self, tag: &str) -> Option<&Node> {
        if self.history.current().is_none() {
            let mut taken = HashSet::new();
            let root = Node::Fragment(Fragment {
                id: self.ids.next_unique("fragment", &mut taken),
                parent_id: None,
                is_root_fragment: true,
                children: Vec::new(),
            });
            let root_id = root.id().to_string();
            return match ops::add_element(&root, &root_id, tag, None, &mut self.ids) {
                Ok(next) => {
                    debug!(op = "add_element_to_root", "bootstrapped document tree");
                    self.history.commit(next);
                    self.history.current()
                }
                Err(error) => {
                    warn!(op = "add_element_to_root", %error, "operation ignored");
                    None
                }
            };
        }
        self.apply("add_element_to_root", |tree, ids| {
            ops::add_element_to_root(tree, tag, ids)
        })
    }

    pub fn add_component(
        &mut self,
        parent_id: &str,
        descriptor: &ComponentDescriptor,
    ) -> Option<&Node> {
        self.apply("add_component", |tree, ids| {
            ops::add_component(tree, parent_id, descriptor, ids)
        })
    }

    pub fn duplicate_element(&mut self, id: &str) -> Option<&Node> {
        self.apply("duplicate_element", |tree, ids| {
            ops::duplicate_element(tree, id, ids)
        })
    }

    pub fn delete_element(&mut self, id: &str) -> Option<&Node> {
        self.apply("delete_element", |tree, _| ops::delete_element(tree, id))
    }

    pub fn update_element(&mut self, patch: &ElementPatch) -> Option<&Node> {
        self.apply("update_element", |tree, _| ops::update_element(tree, patch))
    }

    pub fn move_element_within_siblings(
        &mut self,
        id: &str,
        direction: Direction,
    ) -> Option<&Node> {
        self.apply("move_within_siblings", |tree, _| {
            ops::move_within_siblings(tree, id, direction)
        })
    }

    /// Drag-and-drop relocation. Illegal moves leave the tree unchanged.
    pub fn move_element(&mut self, source_id: &str, target_id: &str, position: DropPosition) {
        self.apply("move_element", |tree, ids| {
            ops::move_element(tree, source_id, target_id, position, ids)
        });
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(_) => {
                debug!("undo");
                true
            }
            None => {
                warn!("nothing to undo");
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(_) => {
                debug!("redo");
                true
            }
            None => {
                warn!("nothing to redo");
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Record an id on the clipboard. The node is looked up at paste
    /// time, so a later delete simply makes the reference stale.
    pub fn copy(&mut self, id: &str) {
        debug!(id, "copied node id");
        self.copied_node = Some(id.to_string());
    }

    pub fn copied_node(&self) -> Option<&str> {
        self.copied_node.as_deref()
    }

    /// Duplicate the copied node in place. Stale or empty clipboard is a
    /// no-op.
    pub fn paste(&mut self) -> Option<&Node> {
        let Some(id) = self.copied_node.clone() else {
            debug!("clipboard is empty");
            return None;
        };
        self.apply("paste", |tree, ids| ops::duplicate_element(tree, &id, ids))
    }

    /// Generate the full module text for the live preview or a save.
    pub fn generate(&self) -> String {
        generate_module(self.tree(), &self.preamble, &self.options)
    }

    /// Convenience lookup on the current tree.
    pub fn find(&self, id: &str) -> Option<&Node> {
        tree::find_by_id(self.tree()?, id)
    }

    fn apply<F>(&mut self, op: &str, edit: F) -> Option<&Node>
    where
        F: FnOnce(&Node, &mut IdGenerator) -> Result<Node, EditError>,
    {
        let Some(current) = self.history.current() else {
            warn!(op, "no tree loaded; operation ignored");
            return None;
        };
        match edit(current, &mut self.ids) {
            Ok(next) => {
                debug!(op, "committed snapshot");
                self.history.commit(next);
                self.history.current()
            }
            Err(error) => {
                warn!(op, %error, "operation ignored");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_codegen::CodegenOptions;

    fn session(source: &str) -> EditorSession {
        EditorSession::open(source, ImportRegistry::new(), CodegenOptions::default()).unwrap()
    }

    #[test]
    fn test_open_seeds_history() {
        let session = session("return <div><p>Hi</p></div>;");
        assert!(session.tree().is_some());
        assert!(!session.can_undo());
        assert!(!session.can_redo());
    }

    #[test]
    fn test_open_without_root_element() {
        let mut session = session("const a = 1;\nreturn <>{a}</>;");
        assert!(session.tree().is_none());
        assert_eq!(session.preamble(), "const a = 1;");

        // Operations on the empty session are quiet no-ops.
        assert!(session.delete_element("anything").is_none());

        // Adding to root bootstraps a tree.
        assert!(session.add_element_to_root("section").is_some());
        let tree = session.tree().unwrap();
        assert!(tree.is_root_fragment());
        assert_eq!(tree.children().len(), 1);
    }

    #[test]
    fn test_reload_uses_cache_and_reseeds() {
        let mut session = session("return <div></div>;");
        session.add_element("root", "p", None).unwrap();
        assert!(session.can_undo());

        session.reload("return <div></div>;").unwrap();
        assert!(!session.can_undo());
        assert_eq!(session.tree().unwrap().children().len(), 0);
    }

    #[test]
    fn test_failed_operation_leaves_tree_unchanged() {
        let mut session = session("return <div><p>Hi</p></div>;");
        let before = session.tree().unwrap().clone();

        assert!(session.delete_element("ghost").is_none());
        assert_eq!(session.tree().unwrap(), &before);
        assert!(!session.can_undo());
    }
}
