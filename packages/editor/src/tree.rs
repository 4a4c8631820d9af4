//! Read-only helpers and low-level surgery on node trees.
//!
//! Everything here operates on a tree that is already a private clone;
//! the operations in [`crate::ops`] own the clone-edit-repair cycle.

use crate::errors::EditError;
use pagecraft_common::visitor::{walk_element, walk_fragment, Visitor};
use pagecraft_parser::ast::{Element, Fragment, MapExpression, Node};
use pagecraft_parser::IdGenerator;
use std::collections::HashSet;

/// A node located inside a tree, with its immediate parent and its
/// position in the parent's child list. The root has no parent.
pub struct NodeLocation<'a> {
    pub node: &'a Node,
    pub parent: Option<&'a Node>,
    pub index: usize,
}

/// Depth-first search by id.
pub fn find_by_id<'a>(root: &'a Node, id: &str) -> Option<&'a Node> {
    if root.id() == id {
        return Some(root);
    }
    root.children().iter().find_map(|child| find_by_id(child, id))
}

pub fn find_by_id_mut<'a>(root: &'a mut Node, id: &str) -> Option<&'a mut Node> {
    if root.id() == id {
        return Some(root);
    }
    root.children_mut()?
        .iter_mut()
        .find_map(|child| find_by_id_mut(child, id))
}

/// Depth-first search that also yields the parent and child index, used
/// by every mutating operation.
pub fn find_with_parent<'a>(root: &'a Node, id: &str) -> Option<NodeLocation<'a>> {
    if root.id() == id {
        return Some(NodeLocation {
            node: root,
            parent: None,
            index: 0,
        });
    }

    fn search<'a>(parent: &'a Node, id: &str) -> Option<NodeLocation<'a>> {
        for (index, child) in parent.children().iter().enumerate() {
            if child.id() == id {
                return Some(NodeLocation {
                    node: child,
                    parent: Some(parent),
                    index,
                });
            }
            if let Some(found) = search(child, id) {
                return Some(found);
            }
        }
        None
    }
    search(root, id)
}

/// True when `id` is reachable strictly below `ancestor_id`.
pub fn is_descendant(root: &Node, ancestor_id: &str, id: &str) -> bool {
    match find_by_id(root, ancestor_id) {
        Some(ancestor) => ancestor
            .children()
            .iter()
            .any(|child| find_by_id(child, id).is_some()),
        None => false,
    }
}

struct IdCollector {
    ids: Vec<String>,
}

impl Visitor for IdCollector {
    fn visit_element(&mut self, element: &Element) {
        self.ids.push(element.id.clone());
        walk_element(self, element);
    }

    fn visit_fragment(&mut self, fragment: &Fragment) {
        self.ids.push(fragment.id.clone());
        walk_fragment(self, fragment);
    }

    fn visit_map_expression(&mut self, map: &MapExpression) {
        self.ids.push(map.id.clone());
    }
}

/// Every id in the tree, in document order.
pub fn collect_ids(root: &Node) -> Vec<String> {
    let mut collector = IdCollector { ids: Vec::new() };
    collector.visit_node(root);
    collector.ids
}

pub fn id_set(root: &Node) -> HashSet<String> {
    collect_ids(root).into_iter().collect()
}

/// Remove the node with `id` (and its subtree) from wherever it sits
/// below `root`. Never removes the root itself.
pub fn remove_node(root: &mut Node, id: &str) -> Option<Node> {
    let children = root.children_mut()?;
    if let Some(position) = children.iter().position(|child| child.id() == id) {
        return Some(children.remove(position));
    }
    for child in children {
        if let Some(removed) = remove_node(child, id) {
            return Some(removed);
        }
    }
    None
}

/// Insert `node` into `parent_id`'s children at `index` (append when
/// `None`; indexes past the end clamp to an append).
pub fn insert_child(
    root: &mut Node,
    parent_id: &str,
    index: Option<usize>,
    node: Node,
) -> Result<(), EditError> {
    let parent = find_by_id_mut(root, parent_id)
        .ok_or_else(|| EditError::ParentNotFound(parent_id.to_string()))?;
    let children = parent
        .children_mut()
        .ok_or(EditError::InvalidMove("target cannot hold children"))?;
    let index = index.unwrap_or(children.len()).min(children.len());
    children.insert(index, node);
    Ok(())
}

/// Wrap the tree in a marked root fragment unless it already is one.
/// Id-stable: an existing marked fragment is returned untouched.
pub fn ensure_root_fragment(tree: Node, ids: &mut IdGenerator) -> Node {
    if tree.is_root_fragment() {
        return tree;
    }
    let mut taken = id_set(&tree);
    let id = ids.next_unique("fragment", &mut taken);
    Node::Fragment(Fragment {
        id,
        parent_id: None,
        is_root_fragment: true,
        children: vec![tree],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_parser::{parse, ImportRegistry};

    fn tree() -> Node {
        parse(
            "return <div id=\"root\"><ul id=\"list\"><li id=\"a\">A</li><li id=\"b\">B</li></ul></div>;",
            &ImportRegistry::new(),
        )
        .unwrap()
        .tree
        .unwrap()
    }

    #[test]
    fn test_find_by_id() {
        let tree = tree();
        assert_eq!(find_by_id(&tree, "a").unwrap().id(), "a");
        assert!(find_by_id(&tree, "missing").is_none());
    }

    #[test]
    fn test_find_with_parent_yields_index() {
        let tree = tree();
        let location = find_with_parent(&tree, "b").unwrap();
        assert_eq!(location.parent.unwrap().id(), "list");
        assert_eq!(location.index, 1);

        let root = find_with_parent(&tree, "root").unwrap();
        assert!(root.parent.is_none());
    }

    #[test]
    fn test_is_descendant() {
        let tree = tree();
        assert!(is_descendant(&tree, "root", "a"));
        assert!(is_descendant(&tree, "list", "a"));
        assert!(!is_descendant(&tree, "a", "list"));
        assert!(!is_descendant(&tree, "a", "a"));
    }

    #[test]
    fn test_remove_node_detaches_subtree() {
        let mut tree = tree();
        let removed = remove_node(&mut tree, "list").unwrap();
        assert_eq!(removed.id(), "list");
        assert!(find_by_id(&tree, "a").is_none());
    }

    #[test]
    fn test_insert_child_clamps_index() {
        let mut tree = tree();
        let node = Node::Element(Element::new("c", "li"));
        insert_child(&mut tree, "list", Some(99), node).unwrap();

        let list = find_by_id(&tree, "list").unwrap();
        assert_eq!(list.children().last().unwrap().id(), "c");
    }

    #[test]
    fn test_ensure_root_fragment_is_idempotent() {
        let mut ids = IdGenerator::new();
        let wrapped = ensure_root_fragment(tree(), &mut ids);
        assert!(wrapped.is_root_fragment());

        let wrapped_id = wrapped.id().to_string();
        let again = ensure_root_fragment(wrapped, &mut ids);
        assert_eq!(again.id(), wrapped_id);
        assert_eq!(again.children().len(), 1);
    }

    #[test]
    fn test_collect_ids_in_document_order() {
        let ids = collect_ids(&tree());
        assert_eq!(ids, vec!["root", "list", "a", "b"]);
    }
}
