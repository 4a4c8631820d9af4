//! # Element Operations
//!
//! The editing core. Every operation clones the whole current tree,
//! performs the edit on the clone, repairs all `parent_id` pointers
//! top-down, and returns the new tree for the session to commit. The
//! input tree is never touched, so snapshots already in history stay
//! immutable.
//!
//! Operations are total over a valid tree: anything that cannot be
//! applied comes back as a typed [`EditError`] that the session turns
//! into a no-op.

use crate::errors::EditError;
use crate::tree;
use pagecraft_common::visitor::{walk_element_mut, VisitorMut};
use pagecraft_parser::ast::{
    Animation, Attribute, ComponentInfo, Element, ImportType, Node, StyleAttr,
};
use pagecraft_parser::IdGenerator;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub type EditResult = Result<Node, EditError>;

/// Alias accepted by insertion operations for "the conceptual root",
/// whatever the actual root node id happens to be.
pub const ROOT_ALIAS: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

/// Drop-position for drag-and-drop moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropPosition {
    Before,
    After,
    Inside,
    /// Unwrap one level: re-insert as a sibling immediately after the
    /// former parent.
    Outside,
    /// Append into the root fragment.
    Root,
}

/// Partial update merged onto an existing element. `None` fields are
/// left as they are; `children` is preserved unless explicitly provided.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementPatch {
    pub id: String,
    pub tag: Option<String>,
    pub class_name: Option<String>,
    pub style: Option<StyleAttr>,
    pub attributes: Option<Vec<Attribute>>,
    pub text_content: Option<String>,
    pub animation: Option<Animation>,
    pub component_info: Option<ComponentInfo>,
    pub children: Option<Vec<Node>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    Component,
    Icon,
}

/// What the component picker hands over when a library component is
/// dropped into the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub package_name: String,
    pub import_name: String,
    pub import_type: ImportType,
    pub kind: ComponentKind,
}

/// Insert a new element with tag-appropriate placeholder content under
/// `parent_id` (`"root"` aliases the actual root) at `position`.
pub fn add_element(
    current: &Node,
    parent_id: &str,
    tag: &str,
    position: Option<usize>,
    ids: &mut IdGenerator,
) -> EditResult {
    let mut next = current.clone();
    let parent_id = resolve_root_alias(&next, parent_id);
    let mut taken = tree::id_set(&next);
    let element = default_element(tag, ids, &mut taken);
    tree::insert_child(&mut next, &parent_id, position, Node::Element(element))?;
    next.repair_parent_links();
    Ok(next)
}

/// Append a new element as a top-level sibling, wrapping the current
/// root in a marked root fragment when necessary.
pub fn add_element_to_root(current: &Node, tag: &str, ids: &mut IdGenerator) -> EditResult {
    let mut next = tree::ensure_root_fragment(current.clone(), ids);
    let mut taken = tree::id_set(&next);
    let element = default_element(tag, ids, &mut taken);
    if let Some(children) = next.children_mut() {
        children.push(Node::Element(element));
    }
    next.repair_parent_links();
    Ok(next)
}

/// Like [`add_element`], but sourced from the import manager: the
/// descriptor populates `component_info` directly and drives the
/// component-specific defaults. Icon descriptors use the icon name
/// itself as the tag.
pub fn add_component(
    current: &Node,
    parent_id: &str,
    descriptor: &ComponentDescriptor,
    ids: &mut IdGenerator,
) -> EditResult {
    let mut next = current.clone();
    let parent_id = resolve_root_alias(&next, parent_id);
    let mut taken = tree::id_set(&next);

    let tag = descriptor.import_name.clone();
    let mut element = Element::new(ids.next_unique(&tag, &mut taken), &tag);
    element.component_info = Some(ComponentInfo {
        is_component: true,
        package_name: descriptor.package_name.clone(),
        import_name: descriptor.import_name.clone(),
        import_type: descriptor.import_type,
        specific_tag: None,
    });
    match descriptor.kind {
        ComponentKind::Icon => element.set_attribute("size", "24", true),
        ComponentKind::Component => apply_component_defaults(&mut element),
    }

    tree::insert_child(&mut next, &parent_id, None, Node::Element(element))?;
    next.repair_parent_links();
    Ok(next)
}

/// Deep-clone the subtree rooted at `id` and insert the clone right
/// after the original. Every node in the clone gets a fresh id. The
/// root cannot be duplicated.
pub fn duplicate_element(current: &Node, id: &str, ids: &mut IdGenerator) -> EditResult {
    if current.id() == id {
        return Err(EditError::RootProtected);
    }
    let location =
        tree::find_with_parent(current, id).ok_or_else(|| EditError::NodeNotFound(id.to_string()))?;
    let parent_id = location
        .parent
        .ok_or(EditError::RootProtected)?
        .id()
        .to_string();
    let index = location.index;
    let mut copy = location.node.clone();

    let mut next = current.clone();
    let mut taken = tree::id_set(&next);
    refresh_ids(&mut copy, ids, &mut taken);
    tree::insert_child(&mut next, &parent_id, Some(index + 1), copy)?;
    next.repair_parent_links();
    Ok(next)
}

/// Remove the node and its entire subtree. The root must always exist,
/// so deleting it is rejected unconditionally.
pub fn delete_element(current: &Node, id: &str) -> EditResult {
    if current.id() == id {
        return Err(EditError::RootProtected);
    }
    let mut next = current.clone();
    tree::remove_node(&mut next, id).ok_or_else(|| EditError::NodeNotFound(id.to_string()))?;
    next.repair_parent_links();
    Ok(next)
}

/// Merge a partial patch onto the element with `patch.id`. Because the
/// whole tree is cloned, every ancestor reference is fresh in the result.
pub fn update_element(current: &Node, patch: &ElementPatch) -> EditResult {
    match tree::find_by_id(current, &patch.id) {
        None => return Err(EditError::NodeNotFound(patch.id.clone())),
        Some(Node::Element(_)) => {}
        Some(_) => return Err(EditError::NotAnElement),
    }

    let mut next = current.clone();
    let mut applier = PatchApplier {
        patch,
        applied: false,
    };
    applier.visit_node_mut(&mut next);
    next.repair_parent_links();
    Ok(next)
}

/// Swap the node with its previous/next sibling. The boundary of the
/// sibling list is a no-op.
pub fn move_within_siblings(current: &Node, id: &str, direction: Direction) -> EditResult {
    let location =
        tree::find_with_parent(current, id).ok_or_else(|| EditError::NodeNotFound(id.to_string()))?;
    let parent = location.parent.ok_or(EditError::RootProtected)?;
    let index = location.index;
    let target = match direction {
        Direction::Up if index > 0 => index - 1,
        Direction::Down if index + 1 < parent.children().len() => index + 1,
        _ => return Err(EditError::InvalidMove("already at the boundary")),
    };
    let parent_id = parent.id().to_string();

    let mut next = current.clone();
    if let Some(children) = tree::find_by_id_mut(&mut next, &parent_id)
        .and_then(|parent| parent.children_mut())
    {
        children.swap(index, target);
    }
    Ok(next)
}

/// Drag-and-drop relocation. Rejects moving the root, moving a node
/// onto itself, and any `Inside` move into the node's own subtree.
pub fn move_element(
    current: &Node,
    source_id: &str,
    target_id: &str,
    position: DropPosition,
    ids: &mut IdGenerator,
) -> EditResult {
    if current.id() == source_id {
        return Err(EditError::RootProtected);
    }
    if tree::find_by_id(current, source_id).is_none() {
        return Err(EditError::NodeNotFound(source_id.to_string()));
    }
    if matches!(
        position,
        DropPosition::Before | DropPosition::After | DropPosition::Inside
    ) {
        if source_id == target_id {
            return Err(EditError::InvalidMove("cannot move a node onto itself"));
        }
        if tree::find_by_id(current, target_id).is_none() {
            return Err(EditError::NodeNotFound(target_id.to_string()));
        }
    }

    let mut next = match position {
        DropPosition::Inside => {
            if tree::is_descendant(current, source_id, target_id) {
                return Err(EditError::CycleDetected);
            }
            let mut next = current.clone();
            let node = take(&mut next, source_id)?;
            tree::insert_child(&mut next, target_id, None, node)?;
            next
        }
        DropPosition::Before | DropPosition::After => {
            let mut next = current.clone();
            let node = take(&mut next, source_id)?;
            // A target that vanished with the source subtree is a cycle.
            let location =
                tree::find_with_parent(&next, target_id).ok_or(EditError::CycleDetected)?;
            let parent = location
                .parent
                .ok_or(EditError::InvalidMove("cannot drop beside the root"))?;
            let parent_id = parent.id().to_string();
            let index = if position == DropPosition::After {
                location.index + 1
            } else {
                location.index
            };
            tree::insert_child(&mut next, &parent_id, Some(index), node)?;
            next
        }
        DropPosition::Outside => {
            let location = tree::find_with_parent(current, source_id)
                .ok_or_else(|| EditError::NodeNotFound(source_id.to_string()))?;
            let former_parent = location.parent.ok_or(EditError::RootProtected)?;
            let former_parent_id = former_parent.id().to_string();
            let parent_location = tree::find_with_parent(current, &former_parent_id)
                .ok_or_else(|| EditError::NodeNotFound(former_parent_id.clone()))?;
            let grandparent = parent_location
                .parent
                .ok_or(EditError::InvalidMove("parent is already at the top level"))?;
            let grandparent_id = grandparent.id().to_string();
            let insert_at = parent_location.index + 1;

            let mut next = current.clone();
            let node = take(&mut next, source_id)?;
            tree::insert_child(&mut next, &grandparent_id, Some(insert_at), node)?;
            next
        }
        DropPosition::Root => {
            let mut next = current.clone();
            let node = take(&mut next, source_id)?;
            let mut next = tree::ensure_root_fragment(next, ids);
            if let Some(children) = next.children_mut() {
                children.push(node);
            }
            next
        }
    };

    next.repair_parent_links();
    Ok(next)
}

fn take(tree: &mut Node, id: &str) -> Result<Node, EditError> {
    tree::remove_node(tree, id).ok_or_else(|| EditError::NodeNotFound(id.to_string()))
}

fn resolve_root_alias(tree: &Node, parent_id: &str) -> String {
    if parent_id == ROOT_ALIAS && tree.id() != ROOT_ALIAS {
        tree.id().to_string()
    } else {
        parent_id.to_string()
    }
}

/// Fresh ids for every node in a subtree, avoiding everything in `taken`.
fn refresh_ids(node: &mut Node, ids: &mut IdGenerator, taken: &mut HashSet<String>) {
    let tag = node.tag().unwrap_or("map").to_string();
    node.set_id(ids.next_unique(&tag, taken));
    if let Some(children) = node.children_mut() {
        for child in children {
            refresh_ids(child, ids, taken);
        }
    }
}

struct PatchApplier<'p> {
    patch: &'p ElementPatch,
    applied: bool,
}

impl VisitorMut for PatchApplier<'_> {
    fn visit_element_mut(&mut self, element: &mut Element) {
        if !self.applied && element.id == self.patch.id {
            self.applied = true;
            let patch = self.patch;
            if let Some(tag) = &patch.tag {
                element.tag = tag.clone();
            }
            if let Some(class_name) = &patch.class_name {
                element.class_name = Some(class_name.clone());
            }
            if let Some(style) = &patch.style {
                element.style = Some(style.clone());
            }
            if let Some(attributes) = &patch.attributes {
                element.attributes = attributes.clone();
            }
            if let Some(text) = &patch.text_content {
                element.text_content = Some(text.clone());
            }
            if let Some(animation) = &patch.animation {
                element.animation = Some(animation.clone());
            }
            if let Some(component_info) = &patch.component_info {
                element.component_info = Some(component_info.clone());
            }
            if let Some(children) = &patch.children {
                element.children = children.clone();
            }
            return;
        }
        walk_element_mut(self, element);
    }
}

/// Placeholder content for freshly inserted elements, so the preview has
/// something visible to select and edit.
fn default_element(tag: &str, ids: &mut IdGenerator, taken: &mut HashSet<String>) -> Element {
    let mut element = Element::new(ids.next_unique(tag, taken), tag);
    match tag {
        "img" => {
            element.set_attribute("src", "/placeholder.svg?height=200&width=300", false);
            element.set_attribute("alt", "Placeholder image", false);
            element.set_attribute("width", "300", true);
            element.set_attribute("height", "200", true);
        }
        "a" => {
            element.set_attribute("href", "#", false);
            element.text_content = Some("Link".to_string());
        }
        "button" => element.text_content = Some("Button".to_string()),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            element.text_content = Some("Heading".to_string());
        }
        "p" => element.text_content = Some("Text block".to_string()),
        "span" => element.text_content = Some("Text".to_string()),
        "input" => element.set_attribute("placeholder", "Enter text", false),
        _ => {}
    }
    element
}

fn apply_component_defaults(element: &mut Element) {
    match element.tag.as_str() {
        "Image" => {
            element.set_attribute("src", "/placeholder.svg?height=200&width=300", false);
            element.set_attribute("alt", "Placeholder image", false);
            element.set_attribute("width", "300", true);
            element.set_attribute("height", "200", true);
        }
        "Link" => {
            element.set_attribute("href", "#", false);
            element.text_content = Some("Link".to_string());
        }
        _ => {}
    }
}
