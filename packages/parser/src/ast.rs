use serde::{Deserialize, Serialize};

/// One entry in the structural tree.
///
/// The tree is a plain value: every editing operation clones it whole and
/// commits the clone, so none of these types carry interior mutability or
/// shared references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Element(Element),
    Fragment(Fragment),
    MapExpression(MapExpression),
}

/// A markup element: intrinsic tag (`div`), component (`Card`), or dotted
/// component reference (`motion.section`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub tag: String,
    pub parent_id: Option<String>,
    pub class_name: Option<String>,
    pub style: Option<StyleAttr>,
    pub attributes: Vec<Attribute>,
    pub component_info: Option<ComponentInfo>,
    pub text_content: Option<String>,
    pub animation: Option<Animation>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            parent_id: None,
            class_name: None,
            style: None,
            attributes: Vec::new(),
            component_info: None,
            text_content: None,
            animation: None,
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Insert or replace an attribute, preserving list order.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>, numeric: bool) {
        let value = value.into();
        if let Some(attr) = self.attributes.iter_mut().find(|a| a.name == name) {
            attr.value = value;
            attr.numeric = numeric;
        } else {
            self.attributes.push(Attribute {
                name: name.to_string(),
                value,
                numeric,
            });
        }
    }
}

/// A plain attribute. `numeric` marks values that came from a numeric
/// expression container (`width={500}`) so the generator can emit them
/// braced instead of quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub numeric: bool,
}

/// Inline style. Only literal object expressions are modeled; a dynamic
/// style expression is recorded as `Unsupported` and surfaces as a fixed
/// placeholder in generated output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StyleAttr {
    Object(Vec<StyleProperty>),
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProperty {
    pub name: String,
    pub value: StyleValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StyleValue {
    Str(String),
    Number(f64),
}

/// Metadata linking a tag to the import that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInfo {
    pub is_component: bool,
    pub package_name: String,
    pub import_name: String,
    pub import_type: ImportType,
    /// Full dotted tag (`motion.section`) when the import only covers the
    /// base name (`motion`).
    pub specific_tag: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportType {
    Default,
    Named,
    Namespace,
}

/// Declarative animation descriptor, compiled to motion props at
/// generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub enabled: bool,
    pub kind: AnimationKind,
    pub trigger: AnimationTrigger,
    pub duration: f64,
    pub delay: f64,
    /// `Some(0)` means repeat forever.
    pub repeat: Option<u32>,
    pub ease: String,
    pub direction: Option<SlideDirection>,
    pub angle: Option<f64>,
    pub distance: Option<f64>,
    pub intensity: Option<f64>,
}

impl Animation {
    pub fn new(kind: AnimationKind, trigger: AnimationTrigger) -> Self {
        Self {
            enabled: true,
            kind,
            trigger,
            duration: 0.5,
            delay: 0.0,
            repeat: None,
            ease: "easeOut".to_string(),
            direction: None,
            angle: None,
            distance: None,
            intensity: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationKind {
    Fade,
    Slide,
    Scale,
    Rotate,
    Bounce,
    Pulse,
    Flip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationTrigger {
    Load,
    InView,
    Hover,
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideDirection {
    Up,
    Down,
    Left,
    Right,
}

/// A tagless container. `is_root_fragment` marks the synthetic node used
/// to hold multiple top-level siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub id: String,
    pub parent_id: Option<String>,
    pub is_root_fragment: bool,
    pub children: Vec<Node>,
}

/// Opaque placeholder for an unexpanded `.map()` call. The engine never
/// models the callback's output shape; both operands are verbatim source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapExpression {
    pub id: String,
    pub parent_id: Option<String>,
    pub array_source: String,
    pub callback_source: String,
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Element(el) => &el.id,
            Node::Fragment(fr) => &fr.id,
            Node::MapExpression(me) => &me.id,
        }
    }

    pub fn set_id(&mut self, id: String) {
        match self {
            Node::Element(el) => el.id = id,
            Node::Fragment(fr) => fr.id = id,
            Node::MapExpression(me) => me.id = id,
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Node::Element(el) => el.parent_id.as_deref(),
            Node::Fragment(fr) => fr.parent_id.as_deref(),
            Node::MapExpression(me) => me.parent_id.as_deref(),
        }
    }

    pub fn set_parent_id(&mut self, parent_id: Option<String>) {
        match self {
            Node::Element(el) => el.parent_id = parent_id,
            Node::Fragment(fr) => fr.parent_id = parent_id,
            Node::MapExpression(me) => me.parent_id = parent_id,
        }
    }

    /// Tag used for id synthesis and diagnostics; map expressions have none.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element(el) => Some(&el.tag),
            Node::Fragment(_) => Some("fragment"),
            Node::MapExpression(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(el) => &el.children,
            Node::Fragment(fr) => &fr.children,
            Node::MapExpression(_) => &[],
        }
    }

    /// Mutable child list, `None` for nodes that cannot hold children.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Element(el) => Some(&mut el.children),
            Node::Fragment(fr) => Some(&mut fr.children),
            Node::MapExpression(_) => None,
        }
    }

    pub fn is_root_fragment(&self) -> bool {
        matches!(self, Node::Fragment(fr) if fr.is_root_fragment)
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Rewrite every `parent_id` in the subtree from the actual structure.
    /// The receiver is treated as the tree root (parent `None`).
    pub fn repair_parent_links(&mut self) {
        self.set_parent_id(None);
        fn walk(node: &mut Node) {
            let id = node.id().to_string();
            if let Some(children) = node.children_mut() {
                for child in children {
                    child.set_parent_id(Some(id.clone()));
                    walk(child);
                }
            }
        }
        walk(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        let mut root = Element::new("div-1", "div");
        let mut list = Element::new("ul-2", "ul");
        list.children.push(Node::Element(Element::new("li-3", "li")));
        root.children.push(Node::Element(list));
        Node::Element(root)
    }

    #[test]
    fn test_repair_parent_links() {
        let mut tree = sample_tree();
        tree.repair_parent_links();

        assert_eq!(tree.parent_id(), None);
        let list = &tree.children()[0];
        assert_eq!(list.parent_id(), Some("div-1"));
        assert_eq!(list.children()[0].parent_id(), Some("ul-2"));
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut el = Element::new("img-1", "img");
        el.set_attribute("width", "300", true);
        el.set_attribute("alt", "photo", false);
        el.set_attribute("width", "600", true);

        assert_eq!(el.attributes.len(), 2);
        assert_eq!(el.attributes[0].name, "width");
        assert_eq!(el.attributes[0].value, "600");
    }

    #[test]
    fn test_map_expression_has_no_children() {
        let mut node = Node::MapExpression(MapExpression {
            id: "map-1".to_string(),
            parent_id: None,
            array_source: "items".to_string(),
            callback_source: "i => i".to_string(),
        });

        assert!(node.children().is_empty());
        assert!(node.children_mut().is_none());
    }

    #[test]
    fn test_node_serializes_with_type_tag() {
        let node = Node::Element(Element::new("div-1", "div"));
        let json = serde_json::to_string(&node).unwrap();

        assert!(json.contains("\"type\":\"Element\""));
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
