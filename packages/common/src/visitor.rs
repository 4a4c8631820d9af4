use pagecraft_parser::ast::{Element, Fragment, MapExpression, Node};

/// Visitor pattern for traversing node trees immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_element(&mut self, element: &Element) {
        walk_element(self, element);
    }

    fn visit_fragment(&mut self, fragment: &Fragment) {
        walk_fragment(self, fragment);
    }

    fn visit_map_expression(&mut self, _map: &MapExpression) {
        // Leaf node, no children to walk
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    match node {
        Node::Element(element) => visitor.visit_element(element),
        Node::Fragment(fragment) => visitor.visit_fragment(fragment),
        Node::MapExpression(map) => visitor.visit_map_expression(map),
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element) {
    for child in &element.children {
        visitor.visit_node(child);
    }
}

pub fn walk_fragment<V: Visitor>(visitor: &mut V, fragment: &Fragment) {
    for child in &fragment.children {
        visitor.visit_node(child);
    }
}

/// Mutable visitor pattern for transforming node trees
///
/// Similar to Visitor, but provides mutable access to nodes.
/// Use this when you need to modify the tree during traversal.
pub trait VisitorMut: Sized {
    fn visit_node_mut(&mut self, node: &mut Node) {
        walk_node_mut(self, node);
    }

    fn visit_element_mut(&mut self, element: &mut Element) {
        walk_element_mut(self, element);
    }

    fn visit_fragment_mut(&mut self, fragment: &mut Fragment) {
        walk_fragment_mut(self, fragment);
    }

    fn visit_map_expression_mut(&mut self, _map: &mut MapExpression) {
        // Leaf node, no children to walk
    }
}

pub fn walk_node_mut<V: VisitorMut>(visitor: &mut V, node: &mut Node) {
    match node {
        Node::Element(element) => visitor.visit_element_mut(element),
        Node::Fragment(fragment) => visitor.visit_fragment_mut(fragment),
        Node::MapExpression(map) => visitor.visit_map_expression_mut(map),
    }
}

pub fn walk_element_mut<V: VisitorMut>(visitor: &mut V, element: &mut Element) {
    for child in &mut element.children {
        visitor.visit_node_mut(child);
    }
}

pub fn walk_fragment_mut<V: VisitorMut>(visitor: &mut V, fragment: &mut Fragment) {
    for child in &mut fragment.children {
        visitor.visit_node_mut(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_parser::ast::Element;

    struct TagCounter {
        count: usize,
    }

    impl Visitor for TagCounter {
        fn visit_element(&mut self, element: &Element) {
            self.count += 1;
            walk_element(self, element);
        }
    }

    struct Renamer;

    impl VisitorMut for Renamer {
        fn visit_element_mut(&mut self, element: &mut Element) {
            if element.tag == "b" {
                element.tag = "strong".to_string();
            }
            walk_element_mut(self, element);
        }
    }

    fn sample() -> Node {
        let mut root = Element::new("div-1", "div");
        let mut inner = Element::new("p-2", "p");
        inner.children.push(Node::Element(Element::new("b-3", "b")));
        root.children.push(Node::Element(inner));
        Node::Element(root)
    }

    #[test]
    fn test_visitor_walks_whole_tree() {
        let mut counter = TagCounter { count: 0 };
        counter.visit_node(&sample());
        assert_eq!(counter.count, 3);
    }

    #[test]
    fn test_visitor_mut_transforms_in_place() {
        let mut tree = sample();
        Renamer.visit_node_mut(&mut tree);

        let p = &tree.children()[0];
        assert_eq!(p.children()[0].as_element().unwrap().tag, "strong");
    }
}
