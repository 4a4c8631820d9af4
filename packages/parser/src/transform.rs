use crate::ast::{
    Attribute, Element, Fragment, MapExpression, Node, StyleAttr, StyleProperty, StyleValue,
};
use crate::id_generator::IdGenerator;
use crate::imports::ImportRegistry;
use crate::jsx::{RawChild, RawElement, RawValue};
use crate::tokenizer::{tokenize, Token};
use std::collections::HashSet;
use tracing::warn;

/// Turn the raw JSX root into a node tree.
///
/// A fragment root is unwrapped to its first element child; a fragment
/// with no element children is the warning-level no-root-element case and
/// produces `None` so the editor can still load the preamble.
pub fn transform_root(
    root: &RawElement,
    registry: &ImportRegistry,
    ids: &mut IdGenerator,
) -> Option<Node> {
    let mut seen = HashSet::new();
    if root.tag.is_empty() {
        let first = root.children.iter().find_map(|child| match child {
            RawChild::Element(el) => Some(el),
            _ => None,
        });
        match first {
            Some(el) => Some(build(el, registry, ids, &mut seen)),
            None => {
                warn!("returned fragment has no element children; loading without a tree");
                None
            }
        }
    } else {
        Some(build(root, registry, ids, &mut seen))
    }
}

fn build(
    el: &RawElement,
    registry: &ImportRegistry,
    ids: &mut IdGenerator,
    seen: &mut HashSet<String>,
) -> Node {
    if el.tag.is_empty() {
        let (children, _) = build_children(&el.children, registry, ids, seen);
        return Node::Fragment(Fragment {
            id: ids.next_unique("fragment", seen),
            parent_id: None,
            is_root_fragment: false,
            children,
        });
    }

    let mut explicit_id = None;
    let mut class_name = None;
    let mut style = None;
    let mut attributes = Vec::new();

    for attr in &el.attributes {
        match attr.name {
            "id" => match &attr.value {
                RawValue::Str(s) if !s.is_empty() => explicit_id = Some(s.to_string()),
                _ => {}
            },
            "className" => match &attr.value {
                RawValue::Str(s) => class_name = Some(s.to_string()),
                RawValue::Expr(e) => class_name = Some(e.to_string()),
                RawValue::Shorthand => {}
            },
            "style" => match &attr.value {
                RawValue::Expr(e) => match parse_style_object(e) {
                    Some(props) if props.is_empty() => {}
                    Some(props) => style = Some(StyleAttr::Object(props)),
                    None => {
                        warn!(tag = el.tag, "dynamic style expression is not modeled");
                        style = Some(StyleAttr::Unsupported);
                    }
                },
                _ => {
                    warn!(tag = el.tag, "string style attribute is not modeled");
                    style = Some(StyleAttr::Unsupported);
                }
            },
            name => {
                let (value, numeric) = match &attr.value {
                    RawValue::Shorthand => ("true".to_string(), false),
                    RawValue::Str(s) => (s.to_string(), false),
                    RawValue::Expr(e) => (e.to_string(), e.parse::<f64>().is_ok()),
                };
                attributes.push(Attribute {
                    name: name.to_string(),
                    value,
                    numeric,
                });
            }
        }
    }

    // Ids are claimed top-down, parent before children. A literal id is
    // reused only once; a second occurrence falls back to a synthesized id
    // so the uniqueness invariant holds.
    let id = match explicit_id {
        Some(explicit) if seen.insert(explicit.clone()) => explicit,
        _ => ids.next_unique(el.tag, seen),
    };

    let (children, text_parts) = build_children(&el.children, registry, ids, seen);

    Node::Element(Element {
        id,
        tag: el.tag.to_string(),
        parent_id: None,
        class_name,
        style,
        attributes,
        component_info: registry.classify(el.tag),
        text_content: if text_parts.is_empty() {
            None
        } else {
            Some(text_parts.join(" "))
        },
        animation: None,
        children,
    })
}

/// Walk raw children, collecting structural nodes and aggregated text.
/// Whitespace-only text is dropped; literal string/number expression
/// containers and other stringified expressions merge into the text, in
/// order, separated by single spaces.
fn build_children(
    raw: &[RawChild],
    registry: &ImportRegistry,
    ids: &mut IdGenerator,
    seen: &mut HashSet<String>,
) -> (Vec<Node>, Vec<String>) {
    let mut children = Vec::new();
    let mut text_parts = Vec::new();

    for child in raw {
        match child {
            RawChild::Text(text) => {
                let collapsed = collapse_ws(text);
                if !collapsed.is_empty() {
                    text_parts.push(collapsed);
                }
            }
            RawChild::Expr(expr) => {
                if let Some((array, callback)) = split_map_call(expr) {
                    children.push(Node::MapExpression(MapExpression {
                        id: ids.next_unique("map", seen),
                        parent_id: None,
                        array_source: array.to_string(),
                        callback_source: callback.to_string(),
                    }));
                } else if let Some(literal) = literal_text(expr) {
                    text_parts.push(literal);
                } else if !expr.is_empty() {
                    text_parts.push(expr.to_string());
                }
            }
            RawChild::Element(el) => children.push(build(el, registry, ids, seen)),
        }
    }

    (children, text_parts)
}

fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A string or number literal expression container becomes inline text.
fn literal_text(expr: &str) -> Option<String> {
    let tokens = tokenize(expr);
    if tokens.len() != 1 {
        return None;
    }
    match &tokens[0].0 {
        Token::Str(s) => Some(unquote(s)),
        Token::Number(n) => Some((*n).to_string()),
        _ => None,
    }
}

fn unquote(quoted: &str) -> String {
    let inner = if quoted.len() >= 2 {
        &quoted[1..quoted.len() - 1]
    } else {
        quoted
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Detect `<expr>.map(<callback>)` at the top level of an expression.
/// Returns the array source and callback source when the call spans the
/// whole expression. The last depth-zero `.map(` wins so chained calls
/// (`a.map(f).map(g)`) split at the outermost map.
pub fn split_map_call(expr: &str) -> Option<(&str, &str)> {
    let bytes = expr.as_bytes();
    let mut depth = 0usize;
    let mut in_string: Option<u8> = None;
    let mut escaped = false;
    let mut candidates = Vec::new();

    for i in 0..bytes.len() {
        let b = bytes[i];
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == quote {
                in_string = None;
            }
            continue;
        }
        match b {
            b'"' | b'\'' | b'`' => in_string = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b'.' if depth == 0 && expr[i..].starts_with(".map(") => candidates.push(i),
            _ => {}
        }
    }

    for &dot in candidates.iter().rev() {
        let open = dot + ".map".len();
        if let Some(close) = matching_paren(expr, open) {
            if expr[close + 1..].trim().is_empty() && !expr[..dot].trim().is_empty() {
                let array = expr[..dot].trim();
                let callback = expr[open + 1..close].trim();
                return Some((array, callback));
            }
        }
    }
    None
}

/// Index of the `)` matching the `(` at `open`, honoring nesting and
/// string literals.
fn matching_paren(expr: &str, open: usize) -> Option<usize> {
    let bytes = expr.as_bytes();
    let mut depth = 0usize;
    let mut in_string: Option<u8> = None;
    let mut escaped = false;

    for i in open..bytes.len() {
        let b = bytes[i];
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == quote {
                in_string = None;
            }
            continue;
        }
        match b {
            b'"' | b'\'' | b'`' => in_string = Some(b),
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a literal style object (`{ padding: "16px", width: 4 }`) into
/// ordered properties. Any non-literal value makes the whole expression
/// unsupported (`None`).
pub fn parse_style_object(expr: &str) -> Option<Vec<StyleProperty>> {
    let trimmed = expr.trim();
    let inner = trimmed.strip_prefix('{')?.strip_suffix('}')?;

    let mut properties = Vec::new();
    for entry in split_top_level(inner, b',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let colon = find_top_level(entry, b':')?;
        let key = entry[..colon].trim();
        let key = key
            .strip_prefix('"')
            .and_then(|k| k.strip_suffix('"'))
            .unwrap_or(key);
        if key.is_empty() {
            return None;
        }

        let raw_value = entry[colon + 1..].trim();
        let value = if (raw_value.starts_with('"') && raw_value.ends_with('"') && raw_value.len() >= 2)
            || (raw_value.starts_with('\'') && raw_value.ends_with('\'') && raw_value.len() >= 2)
        {
            StyleValue::Str(raw_value[1..raw_value.len() - 1].to_string())
        } else if let Ok(n) = raw_value.parse::<f64>() {
            StyleValue::Number(n)
        } else {
            return None;
        };

        properties.push(StyleProperty {
            name: key.to_string(),
            value,
        });
    }
    Some(properties)
}

fn split_top_level(text: &str, separator: u8) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_string: Option<u8> = None;
    let mut start = 0usize;

    for i in 0..bytes.len() {
        let b = bytes[i];
        if let Some(quote) = in_string {
            if b == quote {
                in_string = None;
            }
            continue;
        }
        match b {
            b'"' | b'\'' | b'`' => in_string = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b if b == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn find_top_level(text: &str, needle: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string: Option<u8> = None;

    for i in 0..bytes.len() {
        let b = bytes[i];
        if let Some(quote) = in_string {
            if b == quote {
                in_string = None;
            }
            continue;
        }
        match b {
            b'"' | b'\'' | b'`' => in_string = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b if b == needle && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_map_call_simple() {
        let (array, callback) = split_map_call("items.map(i => <li>{i}</li>)").unwrap();
        assert_eq!(array, "items");
        assert_eq!(callback, "i => <li>{i}</li>");
    }

    #[test]
    fn test_split_map_call_member_chain() {
        let (array, callback) = split_map_call("data.items.map((item, idx) => item)").unwrap();
        assert_eq!(array, "data.items");
        assert_eq!(callback, "(item, idx) => item");
    }

    #[test]
    fn test_chained_maps_split_at_outermost() {
        let (array, callback) = split_map_call("xs.map(f).map(g)").unwrap();
        assert_eq!(array, "xs.map(f)");
        assert_eq!(callback, "g");
    }

    #[test]
    fn test_non_map_expressions_rejected() {
        assert!(split_map_call("user.name").is_none());
        assert!(split_map_call("items.filter(x => x.ok)").is_none());
        assert!(split_map_call("wrap(items.map(f))").is_none());
    }

    #[test]
    fn test_style_object_literal() {
        let props = parse_style_object(r#"{ padding: "16px", width: 4 }"#).unwrap();
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].name, "padding");
        assert_eq!(props[0].value, StyleValue::Str("16px".to_string()));
        assert_eq!(props[1].value, StyleValue::Number(4.0));
    }

    #[test]
    fn test_style_object_with_dynamic_value_unsupported() {
        assert!(parse_style_object(r#"{ width: size }"#).is_none());
        assert!(parse_style_object("styles.card").is_none());
    }

    #[test]
    fn test_literal_text_variants() {
        assert_eq!(literal_text(r#""Hi""#), Some("Hi".to_string()));
        assert_eq!(literal_text("42"), Some("42".to_string()));
        assert_eq!(literal_text("user.name"), None);
    }

    #[test]
    fn test_collapse_ws() {
        assert_eq!(collapse_ws("  Hello\n   world  "), "Hello world");
        assert_eq!(collapse_ws(" \n\t "), "");
    }
}
