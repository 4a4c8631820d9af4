use crate::ast::Node;
use crate::error::ParseResult;
use crate::id_generator::IdGenerator;
use crate::imports::ImportRegistry;
use crate::jsx::JsxParser;
use crate::scanner;
use crate::tokenizer::tokenize;
use crate::transform;

/// Result of parsing a component body.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// Statements preceding the `return`, verbatim. Never re-parsed and
    /// never editable; passed through generation on every save.
    pub preamble: String,
    /// The structural tree, or `None` when the returned fragment had no
    /// element children (the editor still loads with just the preamble).
    pub tree: Option<Node>,
}

/// Parse a function-component body into a preamble and a node tree.
///
/// The body's trailing statement must be a single JSX-returning `return`;
/// statements after it are unreachable and ignored.
pub fn parse(source: &str, registry: &ImportRegistry) -> ParseResult<Parsed> {
    let tokens = tokenize(source);
    let layout = scanner::scan_body(source, &tokens)?;

    let preamble = layout
        .statements
        .iter()
        .map(|span| source[span.clone()].trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let raw = JsxParser::new(source, layout.jsx_offset).parse_root()?;

    let mut ids = IdGenerator::new();
    let tree = transform::transform_root(&raw, registry, &mut ids).map(|mut node| {
        node.repair_parent_links();
        node
    });

    Ok(Parsed { preamble, tree })
}
