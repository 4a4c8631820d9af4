use crate::animation::{is_animatable, motion_props, MotionProp};
use crate::context::{CodegenOptions, Emitter};
use crate::tags::{resolve_tag, ResolvedTag};
use pagecraft_common::visitor::{walk_element, Visitor};
use pagecraft_parser::ast::{Element, ImportType, Node, StyleAttr, StyleValue};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Fixed greppable token emitted where an expression cannot be
/// re-serialized. One bad fragment never blocks saving the rest.
pub const GENERATION_PLACEHOLDER: &str = "__UNSERIALIZABLE_EXPR__";

/// Intrinsic tags that never take children and are emitted self-closed.
pub const VOID_TAGS: &[&str] = &["img", "input", "br", "hr"];

/// Props emitted braced (`width={300}`) when their value is numeric.
pub const NUMERIC_PROPS: &[&str] = &[
    "width",
    "height",
    "size",
    "strokeWidth",
    "repeat",
    "duration",
    "delay",
];

/// Generate markup for a tree. A marked root fragment renders only its
/// children, with no wrapping tag.
pub fn generate_markup(tree: &Node, options: &CodegenOptions) -> String {
    let mut emitter = Emitter::new(&options.indent);
    emit_node(tree, options, &mut emitter);
    emitter.finish()
}

/// Generate the full module text: inferred imports, the component function
/// skeleton, the verbatim preamble, and the returned markup. `tree: None`
/// (the no-root-element case) still produces a loadable component.
pub fn generate_module(tree: Option<&Node>, preamble: &str, options: &CodegenOptions) -> String {
    let mut out = String::new();

    if let Some(tree) = tree {
        let mut scan = UsageScan::new(options);
        scan.visit_node(tree);
        let lines = import_lines(&scan, options);
        if !lines.is_empty() {
            for line in &lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
    }

    out.push_str(&format!(
        "export default function {}() {{\n",
        options.component_name
    ));

    if !preamble.trim().is_empty() {
        for line in preamble.lines() {
            if line.trim().is_empty() {
                out.push('\n');
            } else {
                out.push_str(&options.indent);
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push('\n');
    }

    match tree {
        None => {
            out.push_str(&options.indent);
            out.push_str("return null;\n");
        }
        Some(tree) => {
            out.push_str(&options.indent);
            out.push_str("return (\n");
            let mut emitter = Emitter::with_level(&options.indent, 2);
            emit_module_root(tree, options, &mut emitter);
            out.push_str(&emitter.finish());
            out.push_str(&options.indent);
            out.push_str(");\n");
        }
    }

    out.push_str("}\n");
    out
}

/// Inside a `return (...)` a root fragment with several children needs a
/// real fragment wrapper to stay syntactically valid.
fn emit_module_root(tree: &Node, options: &CodegenOptions, emitter: &mut Emitter) {
    if tree.is_root_fragment() && tree.children().len() > 1 {
        emitter.line("<>");
        emitter.indent();
        for child in tree.children() {
            emit_node(child, options, emitter);
        }
        emitter.dedent();
        emitter.line("</>");
    } else {
        emit_node(tree, options, emitter);
    }
}

fn emit_node(node: &Node, options: &CodegenOptions, emitter: &mut Emitter) {
    match node {
        Node::Fragment(fragment) if fragment.is_root_fragment => {
            for child in &fragment.children {
                emit_node(child, options, emitter);
            }
        }
        Node::Fragment(fragment) => {
            emitter.line("<>");
            emitter.indent();
            for child in &fragment.children {
                emit_node(child, options, emitter);
            }
            emitter.dedent();
            emitter.line("</>");
        }
        Node::MapExpression(map) => {
            emitter.line(&format!(
                "{{{}.map({})}}",
                map.array_source, map.callback_source
            ));
        }
        Node::Element(element) => emit_element(element, options, emitter),
    }
}

fn emit_element(element: &Element, options: &CodegenOptions, emitter: &mut Emitter) {
    let resolved = resolve_tag(element, options);
    let mut tag = resolved.emitted_name(options);

    let mut motion: Vec<MotionProp> = Vec::new();
    if let Some(animation) = &element.animation {
        if animation.enabled {
            if let ResolvedTag::Literal { name } = &resolved {
                if is_animatable(name) {
                    tag = format!("motion.{}", name);
                    motion = motion_props(animation);
                }
            }
        }
    }

    let mut attrs = String::new();
    if let ResolvedTag::IconLookup { icon } = &resolved {
        attrs.push_str(&format!(" name=\"{}\"", kebab_case(icon)));
    }
    if let Some(class) = &element.class_name {
        if !class.is_empty() {
            attrs.push_str(&format!(" className=\"{}\"", escape_attr(class)));
        }
    }
    if let Some(style) = &element.style {
        attrs.push_str(&format!(" style={{{}}}", style_source(element, style)));
    }
    for attr in &element.attributes {
        if attr.numeric && NUMERIC_PROPS.contains(&attr.name.as_str()) {
            attrs.push_str(&format!(" {}={{{}}}", attr.name, attr.value));
        } else {
            attrs.push_str(&format!(" {}=\"{}\"", attr.name, escape_attr(&attr.value)));
        }
    }
    for prop in &motion {
        attrs.push_str(&format!(" {}={{{}}}", prop.name, prop.value));
    }

    let self_closing = matches!(resolved, ResolvedTag::IconLookup { .. })
        || VOID_TAGS.contains(&element.tag.as_str());
    if self_closing {
        emitter.line(&format!("<{}{} />", tag, attrs));
        return;
    }

    if let Some(text) = &element.text_content {
        emitter.line(&format!("<{0}{1}>{2}</{0}>", tag, attrs, text));
    } else if element.children.is_empty() {
        emitter.line(&format!("<{0}{1}></{0}>", tag, attrs));
    } else {
        emitter.line(&format!("<{}{}>", tag, attrs));
        emitter.indent();
        for child in &element.children {
            emit_node(child, options, emitter);
        }
        emitter.dedent();
        emitter.line(&format!("</{}>", tag));
    }
}

fn style_source(element: &Element, style: &StyleAttr) -> String {
    match style {
        StyleAttr::Object(properties) => {
            let entries: Vec<String> = properties
                .iter()
                .map(|p| {
                    let value = match &p.value {
                        StyleValue::Str(s) => format!("\"{}\"", escape_attr(s)),
                        StyleValue::Number(n) => num(*n),
                    };
                    format!("{}: {}", p.name, value)
                })
                .collect();
            format!("{{ {} }}", entries.join(", "))
        }
        StyleAttr::Unsupported => {
            warn!(
                id = element.id.as_str(),
                "style expression cannot be re-serialized; emitting placeholder"
            );
            GENERATION_PLACEHOLDER.to_string()
        }
    }
}

fn escape_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}

fn kebab_case(name: &str) -> String {
    let mut out = String::new();
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Scan a tree for everything that needs an import line: motion usage,
/// icon lookups, framework image/link resolution, known component imports.
struct UsageScan<'o> {
    options: &'o CodegenOptions,
    has_motion: bool,
    uses_image: bool,
    uses_link: bool,
    icons: BTreeSet<String>,
    packages: BTreeMap<String, BTreeMap<String, ImportType>>,
}

impl<'o> UsageScan<'o> {
    fn new(options: &'o CodegenOptions) -> Self {
        Self {
            options,
            has_motion: false,
            uses_image: false,
            uses_link: false,
            icons: BTreeSet::new(),
            packages: BTreeMap::new(),
        }
    }
}

impl Visitor for UsageScan<'_> {
    fn visit_element(&mut self, element: &Element) {
        if element.animation.as_ref().map_or(false, |a| a.enabled) {
            self.has_motion = true;
        }
        match resolve_tag(element, self.options) {
            ResolvedTag::IconLookup { icon } => {
                self.icons.insert(icon);
            }
            ResolvedTag::FrameworkImage => self.uses_image = true,
            ResolvedTag::FrameworkLink => self.uses_link = true,
            ResolvedTag::Import { .. } => {
                if let Some(info) = &element.component_info {
                    if info.package_name != "unknown" {
                        self.packages
                            .entry(info.package_name.clone())
                            .or_default()
                            .insert(info.import_name.clone(), info.import_type);
                    }
                }
            }
            ResolvedTag::Literal { .. } => {}
        }
        walk_element(self, element);
    }
}

fn import_lines(scan: &UsageScan, options: &CodegenOptions) -> Vec<String> {
    let mut lines = Vec::new();

    if scan.uses_image {
        lines.push(format!("import Image from \"{}\";", options.image_import_path));
    }
    if scan.uses_link {
        lines.push(format!("import Link from \"{}\";", options.link_import_path));
    }

    let mut packages = scan.packages.clone();
    if scan.has_motion {
        packages
            .entry(options.animation_package.clone())
            .or_default()
            .insert("motion".to_string(), ImportType::Named);
    }

    for (package, symbols) in &packages {
        let mut named = Vec::new();
        for (name, import_type) in symbols {
            match import_type {
                ImportType::Default => {
                    lines.push(format!("import {} from \"{}\";", name, package));
                }
                ImportType::Namespace => {
                    lines.push(format!("import * as {} from \"{}\";", name, package));
                }
                ImportType::Named => named.push(name.clone()),
            }
        }
        if !named.is_empty() {
            lines.push(format!(
                "import {{ {} }} from \"{}\";",
                named.join(", "),
                package
            ));
        }
    }

    if !scan.icons.is_empty() {
        lines.push(format!(
            "import {{ {} }} from \"{}\";",
            options.icon_tag, options.icon_import_path
        ));
    }

    lines
}
