use crate::context::CodegenOptions;
use pagecraft_parser::ast::Element;

/// Outcome of tag resolution, in precedence order: icon-library lookup,
/// resolved import, framework heuristics for `img`/`a`, literal fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTag {
    /// Icon-library component, emitted as the runtime lookup tag with the
    /// icon name as a prop.
    IconLookup { icon: String },
    /// Tag backed by a known import (dotted `specific_tag` wins).
    Import { name: String },
    /// `img` with a local-looking src becomes the framework image.
    FrameworkImage,
    /// `a` with a local-looking href becomes the framework link.
    FrameworkLink,
    /// Plain intrinsic tag.
    Literal { name: String },
}

impl ResolvedTag {
    /// The tag name as emitted.
    pub fn emitted_name(&self, options: &CodegenOptions) -> String {
        match self {
            ResolvedTag::IconLookup { .. } => options.icon_tag.clone(),
            ResolvedTag::Import { name } => name.clone(),
            ResolvedTag::FrameworkImage => "Image".to_string(),
            ResolvedTag::FrameworkLink => "Link".to_string(),
            ResolvedTag::Literal { name } => name.clone(),
        }
    }
}

pub fn resolve_tag(element: &Element, options: &CodegenOptions) -> ResolvedTag {
    if let Some(info) = &element.component_info {
        if options
            .icon_packages
            .iter()
            .any(|p| p == &info.package_name)
        {
            return ResolvedTag::IconLookup {
                icon: element.tag.clone(),
            };
        }
        if info.is_component {
            let name = if info.package_name == "unknown" {
                element.tag.clone()
            } else {
                info.specific_tag
                    .clone()
                    .unwrap_or_else(|| info.import_name.clone())
            };
            return ResolvedTag::Import { name };
        }
    }

    match element.tag.as_str() {
        "img" => match element.attribute("src") {
            Some(src) if !is_external_url(&src.value, options) => ResolvedTag::FrameworkImage,
            _ => ResolvedTag::Literal {
                name: "img".to_string(),
            },
        },
        "a" => match element.attribute("href") {
            Some(href) if !is_external_url(&href.value, options) => ResolvedTag::FrameworkLink,
            _ => ResolvedTag::Literal {
                name: "a".to_string(),
            },
        },
        other => ResolvedTag::Literal {
            name: other.to_string(),
        },
    }
}

/// A URL is "external-shaped" when the framework components would reject
/// or mangle it: absolute http(s), placeholder assets, anchors, mailto.
pub fn is_external_url(value: &str, options: &CodegenOptions) -> bool {
    value.starts_with("http")
        || value.starts_with(&options.asset_prefix)
        || value.starts_with('#')
        || value.starts_with("mailto:")
}
