use crate::ast::{ComponentInfo, ImportType};
use serde::{Deserialize, Serialize};

/// One exported name from a package, with the style it is imported in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedSymbol {
    pub name: String,
    pub import_type: ImportType,
}

/// Everything the editor knows about one package's imports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageImports {
    pub package_name: String,
    pub symbols: Vec<ImportedSymbol>,
    pub active: bool,
}

/// Import bookkeeping supplied by the host editor: package name to exported
/// names plus active flags. Consumed read-only during parse and element
/// creation; the engine does not validate that a package actually exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportRegistry {
    packages: Vec<PackageImports>,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, package: PackageImports) {
        self.packages.push(package);
    }

    /// Convenience used by tests and embedders: register a single symbol.
    pub fn add_symbol(
        &mut self,
        package_name: &str,
        name: &str,
        import_type: ImportType,
    ) {
        if let Some(pkg) = self
            .packages
            .iter_mut()
            .find(|p| p.package_name == package_name)
        {
            pkg.symbols.push(ImportedSymbol {
                name: name.to_string(),
                import_type,
            });
        } else {
            self.packages.push(PackageImports {
                package_name: package_name.to_string(),
                symbols: vec![ImportedSymbol {
                    name: name.to_string(),
                    import_type,
                }],
                active: true,
            });
        }
    }

    pub fn packages(&self) -> &[PackageImports] {
        &self.packages
    }

    /// Look up a tag in the registry. Dotted tags (`motion.section`) match
    /// by their base segment, and the full tag is kept as `specific_tag`.
    pub fn resolve_tag(&self, tag: &str) -> Option<ComponentInfo> {
        let base = tag.split('.').next().unwrap_or(tag);
        for pkg in self.packages.iter().filter(|p| p.active) {
            for sym in &pkg.symbols {
                if sym.name == base {
                    return Some(ComponentInfo {
                        is_component: true,
                        package_name: pkg.package_name.clone(),
                        import_name: sym.name.clone(),
                        import_type: sym.import_type,
                        specific_tag: if tag.contains('.') {
                            Some(tag.to_string())
                        } else {
                            None
                        },
                    });
                }
            }
        }
        None
    }

    /// Full tag classification: a registry hit, an unresolved component
    /// (capitalized, dot-free, not in any table), or an intrinsic tag.
    pub fn classify(&self, tag: &str) -> Option<ComponentInfo> {
        if let Some(info) = self.resolve_tag(tag) {
            return Some(info);
        }
        let first = tag.chars().next()?;
        if first.is_ascii_uppercase() && !tag.contains('.') {
            Some(ComponentInfo {
                is_component: true,
                package_name: "unknown".to_string(),
                import_name: tag.to_string(),
                import_type: ImportType::Named,
                specific_tag: None,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ImportRegistry {
        let mut reg = ImportRegistry::new();
        reg.add_symbol("framer-motion", "motion", ImportType::Named);
        reg.add_symbol("next/image", "Image", ImportType::Default);
        reg
    }

    #[test]
    fn test_resolves_known_import() {
        let info = registry().resolve_tag("Image").unwrap();
        assert_eq!(info.package_name, "next/image");
        assert_eq!(info.import_type, ImportType::Default);
        assert!(info.specific_tag.is_none());
    }

    #[test]
    fn test_dotted_tag_matches_base_segment() {
        let info = registry().resolve_tag("motion.section").unwrap();
        assert_eq!(info.import_name, "motion");
        assert_eq!(info.specific_tag.as_deref(), Some("motion.section"));
    }

    #[test]
    fn test_unresolved_capitalized_tag_is_unknown_component() {
        let info = registry().classify("Sidebar").unwrap();
        assert_eq!(info.package_name, "unknown");
        assert!(info.is_component);
    }

    #[test]
    fn test_intrinsic_tag_has_no_component_info() {
        assert!(registry().classify("div").is_none());
    }

    #[test]
    fn test_inactive_package_is_skipped() {
        let mut reg = ImportRegistry::new();
        reg.register(PackageImports {
            package_name: "lucide-react".to_string(),
            symbols: vec![ImportedSymbol {
                name: "Github".to_string(),
                import_type: ImportType::Named,
            }],
            active: false,
        });

        let info = reg.classify("Github").unwrap();
        assert_eq!(info.package_name, "unknown");
    }
}
