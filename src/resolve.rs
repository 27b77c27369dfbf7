//! Type name resolution.
//!
//! Decides how a (possibly dotted) type name is displayed inside the stub of a
//! given module, and which import line, if any, that display form requires.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeSet;

/// Namespace whose members are always in scope.
const BUILTINS_MODULE: &str = "builtins";

/// Dotted identifiers inside a type expression such as `List[pkg.Thing]`.
static DOTTED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*").expect("valid regex")
});

/// Result of resolving a single type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub display: String,
    /// `import <source.path>` when the name lives in a foreign module.
    pub import: Option<String>,
}

/// Distinct import statements, kept in alphabetical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    lines: BTreeSet<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the line was already present.
    pub fn insert(&mut self, line: impl Into<String>) -> bool {
        self.lines.insert(line.into())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// Resolve one type name relative to `owning_module`.
pub fn resolve(type_name: &str, owning_module: &str) -> Resolved {
    if let Some(local) = strip_module_prefix(type_name, owning_module) {
        return Resolved {
            display: local.to_string(),
            import: None,
        };
    }

    match type_name.rsplit_once('.') {
        None => Resolved {
            display: type_name.to_string(),
            import: None,
        },
        Some((BUILTINS_MODULE, bare)) => Resolved {
            display: bare.to_string(),
            import: None,
        },
        Some((source, bare)) => Resolved {
            display: bare.to_string(),
            import: Some(format!("import {source}")),
        },
    }
}

/// Resolve a single name, recording its import.
pub fn resolve_into(type_name: &str, owning_module: &str, imports: &mut ImportSet) -> String {
    let resolved = resolve(type_name, owning_module);
    if let Some(line) = resolved.import {
        imports.insert(line);
    }
    resolved.display
}

/// Resolve every dotted name inside a type expression.
///
/// `Dict[str, pkg.sub.Item]` becomes `Dict[str, Item]` plus `import pkg.sub`.
pub fn resolve_expr(expr: &str, owning_module: &str, imports: &mut ImportSet) -> String {
    DOTTED_NAME
        .replace_all(expr.trim(), |caps: &Captures| {
            resolve_into(&caps[0], owning_module, imports)
        })
        .into_owned()
}

fn strip_module_prefix<'a>(type_name: &'a str, module: &str) -> Option<&'a str> {
    if module.is_empty() {
        return None;
    }
    type_name
        .strip_prefix(module)
        .and_then(|rest| rest.strip_prefix('.'))
        .filter(|rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name_is_stripped() {
        assert_eq!(
            resolve("pkg.native.Point", "pkg.native"),
            Resolved {
                display: "Point".into(),
                import: None
            }
        );
    }

    #[test]
    fn test_prefix_must_end_at_dot() {
        let resolved = resolve("pkg.native_ext.Point", "pkg.native");
        assert_eq!(resolved.display, "Point");
        assert_eq!(resolved.import.as_deref(), Some("import pkg.native_ext"));
    }

    #[test]
    fn test_bare_name_untouched() {
        assert_eq!(resolve("int", "m").display, "int");
        assert_eq!(resolve("int", "m").import, None);
    }

    #[test]
    fn test_builtins_namespace_stripped() {
        assert_eq!(
            resolve("builtins.ValueError", "m"),
            Resolved {
                display: "ValueError".into(),
                import: None
            }
        );
    }

    #[test]
    fn test_foreign_name_requires_import_of_source_path() {
        assert_eq!(
            resolve("numpy.core.ndarray", "m"),
            Resolved {
                display: "ndarray".into(),
                import: Some("import numpy.core".into())
            }
        );
    }

    #[test]
    fn test_import_set_dedupes_and_sorts() {
        let mut imports = ImportSet::new();
        assert!(imports.insert("import zlib"));
        assert!(imports.insert("import abc"));
        assert!(!imports.insert("import zlib"));
        assert_eq!(imports.len(), 2);

        let lines: Vec<_> = imports.iter().collect();
        assert_eq!(lines, vec!["import abc", "import zlib"]);
    }

    #[test]
    fn test_resolve_expr_handles_nested_generics() {
        let mut imports = ImportSet::new();
        let display = resolve_expr("Dict[str, List[other.mod.Item]]", "m", &mut imports);

        assert_eq!(display, "Dict[str, List[Item]]");
        assert_eq!(imports.iter().collect::<Vec<_>>(), vec!["import other.mod"]);
    }

    #[test]
    fn test_resolve_expr_strips_local_and_builtin() {
        let mut imports = ImportSet::new();
        let display = resolve_expr(
            "Tuple[m.Point, builtins.int]",
            "m",
            &mut imports,
        );

        assert_eq!(display, "Tuple[Point, int]");
        assert!(imports.is_empty());
    }
}
