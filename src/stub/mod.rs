//! Stub rendering.
//!
//! A module is rendered in one pass over its sorted symbol table. Each symbol
//! becomes a [`StubBlock`]; blocks are only ever appended to their section and
//! re-ordered at the section level by [`assemble`].

pub mod assemble;
pub mod class;

use std::collections::BTreeSet;
use tracing::{debug, debug_span};

use crate::classify::{classify, is_dunder, Category};
use crate::resolve::ImportSet;
use crate::signature::{infer, SignatureOverrides, SignatureRequest};
use crate::snapshot::{ModuleSnapshot, RuntimeValue};

pub use assemble::{add_typing_import, assemble, TYPING_MARKERS};
pub use class::{build_class_stub, is_skipped_member, member_sort_key, minimal_bases};

/// Rendered lines of one function, property or class.
pub type StubBlock = Vec<String>;

/// State shared by every block rendered for one module.
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// Name of the module being stubbed; its own prefix is stripped from types.
    pub module: &'a str,
    pub overrides: &'a SignatureOverrides,
    /// Imports required by everything rendered so far.
    pub imports: ImportSet,
}

impl<'a> RenderContext<'a> {
    pub fn new(module: &'a str, overrides: &'a SignatureOverrides) -> Self {
        Self {
            module,
            overrides,
            imports: ImportSet::new(),
        }
    }
}

/// `def name(...) -> T: ...` for a module-level callable.
pub fn function_stub(ctx: &mut RenderContext<'_>, name: &str, doc: Option<&str>) -> String {
    let signature = infer(&SignatureRequest::function(name, doc), ctx.overrides);
    signature.render_def(name, ctx.module, &mut ctx.imports)
}

/// Render a module snapshot into stub lines (no header, no line terminators).
pub fn render_module_stub(
    snapshot: &ModuleSnapshot,
    overrides: &SignatureOverrides,
) -> Vec<String> {
    let _span = debug_span!("render_module", module = %snapshot.name).entered();
    let mut ctx = RenderContext::new(&snapshot.name, overrides);
    let mut done = BTreeSet::new();

    let categorized: Vec<(&str, &RuntimeValue, Category)> = snapshot
        .members
        .iter()
        .map(|(name, value)| (name.as_str(), value, classify(value)))
        .collect();

    let mut functions = Vec::new();
    for (name, value, category) in &categorized {
        if matches!(category, Category::Function | Category::ClassMethod) {
            debug!(symbol = %name, category = category.label(), "function stub");
            functions.push(function_stub(&mut ctx, name, value.doc.as_deref()));
            done.insert(*name);
        }
    }

    let mut classes = Vec::new();
    for (name, value, category) in &categorized {
        if is_dunder(name) || *category != Category::Type {
            continue;
        }
        if let Some(info) = value.type_info.as_ref() {
            debug!(symbol = %name, "class stub");
            classes.push(build_class_stub(&mut ctx, name, info));
            done.insert(*name);
        }
    }

    let mut constants = Vec::new();
    for (name, _, category) in &categorized {
        if is_dunder(name) || done.contains(name) {
            continue;
        }
        let annotation = match category {
            Category::Value { value_type } => value_type.annotation(),
            _ => Some("Any"),
        };
        match annotation {
            Some(ty) => constants.push(format!("{name}: {ty}")),
            None => debug!(symbol = %name, "skipping module reference"),
        }
    }

    let lines = assemble(&ctx.imports, &constants, &functions, &classes);
    add_typing_import(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_constants_use_whitelisted_types() {
        let snapshot = ModuleSnapshot::new("m")
            .with_member("COUNT", RuntimeValue::constant("int"))
            .with_member("NAME", RuntimeValue::constant("str"))
            .with_member("TABLE", RuntimeValue::constant("dict"))
            .with_member("os", RuntimeValue::module())
            .with_member("__version__", RuntimeValue::constant("str"));

        let lines = render_module_stub(&snapshot, &SignatureOverrides::default());

        assert_eq!(
            lines,
            vec![
                "from typing import Any",
                "",
                "COUNT: int",
                "NAME: str",
                "TABLE: Any",
            ]
        );
    }

    #[test]
    fn test_dunder_functions_are_still_rendered() {
        let snapshot = ModuleSnapshot::new("m").with_member(
            "__getattr__",
            RuntimeValue::builtin_function(Some("__getattr__(name: str) -> int")),
        );

        let lines = render_module_stub(&snapshot, &SignatureOverrides::default());
        assert_eq!(lines, vec!["def __getattr__(name: str) -> int: ..."]);
    }

    #[test]
    fn test_blank_line_between_constants_and_functions() {
        let snapshot = ModuleSnapshot::new("m")
            .with_member("LIMIT", RuntimeValue::constant("int"))
            .with_member("run", RuntimeValue::builtin_function(Some("run() -> bool")));

        let lines = render_module_stub(&snapshot, &SignatureOverrides::default());
        assert_eq!(lines, vec!["LIMIT: int", "", "def run() -> bool: ..."]);
    }

    #[test]
    fn test_function_imports_precede_constants() {
        let snapshot = ModuleSnapshot::new("m")
            .with_member("LIMIT", RuntimeValue::constant("int"))
            .with_member(
                "open_file",
                RuntimeValue::builtin_function(Some("open_file(p: pathlib.Path) -> io.IOBase")),
            );

        let lines = render_module_stub(&snapshot, &SignatureOverrides::default());
        assert_eq!(
            lines,
            vec![
                "import io",
                "import pathlib",
                "LIMIT: int",
                "",
                "def open_file(p: Path) -> IOBase: ...",
            ]
        );
    }
}
