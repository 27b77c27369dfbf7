//! Class stub construction.
//!
//! Members are rendered constructor first, then ordinary members, then
//! operator-style (`__x__`) members, each group alphabetical. Base classes are
//! reduced to the minimal set that still implies the full resolution order.

use std::collections::BTreeSet;
use tracing::{debug_span, warn};

use super::{RenderContext, StubBlock};
use crate::classify::{classify, is_dunder, Category, PropertyAccess};
use crate::resolve::{resolve_expr, resolve_into, ImportSet};
use crate::signature::docstring::infer_property_type;
use crate::signature::{infer, Receiver, SignatureRequest, ALLOCATOR, ANY, INITIALIZER};
use crate::snapshot::{Ancestor, RuntimeValue, TypeInfo};

const INDENT: &str = "    ";

/// Universal root of every resolution order.
const OBJECT: &str = "builtins.object";

/// Root injected by pybind11 beneath every class it generates.
const FRAMEWORK_ROOT: &str = "pybind11_object";

/// Members with no typing signal.
const SKIPPED_MEMBERS: &[&str] = &[
    "__getattribute__",
    "__str__",
    "__repr__",
    "__doc__",
    "__dict__",
    "__module__",
    "__weakref__",
];

pub fn is_skipped_member(name: &str) -> bool {
    SKIPPED_MEMBERS.contains(&name)
}

/// Ordering key: constructors, then ordinary members, then dunders.
pub fn member_sort_key(name: &str) -> (u8, &str) {
    if name == ALLOCATOR || name == INITIALIZER {
        (0, name)
    } else if is_dunder(name) {
        (2, name)
    } else {
        (1, name)
    }
}

/// Per-class rendering state.
#[derive(Debug, Default)]
struct ClassRendering<'t> {
    constants: Vec<String>,
    methods: Vec<String>,
    properties: Vec<String>,
    /// Members already handled as callables or properties.
    done: BTreeSet<&'t str>,
}

impl ClassRendering<'_> {
    fn is_empty(&self) -> bool {
        self.constants.is_empty() && self.methods.is_empty() && self.properties.is_empty()
    }
}

/// Render the stub for a type exposed under `class_name`.
pub fn build_class_stub(
    ctx: &mut RenderContext<'_>,
    class_name: &str,
    info: &TypeInfo,
) -> StubBlock {
    let _span = debug_span!("class_stub", class = class_name).entered();

    let mut members: Vec<(&str, &RuntimeValue)> = info
        .members
        .iter()
        .map(|(name, value)| (name.as_str(), value))
        .collect();
    members.sort_by(|(a, _), (b, _)| member_sort_key(a).cmp(&member_sort_key(b)));

    let mut state = ClassRendering::default();

    for &(name, value) in &members {
        match classify(value) {
            category @ (Category::Method | Category::ClassMethod | Category::Function) => {
                state.done.insert(name);
                if !is_skipped_member(name) {
                    render_callable(ctx, class_name, info, name, value, category, &mut state);
                }
            }
            Category::Property { access } => {
                state.done.insert(name);
                if !is_skipped_member(name) {
                    render_property(ctx, name, value, access, &mut state.properties);
                }
            }
            Category::Type | Category::Value { .. } => {}
        }
    }

    for &(name, value) in &members {
        if is_skipped_member(name) || state.done.contains(name) {
            continue;
        }
        let annotation = match classify(value) {
            Category::Value { value_type } => value_type.annotation().unwrap_or(ANY),
            _ => ANY,
        };
        state.constants.push(format!("{name}: {annotation} = ..."));
    }

    let bases: Vec<String> = minimal_bases(info)
        .into_iter()
        .map(|base| resolve_into(&base.qualified_name(), ctx.module, &mut ctx.imports))
        .collect();
    let bases = if bases.is_empty() {
        String::new()
    } else {
        format!("({})", bases.join(", "))
    };

    if state.is_empty() {
        return vec![format!("class {class_name}{bases}: ...")];
    }

    let mut block = vec![format!("class {class_name}{bases}:")];
    block.extend(
        state
            .constants
            .iter()
            .chain(&state.methods)
            .chain(&state.properties)
            .map(|line| format!("{INDENT}{line}")),
    );
    block
}

fn render_callable(
    ctx: &mut RenderContext<'_>,
    class_name: &str,
    info: &TypeInfo,
    name: &str,
    value: &RuntimeValue,
    category: Category,
    state: &mut ClassRendering<'_>,
) {
    let doc = value.doc.as_deref();

    if name == ALLOCATOR {
        if let Some(initializer) = info.members.get(INITIALIZER) {
            report_discarded_allocator(ctx, class_name, doc, initializer);
            return;
        }
        let request =
            SignatureRequest::member(INITIALIZER, doc, class_name, Some(Receiver::Instance))
                .with_runtime_name(ALLOCATOR);
        let signature = infer(&request, ctx.overrides);
        state
            .methods
            .push(signature.render_def(INITIALIZER, ctx.module, &mut ctx.imports));
        return;
    }

    let receiver = match category {
        Category::ClassMethod => {
            state.methods.push("@classmethod".to_string());
            Some(Receiver::Class)
        }
        Category::Function => {
            state.methods.push("@staticmethod".to_string());
            None
        }
        _ => Some(Receiver::Instance),
    };

    let request = SignatureRequest::member(name, doc, class_name, receiver);
    let signature = infer(&request, ctx.overrides);
    state
        .methods
        .push(signature.render_def(name, ctx.module, &mut ctx.imports));
}

/// The initializer wins over the allocator; say so when that loses information.
fn report_discarded_allocator(
    ctx: &RenderContext<'_>,
    class_name: &str,
    allocator_doc: Option<&str>,
    initializer: &RuntimeValue,
) {
    let allocator = SignatureRequest::member(
        ALLOCATOR,
        allocator_doc,
        class_name,
        Some(Receiver::Class),
    );
    let init_request = SignatureRequest::member(
        INITIALIZER,
        initializer.doc.as_deref(),
        class_name,
        Some(Receiver::Instance),
    );
    let from_allocator = infer(&allocator, ctx.overrides);
    let from_initializer = infer(&init_request, ctx.overrides);
    if from_allocator.params != from_initializer.params {
        let mut scratch = ImportSet::new();
        warn!(
            class = class_name,
            discarded = %from_allocator.render_def(ALLOCATOR, ctx.module, &mut scratch),
            "allocator signature differs from initializer; keeping initializer"
        );
    }
}

fn render_property(
    ctx: &mut RenderContext<'_>,
    name: &str,
    value: &RuntimeValue,
    access: PropertyAccess,
    out: &mut Vec<String>,
) {
    let ty = infer_property_type(value.doc.as_deref())
        .map(|ty| resolve_expr(&ty, ctx.module, &mut ctx.imports))
        .unwrap_or_else(|| ANY.to_string());

    out.push("@property".to_string());
    out.push(format!("def {name}(self) -> {ty}: ..."));
    if access == PropertyAccess::ReadWrite {
        out.push(format!("@{name}.setter"));
        out.push(format!("def {name}(self, val: {ty}) -> None: ..."));
    }
}

/// Minimal base list: the resolution order without the type itself, the
/// universal root and the framework root, keeping only bases not already
/// implied by an earlier kept base.
pub fn minimal_bases(info: &TypeInfo) -> Vec<&Ancestor> {
    let own_name = if info.module.is_empty() {
        info.name.clone()
    } else {
        format!("{}.{}", info.module, info.name)
    };

    let mut ancestors: Vec<&Ancestor> = info.mro.iter().collect();
    if ancestors.last().is_some_and(|a| a.qualified_name() == OBJECT) {
        ancestors.pop();
    }
    if ancestors.last().is_some_and(|a| a.name == FRAMEWORK_ROOT) {
        ancestors.pop();
    }

    let mut bases: Vec<&Ancestor> = Vec::new();
    for ancestor in ancestors {
        if ancestor.qualified_name() == own_name {
            continue;
        }
        if !bases.iter().any(|kept| ancestor.is_ancestor_of(kept)) {
            bases.push(ancestor);
        }
    }
    bases
}
