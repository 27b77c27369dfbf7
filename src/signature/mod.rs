//! Signature inference for native callables.
//!
//! Sources, in order of preference:
//! 1. the callable's own docstring ([`docstring`]),
//! 2. caller-supplied override tables ([`SignatureOverrides`]),
//! 3. the operator heuristic table for class members ([`heuristics`]),
//! 4. a fully generic `(*args, **kwargs)`.
//!
//! Inference is total: something is always produced.

pub mod docstring;
pub mod heuristics;

use std::collections::BTreeMap;

use crate::resolve::{resolve_expr, ImportSet};
use docstring::{infer_from_docstring, parse_override, split_top_level, RawSignature};

pub const INITIALIZER: &str = "__init__";
pub const ALLOCATOR: &str = "__new__";

/// Return type used when nothing better is known.
pub const ANY: &str = "Any";
/// Return type of initializers.
pub const NONE: &str = "None";

/// Implicit first parameter of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    Instance,
    Class,
}

impl Receiver {
    pub fn name(&self) -> &'static str {
        match self {
            Receiver::Instance => "self",
            Receiver::Class => "cls",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub annotation: Option<String>,
    /// Source text of the default value, if any.
    pub default: Option<String>,
}

impl Param {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            default: None,
        }
    }

    pub fn typed(name: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: Some(annotation.into()),
            default: None,
        }
    }

    fn parse(text: &str) -> Self {
        let (decl, default) = match split_top_level(text, '=').as_slice() {
            [decl, rest @ ..] if !rest.is_empty() => {
                (*decl, Some(rest.join("=").trim().to_string()))
            }
            _ => (text, None),
        };
        let (name, annotation) = match decl.split_once(':') {
            Some((name, ty)) => (name.trim(), Some(ty.trim().to_string())),
            None => (decl.trim(), None),
        };
        Self {
            name: name.to_string(),
            annotation: annotation.filter(|ty| !ty.is_empty()),
            default,
        }
    }

    fn render(&self, module: &str, imports: &mut ImportSet) -> String {
        match (&self.annotation, &self.default) {
            (Some(ty), Some(_)) => {
                format!("{}: {} = ...", self.name, resolve_expr(ty, module, imports))
            }
            (Some(ty), None) => format!("{}: {}", self.name, resolve_expr(ty, module, imports)),
            (None, Some(_)) => format!("{}=...", self.name),
            (None, None) => self.name.clone(),
        }
    }
}

/// An inferred call signature.
///
/// `params` never contains the receiver; it is implied by `receiver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub receiver: Option<Receiver>,
    pub params: Vec<Param>,
    pub return_type: String,
}

impl Signature {
    /// Build from raw argument text, eliding a leading receiver parameter.
    pub fn from_raw(raw: &RawSignature, receiver: Option<Receiver>) -> Self {
        let mut params: Vec<Param> = split_top_level(&raw.args, ',')
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .map(Param::parse)
            .collect();

        if let (Some(receiver), Some(first)) = (receiver, params.first()) {
            if first.name == receiver.name() {
                params.remove(0);
            }
        }

        Self {
            receiver,
            params,
            return_type: raw
                .return_type
                .clone()
                .unwrap_or_else(|| ANY.to_string()),
        }
    }

    /// Render `def name(...) -> T: ...`, resolving every type against `module`.
    pub fn render_def(&self, name: &str, module: &str, imports: &mut ImportSet) -> String {
        let args: Vec<String> = self
            .receiver
            .map(|r| r.name().to_string())
            .into_iter()
            .chain(self.params.iter().map(|p| p.render(module, imports)))
            .collect();
        let ret = resolve_expr(&self.return_type, module, imports);
        format!("def {}({}) -> {}: ...", name, args.join(", "), ret)
    }
}

/// Caller-supplied signature tables, immutable for a whole pass.
///
/// Values use the override grammar, e.g. `(a: int, b) -> str`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureOverrides {
    /// Keyed by function or member name.
    pub signatures: BTreeMap<String, String>,
    /// Constructor signatures keyed by class name.
    pub class_signatures: BTreeMap<String, String>,
}

impl SignatureOverrides {
    pub fn new(
        signatures: BTreeMap<String, String>,
        class_signatures: BTreeMap<String, String>,
    ) -> Self {
        Self {
            signatures,
            class_signatures,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty() && self.class_signatures.is_empty()
    }
}

/// Everything known about a callable before inference.
#[derive(Debug, Clone, Copy)]
pub struct SignatureRequest<'a> {
    /// Name the member is rendered under.
    pub name: &'a str,
    /// Name the runtime knows it by; docstrings are matched against this.
    pub runtime_name: &'a str,
    pub doc: Option<&'a str>,
    /// Owning class, for members.
    pub class_name: Option<&'a str>,
    pub receiver: Option<Receiver>,
}

impl<'a> SignatureRequest<'a> {
    pub fn function(name: &'a str, doc: Option<&'a str>) -> Self {
        Self {
            name,
            runtime_name: name,
            doc,
            class_name: None,
            receiver: None,
        }
    }

    pub fn member(
        name: &'a str,
        doc: Option<&'a str>,
        class_name: &'a str,
        receiver: Option<Receiver>,
    ) -> Self {
        Self {
            name,
            runtime_name: name,
            doc,
            class_name: Some(class_name),
            receiver,
        }
    }

    pub fn with_runtime_name(mut self, runtime_name: &'a str) -> Self {
        self.runtime_name = runtime_name;
        self
    }

    fn is_constructor(&self) -> bool {
        self.class_name.is_some() && (self.name == INITIALIZER || self.name == ALLOCATOR)
    }
}

/// Infer a signature. Never fails.
pub fn infer(request: &SignatureRequest<'_>, overrides: &SignatureOverrides) -> Signature {
    let raw = infer_from_docstring(request.doc, request.runtime_name)
        .or_else(|| constructor_override(request, overrides))
        .or_else(|| {
            overrides
                .signatures
                .get(request.name)
                .map(|text| parse_override(text))
        })
        .unwrap_or_else(|| match request.class_name {
            Some(_) => RawSignature::new(heuristics::method_args(request.name)),
            None => RawSignature::new(heuristics::GENERIC_ARGS),
        });

    let mut signature = Signature::from_raw(&raw, request.receiver);
    if request.class_name.is_some() && request.name == INITIALIZER {
        signature.return_type = NONE.to_string();
        // An allocator rendered as initializer still names its class receiver.
        if request.runtime_name == ALLOCATOR
            && signature
                .params
                .first()
                .is_some_and(|p| p.name == Receiver::Class.name())
        {
            signature.params.remove(0);
        }
    }
    signature
}

fn constructor_override(
    request: &SignatureRequest<'_>,
    overrides: &SignatureOverrides,
) -> Option<RawSignature> {
    if !request.is_constructor() || overrides.signatures.contains_key(request.name) {
        return None;
    }
    overrides
        .class_signatures
        .get(request.class_name?)
        .map(|text| parse_override(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(sig: &Signature, name: &str) -> String {
        sig.render_def(name, "m", &mut ImportSet::new())
    }

    #[test]
    fn test_docstring_round_trip() {
        let request = SignatureRequest::function("f", Some("f(a: int, b: str) -> bool"));
        let sig = infer(&request, &SignatureOverrides::default());

        assert_eq!(
            sig.params,
            vec![Param::typed("a", "int"), Param::typed("b", "str")]
        );
        assert_eq!(sig.return_type, "bool");
        assert_eq!(sig.receiver, None);
    }

    #[test]
    fn test_undocumented_function_is_generic() {
        let sig = infer(
            &SignatureRequest::function("f", None),
            &SignatureOverrides::default(),
        );
        assert_eq!(render(&sig, "f"), "def f(*args, **kwargs) -> Any: ...");
    }

    #[test]
    fn test_undocumented_equality_takes_other() {
        let request = SignatureRequest::member("__eq__", None, "Point", Some(Receiver::Instance));
        let sig = infer(&request, &SignatureOverrides::default());

        assert_eq!(sig.params, vec![Param::named("other")]);
        assert_eq!(render(&sig, "__eq__"), "def __eq__(self, other) -> Any: ...");
    }

    #[test]
    fn test_receiver_is_elided_and_unannotated() {
        let doc = "scale(self: m.Point, factor: float) -> m.Point";
        let request = SignatureRequest::member("scale", Some(doc), "Point", Some(Receiver::Instance));
        let sig = infer(&request, &SignatureOverrides::default());

        assert_eq!(sig.params, vec![Param::typed("factor", "float")]);
        assert_eq!(
            render(&sig, "scale"),
            "def scale(self, factor: float) -> Point: ..."
        );
    }

    #[test]
    fn test_receiver_only_docstring() {
        let request = SignatureRequest::member(
            "norm",
            Some("norm(self) -> float"),
            "Point",
            Some(Receiver::Instance),
        );
        let sig = infer(&request, &SignatureOverrides::default());
        assert_eq!(render(&sig, "norm"), "def norm(self) -> float: ...");
    }

    #[test]
    fn test_initializer_always_returns_none() {
        let request = SignatureRequest::member(
            INITIALIZER,
            Some("__init__(self, x: int)"),
            "Point",
            Some(Receiver::Instance),
        );
        let sig = infer(&request, &SignatureOverrides::default());
        assert_eq!(sig.return_type, NONE);
        assert_eq!(render(&sig, INITIALIZER), "def __init__(self, x: int) -> None: ...");
    }

    #[test]
    fn test_class_override_used_for_undocumented_constructor() {
        let overrides = SignatureOverrides::new(
            BTreeMap::new(),
            BTreeMap::from([("Point".to_string(), "(x: float, y: float)".to_string())]),
        );
        let request = SignatureRequest::member(INITIALIZER, None, "Point", Some(Receiver::Instance));
        let sig = infer(&request, &overrides);

        assert_eq!(
            render(&sig, INITIALIZER),
            "def __init__(self, x: float, y: float) -> None: ..."
        );
    }

    #[test]
    fn test_docstring_beats_overrides() {
        let overrides = SignatureOverrides::new(
            BTreeMap::from([("f".to_string(), "(z) -> str".to_string())]),
            BTreeMap::new(),
        );
        let sig = infer(
            &SignatureRequest::function("f", Some("f(a: int) -> int")),
            &overrides,
        );
        assert_eq!(sig.params, vec![Param::typed("a", "int")]);
    }

    #[test]
    fn test_symbol_override_beats_heuristic() {
        let overrides = SignatureOverrides::new(
            BTreeMap::from([("__getitem__".to_string(), "(key: str) -> int".to_string())]),
            BTreeMap::new(),
        );
        let request =
            SignatureRequest::member("__getitem__", None, "Table", Some(Receiver::Instance));
        let sig = infer(&request, &overrides);

        assert_eq!(
            render(&sig, "__getitem__"),
            "def __getitem__(self, key: str) -> int: ..."
        );
    }

    #[test]
    fn test_symbol_override_for_free_function() {
        let overrides = SignatureOverrides::new(
            BTreeMap::from([("f".to_string(), "(a, b)".to_string())]),
            BTreeMap::new(),
        );
        let sig = infer(&SignatureRequest::function("f", None), &overrides);
        assert_eq!(render(&sig, "f"), "def f(a, b) -> Any: ...");
    }

    #[test]
    fn test_defaults_and_generic_annotations() {
        let doc = "pick(items: List[Tuple[int, str]], limit: int=10, strict=True) -> Optional[str]";
        let sig = infer(
            &SignatureRequest::function("pick", Some(doc)),
            &SignatureOverrides::default(),
        );
        assert_eq!(
            render(&sig, "pick"),
            "def pick(items: List[Tuple[int, str]], limit: int = ..., strict=...) -> Optional[str]: ..."
        );
    }

    #[test]
    fn test_foreign_types_collect_imports() {
        let mut imports = ImportSet::new();
        let sig = infer(
            &SignatureRequest::function("load", Some("load(path: os.PathLike) -> m.Table")),
            &SignatureOverrides::default(),
        );
        let line = sig.render_def("load", "m", &mut imports);

        assert_eq!(line, "def load(path: PathLike) -> Table: ...");
        assert_eq!(imports.iter().collect::<Vec<_>>(), vec!["import os"]);
    }

    #[test]
    fn test_docstring_matched_against_runtime_name() {
        let request = SignatureRequest::member(
            INITIALIZER,
            Some("__new__(cls, size: int) -> m.Buffer"),
            "Buffer",
            Some(Receiver::Instance),
        )
        .with_runtime_name(ALLOCATOR);
        let sig = infer(&request, &SignatureOverrides::default());

        assert_eq!(render(&sig, INITIALIZER), "def __init__(self, size: int) -> None: ...");
    }
}
