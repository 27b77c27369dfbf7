//! Signature recovery from documentation text.
//!
//! Native extension generators conventionally start a callable's docstring
//! with its call signature:
//!
//! ```text
//! frobnicate(count: int, label: str=None) -> bool
//!
//! Frobnicates the thing.
//! ```
//!
//! Only the first line is considered, and only when it names the callable.

use once_cell::sync::Lazy;
use regex::Regex;

/// `name(args)` optionally followed by ` -> ReturnType` to end of line.
///
/// Argument characters are limited to what annotated parameter lists use:
/// identifiers, `:` and `=` for annotations and defaults, brackets, commas,
/// spaces and dots for qualified names.
static CALL_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A([A-Za-z_][A-Za-z0-9_]*)\(([a-zA-Z0-9_=:, \[\]\.]*)\)(?: -> ([a-zA-Z].*))?")
        .expect("valid regex")
});

/// Override strings: `(args)` with an optional ` -> ReturnType`.
static BARE_SIGNATURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A\s*\((.*)\)\s*(?:->\s*(.+?))?\s*\z").expect("valid regex"));

/// Google/NumPy style property docs: `<Type>: description`.
static PROPERTY_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A([a-zA-Z0-9_, \.\[\]]*): ").expect("valid regex"));

/// Unparsed argument text plus the return type if one was stated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSignature {
    /// Text between the parentheses.
    pub args: String,
    pub return_type: Option<String>,
}

impl RawSignature {
    pub fn new(args: impl Into<String>) -> Self {
        Self {
            args: args.into(),
            return_type: None,
        }
    }
}

/// Match the leading line of `doc` against `name(...) [-> T]`.
pub fn infer_from_docstring(doc: Option<&str>, name: &str) -> Option<RawSignature> {
    let doc = doc?.trim_start();
    if doc.is_empty() {
        return None;
    }
    let caps = CALL_SIGNATURE.captures(doc)?;
    if &caps[1] != name {
        return None;
    }
    Some(RawSignature {
        args: caps[2].to_string(),
        return_type: caps.get(3).map(|m| m.as_str().trim_end().to_string()),
    })
}

/// Parse a caller-supplied override such as `(a: int, b) -> str`.
///
/// Text without parentheses is taken as a bare argument list.
pub fn parse_override(text: &str) -> RawSignature {
    match BARE_SIGNATURE.captures(text) {
        Some(caps) => RawSignature {
            args: caps[1].to_string(),
            return_type: caps.get(2).map(|m| m.as_str().to_string()),
        },
        None => RawSignature::new(text.trim()),
    }
}

/// Property type from a `<Type>: description` docstring.
pub fn infer_property_type(doc: Option<&str>) -> Option<String> {
    let caps = PROPERTY_TYPE.captures(doc?)?;
    let ty = caps[1].trim();
    (!ty.is_empty()).then(|| ty.to_string())
}

/// Split on `sep` outside of brackets and parentheses.
pub(crate) fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
