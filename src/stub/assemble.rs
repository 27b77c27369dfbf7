//! Final layout of a module stub.

use once_cell::sync::Lazy;
use regex::Regex;

use super::StubBlock;
use crate::resolve::ImportSet;

/// Generic typing helpers that trigger the aggregated `typing` import.
pub const TYPING_MARKERS: &[&str] = &["Any", "Dict", "List", "Optional", "Tuple", "Union"];

static MARKER_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    TYPING_MARKERS
        .iter()
        .map(|name| {
            let pattern = format!(r"\b{}\b", regex::escape(name));
            (*name, Regex::new(&pattern).expect("valid regex"))
        })
        .collect()
});

/// Lay out imports, constants, functions and classes.
///
/// A blank line separates the preamble (imports and constants) from the
/// functions, and each class from a preceding non-blank line.
pub fn assemble(
    imports: &ImportSet,
    constants: &[String],
    functions: &[String],
    classes: &[StubBlock],
) -> Vec<String> {
    let mut output: Vec<String> = imports.iter().map(str::to_string).collect();
    output.extend(constants.iter().cloned());

    if !output.is_empty() && !functions.is_empty() {
        output.push(String::new());
    }
    output.extend(functions.iter().cloned());

    for class in classes {
        if output.last().is_some_and(|line| !line.is_empty()) {
            output.push(String::new());
        }
        output.extend(class.iter().cloned());
    }
    output
}

/// Prefix `from typing import ...` naming exactly the markers used.
pub fn add_typing_import(lines: Vec<String>) -> Vec<String> {
    let used: Vec<&str> = MARKER_PATTERNS
        .iter()
        .filter(|(_, pattern)| lines.iter().any(|line| pattern.is_match(line)))
        .map(|(name, _)| *name)
        .collect();

    if used.is_empty() {
        return lines;
    }

    let mut output = Vec::with_capacity(lines.len() + 2);
    output.push(format!("from typing import {}", used.join(", ")));
    output.push(String::new());
    output.extend(lines);
    output
}
