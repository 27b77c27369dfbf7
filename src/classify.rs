//! Symbol classification.
//!
//! Every capability probe against a [`RuntimeValue`] happens here. Rendering
//! code matches on [`Category`] and never inspects flags directly.

use crate::snapshot::RuntimeValue;
use serde::Serialize;

/// Runtime type names of callables that are class-level.
const CLASS_METHOD_TYPES: &[&str] = &["classmethod", "classmethod_descriptor"];

/// Runtime type names of the callable shapes used by instance members.
const METHOD_TYPES: &[&str] = &["method_descriptor", "wrapper_descriptor", "method-wrapper"];

/// Constant types that survive into the stub; anything else becomes `Any`.
const CONSTANT_TYPES: &[&str] = &["int", "str", "bytes", "float", "bool"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Category {
    Function,
    Method,
    ClassMethod,
    Property { access: PropertyAccess },
    Type,
    Value { value_type: ValueType },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyAccess {
    ReadOnly,
    ReadWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// One of the whitelisted builtin constant types.
    Builtin(&'static str),
    Any,
    /// A module object; never re-exported.
    Module,
}

impl ValueType {
    /// Annotation used when the value is declared, `None` for skipped values.
    pub fn annotation(&self) -> Option<&'static str> {
        match self {
            ValueType::Builtin(name) => Some(*name),
            ValueType::Any => Some("Any"),
            ValueType::Module => None,
        }
    }
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Function => "function",
            Category::Method => "method",
            Category::ClassMethod => "classmethod",
            Category::Property { .. } => "property",
            Category::Type => "type",
            Category::Value { .. } => "value",
        }
    }
}

/// Classify a runtime value. First matching rule wins.
pub fn classify(value: &RuntimeValue) -> Category {
    if is_free_function(value) {
        Category::Function
    } else if is_class_method(value) {
        Category::ClassMethod
    } else if is_method(value) {
        Category::Method
    } else if is_property(value) {
        let access = if value.has_setter {
            PropertyAccess::ReadWrite
        } else {
            PropertyAccess::ReadOnly
        };
        Category::Property { access }
    } else if value.type_info.is_some() {
        Category::Type
    } else {
        Category::Value {
            value_type: value_type(value),
        }
    }
}

fn is_free_function(value: &RuntimeValue) -> bool {
    value.builtin && !value.bound_to_type
}

fn is_class_method(value: &RuntimeValue) -> bool {
    let invocable = value.callable || value.builtin;
    invocable
        && (value.bound_to_type || CLASS_METHOD_TYPES.contains(&value.type_name.as_str()))
}

fn is_method(value: &RuntimeValue) -> bool {
    value.type_info.is_none()
        && (value.method_descriptor || METHOD_TYPES.contains(&value.type_name.as_str()))
}

fn is_property(value: &RuntimeValue) -> bool {
    value.data_descriptor && value.has_getter
}

fn value_type(value: &RuntimeValue) -> ValueType {
    if value.is_module {
        return ValueType::Module;
    }
    CONSTANT_TYPES
        .iter()
        .find(|name| **name == value.type_name)
        .map(|name| ValueType::Builtin(*name))
        .unwrap_or(ValueType::Any)
}

/// Names framed as `__name__`.
pub fn is_dunder(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}
