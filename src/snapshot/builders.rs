//! Constructors for the common runtime value shapes.
//!
//! These mirror what a dumper reports for each kind of object, so tests and
//! embedding code can assemble snapshots without writing JSON by hand.

use super::{Ancestor, RuntimeValue, TypeInfo};
use std::collections::BTreeMap;

const OBJECT: &str = "builtins.object";

impl RuntimeValue {
    /// A module-level native function.
    pub fn builtin_function(doc: Option<&str>) -> Self {
        Self {
            type_name: "builtin_function_or_method".into(),
            callable: true,
            builtin: true,
            doc: doc.map(str::to_string),
            ..Self::default()
        }
    }

    /// An instance method descriptor found in a type's namespace.
    pub fn method(doc: Option<&str>) -> Self {
        Self {
            type_name: "method_descriptor".into(),
            callable: true,
            method_descriptor: true,
            doc: doc.map(str::to_string),
            ..Self::default()
        }
    }

    /// A slot wrapper such as `__add__` or `__init__` on a native type.
    pub fn slot_wrapper(doc: Option<&str>) -> Self {
        Self {
            type_name: "wrapper_descriptor".into(),
            callable: true,
            method_descriptor: true,
            doc: doc.map(str::to_string),
            ..Self::default()
        }
    }

    /// A class-level method descriptor.
    pub fn class_method(doc: Option<&str>) -> Self {
        Self {
            type_name: "classmethod_descriptor".into(),
            callable: true,
            method_descriptor: true,
            doc: doc.map(str::to_string),
            ..Self::default()
        }
    }

    /// A builtin bound to a type, as `__new__` appears on native types.
    pub fn type_bound_builtin(doc: Option<&str>) -> Self {
        Self {
            bound_to_type: true,
            ..Self::builtin_function(doc)
        }
    }

    pub fn property(doc: Option<&str>, writable: bool) -> Self {
        Self {
            type_name: "getset_descriptor".into(),
            data_descriptor: true,
            has_getter: true,
            has_setter: writable,
            doc: doc.map(str::to_string),
            ..Self::default()
        }
    }

    /// A plain data value of the given runtime type.
    pub fn constant(type_name: &str) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn module() -> Self {
        Self {
            type_name: "module".into(),
            is_module: true,
            ..Self::default()
        }
    }

    /// A type deriving directly from `object`.
    pub fn type_object(module: &str, name: &str) -> Self {
        let ancestor = Ancestor {
            module: module.into(),
            name: name.into(),
            mro: vec![format!("{module}.{name}"), OBJECT.into()],
        };
        Self::type_with_mro(module, name, vec![ancestor, Ancestor::object()])
    }

    /// A type with an explicit resolution order (the type itself first).
    pub fn type_with_mro(module: &str, name: &str, mro: Vec<Ancestor>) -> Self {
        Self {
            type_name: "type".into(),
            callable: true,
            doc: None,
            type_info: Some(TypeInfo {
                module: module.into(),
                name: name.into(),
                mro,
                members: BTreeMap::new(),
            }),
            ..Self::default()
        }
    }

    /// Add a member to a type value. No-op on non-type values.
    pub fn with_type_member(mut self, name: impl Into<String>, value: RuntimeValue) -> Self {
        if let Some(info) = self.type_info.as_mut() {
            info.members.insert(name.into(), value);
        }
        self
    }
}

impl Ancestor {
    /// The universal root.
    pub fn object() -> Self {
        Self {
            module: "builtins".into(),
            name: "object".into(),
            mro: vec![OBJECT.into()],
        }
    }

    /// Ancestor entry whose own resolution order is `[self, parents...]`.
    pub fn new(module: &str, name: &str, parents: &[&str]) -> Self {
        let mut mro = vec![format!("{module}.{name}")];
        mro.extend(parents.iter().map(|p| p.to_string()));
        Self {
            module: module.into(),
            name: name.into(),
            mro,
        }
    }
}
