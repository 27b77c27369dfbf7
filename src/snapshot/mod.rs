//! Runtime snapshot of a loaded native module.
//!
//! A snapshot is the JSON image of a module's runtime object model as seen
//! by an external dumper running inside the target interpreter. It exposes
//! exactly what the generator is allowed to observe: the symbol table and,
//! for each value, a handful of capability flags plus its documentation text.
//!
//! Nothing here interprets the flags. Interpretation lives in
//! [`crate::classify`].

mod builders;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::StubgenError;

/// File extensions of compiled extension modules.
const NATIVE_EXTENSIONS: &[&str] = &["so", "pyd"];

/// A loaded module, enumerated by symbol name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSnapshot {
    /// Fully qualified module name (`pkg._native`).
    pub name: String,
    /// Path the module was loaded from, if the runtime reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Interpreter version the dump was taken with (`3.7`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python_version: Option<String>,
    #[serde(default)]
    pub is_package: bool,
    /// Symbol table. `BTreeMap` keeps enumeration sorted by name.
    #[serde(default)]
    pub members: BTreeMap<String, RuntimeValue>,
}

/// One value reachable from a module or type namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeValue {
    /// Name of the value's runtime type (`method_descriptor`, `int`, ...).
    pub type_name: String,
    pub callable: bool,
    /// A native function object.
    pub builtin: bool,
    /// A builtin whose receiver is a type rather than a module.
    pub bound_to_type: bool,
    pub method_descriptor: bool,
    pub data_descriptor: bool,
    pub has_getter: bool,
    pub has_setter: bool,
    pub is_module: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Present iff the value is itself a type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_info: Option<TypeInfo>,
}

/// The type-specific half of a runtime value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeInfo {
    pub module: String,
    pub name: String,
    /// Ancestor-resolution order, most specific first, including the type itself.
    pub mro: Vec<Ancestor>,
    pub members: BTreeMap<String, RuntimeValue>,
}

/// An entry of a type's resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ancestor {
    pub module: String,
    pub name: String,
    /// This ancestor's own resolution order as qualified names.
    pub mro: Vec<String>,
}

impl Ancestor {
    pub fn qualified_name(&self) -> String {
        if self.module.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.module, self.name)
        }
    }

    /// True when `self` appears in `other`'s resolution order.
    ///
    /// A type counts as its own ancestor.
    pub fn is_ancestor_of(&self, other: &Ancestor) -> bool {
        let qualified = self.qualified_name();
        qualified == other.qualified_name() || other.mro.iter().any(|name| *name == qualified)
    }
}

impl ModuleSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: None,
            python_version: None,
            is_package: false,
            members: BTreeMap::new(),
        }
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Read and parse a snapshot file.
    pub fn load(path: &Path) -> Result<Self, StubgenError> {
        let contents = fs::read_to_string(path).map_err(|e| StubgenError::io(path, e))?;
        Self::from_json(&contents).map_err(|e| StubgenError::Snapshot {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Whether this module was built from native code.
    ///
    /// Modules without a reported file (statically linked into the
    /// interpreter) count as native.
    pub fn is_native(&self) -> bool {
        match &self.file {
            None => true,
            Some(file) => Path::new(file)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| NATIVE_EXTENSIONS.contains(&ext)),
        }
    }

    pub fn with_member(mut self, name: impl Into<String>, value: RuntimeValue) -> Self {
        self.members.insert(name.into(), value);
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_python_version(mut self, version: impl Into<String>) -> Self {
        self.python_version = Some(version.into());
        self
    }
}
