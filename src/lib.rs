// Export modules for library usage
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod generate;
pub mod resolve;
pub mod signature;
pub mod snapshot;
pub mod stub;

// Re-export commonly used types
pub use crate::classify::{classify, Category, PropertyAccess, ValueType};

pub use crate::config::{load_config, load_config_from, StubgenConfig};

pub use crate::errors::{Result, StubgenError};

pub use crate::generate::{generate_stub, header, render_stub, stub_path, GenerateOptions};

pub use crate::signature::{infer, Signature, SignatureOverrides, SignatureRequest};

pub use crate::snapshot::{Ancestor, ModuleSnapshot, RuntimeValue, TypeInfo};

pub use crate::stub::render_module_stub;
