//! Generation entry point: snapshot in, stub file out.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span};

use crate::errors::{Result, StubgenError};
use crate::signature::SignatureOverrides;
use crate::snapshot::ModuleSnapshot;
use crate::stub::render_module_stub;

pub const STUB_EXTENSION: &str = "pyi";

/// Caller-controlled generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Prepend the provenance comment naming the source module.
    pub add_header: bool,
    pub overrides: SignatureOverrides,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            add_header: true,
            overrides: SignatureOverrides::default(),
        }
    }
}

/// Provenance comment written above generated content.
pub fn header(module: &str, python_version: Option<&str>) -> String {
    let title = match python_version {
        Some(version) => format!("# Stubs for {module} (Python {version})"),
        None => format!("# Stubs for {module}"),
    };
    format!(
        "{title}\n#\n# NOTE: This dynamically typed stub was automatically generated by stubgen.\n\n"
    )
}

/// Render the complete stub text for a native module.
pub fn render_stub(snapshot: &ModuleSnapshot, options: &GenerateOptions) -> Result<String> {
    if !snapshot.is_native() {
        return Err(StubgenError::NotNativeModule {
            module: snapshot.name.clone(),
        });
    }

    let mut text = String::new();
    if options.add_header {
        text.push_str(&header(&snapshot.name, snapshot.python_version.as_deref()));
    }
    for line in render_module_stub(snapshot, &options.overrides) {
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}

/// Generate the stub for `snapshot` into `target`.
///
/// The precondition is checked and the text fully rendered before the target
/// is opened; missing parent directories are created.
pub fn generate_stub(
    snapshot: &ModuleSnapshot,
    target: &Path,
    options: &GenerateOptions,
) -> Result<()> {
    let _span = info_span!("generate", module = %snapshot.name).entered();
    let text = render_stub(snapshot, options)?;

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            debug!(dir = %parent.display(), "creating output directory");
            fs::create_dir_all(parent).map_err(|e| StubgenError::io(parent, e))?;
        }
    }

    let file = File::create(target).map_err(|e| StubgenError::io(target, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| StubgenError::io(target, e))?;
    writer.flush().map_err(|e| StubgenError::io(target, e))?;

    info!(path = %target.display(), bytes = text.len(), "wrote stub");
    Ok(())
}

/// Conventional stub location: `pkg.sub` becomes `<out>/pkg/sub.pyi`, or
/// `<out>/pkg/sub/__init__.pyi` for packages.
pub fn stub_path(out_dir: &Path, snapshot: &ModuleSnapshot) -> PathBuf {
    let mut path = out_dir.to_path_buf();
    path.extend(snapshot.name.split('.'));
    if snapshot.is_package {
        path.push(format!("__init__.{STUB_EXTENSION}"));
    } else {
        path.set_extension(STUB_EXTENSION);
    }
    path
}
