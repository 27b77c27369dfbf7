use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{load_config, load_config_from, StubgenConfig};
use crate::generate::{generate_stub, render_stub, stub_path, GenerateOptions};
use crate::snapshot::ModuleSnapshot;

pub struct GenerateConfig {
    pub snapshots: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub no_header: bool,
    pub stdout: bool,
    pub config: Option<PathBuf>,
}

/// Resolve settings: explicit config file, else discovered, else defaults
fn resolve_settings(config: &GenerateConfig) -> Result<StubgenConfig> {
    match &config.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(load_config(None)),
    }
}

/// Generate stubs for every snapshot in the order given.
///
/// Stops at the first failure; stubs already written are left in place.
pub fn handle_generate(config: GenerateConfig) -> Result<()> {
    let settings = resolve_settings(&config)?;
    let options = settings.generate_options(config.no_header);
    let out_dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| settings.output_dir());

    for path in &config.snapshots {
        generate_one(path, &out_dir, config.stdout, &options)
            .with_context(|| format!("generating stub for {}", path.display()))?;
    }

    Ok(())
}

fn generate_one(
    path: &Path,
    out_dir: &Path,
    to_stdout: bool,
    options: &GenerateOptions,
) -> Result<()> {
    let snapshot = ModuleSnapshot::load(path)?;

    if to_stdout {
        let text = render_stub(&snapshot, options)?;
        let mut out = std::io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()?;
    } else {
        let target = stub_path(out_dir, &snapshot);
        generate_stub(&snapshot, &target, options)?;
        println!("Generated {}", target.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RuntimeValue;
    use std::fs;
    use tempfile::TempDir;

    fn write_snapshot(dir: &TempDir, snapshot: &ModuleSnapshot) -> PathBuf {
        let path = dir.path().join(format!("{}.json", snapshot.name));
        fs::write(&path, serde_json::to_string(snapshot).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_generate_writes_stub_under_output_dir() {
        let temp = TempDir::new().unwrap();
        let snapshot = ModuleSnapshot::new("pkg._native")
            .with_file("/site/pkg/_native.so")
            .with_member("answer", RuntimeValue::builtin_function(Some("answer() -> int")));
        let input = write_snapshot(&temp, &snapshot);
        let out = temp.path().join("typings");

        handle_generate(GenerateConfig {
            snapshots: vec![input],
            output_dir: Some(out.clone()),
            no_header: true,
            stdout: false,
            config: None,
        })
        .unwrap();

        let written = fs::read_to_string(out.join("pkg/_native.pyi")).unwrap();
        assert_eq!(written, "def answer() -> int: ...\n");
    }

    #[test]
    fn test_generate_applies_explicit_config_overrides() {
        let temp = TempDir::new().unwrap();
        let snapshot = ModuleSnapshot::new("m")
            .with_member("scale", RuntimeValue::builtin_function(None));
        let input = write_snapshot(&temp, &snapshot);
        let config_path = temp.path().join("stubs.toml");
        fs::write(
            &config_path,
            "[output]\nheader = false\n\n[signatures]\nscale = \"(factor: float) -> None\"\n",
        )
        .unwrap();
        let out = temp.path().join("out");

        handle_generate(GenerateConfig {
            snapshots: vec![input],
            output_dir: Some(out.clone()),
            no_header: false,
            stdout: false,
            config: Some(config_path),
        })
        .unwrap();

        let written = fs::read_to_string(out.join("m.pyi")).unwrap();
        assert_eq!(written, "def scale(factor: float) -> None: ...\n");
    }

    #[test]
    fn test_generate_fails_for_source_module() {
        let temp = TempDir::new().unwrap();
        let snapshot = ModuleSnapshot::new("pure").with_file("pure.py");
        let input = write_snapshot(&temp, &snapshot);

        let result = handle_generate(GenerateConfig {
            snapshots: vec![input],
            output_dir: Some(temp.path().join("out")),
            no_header: false,
            stdout: false,
            config: None,
        });

        assert!(result.is_err());
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_failure_names_the_snapshot() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("absent.json");

        let err = handle_generate(GenerateConfig {
            snapshots: vec![missing.clone()],
            output_dir: Some(temp.path().join("out")),
            no_header: false,
            stdout: false,
            config: None,
        })
        .unwrap_err();

        let message = format!("{:#}", err);
        assert!(
            message.starts_with(&format!("generating stub for {}", missing.display())),
            "{message}"
        );
        assert!(message.contains("I/O error on"), "{message}");
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let temp = TempDir::new().unwrap();
        let result = handle_generate(GenerateConfig {
            snapshots: vec![],
            output_dir: None,
            no_header: false,
            stdout: true,
            config: Some(temp.path().join("absent.toml")),
        });
        assert!(result.is_err());
    }
}
