//! Configuration for stub generation.
//!
//! Settings come from `.nativestub.toml`, found by walking up from the current
//! directory or named explicitly on the command line. Command-line flags take
//! precedence over file values.

mod core;
mod loader;

pub use core::{default_header, default_output_dir, OutputConfig, StubgenConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config, CONFIG_FILE_NAME,
};
