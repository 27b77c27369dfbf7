use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::generate::GenerateOptions;
use crate::signature::SignatureOverrides;

/// Root configuration structure for nativestub
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StubgenConfig {
    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,

    /// Signature overrides keyed by function or member name
    #[serde(default)]
    pub signatures: BTreeMap<String, String>,

    /// Constructor signature overrides keyed by class name
    #[serde(default)]
    pub class_signatures: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Prepend the provenance header
    #[serde(default = "default_header")]
    pub header: bool,

    /// Directory stubs are written under
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            directory: None,
        }
    }
}

pub fn default_header() -> bool {
    true
}

/// Default output directory, matching stubgen's convention
pub fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

impl StubgenConfig {
    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }

    pub fn overrides(&self) -> SignatureOverrides {
        SignatureOverrides::new(self.signatures.clone(), self.class_signatures.clone())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output()
            .directory
            .unwrap_or_else(default_output_dir)
    }

    /// Generation options, with `no_header` taking precedence over the file
    pub fn generate_options(&self, no_header: bool) -> GenerateOptions {
        GenerateOptions {
            add_header: self.output().header && !no_header,
            overrides: self.overrides(),
        }
    }
}
