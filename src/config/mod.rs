pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "cql-to-elm")]
#[command(about = "Translate CQL libraries to ELM via a translation service")]
pub struct CliConfig {
    /// Translation service endpoint
    #[arg(long, default_value = "http://localhost:8080/cql/translator")]
    pub url: String,

    /// Path to the main CQL library
    pub main: std::path::PathBuf,

    /// Additional library as NAME=PATH (repeatable)
    #[arg(long = "library", value_name = "NAME=PATH")]
    pub libraries: Vec<String>,

    /// Send the main library alone as a bare CQL body
    #[arg(long)]
    pub basic: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("url", &self.url)
    }
}
