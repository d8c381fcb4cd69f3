pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpTransport;
pub use core::client::TranslationClient;
pub use domain::model::{Artifact, CqlSubmission, ElmArtifacts, RawResponse, TranslationRequest};
pub use utils::error::{Result, TranslationError};
