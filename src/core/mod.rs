pub mod client;
pub mod decode;
pub mod encode;

pub use crate::domain::model::{Artifact, CqlSubmission, ElmArtifacts, RawResponse};
pub use crate::domain::ports::Transport;
pub use crate::utils::error::Result;
