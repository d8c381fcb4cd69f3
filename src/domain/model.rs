use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Compiled ELM output for one translation unit. Opaque JSON: callers
/// interpret the internal structure (e.g. `library.identifier`), the client
/// only recognizes the envelope.
pub type Artifact = serde_json::Value;

/// A CQL submission with a distinguished main library plus named includes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CqlSubmission {
    pub main: String,
    #[serde(default)]
    pub libraries: HashMap<String, String>,
}

/// What the caller asked to translate.
#[derive(Debug, Clone)]
pub enum TranslationRequest {
    /// One unnamed source text, sent verbatim as the request body.
    Single(String),
    /// Named units, one multipart part each. Names are correlation keys,
    /// never positions.
    Batch(HashMap<String, String>),
}

/// Encoded outbound request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedRequest {
    Raw {
        body: String,
        content_type: &'static str,
        accept: &'static str,
    },
    /// `(name, source)` pairs. The transport's multipart builder frames them
    /// and generates the boundary token.
    Multipart { parts: Vec<(String, String)> },
}

/// The only thing consumed from the transport collaborator.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// Decoded result of a main-plus-libraries submission. A unit the service
/// produced no output for simply has no entry (`main: None`, or a missing
/// library key); absence is the failure signal, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElmArtifacts {
    pub main: Option<Artifact>,
    #[serde(default)]
    pub libraries: HashMap<String, Artifact>,
}
