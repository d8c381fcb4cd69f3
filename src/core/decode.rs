use crate::core::encode::MAIN_UNIT;
use crate::domain::model::{Artifact, ElmArtifacts, RawResponse};
use crate::utils::error::{Result, TranslationError};
use std::collections::HashMap;

const BOUNDARY_PARAM: &str = "boundary=";
const DISPOSITION_HEADER: &str = "content-disposition";
const NAME_PARAM: &str = "name=\"";

/// Extracts the multipart boundary token from a content-type header value,
/// e.g. `multipart/form-data;boundary=Boundary_1` -> `Boundary_1`. Only a
/// `;`-separated parameter whose key is exactly `boundary` counts; the token
/// runs to the next `;` or the end of the header. A missing header or
/// missing parameter yields `None`: the degenerate no-parts case, not an
/// error.
fn extract_boundary(content_type: Option<&str>) -> Option<String> {
    let header = content_type?;
    for param in header.split(';') {
        let token = match param.trim().strip_prefix(BOUNDARY_PARAM) {
            Some(rest) => rest.trim(),
            None => continue,
        };
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }
    None
}

/// Scans a part's lines for `Content-Disposition: form-data; name="..."` and
/// returns the quoted name. Header name matched case-insensitively; only a
/// `;`-separated parameter whose key is exactly `name` counts, so a
/// `filename="..."` parameter is never misread as the unit name.
fn part_name(segment: &str) -> Option<&str> {
    for line in segment.lines() {
        let (header, value) = match line.split_once(':') {
            Some(pair) => pair,
            None => continue,
        };
        if !header.trim().eq_ignore_ascii_case(DISPOSITION_HEADER) {
            continue;
        }
        for param in value.split(';') {
            let after = match param.trim().strip_prefix(NAME_PARAM) {
                Some(rest) => rest,
                None => continue,
            };
            if let Some(end) = after.find('"') {
                return Some(&after[..end]);
            }
        }
    }
    None
}

/// The candidate JSON span of a part: first `{` through last `}`. Textual
/// recovery, not a tokenizer; whether the span parses is decided by
/// serde_json afterwards.
fn json_span(segment: &str) -> Option<&str> {
    let start = segment.find('{')?;
    let end = segment.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&segment[start..=end])
}

/// Splits the response body on the literal `--token` delimiter and recovers
/// every part that carries both a disposition name and a parseable JSON
/// span. Malformed segments contribute nothing; the closing `--token--` line
/// leaves a nameless trailing segment that is dropped the same way. The
/// delimiter is matched as a literal string, never compiled into a pattern.
fn decode_parts(response: &RawResponse) -> Vec<(String, Artifact)> {
    let Some(token) = extract_boundary(response.content_type.as_deref()) else {
        tracing::debug!("No multipart boundary in response content-type, yielding no parts");
        return Vec::new();
    };
    let delimiter = format!("--{token}");

    let mut parts = Vec::new();
    for segment in response.body.split(delimiter.as_str()) {
        let Some(name) = part_name(segment) else {
            continue;
        };
        let Some(span) = json_span(segment) else {
            tracing::debug!("Part '{}' has no JSON span, skipping", name);
            continue;
        };
        match serde_json::from_str::<Artifact>(span) {
            Ok(artifact) => parts.push((name.to_string(), artifact)),
            Err(e) => tracing::debug!("Part '{}' is not valid JSON, skipping: {}", name, e),
        }
    }
    parts
}

/// Batch decode for a main-plus-libraries submission: the part named `main`
/// fills the distinguished slot, every other named part lands in the
/// libraries map. Status-agnostic best-effort scan; a unit the service
/// rejected simply never shows up.
pub fn decode_main_and_libraries(response: &RawResponse) -> ElmArtifacts {
    let mut result = ElmArtifacts::default();
    for (name, artifact) in decode_parts(response) {
        if name == MAIN_UNIT {
            result.main = Some(artifact);
        } else {
            result.libraries.insert(name, artifact);
        }
    }
    result
}

/// Uniform batch decode: every named part into one flat map, no
/// distinguished slot.
pub fn decode_flat_batch(response: &RawResponse) -> HashMap<String, Artifact> {
    decode_parts(response).into_iter().collect()
}

/// Single-unit decode: the whole body is one JSON document. The service
/// answers 400 for compile diagnostics but still ships the ELM; a non-2xx
/// body that carries the artifact envelope is therefore a success, anything
/// else surfaces the status.
pub fn decode_single(response: &RawResponse) -> Result<Artifact> {
    if is_success(response.status) {
        return Ok(serde_json::from_str(&response.body)?);
    }

    if let Ok(artifact) = serde_json::from_str::<Artifact>(&response.body) {
        if has_artifact_envelope(&artifact) {
            tracing::debug!(
                "Status {} response still carries an ELM artifact, treating as success",
                response.status
            );
            return Ok(artifact);
        }
    }

    Err(TranslationError::ServiceStatus {
        status: response.status,
        detail: truncate_detail(&response.body),
    })
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// A top-level `library` object with an `identifier` key, the shape every
/// ELM document starts with.
fn has_artifact_envelope(value: &Artifact) -> bool {
    value
        .get("library")
        .map_or(false, |library| library.get("identifier").is_some())
}

fn truncate_detail(body: &str) -> String {
    const MAX_DETAIL: usize = 200;
    if body.len() <= MAX_DETAIL {
        return body.to_string();
    }
    let mut end = MAX_DETAIL;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
