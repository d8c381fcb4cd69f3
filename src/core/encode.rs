use crate::domain::model::{EncodedRequest, TranslationRequest};

pub const CQL_CONTENT_TYPE: &str = "application/cql";
pub const ELM_ACCEPT: &str = "application/elm+json";

/// Reserved unit name for the primary submission in a main-plus-libraries
/// batch.
pub const MAIN_UNIT: &str = "main";

/// Builds the outbound request. Single mode passes the source through
/// byte-for-byte with the CQL/ELM media types; batch mode lists one part per
/// unit, names carried verbatim (no sanitizing or escaping; a name that
/// breaks multipart framing is a caller error).
pub fn encode(request: &TranslationRequest) -> EncodedRequest {
    match request {
        TranslationRequest::Single(source) => EncodedRequest::Raw {
            body: source.clone(),
            content_type: CQL_CONTENT_TYPE,
            accept: ELM_ACCEPT,
        },
        TranslationRequest::Batch(units) => {
            let mut parts: Vec<(String, String)> = units
                .iter()
                .filter(|(name, _)| name.as_str() != MAIN_UNIT)
                .map(|(name, source)| (name.clone(), source.clone()))
                .collect();
            // Library parts first, main last. Order is not load-bearing on
            // the wire (names correlate), but this matches the service's
            // expected submission shape.
            if let Some(main) = units.get(MAIN_UNIT) {
                parts.push((MAIN_UNIT.to_string(), main.clone()));
            }
            EncodedRequest::Multipart { parts }
        }
    }
}
