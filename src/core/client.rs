use crate::adapters::http::HttpTransport;
use crate::core::{decode, encode};
use crate::domain::model::{Artifact, CqlSubmission, ElmArtifacts, TranslationRequest};
use crate::domain::ports::Transport;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::time::Duration;

/// Client façade for the translation service: encode, one POST, decode.
/// Holds no per-call state, so a single instance can serve concurrent calls.
pub struct TranslationClient<T: Transport = HttpTransport> {
    url: String,
    transport: T,
}

impl TranslationClient<HttpTransport> {
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            url: service_url.into(),
            transport: HttpTransport::new(),
        }
    }

    pub fn with_timeout(service_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            url: service_url.into(),
            transport: HttpTransport::with_timeout(timeout)?,
        })
    }
}

impl<T: Transport> TranslationClient<T> {
    pub fn with_transport(service_url: impl Into<String>, transport: T) -> Self {
        Self {
            url: service_url.into(),
            transport,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Translates one bare CQL source text to a single ELM artifact. Fails on
    /// transport errors and on non-2xx statuses, except the documented
    /// diagnostic-with-artifact case, which is returned as a success.
    pub async fn convert_basic_cql(&self, cql: &str) -> Result<Artifact> {
        tracing::debug!("Posting single CQL unit to {}", self.url);
        let request = TranslationRequest::Single(cql.to_string());
        let response = self.transport.post(&self.url, encode::encode(&request)).await?;
        tracing::debug!("Translation response status: {}", response.status);
        decode::decode_single(&response)
    }

    /// Translates a main library plus named includes. Never fails for
    /// per-unit compile failures: a unit without output is absent from the
    /// result, and `main` is `None` when the primary unit produced nothing.
    pub async fn convert_cql(&self, submission: &CqlSubmission) -> Result<ElmArtifacts> {
        tracing::debug!(
            "Posting main CQL unit with {} libraries to {}",
            submission.libraries.len(),
            self.url
        );
        let mut units = submission.libraries.clone();
        units.insert(encode::MAIN_UNIT.to_string(), submission.main.clone());

        let request = TranslationRequest::Batch(units);
        let response = self.transport.post(&self.url, encode::encode(&request)).await?;
        tracing::debug!("Translation response status: {}", response.status);

        let result = decode::decode_main_and_libraries(&response);
        tracing::debug!(
            "Decoded main: {}, libraries: {}",
            result.main.is_some(),
            result.libraries.len()
        );
        Ok(result)
    }

    /// Translates a uniform batch of named units into a flat name-keyed map.
    /// Missing keys signal per-unit failures.
    pub async fn convert_batch(
        &self,
        units: &HashMap<String, String>,
    ) -> Result<HashMap<String, Artifact>> {
        tracing::debug!("Posting batch of {} CQL units to {}", units.len(), self.url);
        let request = TranslationRequest::Batch(units.clone());
        let response = self.transport.post(&self.url, encode::encode(&request)).await?;
        tracing::debug!("Translation response status: {}", response.status);
        Ok(decode::decode_flat_batch(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{EncodedRequest, RawResponse};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Records the encoded request and replays a canned response.
    struct StubTransport {
        seen: Arc<Mutex<Option<EncodedRequest>>>,
        response: RawResponse,
    }

    impl StubTransport {
        fn new(response: RawResponse) -> Self {
            Self {
                seen: Arc::new(Mutex::new(None)),
                response,
            }
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn post(&self, _url: &str, request: EncodedRequest) -> Result<RawResponse> {
            *self.seen.lock().await = Some(request);
            Ok(self.response.clone())
        }
    }

    fn elm_body(id: &str) -> String {
        json!({ "library": { "identifier": { "id": id, "version": "1" } } }).to_string()
    }

    #[tokio::test]
    async fn basic_conversion_sends_raw_cql() {
        let transport = StubTransport::new(RawResponse {
            status: 200,
            content_type: Some("application/elm+json".to_string()),
            body: elm_body("mCODEResources"),
        });
        let seen = transport.seen.clone();
        let client = TranslationClient::with_transport("http://svc", transport);

        let artifact = client
            .convert_basic_cql("library mCODEResources version '1'")
            .await
            .unwrap();

        assert_eq!(artifact["library"]["identifier"]["id"], "mCODEResources");
        let request = seen.lock().await.take().unwrap();
        match request {
            EncodedRequest::Raw {
                body,
                content_type,
                accept,
            } => {
                assert_eq!(body, "library mCODEResources version '1'");
                assert_eq!(content_type, "application/cql");
                assert_eq!(accept, "application/elm+json");
            }
            other => panic!("expected raw encoding, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn submission_adds_main_as_the_last_part() {
        let body = format!(
            "--B1\r\nContent-Disposition: form-data; name=\"main\"\r\n\r\n{}\r\n--B1--",
            elm_body("mCODEResources")
        );
        let transport = StubTransport::new(RawResponse {
            status: 200,
            content_type: Some("multipart/form-data;boundary=B1".to_string()),
            body,
        });
        let seen = transport.seen.clone();
        let client = TranslationClient::with_transport("http://svc", transport);

        let submission = CqlSubmission {
            main: "library mCODEResources version '1'".to_string(),
            libraries: HashMap::from([(
                "ex1".to_string(),
                "library example version '2'".to_string(),
            )]),
        };
        let result = client.convert_cql(&submission).await.unwrap();

        assert!(result.main.is_some());
        let request = seen.lock().await.take().unwrap();
        match request {
            EncodedRequest::Multipart { parts } => {
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[0].0, "ex1");
                assert_eq!(parts[1].0, "main");
            }
            other => panic!("expected multipart encoding, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn batch_conversion_returns_flat_map() {
        let body = format!(
            "--B1\r\nContent-Disposition: form-data; name=\"ex1\"\r\n\r\n{}\r\n--B1--",
            elm_body("example")
        );
        let transport = StubTransport::new(RawResponse {
            status: 200,
            content_type: Some("multipart/form-data;boundary=B1".to_string()),
            body,
        });
        let client = TranslationClient::with_transport("http://svc", transport);

        let units = HashMap::from([
            ("ex1".to_string(), "library example version '2'".to_string()),
            ("ex2".to_string(), "library other version '3'".to_string()),
        ]);
        let result = client.convert_batch(&units).await.unwrap();

        // ex2 produced no part: missing key, not an error.
        assert_eq!(result.len(), 1);
        assert_eq!(result["ex1"]["library"]["identifier"]["id"], "example");
    }
}
