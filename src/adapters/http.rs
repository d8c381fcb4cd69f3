use crate::domain::model::{EncodedRequest, RawResponse};
use crate::domain::ports::Transport;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::Client;
use std::time::Duration;

/// reqwest-backed transport. Multipart framing and boundary generation are
/// reqwest's; the Content-Type it computes (boundary included) goes out
/// verbatim.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, request: EncodedRequest) -> Result<RawResponse> {
        let builder = match request {
            EncodedRequest::Raw {
                body,
                content_type,
                accept,
            } => self
                .client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .header(reqwest::header::ACCEPT, accept)
                .body(body),
            EncodedRequest::Multipart { parts } => {
                let mut form = Form::new();
                for (name, source) in parts {
                    form = form.text(name, source);
                }
                self.client.post(url).multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        // reqwest header lookup is case-insensitive already.
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
