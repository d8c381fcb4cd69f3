use crate::utils::error::{Result, TranslationError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(TranslationError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(TranslationError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(TranslationError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(validate_url("url", "http://localhost:8080/cql/translator").is_ok());
        assert!(validate_url("url", "https://translator.example.org/cql").is_ok());
    }

    #[test]
    fn rejects_empty_and_non_http_urls() {
        assert!(validate_url("url", "").is_err());
        assert!(validate_url("url", "ftp://example.org").is_err());
        assert!(validate_url("url", "not a url").is_err());
    }
}
