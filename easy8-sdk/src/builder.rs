// ABOUTME: Builder pattern implementation for Easy8Client configuration
// ABOUTME: Validates the base URL and wires the default reqwest transport

use crate::Easy8Client;
use crate::constants::{timeouts, urls};
use crate::error::Easy8Error;
use crate::transport::{ReqwestTransport, Transport};
use secrecy::SecretString;
use std::time::Duration;
use typed_builder::TypedBuilder;
use url::Url;

#[derive(TypedBuilder)]
#[builder(build_method(into = Result<Easy8Client, Easy8Error>))]
pub struct Easy8ClientConfig {
    pub api_key: SecretString,

    #[builder(default = urls::DEFAULT_BASE_URL.to_string(), setter(into))]
    pub base_url: String,

    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    /// Replaces the reqwest transport, mainly for tests
    #[builder(default, setter(strip_option))]
    pub transport: Option<Box<dyn Transport>>,
}

impl From<Easy8ClientConfig> for Result<Easy8Client, Easy8Error> {
    fn from(config: Easy8ClientConfig) -> Self {
        Easy8Client::from_config(config)
    }
}

impl Easy8Client {
    pub fn builder() -> Easy8ClientConfigBuilder<((), (), (), ())> {
        Easy8ClientConfig::builder()
    }

    pub fn from_config(config: Easy8ClientConfig) -> Result<Self, Easy8Error> {
        let base_url = Self::validate_base_url(&config.base_url)?;

        let transport = match config.transport {
            Some(transport) => transport,
            None => Box::new(ReqwestTransport::new(config.timeout)?),
        };

        Ok(Self {
            base_url,
            api_key: config.api_key,
            transport,
        })
    }

    /// Parse the base URL and strip trailing slashes so paths can be appended.
    pub fn validate_base_url(base_url: &str) -> Result<String, Easy8Error> {
        let trimmed = base_url.trim().trim_end_matches('/');

        let parsed = Url::parse(trimmed)
            .map_err(|e| Easy8Error::Configuration(format!("Invalid base URL: {}", e)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(trimmed.to_string()),
            scheme => Err(Easy8Error::Configuration(format!(
                "Unsupported base URL scheme: {}",
                scheme
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use std::time::Duration;

    fn api_key() -> SecretString {
        SecretString::new("test-api-key".to_string().into_boxed_str())
    }

    #[test]
    fn test_builder_with_minimal_config() {
        let client = Easy8Client::builder().api_key(api_key()).build().unwrap();

        assert_eq!(client.base_url(), urls::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_with_all_options() {
        let client_result = Easy8Client::builder()
            .api_key(api_key())
            .base_url("https://redmine.example.com/")
            .timeout(Duration::from_secs(60))
            .build();

        assert!(client_result.is_ok());
        assert_eq!(
            client_result.unwrap().base_url(),
            "https://redmine.example.com"
        );
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let result = Easy8Client::builder()
            .api_key(api_key())
            .base_url("not-a-url")
            .build();

        match result {
            Err(Easy8Error::Configuration(msg)) => {
                assert!(msg.contains("Invalid base URL"));
            }
            _ => panic!("Expected configuration error"),
        }
    }

    #[test]
    fn test_builder_rejects_unsupported_scheme() {
        let result = Easy8Client::validate_base_url("ftp://redmine.example.com");

        assert!(matches!(result, Err(Easy8Error::Configuration(_))));
    }

    #[test]
    fn test_config_uses_secrecy_for_sensitive_data() {
        let key = api_key();
        let debug_str = format!("{:?}", key);
        assert!(!debug_str.contains("test-api-key"));
    }

    #[test]
    fn test_validate_base_url_keeps_path_prefix() {
        assert_eq!(
            Easy8Client::validate_base_url("https://example.com/redmine//").unwrap(),
            "https://example.com/redmine"
        );
    }
}
