//! HTTP Geolocation Provider
//!
//! Implements GeoProvider over a JSON "who am I" endpoint such as
//! ipapi.co or ip-api.com.

use crate::domain::errors::ProviderError;
use crate::domain::ports::GeoProvider;
use crate::domain::value_objects::CountryCode;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;

/// Default per-call timeout for provider requests.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Response schema a provider speaks.
///
/// Providers disagree on the country field name and on how they
/// report a failed lookup, so each schema carries its own success rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSchema {
    /// `{"country_code": "CN"}`; failure is `{"error": true, "reason": "..."}`.
    IpApiCo,
    /// `{"status": "success", "countryCode": "CN"}`; failure is
    /// `{"status": "fail", "message": "..."}`.
    IpApiCom,
}

impl ResponseSchema {
    /// Extract the country code from a response body.
    pub fn extract(&self, provider: &str, body: &str) -> Result<CountryCode, ProviderError> {
        match self {
            ResponseSchema::IpApiCo => {
                #[derive(Debug, Deserialize)]
                struct IpApiCoResp {
                    #[serde(default)]
                    error: bool,
                    reason: Option<String>,
                    country_code: Option<String>,
                }

                let resp: IpApiCoResp = decode(provider, body)?;
                if resp.error {
                    return Err(ProviderError::Rejected {
                        provider: provider.to_string(),
                        reason: resp.reason.unwrap_or_else(|| "unspecified".to_string()),
                    });
                }
                country_or_missing(provider, resp.country_code)
            }
            ResponseSchema::IpApiCom => {
                #[derive(Debug, Deserialize)]
                struct IpApiComResp {
                    status: Option<String>,
                    message: Option<String>,
                    #[serde(rename = "countryCode")]
                    country_code: Option<String>,
                }

                let resp: IpApiComResp = decode(provider, body)?;
                if let Some(status) = &resp.status {
                    if !status.eq_ignore_ascii_case("success") {
                        return Err(ProviderError::Rejected {
                            provider: provider.to_string(),
                            reason: resp.message.unwrap_or_else(|| status.clone()),
                        });
                    }
                }
                country_or_missing(provider, resp.country_code)
            }
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(provider: &str, body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Decode {
        provider: provider.to_string(),
        message: e.to_string(),
    })
}

fn country_or_missing(provider: &str, raw: Option<String>) -> Result<CountryCode, ProviderError> {
    raw.as_deref()
        .and_then(CountryCode::parse)
        .ok_or_else(|| ProviderError::MissingCountry {
            provider: provider.to_string(),
        })
}

/// A provider endpoint: where to call and how to read the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub schema: ResponseSchema,
}

impl Endpoint {
    pub fn new(url: impl Into<String>, schema: ResponseSchema) -> Self {
        Self {
            url: url.into(),
            schema,
        }
    }
}

/// reqwest-backed geolocation provider.
pub struct HttpGeoProvider {
    name: String,
    endpoint: Endpoint,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpGeoProvider {
    /// Create a provider with its own client bounded by `timeout`.
    pub fn new(name: impl Into<String>, endpoint: Endpoint, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            name: name.into(),
            endpoint,
            timeout,
            client,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout {
                provider: self.name.clone(),
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            ProviderError::Network {
                provider: self.name.clone(),
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl GeoProvider for HttpGeoProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn lookup(&self) -> Result<CountryCode, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::HttpStatus {
                provider: self.name.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let country = self.endpoint.schema.extract(&self.name, &body)?;

        tracing::debug!(provider = %self.name, country = %country, "provider answered");
        Ok(country)
    }
}
