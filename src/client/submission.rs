use std::time::Duration;

use crate::client::credentials::Credentials;
use crate::core::error::VerifactuError;
use crate::core::{ComputerSystem, FiscalIdentifier, RecordRef};
use crate::queries::QueryFilter;
use crate::responses::{QueryResponse, SubmissionResponse};
use crate::xml::{encode_query, encode_submission, parse_query_response, parse_submission_response, SubmissionHeader};

const SOAP_PATH: &str = "/wlpl/TIKE-CONT/ws/SistemaFacturacion/VerifactuSOAP";

/// Which AEAT environment a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// `www1.agenciatributaria.gob.es` — the live production endpoint.
    Production,
    /// `prewww1.aeat.es` — AEAT's pre-production testing endpoint.
    Testing,
}

impl Environment {
    fn base_host(&self) -> &'static str {
        match self {
            Self::Production => "www1.agenciatributaria.gob.es",
            Self::Testing => "prewww1.aeat.es",
        }
    }

    fn url(&self) -> String {
        format!("https://{}{SOAP_PATH}", self.base_host())
    }
}

/// A synchronous, mTLS-authenticated client for AEAT's VERI*FACTU SOAP endpoint.
pub struct SubmissionClient {
    http: reqwest::blocking::Client,
    url: String,
}

impl SubmissionClient {
    pub fn new(environment: Environment, credentials: Credentials) -> Result<Self, VerifactuError> {
        let identity = credentials.into_identity()?;
        let http = reqwest::blocking::Client::builder()
            .identity(identity)
            .use_native_tls()
            .build()
            .map_err(|e| VerifactuError::TransportError(format!("could not build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: environment.url(),
        })
    }

    /// Submit a batch of records (`sum:RegFactuSistemaFacturacion`).
    pub fn submit(
        &self,
        header: &SubmissionHeader,
        system: &ComputerSystem,
        records: &[RecordRef],
    ) -> Result<SubmissionResponse, VerifactuError> {
        let request_body = encode_submission(header, system, records)?;
        tracing::debug!(records = records.len(), "submitting batch to AEAT");
        let response_body = self.post(&request_body, system, Duration::from_secs(30))?;
        parse_submission_response(&response_body)
    }

    /// Query previously submitted records (`con:ConsultaFactuSistemaFacturacion`).
    pub fn query(
        &self,
        taxpayer: &FiscalIdentifier,
        representative: Option<&FiscalIdentifier>,
        filter: &QueryFilter,
        system: &ComputerSystem,
    ) -> Result<QueryResponse, VerifactuError> {
        filter.validate()?;
        let request_body = encode_query(taxpayer, representative, filter)?;
        tracing::debug!(period = %filter.period.ejercicio(), "querying AEAT");
        let response_body = self.post(&request_body, system, Duration::from_secs(60))?;
        parse_query_response(&response_body)
    }

    fn post(&self, body: &str, system: &ComputerSystem, timeout: Duration) -> Result<String, VerifactuError> {
        let user_agent = format!("Mozilla/5.0 (compatible; {}/{})", system.name(), system.version());
        let response = self
            .http
            .post(&self.url)
            .timeout(timeout)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("User-Agent", user_agent)
            .body(body.to_string())
            .send()
            .map_err(|e| {
                tracing::warn!(error = %e, "AEAT request failed");
                VerifactuError::TransportError(e.to_string())
            })?;

        response
            .text()
            .map_err(|e| VerifactuError::TransportError(format!("could not read response body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_and_testing_urls_differ() {
        assert_ne!(Environment::Production.url(), Environment::Testing.url());
        assert!(Environment::Production.url().starts_with("https://www1."));
        assert!(Environment::Testing.url().starts_with("https://prewww1."));
    }
}
