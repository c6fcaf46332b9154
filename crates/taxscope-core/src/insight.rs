use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{Value, json};

use crate::config::InsightConfig;
use crate::error::{Result, TaxScopeError};
use crate::models::TaxRecord;

/// What callers see for any transport or model failure. Causes are never
/// distinguishable from the returned text; the request log keeps the detail.
pub const GENERIC_FAILURE_TEXT: &str = "AI system error.";

/// Client for the external text-generation endpoint.
#[derive(Clone)]
pub struct InsightClient {
    config: InsightConfig,
    http: Client,
}

impl std::fmt::Debug for InsightClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightClient")
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl InsightClient {
    /// Fails with a configuration error when no credential is present; the
    /// network is never touched in that case.
    pub fn new(config: InsightConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            TaxScopeError::MissingCredential("TAXSCOPE_API_KEY is not set".to_string())
        })?;

        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&api_key)
            .map_err(|e| TaxScopeError::Validation(format!("invalid TAXSCOPE_API_KEY: {e}")))?;
        headers.insert("x-goog-api-key", value);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self { config, http })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn commentary(&self, record: &TaxRecord) -> Result<String> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": build_prompt(record) }]
            }]
        });

        let resp = self
            .http
            .post(self.config.resolved_endpoint())
            .json(&body)
            .send()?;
        if !resp.status().is_success() {
            return Err(TaxScopeError::Transport(format!(
                "insight request failed with status {}",
                resp.status()
            )));
        }

        let value = resp.json::<Value>()?;
        extract_commentary_text(&value).ok_or_else(|| {
            TaxScopeError::Internal("insight response carried no text content".to_string())
        })
    }
}

fn build_prompt(record: &TaxRecord) -> String {
    format!(
        "You are a tax-office analyst. In a short paragraph, comment on this \
         business record: name {name}, tax id {tax_id}, managing authority \
         {authority}, {invoices} invoices issued, accrued VAT {tax_amount}, \
         cumulative gross revenue {total_amount}. Plain text only.",
        name = record.name,
        tax_id = record.tax_id,
        authority = record.authority_code,
        invoices = record.invoice_count,
        tax_amount = record.tax_amount,
        total_amount = record.total_amount,
    )
}

/// Pull the commentary text out of whichever response shape the endpoint
/// answered with: Gemini's `candidates` array, an OpenAI-style `choices`
/// array, a bare `message.content`, or a plain `response` string.
#[must_use]
pub fn extract_commentary_text(value: &Value) -> Option<String> {
    if let Some(content) = value
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
    {
        let joined = content
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("");
        if !joined.is_empty() {
            return Some(joined);
        }
    }
    if let Some(content) = value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
    {
        return Some(content.to_string());
    }
    if let Some(content) = value
        .pointer("/message/content")
        .and_then(Value::as_str)
    {
        return Some(content.to_string());
    }
    if let Some(content) = value.get("response").and_then(Value::as_str) {
        return Some(content.to_string());
    }
    None
}
