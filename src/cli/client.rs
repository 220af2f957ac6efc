use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::Method;
use serde_json::Value;
use url::Url;

/// Thin JSON client for the catalog API.
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid API URL '{}'", base_url))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("invalid API URL '{}'", base_url);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { base, http })
    }

    /// Base URL plus `segments`, each percent-encoded as a single path segment.
    pub fn endpoint(&self, segments: &[&str]) -> anyhow::Result<Url> {
        if let Some(bad) = segments.iter().find(|s| s.is_empty() || **s == "." || **s == "..") {
            anyhow::bail!("invalid path segment '{}'", bad);
        }

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("invalid API URL '{}'", self.base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send one request. Non-2xx answers become errors carrying the server's message;
    /// an empty success body comes back as `Value::Null`.
    pub async fn request(&self, method: Method, segments: &[&str], body: Option<&Value>) -> anyhow::Result<Value> {
        let url = self.endpoint(segments)?;
        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("{} {} failed", method, url))?;
        let status = response.status();
        let text = response.text().await?;
        let value = parse_body(&text);

        if status.is_success() {
            Ok(value)
        } else {
            Err(anyhow!("{} ({})", error_message(&value), status))
        }
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn error_message(body: &Value) -> String {
    match body {
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Value::String(text) => text.clone(),
        Value::Null => "request failed".to_string(),
        other => other.to_string(),
    }
}
