// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use serde::Deserialize;
use std::marker::PhantomData;
use std::time::Duration;
use storefront_app::{ApiError, CollectionClient, Resource};
use tracing::debug;
use url::Url;

/// Connection settings shared by every collection of one shop API.
#[derive(Debug, Clone)]
pub struct ShopApi {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl ShopApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        validate_base_url(&base_url)?;

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn collection<R: Resource>(&self) -> HttpCollection<R> {
        HttpCollection {
            api: self.clone(),
            _resource: PhantomData,
        }
    }
}

/// Checks that `raw` is an absolute http(s) URL usable as the API root.
pub fn validate_base_url(raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        bail!("api.base_url must not be empty -- set it to the shop API root, for example http://localhost:8080/api");
    }
    let parsed = Url::parse(raw).with_context(|| {
        format!("api.base_url {raw:?} is not a valid URL -- use an absolute http(s) URL")
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "api.base_url {raw:?} uses scheme {:?}; only http and https are supported",
            parsed.scheme()
        );
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        bail!("api.base_url {raw:?} must not contain a query string or fragment");
    }
    Ok(())
}

/// `{base}/{resource}/{action}_{resource}.php` endpoints of one collection.
pub struct HttpCollection<R> {
    api: ShopApi,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> HttpCollection<R> {
    pub fn endpoint(&self, action: &str) -> String {
        let resource = R::KIND.as_str();
        format!(
            "{}/{resource}/{action}_{resource}.php",
            self.api.base_url
        )
    }

    fn send(&self, url: &str, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request
            .send()
            .map_err(|error| transport_error(url, self.api.timeout, error))?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "shop API responded");
        let body = response
            .text()
            .map_err(|error| transport_error(url, self.api.timeout, error))?;
        if !status.is_success() {
            return Err(clean_error_response(status, &body));
        }
        Ok(body)
    }

    fn write(&self, action: &str, body: &impl serde::Serialize) -> Result<String, ApiError> {
        let url = self.endpoint(action);
        debug!(%url, "POST");
        let body = self.send(&url, self.api.http.post(&url).json(body))?;
        parse_write_response(&body)
    }
}

impl<R: Resource> CollectionClient<R> for HttpCollection<R> {
    fn list(&mut self) -> Result<Vec<R>, ApiError> {
        let url = self.endpoint("get");
        debug!(%url, "GET");
        let body = self.send(&url, self.api.http.get(&url))?;

        let mut envelope: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&body).map_err(ApiError::malformed)?;
        let key = R::KIND.as_str();
        let items = envelope
            .remove(key)
            .ok_or_else(|| ApiError::malformed(format!("list response has no `{key}` key")))?;
        serde_json::from_value(items).map_err(ApiError::malformed)
    }

    fn create(&mut self, input: &R::Input) -> Result<String, ApiError> {
        self.write("add", input)
    }

    fn update(&mut self, record: &R) -> Result<String, ApiError> {
        self.write("update", record)
    }

    fn delete(&mut self, id: R::Id) -> Result<String, ApiError> {
        self.write("delete", &serde_json::json!({ "id": id }))
    }
}

#[derive(Debug, Default, Deserialize)]
struct WriteResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// The PHP scripts answer 200 even when they refuse a write, flagging it
/// with `"status": "error"` instead.
fn parse_write_response(body: &str) -> Result<String, ApiError> {
    if body.trim().is_empty() {
        return Ok(String::new());
    }
    let parsed: WriteResponse = serde_json::from_str(body).map_err(ApiError::malformed)?;
    let message = parsed.message.unwrap_or_default();
    let refused = parsed
        .status
        .as_deref()
        .is_some_and(|status| status.eq_ignore_ascii_case("error"));
    if refused || parsed.error.is_some() {
        let detail = parsed
            .error
            .filter(|error| !error.is_empty())
            .unwrap_or(message);
        return Err(ApiError::server(None, detail));
    }
    Ok(message)
}

fn transport_error(url: &str, timeout: Duration, error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        return ApiError::network(url, format!("timed out after {}ms", timeout.as_millis()));
    }
    ApiError::network(url, error)
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
    error: Option<String>,
}

fn clean_error_response(status: StatusCode, body: &str) -> ApiError {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(detail) = parsed
            .message
            .filter(|message| !message.is_empty())
            .or(parsed.error.filter(|error| !error.is_empty()))
    {
        return ApiError::server(Some(status.as_u16()), detail);
    }

    let trimmed = body.trim();
    if trimmed.len() < 100 && !trimmed.contains('<') && !trimmed.contains('{') {
        return ApiError::server(Some(status.as_u16()), trimmed);
    }

    ApiError::server(Some(status.as_u16()), "")
}
