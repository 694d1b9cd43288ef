/*
 * This file is part of ilofan.
 *
 * Copyright (C) 2025 ilofan contributors
 *
 * ilofan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * ilofan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with ilofan. If not, see <https://www.gnu.org/licenses/>.
 */

//! Client for the fan controller REST API.
//!
//! Three calls, all blocking with a short fixed timeout. The controller speaks
//! loosely-typed JSON; everything is coerced into bounded percentages here so
//! the rest of the program only ever sees `u8` values in `0..=100`.

use std::num::IntErrorKind;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:1234";

/// Per-request timeout, connect included
pub const REQUEST_TIMEOUT_SECS: u64 = 3;

pub const FANS_PATH: &str = "/api/fans";
pub const UNLOCK_PATH: &str = "/api/fans/unlock";

/// Operations the control panel needs from the controller.
///
/// No retries happen behind any of these.
#[cfg_attr(test, mockall::automock)]
pub trait FanApi {
    /// Current fan-block percentages, at least one entry, each in `0..=100`
    fn fetch_fans(&self) -> ApiResult<Vec<u8>>;

    /// Request the given fan-block percentages
    fn push_fans(&self, values: &[u8]) -> ApiResult<()>;

    /// Lift the controller's global fan lock
    fn unlock(&self) -> ApiResult<()>;
}

pub fn clamp_percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// Validate a `{"fans": [...]}` body and coerce every entry to a percentage.
pub fn parse_fans_body(body: &Value) -> ApiResult<Vec<u8>> {
    let obj = body
        .as_object()
        .ok_or_else(|| ApiError::malformed("expected a JSON object"))?;
    let raw = match obj.get("fans").and_then(Value::as_array) {
        Some(list) if !list.is_empty() => list,
        _ => return Err(ApiError::EmptyFanList),
    };
    Ok(raw.iter().map(|v| clamp_percent(coerce_entry(v))).collect())
}

// Upstream may forward Redfish fan objects instead of bare numbers.
fn coerce_entry(value: &Value) -> i64 {
    match value {
        Value::Object(map) => map.get("CurrentReading").and_then(coerce_scalar),
        other => coerce_scalar(other),
    }
    .unwrap_or(0)
}

fn coerce_scalar(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(v) => Some(v),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Some(i64::MAX),
                IntErrorKind::NegOverflow => Some(i64::MIN),
                _ => None,
            },
        },
        _ => None,
    }
}

/// Parse and check a controller base URL. Only http(s) makes sense here.
pub fn validate_base_url(raw: &str) -> ApiResult<Url> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

#[derive(Serialize)]
struct FansPayload {
    fans: Vec<u8>,
}

/// `FanApi` over HTTP using a blocking reqwest client.
pub struct HttpFanClient {
    base_url: String,
    client: Client,
}

impl HttpFanClient {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        validate_base_url(&base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(map_transport_error)?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl FanApi for HttpFanClient {
    fn fetch_fans(&self) -> ApiResult<Vec<u8>> {
        let resp = self
            .client
            .get(self.url(FANS_PATH))
            .send()
            .map_err(map_transport_error)?;
        let body: Value = check_status(resp)?
            .json()
            .map_err(|e| ApiError::malformed(error_chain(&e)))?;
        parse_fans_body(&body)
    }

    fn push_fans(&self, values: &[u8]) -> ApiResult<()> {
        let payload = FansPayload {
            fans: values.iter().map(|v| (*v).min(100)).collect(),
        };
        let resp = self
            .client
            .post(self.url(FANS_PATH))
            .json(&payload)
            .send()
            .map_err(map_transport_error)?;
        check_status(resp).map(|_| ())
    }

    fn unlock(&self) -> ApiResult<()> {
        let resp = self
            .client
            .post(self.url(UNLOCK_PATH))
            .send()
            .map_err(map_transport_error)?;
        check_status(resp).map(|_| ())
    }
}

fn check_status(resp: Response) -> ApiResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    // Error bodies look like {"message": "..."} when the service produced them
    let body = resp.text().unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    Err(ApiError::status(status.as_u16(), message))
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(REQUEST_TIMEOUT_SECS)
    } else if err.is_decode() {
        ApiError::malformed(error_chain(&err))
    } else {
        ApiError::network(error_chain(&err))
    }
}

// reqwest hides the interesting part ("Connection refused") in the source chain
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}
