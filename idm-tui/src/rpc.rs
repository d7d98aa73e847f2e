//! JSON-RPC client for the identity backend.
//!
//! Every call is a POST of `{"method", "params": [args, options], "id"}`; the
//! backend answers with `{"result", "error", "id"}`. Multi-entry reads go
//! through the `batch` command.

use crate::config::{AuthConfig, TuiConfig};
use crate::model::{is_host_group_selectable, HostGroup, HostGroupPage, IdView};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, COOKIE, REFERER};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum RpcClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{name} ({code}): {message}")]
    Remote {
        code: i64,
        name: String,
        message: String,
    },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl RpcClientError {
    /// Text suitable for an alert.
    pub fn user_message(&self) -> String {
        match self {
            RpcClientError::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteError {
    pub code: i64,
    #[serde(default)]
    pub name: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: Option<T>,
    error: Option<RemoteError>,
}

#[derive(Debug, Deserialize)]
struct FindResult<T> {
    result: Vec<T>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct ShowResult<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct BatchResult<T> {
    results: Vec<BatchItem<T>>,
}

#[derive(Debug, Deserialize)]
struct BatchItem<T> {
    result: Option<T>,
    error: Option<String>,
    error_code: Option<i64>,
    error_name: Option<String>,
}

/// Build the request body for `method`. The API version is always added to
/// the options.
pub fn request_body(method: &str, args: Vec<Value>, mut options: Map<String, Value>, api_version: &str) -> Value {
    options.insert("version".to_string(), Value::String(api_version.to_string()));
    json!({
        "method": method,
        "params": [args, options],
        "id": 0,
    })
}

pub fn decode_envelope<T: DeserializeOwned>(text: &str) -> Result<T, RpcClientError> {
    let envelope: Envelope<T> = serde_json::from_str(text)?;
    if let Some(error) = envelope.error {
        return Err(RpcClientError::Remote {
            code: error.code,
            name: error.name,
            message: error.message,
        });
    }
    envelope
        .result
        .ok_or_else(|| RpcClientError::InvalidResponse("response has neither result nor error".to_string()))
}

fn unwrap_batch<T>(batch: BatchResult<T>) -> Result<Vec<T>, RpcClientError> {
    let mut entries = Vec::with_capacity(batch.results.len());
    for item in batch.results {
        if let Some(message) = item.error {
            return Err(RpcClientError::Remote {
                code: item.error_code.unwrap_or_default(),
                name: item.error_name.unwrap_or_default(),
                message,
            });
        }
        if let Some(result) = item.result {
            entries.push(result);
        }
    }
    Ok(entries)
}

/// Slice `[start, stop)` of `keys`, clamped to the available range.
pub fn page_slice<T>(keys: &[T], start: usize, stop: usize) -> &[T] {
    let start = start.min(keys.len());
    let stop = stop.clamp(start, keys.len());
    &keys[start..stop]
}

/// Lay fetched entries over the page in order. Entries without a key were
/// never fetched and stay as found.
fn merge_fetched(entries: &[HostGroup], fetched: Vec<HostGroup>) -> Vec<HostGroup> {
    let mut fetched = fetched.into_iter();
    entries
        .iter()
        .map(|entry| {
            if is_host_group_selectable(entry) {
                fetched.next().unwrap_or_else(|| entry.clone())
            } else {
                entry.clone()
            }
        })
        .collect()
}

fn options(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[derive(Clone)]
pub struct RpcClient {
    client: reqwest::Client,
    url: String,
    api_version: String,
    headers: HeaderMap,
}

impl RpcClient {
    pub fn new(config: &TuiConfig) -> Result<Self, RpcClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let url = config.rpc_url.trim().to_string();
        let headers = build_headers(&config.auth, &url)?;
        Ok(Self {
            client,
            url,
            api_version: config.api_version.clone(),
            headers,
        })
    }

    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        args: Vec<Value>,
        options: Map<String, Value>,
    ) -> Result<T, RpcClientError> {
        let body = request_body(method, args, options, &self.api_version);
        let started = Instant::now();
        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if !status.is_success() {
            warn!(method, status = status.as_u16(), elapsed_ms, "rpc call rejected");
            return Err(RpcClientError::InvalidResponse(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text
            )));
        }
        let decoded = decode_envelope(&text);
        match &decoded {
            Ok(_) => debug!(method, elapsed_ms, "rpc call"),
            Err(err) => warn!(method, elapsed_ms, error = %err, "rpc call failed"),
        }
        decoded
    }

    /// Keys of every host group matching `search`.
    pub async fn find_host_group_keys(&self, search: &str) -> Result<Vec<HostGroup>, RpcClientError> {
        let found: FindResult<HostGroup> = self
            .call(
                "hostgroup_find",
                vec![Value::String(search.to_string())],
                options(&[("pkey_only", json!(true)), ("sizelimit", json!(0))]),
            )
            .await?;
        if found.truncated {
            warn!(search, "host group search truncated by the server");
        }
        Ok(found.result)
    }

    pub async fn fetch_host_groups(&self, keys: &[String]) -> Result<Vec<HostGroup>, RpcClientError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let commands: Vec<Value> = keys
            .iter()
            .map(|cn| json!({ "method": "hostgroup_show", "params": [[cn], {}] }))
            .collect();
        let batch: BatchResult<HostGroup> = self.call("batch", commands, Map::new()).await?;
        unwrap_batch(batch)
    }

    /// Rows `[start, stop)` of the host groups matching `search`.
    pub async fn host_group_page(
        &self,
        search: &str,
        start: usize,
        stop: usize,
    ) -> Result<HostGroupPage, RpcClientError> {
        let all = self.find_host_group_keys(search).await?;
        let entries = page_slice(&all, start, stop);
        let page_keys: Vec<String> = entries
            .iter()
            .filter(|group| is_host_group_selectable(group))
            .map(|group| group.cn.clone())
            .collect();
        let fetched = self.fetch_host_groups(&page_keys).await?;
        let rows = merge_fetched(entries, fetched);
        let total_count = all.len();
        let universe = all.into_iter().filter(is_host_group_selectable).collect();
        Ok(HostGroupPage {
            rows,
            universe,
            total_count,
        })
    }

    pub async fn add_host_group(&self, cn: &str, description: Option<&str>) -> Result<HostGroup, RpcClientError> {
        let mut opts = Map::new();
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            opts.insert("description".to_string(), json!(description));
        }
        let added: ShowResult<HostGroup> = self
            .call("hostgroup_add", vec![json!(cn)], opts)
            .await?;
        Ok(added.result)
    }

    pub async fn delete_host_groups(&self, keys: &[String]) -> Result<(), RpcClientError> {
        let _: Value = self
            .call("hostgroup_del", vec![json!(keys)], Map::new())
            .await?;
        Ok(())
    }

    pub async fn show_id_view(&self, cn: &str) -> Result<IdView, RpcClientError> {
        let shown: ShowResult<IdView> = self
            .call("idview_show", vec![json!(cn)], options(&[("all", json!(true))]))
            .await?;
        Ok(shown.result)
    }

    pub async fn save_id_view(
        &self,
        cn: &str,
        modified: Map<String, Value>,
    ) -> Result<IdView, RpcClientError> {
        let saved: ShowResult<IdView> = self.call("idview_mod", vec![json!(cn)], modified).await?;
        Ok(saved.result)
    }
}

fn build_headers(auth: &AuthConfig, url: &str) -> Result<HeaderMap, RpcClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        REFERER,
        HeaderValue::from_str(url).map_err(|e| RpcClientError::Config(e.to_string()))?,
    );
    headers.insert(
        HeaderName::from_static("accept"),
        HeaderValue::from_static("application/json"),
    );
    if let Some(cookie) = &auth.session_cookie {
        headers.insert(
            COOKIE,
            HeaderValue::from_str(cookie).map_err(|e| RpcClientError::Config(e.to_string()))?,
        );
    }
    if let Some(token) = &auth.bearer_token {
        let value = format!("Bearer {}", token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&value).map_err(|e| RpcClientError::Config(e.to_string()))?,
        );
    }
    Ok(headers)
}
