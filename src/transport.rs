use crate::cache::{CachedResponse, ResponseCache};
use crate::errors::ClientError;
use reqwest::{Client, Method, multipart};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart {
        field: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self, payload: &impl Serialize) -> Result<Self, ClientError> {
        let value = serde_json::to_value(payload)
            .map_err(|err| ClientError::validation(format!("invalid request body: {err}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.body = RequestBody::Multipart {
            field: field.into(),
            file_name: file_name.into(),
            bytes,
        };
        self
    }

    /// Identity of the request for cache lookups: method, path and query.
    pub fn cache_key(&self) -> String {
        let mut key = format!("{} {}", self.method, self.path);
        for (index, (name, value)) in self.query.iter().enumerate() {
            key.push(if index == 0 { '?' } else { '&' });
            key.push_str(name);
            key.push('=');
            key.push_str(value);
        }
        key
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// Anything that can carry an [`ApiRequest`] to the backend.
///
/// Implementations return `Err` with [`crate::errors::ErrorKind::Transport`]
/// when no response was received, and a status error for non-2xx answers.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
    cache: Option<ResponseCache>,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: None,
        })
    }

    /// Records every successful GET body in `cache`, the way a browser keeps
    /// what normal page loading fetched.
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart {
                field,
                file_name,
                bytes,
            } => {
                let part = multipart::Part::bytes(bytes.clone()).file_name(file_name.clone());
                builder.multipart(multipart::Form::new().part(field.clone(), part))
            }
        };

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        debug!(method = %request.method, %url, status = status.as_u16(), "backend response");

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(ClientError::status(status.as_u16(), message));
        }

        let response = ApiResponse {
            status: status.as_u16(),
            body,
        };

        if request.method == Method::GET {
            if let Some(cache) = &self.cache {
                cache
                    .store(request.cache_key(), CachedResponse::from(&response))
                    .await;
            }
        }

        Ok(response)
    }
}
