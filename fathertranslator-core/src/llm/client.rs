use crate::llm::types::ChatCompletionRequest;
use async_stream::try_stream;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;

/// Response body as a stream of raw byte chunks
pub type ByteStream = BoxStream<'static, Result<Bytes, TransportError>>;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Streaming error: {0}")]
    Body(#[source] reqwest::Error),
    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// HTTP status code, when the server answered with a non-success status
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Opens a streaming chat-completion call
///
/// Implementations return once response headers are in: a non-2xx status is
/// reported as [`TransportError::Status`], anything else yields the body.
/// Dropping the returned stream aborts the underlying request.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn open_stream(
        &self,
        endpoint: &str,
        api_key: &str,
        body: &ChatCompletionRequest,
    ) -> Result<ByteStream, TransportError>;
}

/// `reqwest` transport for OpenAI-compatible endpoints
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn open_stream(
        &self,
        endpoint: &str,
        api_key: &str,
        body: &ChatCompletionRequest,
    ) -> Result<ByteStream, TransportError> {
        tracing::debug!(%endpoint, model = %body.model, "opening chat-completion stream");

        let response = self
            .http_client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(TransportError::Request)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        let stream = try_stream! {
            let mut body_stream = response.bytes_stream();
            while let Some(chunk) = body_stream.next().await {
                yield chunk.map_err(TransportError::Body)?;
            }
        };

        Ok(Box::pin(stream))
    }
}
