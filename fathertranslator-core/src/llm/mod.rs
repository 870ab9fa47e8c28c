//! # LLM Integration Layer
//!
//! Both supported providers expose the same OpenAI-compatible
//! `POST {api_host}/chat/completions` endpoint, so there is a single wire
//! format and a single transport:
//!
//! - [`types`]: request body and stream-chunk shapes
//! - [`sse`]: incremental line decoding of the streamed response
//! - [`client`]: the [`ChatTransport`] seam and its `reqwest` implementation
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use fathertranslator_core::llm::{ChatTransport, HttpTransport, decode_stream};
//! use fathertranslator_core::llm::types::{ChatCompletionRequest, ChatMessage};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new();
//!     let body = ChatCompletionRequest {
//!         model: "gpt-4o-mini".to_string(),
//!         messages: vec![ChatMessage::user("Say hi")],
//!         temperature: 0.7,
//!         top_p: 1.0,
//!         presence_penalty: 0.0,
//!         frequency_penalty: 0.0,
//!         stream: true,
//!     };
//!
//!     let stream = transport
//!         .open_stream("https://api.openai.com/v1/chat/completions", "sk-...", &body)
//!         .await?;
//!     let chunks: Vec<_> = stream.filter_map(|c| async move { c.ok() }).collect().await;
//!     println!("{}", decode_stream(chunks).text());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod sse;
pub mod types;

pub use client::{ByteStream, ChatTransport, HttpTransport, TransportError};
pub use sse::{DecodedStream, LineBuffer, LineOutcome, decode_stream, parse_line};
pub use types::{ChatCompletionChunk, ChatCompletionRequest, ChatMessage, MessageRole};
