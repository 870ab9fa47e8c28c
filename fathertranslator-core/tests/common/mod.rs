#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use fathertranslator_core::config::TranslatorSettings;
use fathertranslator_core::llm::types::ChatCompletionRequest;
use fathertranslator_core::llm::{ByteStream, ChatTransport, TransportError};
use fathertranslator_core::translation::{
    ModelConfig, SessionState, TranslationObserver, TranslationRequest,
};
use futures::StreamExt;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

pub type ChunkSender = mpsc::UnboundedSender<Result<Bytes, TransportError>>;
type ChunkReceiver = mpsc::UnboundedReceiver<Result<Bytes, TransportError>>;

/// Transport whose response bodies are fed by the test, one channel per call
pub struct ChannelTransport {
    bodies: Mutex<VecDeque<ChunkReceiver>>,
    pub requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl ChannelTransport {
    pub fn new(calls: usize) -> (Self, Vec<ChunkSender>) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) =
            (0..calls).map(|_| mpsc::unbounded_channel()).unzip();
        let transport = Self {
            bodies: Mutex::new(receivers),
            requests: Mutex::new(Vec::new()),
        };
        (transport, senders)
    }
}

#[async_trait]
impl ChatTransport for ChannelTransport {
    async fn open_stream(
        &self,
        _endpoint: &str,
        _api_key: &str,
        body: &ChatCompletionRequest,
    ) -> Result<ByteStream, TransportError> {
        self.requests.lock().push(body.clone());
        let receiver = self
            .bodies
            .lock()
            .pop_front()
            .ok_or_else(|| TransportError::Other("no scripted body left".to_string()))?;

        Ok(futures::stream::unfold(receiver, |mut receiver| async move {
            receiver.recv().await.map(|item| (item, receiver))
        })
        .boxed())
    }
}

pub fn delta(content: &str) -> Bytes {
    Bytes::from(format!(
        "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{content}\"}}}}]}}\n\n"
    ))
}

pub fn done() -> Bytes {
    Bytes::from_static(b"data: [DONE]\n\n")
}

/// Observer that records every callback and mirrors progress to a channel
pub struct Recorder {
    pub progress: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
    pub states: Mutex<Vec<SessionState>>,
    pub done: AtomicUsize,
    progress_tx: mpsc::UnboundedSender<String>,
}

impl Recorder {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let recorder = Self {
            progress: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
            states: Mutex::new(Vec::new()),
            done: AtomicUsize::new(0),
            progress_tx,
        };
        (recorder, progress_rx)
    }

    pub fn done_count(&self) -> usize {
        self.done.load(Ordering::SeqCst)
    }
}

impl TranslationObserver for Recorder {
    fn on_progress(&self, cumulative: &str) {
        self.progress.lock().push(cumulative.to_string());
        let _ = self.progress_tx.send(cumulative.to_string());
    }

    fn on_error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }

    fn on_done(&self) {
        self.done.fetch_add(1, Ordering::SeqCst);
    }

    fn on_state(&self, state: SessionState) {
        self.states.lock().push(state);
    }
}

pub fn settings_with_host(api_host: &str) -> TranslatorSettings {
    TranslatorSettings {
        api_key: "sk-test".to_string(),
        api_host: api_host.to_string(),
        ..TranslatorSettings::default()
    }
}

pub fn french_request(settings: &TranslatorSettings) -> TranslationRequest {
    TranslationRequest::new("Hello", "French", ModelConfig::from(settings))
}
