//! Streaming translation sessions
//!
//! A [`TranslationSession`] owns at most one live stream. [`start`] checks
//! the request, spawns [`run_session`] on the tokio runtime and hands back a
//! [`SessionHandle`] carrying the session's [`CancellationToken`]. Starting
//! again cancels the previous token; the superseded task winds down as
//! `Cancelled` and no longer publishes to the owner's state.
//!
//! [`start`]: TranslationSession::start

use crate::llm::client::{ChatTransport, TransportError};
use crate::llm::sse::{LineBuffer, LineOutcome, parse_line};
use crate::translation::accumulator::OutputAccumulator;
use crate::translation::error::{TranslationFailure, ValidationError};
use crate::translation::request::TranslationRequest;
use futures::StreamExt;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Lifecycle of the session owner
///
/// `Idle -> Requesting -> Streaming -> {Completed | Cancelled | Failed} -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// Request issued, no body chunk received yet
    Requesting,
    /// At least one body chunk received
    Streaming,
    Completed,
    Cancelled,
    Failed,
}

impl SessionState {
    /// Whether a stream is in flight
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Requesting | SessionState::Streaming)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Completed | SessionState::Cancelled | SessionState::Failed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Requesting => "requesting",
            SessionState::Streaming => "streaming",
            SessionState::Completed => "completed",
            SessionState::Cancelled => "cancelled",
            SessionState::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a session ended, with the text accumulated up to that point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(String),
    /// Stopped by the caller; the partial output is kept
    Cancelled(String),
    Failed {
        partial: String,
        failure: TranslationFailure,
    },
}

impl SessionOutcome {
    pub fn text(&self) -> &str {
        match self {
            SessionOutcome::Completed(text) | SessionOutcome::Cancelled(text) => text,
            SessionOutcome::Failed { partial, .. } => partial,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            SessionOutcome::Completed(text) | SessionOutcome::Cancelled(text) => text,
            SessionOutcome::Failed { partial, .. } => partial,
        }
    }

    /// Terminal state matching this outcome
    pub fn state(&self) -> SessionState {
        match self {
            SessionOutcome::Completed(_) => SessionState::Completed,
            SessionOutcome::Cancelled(_) => SessionState::Cancelled,
            SessionOutcome::Failed { .. } => SessionState::Failed,
        }
    }

    pub fn failure(&self) -> Option<&TranslationFailure> {
        match self {
            SessionOutcome::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

/// Callbacks for the UI collaborator
///
/// `on_progress` receives the cumulative text, not the delta. `on_done` is
/// called exactly once per started session, whatever the outcome.
pub trait TranslationObserver: Send + Sync {
    fn on_progress(&self, cumulative: &str);

    fn on_error(&self, message: &str);

    fn on_done(&self);

    /// State transitions, in order
    fn on_state(&self, _state: SessionState) {}
}

impl<O: TranslationObserver + ?Sized> TranslationObserver for Arc<O> {
    fn on_progress(&self, cumulative: &str) {
        (**self).on_progress(cumulative);
    }

    fn on_error(&self, message: &str) {
        (**self).on_error(message);
    }

    fn on_done(&self) {
        (**self).on_done();
    }

    fn on_state(&self, state: SessionState) {
        (**self).on_state(state);
    }
}

/// Observer that ignores every callback
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TranslationObserver for NoopObserver {
    fn on_progress(&self, _cumulative: &str) {}
    fn on_error(&self, _message: &str) {}
    fn on_done(&self) {}
}

enum StreamEnd {
    Completed,
    Cancelled,
    Failed(TranslationFailure),
}

/// Drive one request to its outcome
///
/// Validation is the caller's job; [`TranslationSession::start`] does it
/// before spawning this. The token is checked ahead of every read and every
/// append, so cancelling stops accumulation before the next fragment.
pub async fn run_session<T>(
    transport: &T,
    request: &TranslationRequest,
    token: &CancellationToken,
    observer: &dyn TranslationObserver,
) -> SessionOutcome
where
    T: ChatTransport + ?Sized,
{
    let mut accumulator = OutputAccumulator::new();
    observer.on_state(SessionState::Requesting);

    let end = stream_into(transport, request, token, observer, &mut accumulator).await;

    let outcome = match end {
        StreamEnd::Completed => {
            tracing::debug!(
                fragments = accumulator.fragment_count(),
                "translation completed"
            );
            SessionOutcome::Completed(accumulator.into_text())
        }
        StreamEnd::Cancelled => {
            tracing::debug!(
                fragments = accumulator.fragment_count(),
                "translation cancelled"
            );
            SessionOutcome::Cancelled(accumulator.into_text())
        }
        StreamEnd::Failed(failure) => {
            tracing::debug!(
                detail = %failure.detail(),
                partial_len = accumulator.as_str().len(),
                "translation failed"
            );
            observer.on_error(failure.user_message());
            SessionOutcome::Failed {
                partial: accumulator.into_text(),
                failure,
            }
        }
    };

    observer.on_state(outcome.state());
    observer.on_state(SessionState::Idle);
    observer.on_done();
    outcome
}

async fn stream_into<T>(
    transport: &T,
    request: &TranslationRequest,
    token: &CancellationToken,
    observer: &dyn TranslationObserver,
    accumulator: &mut OutputAccumulator,
) -> StreamEnd
where
    T: ChatTransport + ?Sized,
{
    let body = request.to_chat_request();
    let endpoint = request.endpoint();
    tracing::debug!(
        %endpoint,
        provider = %request.model.provider,
        model = %body.model,
        "issuing translation request"
    );

    let opened = tokio::select! {
        biased;
        _ = token.cancelled() => return StreamEnd::Cancelled,
        opened = transport.open_stream(&endpoint, &request.model.api_key, &body) => opened,
    };

    let mut stream = match opened {
        Ok(stream) => stream,
        Err(err) => return StreamEnd::Failed(transport_failure(err)),
    };

    let mut buffer = LineBuffer::new();
    let mut streaming = false;

    loop {
        let next = tokio::select! {
            biased;
            _ = token.cancelled() => return StreamEnd::Cancelled,
            next = stream.next() => next,
        };

        let chunk = match next {
            Some(Ok(chunk)) => chunk,
            Some(Err(err)) => return StreamEnd::Failed(transport_failure(err)),
            None => break,
        };

        if !streaming {
            streaming = true;
            observer.on_state(SessionState::Streaming);
        }

        for line in buffer.push(&chunk) {
            if token.is_cancelled() {
                return StreamEnd::Cancelled;
            }
            apply_line(&line, accumulator, observer);
        }
    }

    if let Some(leftover) = buffer.finish() {
        if token.is_cancelled() {
            return StreamEnd::Cancelled;
        }
        apply_line(&leftover, accumulator, observer);
    }

    StreamEnd::Completed
}

fn apply_line(
    line: &str,
    accumulator: &mut OutputAccumulator,
    observer: &dyn TranslationObserver,
) {
    match parse_line(line) {
        LineOutcome::Delta(fragment) => {
            let cumulative = accumulator.push(&fragment);
            observer.on_progress(cumulative);
        }
        LineOutcome::Malformed { line, reason } => {
            tracing::warn!(%line, %reason, "skipping malformed stream line");
        }
        LineOutcome::Done | LineOutcome::Skip => {}
    }
}

fn transport_failure(err: TransportError) -> TranslationFailure {
    match err {
        TransportError::Status { status, body } => {
            tracing::error!(status, %body, "translation request rejected");
            TranslationFailure::HttpStatus(status)
        }
        other => {
            tracing::error!(error = %other, "translation stream failed");
            TranslationFailure::Unexpected(other.to_string())
        }
    }
}

/// Handle to one started session
#[derive(Debug)]
pub struct SessionHandle {
    id: u64,
    token: CancellationToken,
    task: JoinHandle<SessionOutcome>,
}

impl SessionHandle {
    /// Owner-local sequence number of this session
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stop the stream, keeping the partial output; idempotent
    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!(session = self.id, "cancelling translation");
        }
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Token that cancels this session, for wiring into other shutdown paths
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Wait for the session to end
    pub async fn wait(self) -> SessionOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(session = self.id, error = %err, "translation task aborted");
                SessionOutcome::Failed {
                    partial: String::new(),
                    failure: TranslationFailure::Unexpected(err.to_string()),
                }
            }
        }
    }
}

#[derive(Default)]
struct ActiveSession {
    generation: u64,
    token: Option<CancellationToken>,
}

struct OwnerState {
    state_tx: watch::Sender<SessionState>,
    active: Mutex<ActiveSession>,
}

impl OwnerState {
    fn publish(&self, generation: u64, state: SessionState) {
        let mut active = self.active.lock();
        if active.generation != generation {
            return;
        }
        if state == SessionState::Idle {
            active.token = None;
        }
        self.state_tx.send_replace(state);
    }
}

/// Forwards callbacks and mirrors state into the owner while current
struct OwnerObserver<O> {
    inner: O,
    owner: Arc<OwnerState>,
    generation: u64,
}

impl<O: TranslationObserver> TranslationObserver for OwnerObserver<O> {
    fn on_progress(&self, cumulative: &str) {
        self.inner.on_progress(cumulative);
    }

    fn on_error(&self, message: &str) {
        self.inner.on_error(message);
    }

    fn on_done(&self) {
        self.inner.on_done();
    }

    fn on_state(&self, state: SessionState) {
        self.owner.publish(self.generation, state);
        self.inner.on_state(state);
    }
}

/// Owner of at most one live translation stream
pub struct TranslationSession<T: ?Sized> {
    transport: Arc<T>,
    owner: Arc<OwnerState>,
}

impl<T> TranslationSession<T>
where
    T: ChatTransport + ?Sized + 'static,
{
    pub fn new(transport: Arc<T>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Idle);
        Self {
            transport,
            owner: Arc::new(OwnerState {
                state_tx,
                active: Mutex::new(ActiveSession::default()),
            }),
        }
    }

    /// Validate the request and spawn its stream
    ///
    /// A failed precondition returns before anything is spawned or sent.
    /// Must be called from within a tokio runtime.
    pub fn start<O>(
        &self,
        request: TranslationRequest,
        observer: O,
    ) -> Result<SessionHandle, ValidationError>
    where
        O: TranslationObserver + 'static,
    {
        if let Err(err) = request.validate() {
            tracing::debug!(error = %err, "translation request rejected before sending");
            return Err(err);
        }

        let token = CancellationToken::new();
        let generation = {
            let mut active = self.owner.active.lock();
            if let Some(previous) = active.token.take() {
                tracing::debug!(
                    session = active.generation,
                    "superseding active translation"
                );
                previous.cancel();
            }
            active.generation += 1;
            active.token = Some(token.clone());
            self.owner.state_tx.send_replace(SessionState::Requesting);
            active.generation
        };

        let observer = OwnerObserver {
            inner: observer,
            owner: Arc::clone(&self.owner),
            generation,
        };
        let transport = Arc::clone(&self.transport);
        let task_token = token.clone();
        let task = tokio::spawn(async move {
            run_session(&*transport, &request, &task_token, &observer).await
        });

        Ok(SessionHandle {
            id: generation,
            token,
            task,
        })
    }

    pub fn cancel(&self, handle: &SessionHandle) {
        handle.cancel();
    }

    /// Current state of the owner
    pub fn state(&self) -> SessionState {
        *self.owner.state_tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.owner.state_tx.subscribe()
    }

    /// Whether a stream is in flight
    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }
}
