//! Terminal rendering of a streaming translation
//!
//! Sessions report the cumulative text on every fragment; the renderer keeps
//! track of how much it already printed and writes only the new suffix, which
//! gives the typing effect without clearing the screen.

use crate::translation::{SessionState, TranslationObserver};
use crate::ui::spinner::Spinner;
use crate::ui::styled::style_error;
use parking_lot::Mutex;
use std::io::{self, Write};

struct RenderState<W> {
    writer: W,
    printed: usize,
}

/// Observer that streams the translation to a writer (stdout by default)
///
/// Errors are written to stderr in red. The spinner, if any, is cleared on
/// the first fragment or at the end of the session.
pub struct TerminalRenderer<W: Write + Send = io::Stdout> {
    state: Mutex<RenderState<W>>,
    spinner: Option<Spinner>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            state: Mutex::new(RenderState { writer, printed: 0 }),
            spinner: None,
        }
    }

    pub fn with_spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = Some(spinner);
        self
    }

    /// Bytes of translated text written so far
    pub fn printed_len(&self) -> usize {
        self.state.lock().printed
    }

    fn clear_spinner(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }

    fn write_suffix(&self, cumulative: &str) -> io::Result<()> {
        let mut state = self.state.lock();
        let suffix = cumulative.get(state.printed..).unwrap_or(cumulative);
        state.writer.write_all(suffix.as_bytes())?;
        state.writer.flush()?;
        state.printed = cumulative.len();
        Ok(())
    }

    /// Terminate the printed line, if anything was printed
    fn end_line(&self, reset: bool) -> io::Result<()> {
        let mut state = self.state.lock();
        if state.printed == 0 {
            return Ok(());
        }
        if reset {
            state.printed = 0;
        }
        writeln!(state.writer)?;
        state.writer.flush()
    }
}

impl<W: Write + Send> TranslationObserver for TerminalRenderer<W> {
    fn on_progress(&self, cumulative: &str) {
        self.clear_spinner();
        if let Err(err) = self.write_suffix(cumulative) {
            tracing::warn!(error = %err, "failed to write translation output");
        }
    }

    fn on_error(&self, message: &str) {
        self.clear_spinner();
        if let Err(err) = self.end_line(false) {
            tracing::warn!(error = %err, "failed to finish translation output");
        }
        eprintln!("{}", style_error(message));
    }

    fn on_done(&self) {
        self.clear_spinner();
        if let Err(err) = self.end_line(true) {
            tracing::warn!(error = %err, "failed to finish translation output");
        }
    }

    fn on_state(&self, state: SessionState) {
        tracing::trace!(%state, "session state");
        if let (Some(spinner), SessionState::Streaming) = (&self.spinner, state) {
            spinner.set_message("Receiving translation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tracing_test::traced_test;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_renderer_writes_only_new_suffix() {
        let buffer = SharedBuffer::default();
        let renderer =
            TerminalRenderer::with_writer(buffer.clone()).with_spinner(Spinner::hidden());

        renderer.on_state(SessionState::Streaming);
        renderer.on_progress("Bon");
        renderer.on_progress("Bonjour");
        renderer.on_progress("Bonjour à");
        assert_eq!(buffer.contents(), "Bonjour à");
        assert_eq!(renderer.printed_len(), "Bonjour à".len());

        renderer.on_done();
        assert_eq!(buffer.contents(), "Bonjour à\n");
    }

    #[test]
    fn test_renderer_no_newline_without_output() {
        let buffer = SharedBuffer::default();
        let renderer = TerminalRenderer::with_writer(buffer.clone());
        renderer.on_done();
        assert_eq!(buffer.contents(), "");
    }

    /// Accepts one write, then behaves like a closed pipe
    struct ClosedAfterFirstWrite {
        writes: usize,
    }

    impl Write for ClosedAfterFirstWrite {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes += 1;
            if self.writes > 1 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    #[traced_test]
    fn test_failed_line_ending_is_logged() {
        let renderer = TerminalRenderer::with_writer(ClosedAfterFirstWrite { writes: 0 });
        renderer.on_progress("Bon");
        assert_eq!(renderer.printed_len(), 3);

        renderer.on_done();
        assert_eq!(renderer.printed_len(), 0);
        assert!(logs_contain("failed to finish translation output"));
        assert!(logs_contain("pipe closed"));
    }
}
