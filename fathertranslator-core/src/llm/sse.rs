//! Incremental decoding of chat-completion event streams
//!
//! The response body arrives as arbitrary byte chunks. [`LineBuffer`] holds
//! the trailing partial line between reads and hands back only complete
//! lines; [`parse_line`] turns one line into a [`LineOutcome`]. Both are
//! plain values so a chunk sequence can be folded without any I/O.

use crate::config::constants::sse;
use crate::llm::types::ChatCompletionChunk;

/// Result of interpreting one complete stream line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Text fragment to append to the output
    Delta(String),
    /// Blank line, or an event without content
    Skip,
    /// The `[DONE]` terminator
    Done,
    /// Line that could not be decoded; logged and skipped by callers
    Malformed { line: String, reason: String },
}

/// Interpret one complete line of the stream
pub fn parse_line(raw: &str) -> LineOutcome {
    let payload = raw.strip_prefix(sse::DATA_PREFIX).unwrap_or(raw).trim();

    if payload.is_empty() {
        return LineOutcome::Skip;
    }
    if payload == sse::DONE_MARKER {
        return LineOutcome::Done;
    }

    let chunk: ChatCompletionChunk = match serde_json::from_str(payload) {
        Ok(chunk) => chunk,
        Err(err) => {
            return LineOutcome::Malformed {
                line: payload.to_string(),
                reason: err.to_string(),
            };
        }
    };

    let Some(first) = chunk.choices.into_iter().next() else {
        return LineOutcome::Malformed {
            line: payload.to_string(),
            reason: "event has no choices".to_string(),
        };
    };

    match first.delta.content {
        Some(content) if !content.is_empty() => LineOutcome::Delta(content),
        _ => LineOutcome::Skip,
    }
}

/// Byte buffer that yields complete newline-terminated lines
///
/// Bytes are kept raw until a full line is available, so a multi-byte UTF-8
/// character split across two reads is decoded intact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completed
    ///
    /// The trailing partial line, if any, stays buffered for the next call.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let Some(last_newline) = self.pending.iter().rposition(|byte| *byte == b'\n') else {
            return Vec::new();
        };

        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);

        complete[..complete.len() - 1]
            .split(|byte| *byte == b'\n')
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect()
    }

    /// Consume the buffer, returning the leftover text if it is not blank
    pub fn finish(self) -> Option<String> {
        let leftover = String::from_utf8_lossy(&self.pending).into_owned();
        if leftover.trim().is_empty() {
            None
        } else {
            Some(leftover)
        }
    }

    /// Bytes held back waiting for a newline
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Result of folding a whole chunk sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedStream {
    /// Content fragments in arrival order
    pub fragments: Vec<String>,
    /// Lines that failed to decode
    pub malformed: Vec<String>,
    /// Whether a `[DONE]` marker was seen
    pub saw_done: bool,
}

impl DecodedStream {
    /// Concatenation of all fragments
    pub fn text(&self) -> String {
        self.fragments.concat()
    }

    fn absorb(mut self, outcome: LineOutcome) -> Self {
        match outcome {
            LineOutcome::Delta(fragment) => self.fragments.push(fragment),
            LineOutcome::Done => self.saw_done = true,
            LineOutcome::Malformed { line, .. } => self.malformed.push(line),
            LineOutcome::Skip => {}
        }
        self
    }
}

/// Fold a synchronous chunk sequence with the same rules as a live session
pub fn decode_stream<I, C>(chunks: I) -> DecodedStream
where
    I: IntoIterator<Item = C>,
    C: AsRef<[u8]>,
{
    let (buffer, decoded) = chunks.into_iter().fold(
        (LineBuffer::new(), DecodedStream::default()),
        |(mut buffer, decoded), chunk| {
            let decoded = buffer
                .push(chunk.as_ref())
                .iter()
                .map(|line| parse_line(line))
                .fold(decoded, DecodedStream::absorb);
            (buffer, decoded)
        },
    );

    match buffer.finish() {
        Some(leftover) => decoded.absorb(parse_line(&leftover)),
        None => decoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_line(content: &str) -> String {
        format!("data: {{\"choices\":[{{\"delta\":{{\"content\":\"{content}\"}}}}]}}\n")
    }

    #[test]
    fn test_parse_line_delta() {
        assert_eq!(
            parse_line(r#"data: {"choices":[{"delta":{"content":"Hola"}}]}"#),
            LineOutcome::Delta("Hola".to_string())
        );
    }

    #[test]
    fn test_parse_line_without_prefix() {
        assert_eq!(
            parse_line(r#"  {"choices":[{"delta":{"content":"x"}}]}  "#),
            LineOutcome::Delta("x".to_string())
        );
    }

    #[test]
    fn test_parse_line_done_and_blank() {
        assert_eq!(parse_line("data: [DONE]"), LineOutcome::Done);
        assert_eq!(parse_line("[DONE]\r"), LineOutcome::Done);
        assert_eq!(parse_line(""), LineOutcome::Skip);
        assert_eq!(parse_line("data: "), LineOutcome::Skip);
        assert_eq!(parse_line("\r"), LineOutcome::Skip);
    }

    #[test]
    fn test_parse_line_without_content() {
        assert_eq!(
            parse_line(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#),
            LineOutcome::Skip
        );
        assert_eq!(
            parse_line(r#"data: {"choices":[{"delta":{"content":""}}]}"#),
            LineOutcome::Skip
        );
        assert_eq!(
            parse_line(r#"data: {"choices":[{"delta":{"content":null},"finish_reason":"stop"}]}"#),
            LineOutcome::Skip
        );
    }

    #[test]
    fn test_parse_line_malformed() {
        assert!(matches!(
            parse_line("data: {not json"),
            LineOutcome::Malformed { ref line, .. } if line == "{not json"
        ));
        assert!(matches!(
            parse_line(r#"data: {"choices":[]}"#),
            LineOutcome::Malformed { .. }
        ));
        assert!(matches!(
            parse_line(r#"data: {"error":{"message":"boom"}}"#),
            LineOutcome::Malformed { .. }
        ));
    }

    #[test]
    fn test_line_buffer_holds_partial_line() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.push(b"data: {\"choices\":[{\"delta\":").is_empty());
        assert!(buffer.pending_len() > 0);

        let lines = buffer.push(b"{\"content\":\"Hi\"}}]}\n");
        assert_eq!(lines, vec![r#"data: {"choices":[{"delta":{"content":"Hi"}}]}"#]);
        assert_eq!(buffer.pending_len(), 0);
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_line_buffer_multiple_lines_and_remainder() {
        let mut buffer = LineBuffer::new();
        let lines = buffer.push(b"one\n\ntwo\nthr");
        assert_eq!(lines, vec!["one", "", "two"]);
        assert_eq!(buffer.finish().as_deref(), Some("thr"));
    }

    #[test]
    fn test_line_buffer_reassembles_split_utf8() {
        let text = data_line("é");
        let bytes = text.as_bytes();
        let split = text.find('é').unwrap() + 1;

        let mut buffer = LineBuffer::new();
        assert!(buffer.push(&bytes[..split]).is_empty());
        let lines = buffer.push(&bytes[split..]);
        assert_eq!(parse_line(&lines[0]), LineOutcome::Delta("é".to_string()));
    }

    #[test]
    fn test_decode_stream_split_across_reads_appends_once() {
        let decoded = decode_stream([
            "data: {\"choices\":[{\"delta\":".as_bytes(),
            "{\"content\":\"Hi\"}}]}\n".as_bytes(),
        ]);
        assert_eq!(decoded.fragments, vec!["Hi"]);
        assert!(decoded.malformed.is_empty());
    }

    #[test]
    fn test_decode_stream_skips_malformed_and_continues() {
        let input = format!("{}data: {{not json\n{}data: [DONE]\n", data_line("A"), data_line("B"));
        let decoded = decode_stream([input.as_bytes()]);
        assert_eq!(decoded.text(), "AB");
        assert_eq!(decoded.malformed, vec!["{not json"]);
        assert!(decoded.saw_done);
    }

    #[test]
    fn test_decode_stream_parses_leftover_without_newline() {
        let decoded = decode_stream([
            data_line("Bon"),
            r#"data: {"choices":[{"delta":{"content":"jour"}}]}"#.to_string(),
        ]);
        assert_eq!(decoded.text(), "Bonjour");
    }

    #[test]
    fn test_decode_stream_preserves_arrival_order_byte_by_byte() {
        let input = format!("{}{}{}", data_line("a"), data_line("b"), data_line("c"));
        let chunks: Vec<Vec<u8>> = input.bytes().map(|b| vec![b]).collect();
        let decoded = decode_stream(chunks);
        assert_eq!(decoded.fragments, vec!["a", "b", "c"]);
    }
}
