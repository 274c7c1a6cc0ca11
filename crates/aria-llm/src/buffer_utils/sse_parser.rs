use anyhow::Result;
use futures::{Stream, StreamExt};
use std::fmt::Display;

use super::buffering::CircularLineBuffer;
use crate::error::LlmError;
use crate::traits::EventStream;
use crate::StreamEvent;

/// Strategy for turning SSE `data:` payloads into stream events
pub trait SseLineParser: Send {
    /// Parse a data payload into stream events
    fn parse_data_line(&self, data: &str) -> Result<Vec<StreamEvent>>;

    /// Check if this payload signals end of stream
    fn is_done_marker(&self, data: &str) -> bool {
        data == "[DONE]"
    }
}

/// Generic SSE parser over any byte-chunk stream
///
/// Emits a final `Done` on the `[DONE]` marker and stops reading. Comment
/// lines (`:`) and non-data fields are skipped.
pub fn parse_sse_stream<S, B, E, P>(byte_stream: S, parser: P) -> EventStream
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
    P: SseLineParser + 'static,
{
    Box::pin(async_stream::stream! {
        let mut byte_chunks = Box::pin(byte_stream);
        let mut buffer = CircularLineBuffer::with_capacity(8192);
        let mut finished = false;

        while !finished {
            let Some(chunk_result) = byte_chunks.next().await else {
                break;
            };

            match chunk_result {
                Ok(bytes) => {
                    buffer.extend(bytes.as_ref());

                    while let Some(line_result) = buffer.next_line() {
                        match line_result {
                            Ok(line) => {
                                for item in handle_line(&line, &parser, &mut finished) {
                                    yield item;
                                }
                                if finished {
                                    break;
                                }
                            }
                            Err(e) => yield Err(anyhow::Error::from(e)),
                        }
                    }
                }
                Err(e) => {
                    yield Err(anyhow::Error::from(LlmError::Stream(e.to_string())));
                    finished = true;
                }
            }
        }

        // Upstream closed without a trailing newline
        if !finished {
            if let Some(line_result) = buffer.take_remainder() {
                match line_result {
                    Ok(line) => {
                        for item in handle_line(&line, &parser, &mut finished) {
                            yield item;
                        }
                    }
                    Err(e) => yield Err(anyhow::Error::from(e)),
                }
            }
        }
    })
}

fn handle_line<P: SseLineParser>(
    line: &str,
    parser: &P,
    finished: &mut bool,
) -> Vec<Result<StreamEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(':') {
        return Vec::new();
    }

    let Some(data) = line.strip_prefix("data:") else {
        return Vec::new();
    };
    let data = data.trim_start();

    if parser.is_done_marker(data) {
        *finished = true;
        return vec![Ok(StreamEvent::Done { finish_reason: None })];
    }

    match parser.parse_data_line(data) {
        Ok(events) => events.into_iter().map(Ok).collect(),
        Err(e) => vec![Err(e)],
    }
}
