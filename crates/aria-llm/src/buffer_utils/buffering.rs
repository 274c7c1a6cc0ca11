use std::collections::VecDeque;

use crate::error::LlmError;

/// Line buffer for SSE parsing
///
/// Network chunks rarely align with event lines, so bytes accumulate here
/// until a full `\n`-terminated line is available. `\r\n` endings are trimmed.
pub struct CircularLineBuffer {
    buffer: VecDeque<u8>,
}

impl CircularLineBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
        }
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Extract the next complete line, or None if no newline is buffered yet
    pub fn next_line(&mut self) -> Option<Result<String, LlmError>> {
        let newline_pos = self.buffer.iter().position(|&b| b == b'\n')?;
        let line_bytes: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
        Some(Self::decode(&line_bytes))
    }

    /// Take whatever is left once the upstream has closed without a final newline
    pub fn take_remainder(&mut self) -> Option<Result<String, LlmError>> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest: Vec<u8> = self.buffer.drain(..).collect();
        Some(Self::decode(&rest))
    }

    fn decode(bytes: &[u8]) -> Result<String, LlmError> {
        std::str::from_utf8(bytes)
            .map(|s| s.trim_end_matches(['\r', '\n']).to_string())
            .map_err(|e| LlmError::Stream(format!("Invalid UTF-8: {}", e)))
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_split_across_chunks() {
        let mut buffer = CircularLineBuffer::with_capacity(64);

        buffer.extend(b"data: {\"a\"");
        assert!(buffer.next_line().is_none());

        buffer.extend(b":1}\n\ndata: x\n");
        assert_eq!(buffer.next_line().unwrap().unwrap(), "data: {\"a\":1}");
        assert_eq!(buffer.next_line().unwrap().unwrap(), "");
        assert_eq!(buffer.next_line().unwrap().unwrap(), "data: x");
        assert!(buffer.next_line().is_none());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_crlf_is_trimmed() {
        let mut buffer = CircularLineBuffer::with_capacity(16);
        buffer.extend(b"data: hi\r\n");
        assert_eq!(buffer.next_line().unwrap().unwrap(), "data: hi");
    }

    #[test]
    fn test_remainder_without_newline() {
        let mut buffer = CircularLineBuffer::with_capacity(16);
        buffer.extend(b"data: [DONE]");
        assert!(buffer.next_line().is_none());
        assert_eq!(buffer.take_remainder().unwrap().unwrap(), "data: [DONE]");
        assert!(buffer.take_remainder().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let mut buffer = CircularLineBuffer::with_capacity(16);
        buffer.extend(&[0xff, 0xfe, b'\n']);
        assert!(buffer.next_line().unwrap().is_err());
    }
}
