//! Bounded accumulation of child-process stdout.
//!
//! [`CaptureBuffer`] keeps what the caller asked for. [`MarkerScanner`] watches the
//! same stream for [`FAILURE_MARKER`](crate::config::FAILURE_MARKER) regardless of the
//! capture policy, so a panic reported on stdout is never mistaken for success.

use crate::config::TRUNCATION_MARKER;

/// Byte buffer that collapses to [`TRUNCATION_MARKER`] once it exceeds its limit.
#[derive(Debug)]
pub struct CaptureBuffer {
    bytes: Vec<u8>,
    limit: usize,
    truncated: bool,
}

impl CaptureBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            bytes: Vec::new(),
            limit,
            truncated: false,
        }
    }

    /// Append a chunk. Once truncated, further chunks are dropped.
    pub fn push(&mut self, chunk: &[u8]) {
        if self.truncated {
            return;
        }
        self.bytes.extend_from_slice(chunk);
        if self.bytes.len() > self.limit {
            tracing::debug!(limit = self.limit, "captured output exceeded limit, truncating");
            self.bytes = TRUNCATION_MARKER.as_bytes().to_vec();
            self.truncated = true;
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn into_string(self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Streaming search for a fixed marker that may straddle chunk boundaries.
///
/// Before the marker is seen only `marker.len() - 1` trailing bytes are held. After
/// it is seen, everything from the marker onward goes into a [`CaptureBuffer`].
#[derive(Debug)]
pub struct MarkerScanner {
    marker: &'static [u8],
    carry: Vec<u8>,
    tail: Option<CaptureBuffer>,
    limit: usize,
}

impl MarkerScanner {
    pub fn new(marker: &'static str, limit: usize) -> Self {
        Self {
            marker: marker.as_bytes(),
            carry: Vec::new(),
            tail: None,
            limit,
        }
    }

    pub fn push(&mut self, chunk: &[u8]) {
        if let Some(tail) = self.tail.as_mut() {
            tail.push(chunk);
            return;
        }
        if self.marker.is_empty() {
            return;
        }

        let mut window = std::mem::take(&mut self.carry);
        window.extend_from_slice(chunk);

        match find(&window, self.marker) {
            Some(start) => {
                let mut tail = CaptureBuffer::new(self.limit);
                tail.push(&window[start..]);
                self.tail = Some(tail);
            }
            None => {
                let keep = self.marker.len() - 1;
                let from = window.len().saturating_sub(keep);
                self.carry = window.split_off(from);
            }
        }
    }

    pub fn found(&self) -> bool {
        self.tail.is_some()
    }

    /// Output from the first marker onward, if the marker was seen.
    pub fn into_failure(self) -> Option<String> {
        self.tail.map(CaptureBuffer::into_string)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
