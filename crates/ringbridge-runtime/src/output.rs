//! Fixed-capacity output buffer.
//!
//! Text is accepted whole or not at all: an append goes through iff the
//! buffer length stays strictly below `capacity - 1` (one slot is kept for
//! the C terminator). A rejected append leaves the buffer untouched and
//! raises the sticky `truncated` flag; later appends that still fit are
//! accepted.

use tracing::warn;

/// Default capacity: 512 KiB
pub const OUTPUT_CAPACITY: usize = 512 * 1024;

/// Accumulated output of one run.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    text: String,
    capacity: usize,
    truncated: bool,
}

impl OutputBuffer {
    /// Create an empty buffer with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(OUTPUT_CAPACITY)
    }

    /// Create an empty buffer holding at most `capacity - 2` bytes of text
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::new(),
            capacity,
            truncated: false,
        }
    }

    /// Clear all text and the truncation flag
    pub fn reset(&mut self) {
        self.text.clear();
        self.truncated = false;
    }

    /// Append `text` if it fits. Returns whether it was appended.
    pub fn append_text(&mut self, text: &str) -> bool {
        let fits = self.text.len() + text.len() < self.capacity.saturating_sub(1);
        if fits {
            self.text.push_str(text);
        } else if !self.truncated {
            self.truncated = true;
            warn!(
                len = self.text.len(),
                dropped = text.len(),
                capacity = self.capacity,
                "output buffer full, dropping appends"
            );
        }
        fits
    }

    /// Append text from a possibly-null source. `None` is a no-op.
    pub fn append_opt(&mut self, text: Option<&str>) -> bool {
        match text {
            Some(text) => self.append_text(text),
            None => false,
        }
    }

    /// Append a number formatted by [`crate::number::format_number`]
    pub fn append_number(&mut self, value: f64) -> bool {
        self.append_text(&crate::number::format_number(value))
    }

    /// Accumulated text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Accumulated length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True in the `Empty` state
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Capacity this buffer was created with
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether any append has been dropped since the last reset
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Take the accumulated text
    pub fn into_string(self) -> String {
        self.text
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
