//! Fixed-capacity field buffers
//!
//! Every textual field on the panel lives in a [`FieldBuf`]: a byte
//! buffer with a hard capacity and an explicit length. All bounds checks
//! for incoming field data happen here, in one place, instead of being
//! repeated per field.

use heapless::Vec;

/// A fixed-capacity byte buffer holding one display field.
///
/// `N` is the content capacity in bytes. [`push`](FieldBuf::push)
/// refuses bytes beyond it; the caller decides whether a full buffer
/// ends the field or merely drops the byte.
///
/// Contents are raw bytes, not guaranteed UTF-8 - the serial wire may
/// carry Latin-1 extended characters. [`as_str`](FieldBuf::as_str) gives
/// a checked UTF-8 view for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBuf<const N: usize> {
    buf: Vec<u8, N>,
}

impl<const N: usize> FieldBuf<N> {
    /// An empty field.
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Append one byte. Returns `false` when the buffer is full and the
    /// byte was dropped.
    pub fn push(&mut self, byte: u8) -> bool {
        self.buf.push(byte).is_ok()
    }

    /// Discard the contents.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Replace the contents with `text`, truncated at the capacity.
    pub fn set(&mut self, text: &str) {
        self.buf.clear();
        for &byte in text.as_bytes().iter().take(N) {
            // Cannot fail: we take at most N bytes into an empty buffer
            let _ = self.buf.push(byte);
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buf.is_full()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// UTF-8 view of the contents. Non-UTF-8 wire content renders as an
    /// empty field rather than panicking.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }
}

impl<const N: usize> Default for FieldBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}
