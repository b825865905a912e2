//! Dual char/byte spans — the addressing unit every entry and guard carries.

use serde::{Deserialize, Serialize};

/// A closed-open `[start, end)` interval over code-point (character) offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharSpan {
    pub start: usize,
    pub end: usize,
}

impl CharSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "CharSpan start must not exceed end");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// A closed-open `[start, end)` interval over UTF-8 byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ByteSpan {
    pub start: usize,
    pub end: usize,
}

impl ByteSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "ByteSpan start must not exceed end");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        &bytes[self.start..self.end]
    }
}

/// A span carried in both coordinate systems, as spec.md §3 requires for
/// every span used in file I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub chars: CharSpan,
    pub bytes: ByteSpan,
}

impl Span {
    pub fn new(char_start: usize, char_end: usize, byte_start: usize, byte_end: usize) -> Self {
        Self {
            chars: CharSpan::new(char_start, char_end),
            bytes: ByteSpan::new(byte_start, byte_end),
        }
    }

    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    pub fn length(&self) -> usize {
        self.chars.len()
    }

    pub fn slice_bytes<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        self.bytes.slice(source)
    }

    /// True if this span lies wholly inside `other` (used to validate
    /// `identifierSpan` strictly-contained-in `span`, and replace-range
    /// sub-intervals).
    pub fn contained_in(&self, other: &Span) -> bool {
        self.bytes.start >= other.bytes.start
            && self.bytes.end <= other.bytes.end
            && self.chars.start >= other.chars.start
            && self.chars.end <= other.chars.end
    }
}
