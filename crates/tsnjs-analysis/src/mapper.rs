//! Position Mapper (C2, spec.md §4.2) — built once per file, consulted by
//! every other component. Translates freely between char offsets (what the
//! parser's spans use), byte offsets (what file I/O and tree-sitter use),
//! and 1-based (line, column) pairs measured in code points.

/// A char↔byte↔(line,col) mapper over one source string, built once and
/// reused for the lifetime of a single command invocation.
pub struct PositionMapper {
    /// `byte_at_char[i]` is the byte offset of the i-th code point.
    /// Has `char_count + 1` entries; the last is the byte length of the
    /// source, acting as an end-of-file sentinel.
    byte_at_char: Vec<usize>,
    /// `char_at_line_start[i]` is the char offset of the first code point
    /// of (0-based) line `i`.
    char_at_line_start: Vec<usize>,
}

impl PositionMapper {
    pub fn new(source: &str) -> Self {
        let mut byte_at_char = Vec::with_capacity(source.len() + 1);
        let mut char_at_line_start = vec![0usize];

        let mut char_idx = 0usize;
        for (byte_idx, ch) in source.char_indices() {
            byte_at_char.push(byte_idx);
            if ch == '\n' {
                char_at_line_start.push(char_idx + 1);
            }
            char_idx += 1;
        }
        byte_at_char.push(source.len());

        Self {
            byte_at_char,
            char_at_line_start,
        }
    }

    pub fn char_count(&self) -> usize {
        self.byte_at_char.len().saturating_sub(1)
    }

    /// Convert a char (code-point) offset to a byte offset.
    pub fn char_to_byte(&self, offset: usize) -> usize {
        self.byte_at_char[offset.min(self.byte_at_char.len() - 1)]
    }

    /// Convert a byte offset to a char offset. The byte offset MUST fall on
    /// a code-point boundary (true for every offset the parser produces).
    pub fn byte_to_char(&self, byte: usize) -> usize {
        match self.byte_at_char.binary_search(&byte) {
            Ok(idx) => idx,
            Err(idx) => idx.min(self.char_count()),
        }
    }

    /// Convert a char offset to a 1-based (line, column) pair, column in
    /// code points.
    pub fn offset_to_line_col(&self, offset: usize) -> (u32, u32) {
        let line_idx = match self.char_at_line_start.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let line_start = self.char_at_line_start[line_idx];
        ((line_idx + 1) as u32, (offset - line_start + 1) as u32)
    }

    /// Convert a 1-based (line, column) pair to a char offset.
    pub fn line_col_to_offset(&self, line: u32, column: u32) -> Option<usize> {
        let line_idx = (line as usize).checked_sub(1)?;
        let line_start = *self.char_at_line_start.get(line_idx)?;
        Some(line_start + (column as usize).saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_ascii() {
        let src = "const x = 1;\nconst y = 2;\n";
        let m = PositionMapper::new(src);
        for offset in 0..=m.char_count() {
            let byte = m.char_to_byte(offset);
            assert_eq!(m.byte_to_char(byte), offset);
        }
    }

    #[test]
    fn line_col_round_trips() {
        let src = "const x = 1;\nconst y = 2;\n";
        let m = PositionMapper::new(src);
        let offset = src.find("y").unwrap();
        let (line, col) = m.offset_to_line_col(offset);
        assert_eq!((line, col), (2, 7));
        assert_eq!(m.line_col_to_offset(line, col), Some(offset));
    }

    #[test]
    fn handles_multibyte_code_points() {
        let src = "const emoji = '😀';\n";
        let m = PositionMapper::new(src);
        // '😀' is one code point but 4 bytes in UTF-8.
        let char_offset = src.chars().position(|c| c == '😀').unwrap();
        let byte_offset = m.char_to_byte(char_offset);
        assert_eq!(&src.as_bytes()[byte_offset..byte_offset + 4], "😀".as_bytes());
        assert_eq!(m.byte_to_char(byte_offset), char_offset);
    }
}

#[cfg(test)]
mod span_integrity_properties {
    use super::*;
    use proptest::prelude::*;

    // spec.md §8's span-integrity invariant: for every char offset a source
    // can hold, byteToChar(charToByte(offset)) == offset, over arbitrary
    // (including multibyte) generated source text.
    proptest! {
        #[test]
        fn char_byte_round_trip_holds_for_any_source(src in any::<String>()) {
            let m = PositionMapper::new(&src);
            for offset in 0..=m.char_count() {
                let byte = m.char_to_byte(offset);
                prop_assert_eq!(m.byte_to_char(byte), offset);
            }
        }

        #[test]
        fn line_col_round_trip_holds_for_any_offset(src in "[a-zA-Z0-9_ \\n]{0,200}") {
            let m = PositionMapper::new(&src);
            for offset in 0..=m.char_count() {
                let (line, col) = m.offset_to_line_col(offset);
                prop_assert_eq!(m.line_col_to_offset(line, col), Some(offset));
            }
        }
    }
}
