//! `--search-text` (spec.md §6, contract supplemented in SPEC_FULL.md §2):
//! a plain regex/substring scan over file text, reporting line/col hits via
//! the Position Mapper.

use regex::Regex;

use crate::mapper::PositionMapper;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextHit {
    pub line: u32,
    pub column: u32,
    pub byte_offset: usize,
    pub matched_text: String,
}

/// `query` is first tried as a regex; if it fails to compile, it is matched
/// literally (so a plain substring query like `TODO:` never errors out).
pub fn search_text(source: &str, query: &str) -> Vec<TextHit> {
    let mapper = PositionMapper::new(source);
    let pattern = Regex::new(query).unwrap_or_else(|_| Regex::new(&regex::escape(query)).expect("escaped literal is always a valid pattern"));

    pattern
        .find_iter(source)
        .map(|m| {
            let char_offset = mapper.byte_to_char(m.start());
            let (line, column) = mapper.offset_to_line_col(char_offset);
            TextHit { line, column, byte_offset: m.start(), matched_text: m.as_str().to_string() }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_literal_substring() {
        let hits = search_text("const x = 1;\nconst y = 2;\n", "const");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].line, 1);
        assert_eq!(hits[1].line, 2);
    }

    #[test]
    fn finds_regex_pattern() {
        let hits = search_text("function alpha() {}\nfunction beta() {}\n", r"function (\w+)");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn falls_back_to_literal_on_invalid_regex() {
        let hits = search_text("a price (discount", "(discount");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].matched_text, "(discount");
    }
}
