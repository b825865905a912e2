//! The selector grammar (spec.md §4.4, §9): a small tagged variant rather
//! than a string-dispatch ladder, as spec.md §9 directs.

use serde::{Deserialize, Serialize};

/// The unit a `Span(...)` selector's offsets are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpanUnit {
    Char,
    Byte,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// Matches `name` or `canonicalName`.
    Name(String),
    /// `hash:<digest>`.
    Hash(String),
    /// `path:<signature>`.
    Path(String),
    /// `span:<start>:<end>` or `span:byte:<s>:<e>`.
    Span(usize, usize, SpanUnit),
    /// `@<byte>` — used by `--snipe`.
    Position(usize),
    /// `line:col`, 1-based.
    LineCol(u32, u32),
    /// Glob pattern (`*`, `?`) over names — used by `--match`/`--exclude`,
    /// not as a primary selector for editing operations.
    Glob(String),
}

impl Selector {
    /// Parse the CLI's selector string grammar (spec.md §4.4).
    pub fn parse(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix("hash:") {
            return Selector::Hash(rest.to_string());
        }
        if let Some(rest) = raw.strip_prefix("path:") {
            return Selector::Path(rest.to_string());
        }
        if let Some(rest) = raw.strip_prefix("span:byte:") {
            if let Some((s, e)) = parse_pair(rest) {
                return Selector::Span(s, e, SpanUnit::Byte);
            }
        }
        if let Some(rest) = raw.strip_prefix("span:") {
            if let Some((s, e)) = parse_pair(rest) {
                return Selector::Span(s, e, SpanUnit::Char);
            }
        }
        if let Some(rest) = raw.strip_prefix('@') {
            if let Ok(byte) = rest.parse::<usize>() {
                return Selector::Position(byte);
            }
        }
        if let Some((line, col)) = raw.split_once(':') {
            if let (Ok(l), Ok(c)) = (line.parse::<u32>(), col.parse::<u32>()) {
                return Selector::LineCol(l, c);
            }
        }
        if raw.contains('*') || raw.contains('?') {
            return Selector::Glob(raw.to_string());
        }
        Selector::Name(raw.to_string())
    }
}

fn parse_pair(s: &str) -> Option<(usize, usize)> {
    let (a, b) = s.split_once(':')?;
    Some((a.parse().ok()?, b.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name() {
        assert_eq!(Selector::parse("exports.alpha"), Selector::Name("exports.alpha".into()));
    }

    #[test]
    fn parses_hash() {
        assert_eq!(Selector::parse("hash:AbCdEfGhIjKl"), Selector::Hash("AbCdEfGhIjKl".into()));
    }

    #[test]
    fn parses_path() {
        assert_eq!(
            Selector::parse("path:module.body[0].FunctionDeclaration"),
            Selector::Path("module.body[0].FunctionDeclaration".into())
        );
    }

    #[test]
    fn parses_char_span() {
        assert_eq!(Selector::parse("span:10:20"), Selector::Span(10, 20, SpanUnit::Char));
    }

    #[test]
    fn parses_byte_span() {
        assert_eq!(Selector::parse("span:byte:10:20"), Selector::Span(10, 20, SpanUnit::Byte));
    }

    #[test]
    fn parses_position() {
        assert_eq!(Selector::parse("@128"), Selector::Position(128));
    }

    #[test]
    fn parses_line_col() {
        assert_eq!(Selector::parse("1:8"), Selector::LineCol(1, 8));
    }

    #[test]
    fn parses_glob() {
        assert_eq!(Selector::parse("handle*"), Selector::Glob("handle*".into()));
    }
}
