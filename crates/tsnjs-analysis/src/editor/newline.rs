//! Newline guard (spec.md §4.5 stage 5): detect a text's dominant newline
//! style and normalise a replacement snippet to match.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewlineStyle {
    Lf,
    Crlf,
    /// Single-line file/snippet: no newline present to judge by.
    None,
}

impl NewlineStyle {
    /// Count CRLF vs. bare-LF occurrences; CRLF wins on any detected
    /// instance, since a file normalised that way would not mix styles.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            NewlineStyle::Crlf
        } else if text.contains('\n') {
            NewlineStyle::Lf
        } else {
            NewlineStyle::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NewlineStyle::Lf => "lf",
            NewlineStyle::Crlf => "crlf",
            NewlineStyle::None => "none",
        }
    }
}

/// Convert `text`'s line endings to `target`. `None` leaves the text as-is
/// (nothing to normalise in a single-line snippet).
pub fn normalise_to(text: &str, target: NewlineStyle) -> String {
    let lf_form = text.replace("\r\n", "\n");
    match target {
        NewlineStyle::Crlf => lf_form.replace('\n', "\r\n"),
        NewlineStyle::Lf | NewlineStyle::None => lf_form,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewlineReport {
    pub file_style: NewlineStyle,
    pub replacement_style: NewlineStyle,
    pub target_style: NewlineStyle,
    pub converted: bool,
    pub byte_delta: i64,
}

pub fn evaluate(file_text: &str, replacement: &str) -> (String, NewlineReport) {
    let file_style = NewlineStyle::detect(file_text);
    let replacement_style = NewlineStyle::detect(replacement);

    let target_style = if file_style == NewlineStyle::None { replacement_style } else { file_style };
    let converted = replacement_style != target_style && target_style != NewlineStyle::None;
    let normalised = if converted { normalise_to(replacement, target_style) } else { replacement.to_string() };
    let byte_delta = normalised.len() as i64 - replacement.len() as i64;

    (normalised, NewlineReport { file_style, replacement_style, target_style, converted, byte_delta })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_crlf() {
        assert_eq!(NewlineStyle::detect("a\r\nb\r\n"), NewlineStyle::Crlf);
    }

    #[test]
    fn detects_lf() {
        assert_eq!(NewlineStyle::detect("a\nb\n"), NewlineStyle::Lf);
    }

    #[test]
    fn detects_none_for_single_line() {
        assert_eq!(NewlineStyle::detect("a single line"), NewlineStyle::None);
    }

    #[test]
    fn converts_lf_replacement_to_crlf_file() {
        let (normalised, report) = evaluate("const x = 1;\r\nconst y = 2;\r\n", "function f() {\nreturn 1;\n}");
        assert!(normalised.contains("\r\n"));
        assert!(report.converted);
        assert_eq!(report.file_style, NewlineStyle::Crlf);
        assert_eq!(report.target_style, NewlineStyle::Crlf);
        assert!(report.byte_delta > 0);
    }

    #[test]
    fn leaves_matching_style_unconverted() {
        let (normalised, report) = evaluate("const x = 1;\n", "function f() {\nreturn 1;\n}");
        assert!(!report.converted);
        assert_eq!(normalised, "function f() {\nreturn 1;\n}");
    }
}
